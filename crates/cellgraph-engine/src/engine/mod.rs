//! Spreadsheet engine API.
//!
//! This module provides the leaf models and the formula collaborator:
//!
//! - [`Position`], [`Size`] - Cell addressing (A1 notation ↔ row/col indices)
//! - [`Value`], [`ErrorKind`] - Computed cell values and value-level errors
//! - [`Formula`], [`parse_formula`] - Arithmetic formulas over cell references
//! - [`detect_cycle`] - Circular dependency detection
//! - [`format_number`] - Format numbers for display

mod cycle;
mod format;
mod formula;
mod parser;
mod position;
mod value;

pub use cycle::detect_cycle;
pub use format::format_number;
pub use formula::{Formula, FormulaError, FormulaResult, parse_formula};
pub use position::{MAX_COLS, MAX_ROWS, Position, Size};
pub use value::{ErrorKind, Value};
