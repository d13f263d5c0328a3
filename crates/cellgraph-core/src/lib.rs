//! cellgraph-core - Cells, the sheet, its dependency graph and cache invalidation.

pub mod cell;
pub mod error;
pub mod sheet;

pub use cell::{Cell, CellContent, ESCAPE_SIGN, FORMULA_SIGN};
pub use error::{Result, SheetError};
pub use sheet::{CellMut, CellView, Sheet};

pub use cellgraph_engine::engine::{ErrorKind, Position, Size, Value};
