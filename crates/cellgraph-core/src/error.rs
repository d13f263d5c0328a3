//! Error types for Cellgraph core.

use thiserror::Error;

use cellgraph_engine::engine::{FormulaError, Position};

/// Structural failures of sheet operations. Each one aborts the operation
/// it came from and leaves the sheet unchanged.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid position ({row}, {col})")]
    InvalidPosition { row: i32, col: i32 },

    #[error(transparent)]
    FormulaSyntax(#[from] FormulaError),

    #[error("Circular dependency detected at {position}")]
    CircularDependency {
        position: Position,
        /// Reference chain from `position` back to itself.
        path: Vec<Position>,
    },
}

pub type Result<T> = std::result::Result<T, SheetError>;
