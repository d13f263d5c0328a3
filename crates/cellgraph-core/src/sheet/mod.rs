//! Sheet state and logic.

mod eval;
mod ops;
mod print;
mod state;

pub use state::{CellMut, CellView, Sheet};
