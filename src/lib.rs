//! Cellgraph - the evaluation core of a spreadsheet.
//!
//! A [`Sheet`] holds text, numbers and `=` formulas at [`Position`]s,
//! refuses circular references, and recomputes values lazily: changing a
//! cell drops the memoized values of everything that transitively reads it.
//!
//! ```
//! use cellgraph::{Position, Sheet, Value};
//!
//! let mut sheet = Sheet::new();
//! sheet.set_cell(Position::from_a1("A1"), "20").unwrap();
//! sheet.set_cell(Position::from_a1("A2"), "=A1*2+2").unwrap();
//! let a2 = sheet.get_cell(Position::from_a1("A2")).unwrap().unwrap();
//! assert_eq!(a2.value(), Value::Number(42.0));
//! ```

pub use cellgraph_core::{
    Cell, CellContent, CellMut, CellView, ESCAPE_SIGN, FORMULA_SIGN, Result, Sheet, SheetError,
};
pub use cellgraph_engine::engine::{
    ErrorKind, Formula, FormulaError, MAX_COLS, MAX_ROWS, Position, Size, Value, format_number,
    parse_formula,
};
