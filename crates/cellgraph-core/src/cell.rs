//! Cell data structures.
//!
//! - [`CellContent`] - What a cell holds: nothing, text, or a parsed formula
//! - [`Cell`] - Raw input text, its content, and a memoized computed value
//!
//! A cell never holds edges to other cells. It only declares the positions
//! it reads; the sheet turns those declarations into a graph.

use std::cell::OnceCell;

use cellgraph_engine::engine::{
    Formula, FormulaError, FormulaResult, Position, Value, parse_formula,
};

/// Leading character that marks formula input.
pub const FORMULA_SIGN: char = '=';
/// Leading character that forces the rest of the input to be read as text.
pub const ESCAPE_SIGN: char = '\'';

/// The type of content stored in a cell, chosen from the shape of its text.
#[derive(Clone, Debug)]
pub enum CellContent {
    Empty,
    Text,
    Formula(Formula),
}

/// A cell in the sheet.
#[derive(Clone, Debug)]
pub struct Cell {
    raw: String,
    content: CellContent,
    /// Computed value. Filled on first read through a shared reference and
    /// emptied by [`Cell::invalidate_cache`]; the sheet is single-threaded,
    /// so no locking is involved.
    cache: OnceCell<Value>,
}

impl Cell {
    pub fn empty() -> Cell {
        Cell {
            raw: String::new(),
            content: CellContent::Empty,
            cache: OnceCell::new(),
        }
    }

    /// Build a cell from user input.
    /// - Empty string -> Empty
    /// - `=` followed by at least one character -> Formula (parsed)
    /// - Anything else, including a lone `=` -> Text
    pub fn new(text: impl Into<String>) -> Result<Cell, FormulaError> {
        let mut cell = Cell::empty();
        cell.set(text)?;
        Ok(cell)
    }

    /// Replace the content. On a syntax error the cell is left untouched.
    pub fn set(&mut self, text: impl Into<String>) -> Result<(), FormulaError> {
        let text = text.into();
        let content = if text.is_empty() {
            CellContent::Empty
        } else if text.len() > 1 && text.starts_with(FORMULA_SIGN) {
            CellContent::Formula(parse_formula(&text[FORMULA_SIGN.len_utf8()..])?)
        } else {
            CellContent::Text
        };
        self.raw = text;
        self.content = content;
        self.cache = OnceCell::new();
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Cell::empty();
    }

    pub fn content(&self) -> &CellContent {
        &self.content
    }

    /// Input exactly as last set by the client.
    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    /// Text for editing. Formulas come back in canonical form.
    pub fn text(&self) -> String {
        match &self.content {
            CellContent::Empty => String::new(),
            CellContent::Text => self.raw.clone(),
            CellContent::Formula(formula) => format!("{}{}", FORMULA_SIGN, formula.expression()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn referenced_cells(&self) -> &[Position] {
        match &self.content {
            CellContent::Formula(formula) => formula.referenced_cells(),
            _ => &[],
        }
    }

    /// Computed value, memoized until the next [`Cell::invalidate_cache`].
    /// `read` supplies the numeric value of any cell a formula references.
    pub fn value<F>(&self, read: F) -> Value
    where
        F: Fn(Position) -> FormulaResult,
    {
        self.cache.get_or_init(|| self.compute(read)).clone()
    }

    pub fn cached_value(&self) -> Option<&Value> {
        self.cache.get()
    }

    pub fn invalidate_cache(&mut self) {
        self.cache.take();
    }

    fn compute<F>(&self, read: F) -> Value
    where
        F: Fn(Position) -> FormulaResult,
    {
        match &self.content {
            CellContent::Empty => Value::empty(),
            CellContent::Text => {
                let shown = self.raw.strip_prefix(ESCAPE_SIGN).unwrap_or(&self.raw);
                Value::Text(shown.to_string())
            }
            CellContent::Formula(formula) => match formula.evaluate(read) {
                Ok(n) => Value::Number(n),
                Err(kind) => Value::Error(kind),
            },
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::empty()
    }
}
