use super::Sheet;
use crate::cell::{Cell, CellContent};
use cellgraph_engine::engine::{ErrorKind, FormulaResult, Position, Value};
use std::collections::HashSet;

impl Sheet {
    /// Computed value of a cell stored in this sheet.
    pub(crate) fn cell_value(&self, cell: &Cell) -> Value {
        if let Some(value) = cell.cached_value() {
            return value.clone();
        }
        self.fill_inputs(cell);
        cell.value(|pos| self.read_number(pos))
    }

    /// Compute and memoize every uncached formula `cell` depends on, inputs
    /// before readers, so the final evaluation only sees memoized inputs.
    /// The walk is an explicit post-order stack; reference chains as long as
    /// the sheet is tall do not grow the call stack.
    fn fill_inputs(&self, cell: &Cell) {
        let mut stack: Vec<(Position, bool)> =
            cell.referenced_cells().iter().map(|&pos| (pos, false)).collect();
        let mut seen = HashSet::new();

        while let Some((pos, inputs_done)) = stack.pop() {
            let Some(input) = self.cell_at(pos) else {
                continue;
            };
            if input.cached_value().is_some()
                || !matches!(input.content(), CellContent::Formula(_))
            {
                continue;
            }
            if inputs_done {
                input.value(|p| self.read_number(p));
                continue;
            }
            if !seen.insert(pos) {
                continue;
            }
            stack.push((pos, true));
            stack.extend(input.referenced_cells().iter().map(|&next| (next, false)));
        }
    }

    /// Numeric value of `pos` as seen by a formula that references it.
    /// - Invalid, absent or empty -> `Ref`
    /// - Text -> the raw text parsed as a whole with `str::parse::<f64>`, so
    ///   surrounding whitespace (`" 5"`) or an escape sign (`'5`) is not a
    ///   number; `Value` if it does not parse to a finite number
    /// - Formula -> its number, or its error
    pub(crate) fn read_number(&self, pos: Position) -> FormulaResult {
        if !pos.is_valid() {
            return Err(ErrorKind::Ref);
        }
        let Some(cell) = self.cell_at(pos) else {
            return Err(ErrorKind::Ref);
        };
        match cell.content() {
            CellContent::Empty => Err(ErrorKind::Ref),
            CellContent::Text => cell
                .raw_text()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or(ErrorKind::Value),
            CellContent::Formula(_) => match self.cell_value(cell) {
                Value::Number(n) => Ok(n),
                Value::Error(kind) => Err(kind),
                Value::Text(_) => Err(ErrorKind::Value),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Sheet;
    use cellgraph_engine::engine::{ErrorKind, Position, Value};

    fn pos(name: &str) -> Position {
        Position::from_a1(name)
    }

    fn value(sheet: &Sheet, name: &str) -> Value {
        sheet.get_cell(pos(name)).unwrap().unwrap().value()
    }

    #[test]
    fn test_numeric_text_is_read_as_number() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "2.5").unwrap();
        sheet.set_cell(pos("B1"), "=A1*2").unwrap();
        assert_eq!(value(&sheet, "A1"), Value::from("2.5"));
        assert_eq!(value(&sheet, "B1"), Value::Number(5.0));
    }

    #[test]
    fn test_non_numeric_text_is_value_error() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "meow").unwrap();
        sheet.set_cell(pos("A2"), "'5").unwrap();
        sheet.set_cell(pos("A3"), "inf").unwrap();
        sheet.set_cell(pos("B1"), "=A1").unwrap();
        sheet.set_cell(pos("B2"), "=A2").unwrap();
        sheet.set_cell(pos("B3"), "=A3").unwrap();
        assert_eq!(value(&sheet, "B1"), Value::Error(ErrorKind::Value));
        assert_eq!(value(&sheet, "B2"), Value::Error(ErrorKind::Value));
        assert_eq!(value(&sheet, "B3"), Value::Error(ErrorKind::Value));
    }

    #[test]
    fn test_absent_and_empty_cells_are_ref_errors() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "").unwrap();
        sheet.set_cell(pos("B1"), "=A1").unwrap();
        sheet.set_cell(pos("B2"), "=Z99").unwrap();
        sheet.set_cell(pos("B3"), "=ZZZZ1").unwrap();
        assert_eq!(value(&sheet, "B1"), Value::Error(ErrorKind::Ref));
        assert_eq!(value(&sheet, "B2"), Value::Error(ErrorKind::Ref));
        assert_eq!(value(&sheet, "B3"), Value::Error(ErrorKind::Ref));
    }

    #[test]
    fn test_errors_propagate_through_formulas() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "=1/0").unwrap();
        sheet.set_cell(pos("A2"), "=A1+1").unwrap();
        sheet.set_cell(pos("A3"), "=A2*2").unwrap();
        assert_eq!(value(&sheet, "A1"), Value::Error(ErrorKind::Div0));
        assert_eq!(value(&sheet, "A3"), Value::Error(ErrorKind::Div0));
        assert_eq!(value(&sheet, "A3").to_string(), "#DIV0!");
    }

    #[test]
    fn test_reading_fills_memos_of_referenced_cells() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "=1+1").unwrap();
        sheet.set_cell(pos("A2"), "=A1+1").unwrap();
        assert_eq!(value(&sheet, "A2"), Value::Number(3.0));
        let a1 = sheet.get_cell(pos("A1")).unwrap().unwrap();
        assert_eq!(a1.cell().cached_value(), Some(&Value::Number(2.0)));
    }

    #[test]
    fn test_padded_numeric_text_is_value_error() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), " 5").unwrap();
        sheet.set_cell(pos("B1"), "=A1").unwrap();
        assert_eq!(value(&sheet, "B1"), Value::Error(ErrorKind::Value));
    }

    #[test]
    fn test_deep_chain_evaluates_without_recursion() {
        let mut sheet = Sheet::new();
        sheet.set_cell(Position::new(0, 0), "1").unwrap();
        for row in 1..3000 {
            let above = Position::new(row - 1, 0);
            sheet.set_cell(Position::new(row, 0), format!("={}+1", above)).unwrap();
        }
        let last = sheet.get_cell(Position::new(2999, 0)).unwrap().unwrap();
        assert_eq!(last.position(), Position::new(2999, 0));
        assert_eq!(last.value().as_number(), Some(3000.0));
        let middle = sheet.get_cell(Position::new(1499, 0)).unwrap().unwrap();
        assert_eq!(middle.cell().cached_value(), Some(&Value::Number(1500.0)));
    }

    #[test]
    fn test_diamond_inputs_are_filled_once() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "2").unwrap();
        sheet.set_cell(pos("B1"), "=A1*3").unwrap();
        sheet.set_cell(pos("B2"), "=A1+B1").unwrap();
        sheet.set_cell(pos("C1"), "=B1+B2").unwrap();
        assert_eq!(value(&sheet, "C1"), Value::Number(14.0));
        assert_eq!(value(&sheet, "B2"), Value::Number(8.0));
    }
}
