//! cellgraph_engine - Cell addressing, value model and formulas.

pub mod engine;

#[cfg(test)]
mod tests {
    use crate::engine::*;

    #[test]
    fn test_from_a1_single_letter_columns() {
        let a1 = Position::from_a1("A1");
        assert_eq!(a1.row, 0);
        assert_eq!(a1.col, 0);

        let b1 = Position::from_a1("B1");
        assert_eq!(b1.row, 0);
        assert_eq!(b1.col, 1);

        let z1 = Position::from_a1("Z1");
        assert_eq!(z1.row, 0);
        assert_eq!(z1.col, 25);
    }

    #[test]
    fn test_from_a1_multi_letter_columns() {
        assert_eq!(Position::from_a1("AA1").col, 26);
        assert_eq!(Position::from_a1("AB1").col, 27);
        assert_eq!(Position::from_a1("AZ1").col, 51);
        assert_eq!(Position::from_a1("BA1").col, 52);
    }

    #[test]
    fn test_from_a1_row_numbers() {
        assert_eq!(Position::from_a1("A1").row, 0);
        assert_eq!(Position::from_a1("A10").row, 9);
        assert_eq!(Position::from_a1("A100").row, 99);
    }

    #[test]
    fn test_from_a1_invalid_inputs() {
        for bad in ["", "123", "ABC", "A0", "1A", "A 1", "a1", "aA1", "A1B", "A-1"] {
            let pos = Position::from_a1(bad);
            assert_eq!(pos, Position::NONE, "input {:?}", bad);
            assert!(!pos.is_valid());
        }
    }

    #[test]
    fn test_a1_round_trip() {
        for name in ["A1", "Z9", "AA27", "XFD16384", "BC12"] {
            assert_eq!(Position::from_a1(name).to_string(), name);
        }
    }

    #[test]
    fn test_formula_reads_through_positions() {
        let f = parse_formula("A1*B1").unwrap();
        let read = |pos: Position| -> FormulaResult {
            Ok(if pos == Position::from_a1("A1") { 6.0 } else { 7.0 })
        };
        assert_eq!(f.evaluate(read), Ok(42.0));
        assert_eq!(f.expression(), "A1*B1");
    }
}
