use super::Sheet;
use crate::cell::Cell;
use crate::error::Result;
use cellgraph_engine::engine::Position;
use std::io::Write;

impl Sheet {
    /// Write computed values over the printable area: one line per row,
    /// fields separated by tabs, absent cells as empty fields.
    pub fn print_values<W: Write>(&self, out: &mut W) -> Result<()> {
        self.print_with(out, |cell| self.cell_value(cell).to_string())
    }

    /// Write cell texts over the printable area, laid out like [`Sheet::print_values`].
    pub fn print_texts<W: Write>(&self, out: &mut W) -> Result<()> {
        self.print_with(out, Cell::text)
    }

    fn print_with<W, F>(&self, out: &mut W, render: F) -> Result<()>
    where
        W: Write,
        F: Fn(&Cell) -> String,
    {
        let size = self.printable_size;
        for row in 0..size.rows {
            for col in 0..size.cols {
                if col > 0 {
                    out.write_all(b"\t")?;
                }
                if let Some(cell) = self.cell_at(Position::new(row, col)) {
                    out.write_all(render(cell).as_bytes())?;
                }
            }
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}
