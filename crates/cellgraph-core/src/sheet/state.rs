use crate::cell::Cell;
use crate::error::{Result, SheetError};
use cellgraph_engine::engine::{Position, Size, Value};
use std::collections::{HashMap, HashSet};

/// A sparse grid of cells with automatic recomputation.
///
/// The sheet exclusively owns its cells and the reverse dependency index.
/// Reads may fill a cell's value memo; everything else only changes through
/// [`Sheet::set_cell`] and [`Sheet::clear_cell`].
pub struct Sheet {
    /// Row-major storage. Rows grow independently and never shrink.
    pub(crate) cells: Vec<Vec<Option<Cell>>>,
    /// Reverse dependency map: position -> formula cells that read it.
    /// A missing entry means no dependents; empty sets are never stored.
    pub(crate) dependents: HashMap<Position, HashSet<Position>>,
    /// Tight bounding box of cells with non-empty text.
    pub(crate) printable_size: Size,
}

/// Read access to a cell in a sheet.
#[derive(Clone, Copy)]
pub struct CellView<'a> {
    sheet: &'a Sheet,
    cell: &'a Cell,
    position: Position,
}

impl<'a> CellView<'a> {
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn text(&self) -> String {
        self.cell.text()
    }

    /// Computed value; may fill the memo of this cell and of the cells it reads.
    pub fn value(&self) -> Value {
        self.sheet.cell_value(self.cell)
    }

    pub fn referenced_cells(&self) -> &'a [Position] {
        self.cell.referenced_cells()
    }

    pub fn cell(&self) -> &'a Cell {
        self.cell
    }
}

/// Mutable access to a cell in a sheet.
///
/// Content changes go through the sheet so the dependency index stays exact;
/// this handle only exposes the memo.
pub struct CellMut<'a> {
    cell: &'a mut Cell,
}

impl CellMut<'_> {
    pub fn text(&self) -> String {
        self.cell.text()
    }

    pub fn referenced_cells(&self) -> &[Position] {
        self.cell.referenced_cells()
    }

    pub fn cached_value(&self) -> Option<&Value> {
        self.cell.cached_value()
    }

    pub fn invalidate_cache(&mut self) {
        self.cell.invalidate_cache();
    }
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new() -> Self {
        Sheet {
            cells: Vec::new(),
            dependents: HashMap::new(),
            printable_size: Size::default(),
        }
    }

    pub(crate) fn check_position(pos: Position) -> Result<()> {
        if pos.is_valid() {
            Ok(())
        } else {
            Err(SheetError::InvalidPosition {
                row: pos.row,
                col: pos.col,
            })
        }
    }

    /// Unchecked lookup; `pos` must already be valid.
    pub(crate) fn cell_at(&self, pos: Position) -> Option<&Cell> {
        self.cells
            .get(pos.row as usize)?
            .get(pos.col as usize)?
            .as_ref()
    }

    pub(crate) fn cell_at_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.cells
            .get_mut(pos.row as usize)?
            .get_mut(pos.col as usize)?
            .as_mut()
    }

    /// Look up a cell. A valid position with nothing stored is `Ok(None)`.
    pub fn get_cell(&self, pos: Position) -> Result<Option<CellView<'_>>> {
        Self::check_position(pos)?;
        Ok(self.cell_at(pos).map(|cell| CellView {
            sheet: self,
            cell,
            position: pos,
        }))
    }

    pub fn get_cell_mut(&mut self, pos: Position) -> Result<Option<CellMut<'_>>> {
        Self::check_position(pos)?;
        Ok(self.cell_at_mut(pos).map(|cell| CellMut { cell }))
    }

    /// Smallest `{rows, cols}` box anchored at A1 holding every cell with
    /// non-empty text. An empty sheet is `{0, 0}`.
    pub fn printable_size(&self) -> Size {
        self.printable_size
    }

    /// Formula cells that read `pos`, in ascending order.
    pub fn dependents(&self, pos: Position) -> Result<Vec<Position>> {
        Self::check_position(pos)?;
        let mut out: Vec<Position> = self
            .dependents
            .get(&pos)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        out.sort();
        Ok(out)
    }

    pub(crate) fn compute_printable_size(&self) -> Size {
        let mut size = Size::default();
        for (row, cells) in self.cells.iter().enumerate() {
            let last = cells
                .iter()
                .rposition(|slot| slot.as_ref().is_some_and(|cell| !cell.is_empty()));
            if let Some(col) = last {
                size.rows = size.rows.max(row as i32 + 1);
                size.cols = size.cols.max(col as i32 + 1);
            }
        }
        size
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}
