use super::Sheet;
use crate::cell::Cell;
use crate::error::{Result, SheetError};
use cellgraph_engine::engine::{Position, detect_cycle};
use std::collections::HashSet;

impl Sheet {
    /// Set cell contents from input text.
    ///
    /// The new cell is built and cycle-checked before anything is touched, so
    /// a syntax error or a circular reference leaves the sheet exactly as it
    /// was. On success every cell that transitively reads `pos` has its memo
    /// dropped before this returns.
    pub fn set_cell(&mut self, pos: Position, text: impl Into<String>) -> Result<()> {
        Self::check_position(pos)?;

        let cell = Cell::new(text).inspect_err(|e| {
            log::debug!("rejected input at {}: {}", pos, e);
        })?;

        if let Some(path) = detect_cycle(pos, cell.referenced_cells(), |p| self.references_of(p)) {
            log::debug!(
                "rejected formula at {}: cycle {}",
                pos,
                path.iter().map(Position::to_string).collect::<Vec<_>>().join(" -> ")
            );
            return Err(SheetError::CircularDependency {
                position: pos,
                path,
            });
        }

        self.ensure_capacity(pos);
        self.remove_dependencies(pos);
        self.cells[pos.row as usize][pos.col as usize] = Some(cell);
        self.add_dependencies(pos);
        self.invalidate_from(pos);
        self.printable_size = self.compute_printable_size();

        log::trace!("installed cell at {}", pos);
        Ok(())
    }

    /// Clear the specified cell.
    ///
    /// Nothing happens if the slot holds no cell or a cell with empty text.
    /// Otherwise the cell is dropped, its entries in the dependency index are
    /// pruned, and everything that read it is invalidated.
    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        Self::check_position(pos)?;

        let occupied = self.cell_at(pos).is_some_and(|cell| !cell.is_empty());
        if !occupied {
            return Ok(());
        }

        self.remove_dependencies(pos);
        self.invalidate_from(pos);
        self.cells[pos.row as usize][pos.col as usize] = None;
        self.printable_size = self.compute_printable_size();

        log::trace!("cleared cell at {}", pos);
        Ok(())
    }

    fn references_of(&self, pos: Position) -> Vec<Position> {
        self.cell_at(pos)
            .map(|cell| cell.referenced_cells().to_vec())
            .unwrap_or_default()
    }

    /// Grow storage so `pos` has a slot. Storage never shrinks.
    fn ensure_capacity(&mut self, pos: Position) {
        let (row, col) = (pos.row as usize, pos.col as usize);
        if self.cells.len() <= row {
            self.cells.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.cells[row];
        if cells.len() <= col {
            cells.resize_with(col + 1, || None);
        }
    }

    /// Drop the index entries contributed by whatever cell currently sits at `pos`.
    fn remove_dependencies(&mut self, pos: Position) {
        for source in self.references_of(pos) {
            if let Some(readers) = self.dependents.get_mut(&source) {
                readers.remove(&pos);
                if readers.is_empty() {
                    self.dependents.remove(&source);
                }
            }
        }
    }

    /// Record that the cell at `pos` reads each of its referenced positions.
    fn add_dependencies(&mut self, pos: Position) {
        for source in self.references_of(pos) {
            self.dependents.entry(source).or_default().insert(pos);
        }
    }

    /// Drop the memo of `changed` and of every cell that transitively reads it.
    fn invalidate_from(&mut self, changed: Position) {
        let mut to_process = vec![changed];
        let mut visited = HashSet::new();
        while let Some(pos) = to_process.pop() {
            if !visited.insert(pos) {
                continue;
            }

            if let Some(cell) = self.cell_at_mut(pos) {
                cell.invalidate_cache();
            }
            if let Some(readers) = self.dependents.get(&pos) {
                to_process.extend(readers.iter().copied());
            }
        }
        log::trace!("invalidated {} cell(s) from {}", visited.len(), changed);
    }
}
