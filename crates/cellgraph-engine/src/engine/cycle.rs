//! Circular dependency detection for formula cells.
//!
//! Before a formula is installed at `target`, we must verify that none of the
//! cells it reads can reach `target` again through the formulas already in
//! place (e.g., A1 reads B1, B1 reads C1, C1 reads A1). The search is an
//! iterative depth-first walk, so long reference chains cannot overflow the
//! stack, and a visited set bounds it by the number of distinct positions.

use std::collections::{HashMap, HashSet};

use super::Position;

/// Search for a path from any of `reads` back to `target`.
///
/// `references_of` yields the positions the currently installed cell at a
/// position reads; positions without a cell yield nothing.
///
/// Returns `Some(path)` (starting at `target` and ending at `target`) if
/// installing a cell at `target` that reads `reads` would close a cycle.
pub fn detect_cycle<F, I>(target: Position, reads: &[Position], references_of: F) -> Option<Vec<Position>>
where
    F: Fn(Position) -> I,
    I: IntoIterator<Item = Position>,
{
    // `parent[p]` is the position we came from when p was first reached.
    let mut parent: HashMap<Position, Option<Position>> = HashMap::new();
    let mut stack = Vec::new();

    for &start in reads {
        if parent.insert(start, None).is_none() {
            stack.push(start);
        }
    }

    while let Some(current) = stack.pop() {
        if current == target {
            return Some(cycle_path(target, &parent));
        }
        for next in references_of(current) {
            if !parent.contains_key(&next) {
                parent.insert(next, Some(current));
                stack.push(next);
            }
        }
    }

    None
}

fn cycle_path(target: Position, parent: &HashMap<Position, Option<Position>>) -> Vec<Position> {
    let mut path = vec![target];
    let mut seen = HashSet::from([target]);
    let mut cursor = parent.get(&target).copied().flatten();
    while let Some(pos) = cursor {
        if !seen.insert(pos) {
            break;
        }
        path.push(pos);
        cursor = parent.get(&pos).copied().flatten();
    }
    path.push(target);
    path.reverse();
    path
}
