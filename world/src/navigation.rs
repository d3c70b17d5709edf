//! Breadth-first shortest-path search used by the pursuers.

use std::collections::VecDeque;

use maze_escape_core::CellCoord;

use crate::Grid;

/// Shortest 4-directional floor path from `source` to `target`.
///
/// The returned cells exclude `source` and end with `target`. Neighbours are
/// explored north, east, south, west, so ties between equally short paths are
/// broken deterministically. Cells are marked visited when enqueued. The path
/// is empty when the target is unreachable, not a floor, out of range, or
/// equal to the source.
///
/// The search is rebuilt from scratch on every call; no state survives
/// between invocations.
#[must_use]
pub fn find_path(grid: &Grid, source: CellCoord, target: CellCoord) -> Vec<CellCoord> {
    if source == target {
        return Vec::new();
    }

    let (Some(source_index), Some(target_index)) = (grid.index(source), grid.index(target))
    else {
        return Vec::new();
    };

    if !grid.is_floor(target) {
        return Vec::new();
    }

    let mut parents: Vec<Option<usize>> = vec![None; grid.cells().len()];
    let mut visited = vec![false; grid.cells().len()];
    visited[source_index] = true;

    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(cell) = queue.pop_front() {
        let Some(current_index) = grid.index(cell) else {
            continue;
        };

        if current_index == target_index {
            return unwind(grid, &parents, source_index, target_index);
        }

        for neighbor in neighbors(cell, grid.columns(), grid.rows()) {
            if !grid.is_floor(neighbor) {
                continue;
            }

            let Some(neighbor_index) = grid.index(neighbor) else {
                continue;
            };

            if visited[neighbor_index] {
                continue;
            }

            visited[neighbor_index] = true;
            parents[neighbor_index] = Some(current_index);
            queue.push_back(neighbor);
        }
    }

    Vec::new()
}

/// First cell of the shortest path, if any.
#[must_use]
pub fn next_step(grid: &Grid, source: CellCoord, target: CellCoord) -> Option<CellCoord> {
    find_path(grid, source, target).first().copied()
}

fn unwind(
    grid: &Grid,
    parents: &[Option<usize>],
    source_index: usize,
    target_index: usize,
) -> Vec<CellCoord> {
    let width = grid.columns() as usize;
    let mut path = Vec::new();
    let mut cursor = target_index;

    while cursor != source_index {
        path.push(coord(width, cursor));
        match parents[cursor] {
            Some(parent) => cursor = parent,
            None => return Vec::new(),
        }
    }

    path.reverse();
    path
}

fn coord(width: usize, index: usize) -> CellCoord {
    let column = u32::try_from(index % width).unwrap_or(u32::MAX);
    let row = u32::try_from(index / width).unwrap_or(u32::MAX);
    CellCoord::new(column, row)
}

/// In-range orthogonal neighbours in north, east, south, west order.
pub(crate) fn neighbors(cell: CellCoord, width: u32, height: u32) -> impl Iterator<Item = CellCoord> {
    let mut candidates = [None; 4];
    let mut count = 0;

    if let Some(row) = cell.row().checked_sub(1) {
        candidates[count] = Some(CellCoord::new(cell.column(), row));
        count += 1;
    }

    if let Some(column) = cell.column().checked_add(1) {
        if column < width {
            candidates[count] = Some(CellCoord::new(column, cell.row()));
            count += 1;
        }
    }

    if let Some(row) = cell.row().checked_add(1) {
        if row < height {
            candidates[count] = Some(CellCoord::new(cell.column(), row));
            count += 1;
        }
    }

    if let Some(column) = cell.column().checked_sub(1) {
        candidates[count] = Some(CellCoord::new(column, cell.row()));
        count += 1;
    }

    candidates.into_iter().take(count).flatten()
}
