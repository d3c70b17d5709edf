#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomised maze generation with landmark extraction.
//!
//! The generator carves a perfect maze (a spanning tree over the odd-indexed
//! interior cells) with an iterative recursive backtracker, embeds it at the
//! centre of a larger void field, then derives the landmarks the level needs:
//! every dead-end, the start shifted into outer coordinates, and the goal as
//! the dead-end furthest from the start by Manhattan distance.

use maze_escape_core::{CellCoord, CellState, Direction};
use maze_escape_world::{query, Grid, GridError};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::debug;

/// Width and height of a rectangular cell region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    columns: u32,
    rows: u32,
}

impl Dimensions {
    /// Creates a new size descriptor.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether either side is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    /// Reports whether the region fits inside `outer`.
    #[must_use]
    pub const fn fits_within(&self, outer: Dimensions) -> bool {
        self.columns <= outer.columns && self.rows <= outer.rows
    }

    fn cell_count(self) -> usize {
        (self.columns as usize) * (self.rows as usize)
    }

    fn index(self, cell: CellCoord) -> usize {
        (cell.row() as usize) * (self.columns as usize) + cell.column() as usize
    }

    /// Reports whether the cell is inside the region without touching its edge.
    fn strictly_contains(self, cell: CellCoord) -> bool {
        cell.column() > 0
            && cell.row() > 0
            && cell.column() < self.columns.saturating_sub(1)
            && cell.row() < self.rows.saturating_sub(1)
    }
}

/// Reasons the generator rejects its input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Interior or outer dimensions contain a zero side.
    #[error("maze dimensions must be positive (inner {inner:?}, outer {outer:?})")]
    EmptyDimensions {
        /// Requested interior size.
        inner: Dimensions,
        /// Requested embedding size.
        outer: Dimensions,
    },
    /// The interior does not fit inside the embedding field.
    #[error("interior {inner:?} exceeds outer field {outer:?}")]
    InnerExceedsOuter {
        /// Requested interior size.
        inner: Dimensions,
        /// Requested embedding size.
        outer: Dimensions,
    },
    /// The carving seed touches or lies beyond the interior edge.
    #[error("seed cell {seed:?} is not strictly inside interior {inner:?}")]
    SeedOutsideInterior {
        /// Requested seed.
        seed: CellCoord,
        /// Requested interior size.
        inner: Dimensions,
    },
    /// The carved layout could not be assembled into a grid.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Randomised maze generator backed by a seedable ChaCha stream.
#[derive(Clone, Debug)]
pub struct MazeGenerator {
    rng: ChaCha8Rng,
}

impl MazeGenerator {
    /// Creates a generator whose output is fully determined by `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a generator seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Carves a maze of `inner` size from `seed_cell` and embeds it at the
    /// centre of a void field of `outer` size.
    ///
    /// When the maze has no dead-end the goal falls back to the start; callers
    /// detect this with [`Grid::has_playable_goal`].
    pub fn generate(
        &mut self,
        inner: Dimensions,
        seed_cell: CellCoord,
        outer: Dimensions,
    ) -> Result<Grid, GenerationError> {
        if inner.is_empty() || outer.is_empty() {
            return Err(GenerationError::EmptyDimensions { inner, outer });
        }
        if !inner.fits_within(outer) {
            return Err(GenerationError::InnerExceedsOuter { inner, outer });
        }
        if !inner.strictly_contains(seed_cell) {
            return Err(GenerationError::SeedOutsideInterior {
                seed: seed_cell,
                inner,
            });
        }

        let carved = self.carve(inner, seed_cell);

        let column_offset = (outer.columns - inner.columns) / 2;
        let row_offset = (outer.rows - inner.rows) / 2;
        let mut cells = vec![CellState::Void; outer.cell_count()];
        for row in 0..inner.rows {
            for column in 0..inner.columns {
                let source = inner.index(CellCoord::new(column, row));
                let target =
                    outer.index(CellCoord::new(column + column_offset, row + row_offset));
                cells[target] = carved[source];
            }
        }

        let start = CellCoord::new(
            seed_cell.column() + column_offset,
            seed_cell.row() + row_offset,
        );
        let skeleton = Grid::new(outer.columns, outer.rows, cells, start, start, Vec::new())?;

        let candidates = query::dead_end_candidates(&skeleton);
        let goal = furthest_from(start, &candidates);
        let grid = skeleton.with_landmarks(goal, candidates)?;

        debug!(
            inner_columns = inner.columns,
            inner_rows = inner.rows,
            floors = query::floor_count(&grid),
            dead_ends = grid.dead_ends().len(),
            goal_distance = start.manhattan_distance(goal),
            "generated maze"
        );

        Ok(grid)
    }

    /// Iterative recursive backtracker moving two cells per step.
    fn carve(&mut self, inner: Dimensions, seed_cell: CellCoord) -> Vec<CellState> {
        let mut cells = vec![CellState::Wall; inner.cell_count()];
        cells[inner.index(seed_cell)] = CellState::Floor;

        let mut stack = vec![seed_cell];
        while let Some(&current) = stack.last() {
            let mut advanced = false;

            for direction in self.shuffled_directions() {
                let Some(next) = current.step(direction, 2) else {
                    continue;
                };
                if !inner.strictly_contains(next) || cells[inner.index(next)] != CellState::Wall
                {
                    continue;
                }
                let Some(between) = current.step(direction, 1) else {
                    continue;
                };

                cells[inner.index(between)] = CellState::Floor;
                cells[inner.index(next)] = CellState::Floor;
                stack.push(next);
                advanced = true;
                break;
            }

            if !advanced {
                let _ = stack.pop();
            }
        }

        cells
    }

    /// Uniformly random permutation of the four directions.
    fn shuffled_directions(&mut self) -> [Direction; 4] {
        let mut directions = Direction::ALL;
        directions.shuffle(&mut self.rng);
        directions
    }
}

/// Candidate maximising Manhattan distance to `start`; ties keep the first
/// candidate. Falls back to `start` when there are no candidates.
fn furthest_from(start: CellCoord, candidates: &[CellCoord]) -> CellCoord {
    let mut furthest = start;
    let mut best: Option<u32> = None;

    for &candidate in candidates {
        let distance = start.manhattan_distance(candidate);
        if best.map_or(true, |current| distance > current) {
            best = Some(distance);
            furthest = candidate;
        }
    }

    furthest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn furthest_keeps_first_of_equal_candidates() {
        let start = CellCoord::new(1, 1);
        let candidates = [
            CellCoord::new(1, 3),
            CellCoord::new(3, 3),
            CellCoord::new(5, 1),
            CellCoord::new(2, 2),
        ];
        assert_eq!(furthest_from(start, &candidates), CellCoord::new(3, 3));
    }

    #[test]
    fn furthest_falls_back_to_start() {
        let start = CellCoord::new(4, 4);
        assert_eq!(furthest_from(start, &[]), start);
        assert_eq!(furthest_from(start, &[start]), start);
    }

    #[test]
    fn shuffled_directions_are_permutations() {
        let mut generator = MazeGenerator::from_seed(7);
        for _ in 0..64 {
            let mut directions = generator.shuffled_directions().to_vec();
            directions.sort_by_key(|direction| direction.delta());
            let mut expected = Direction::ALL.to_vec();
            expected.sort_by_key(|direction| direction.delta());
            assert_eq!(directions, expected);
        }
    }

    #[test]
    fn shuffled_directions_lead_uniformly() {
        let mut generator = MazeGenerator::from_seed(0x5eed);
        let draws = 8_000;
        let mut leading = [0usize; 4];
        for _ in 0..draws {
            let first = generator.shuffled_directions()[0];
            let slot = Direction::ALL
                .iter()
                .position(|direction| *direction == first)
                .expect("direction present");
            leading[slot] += 1;
        }

        let expected = draws / 4;
        for count in leading {
            assert!(
                count.abs_diff(expected) < expected / 10,
                "biased leading direction counts: {leading:?}"
            );
        }
    }

    #[test]
    fn strictly_contains_excludes_edges() {
        let inner = Dimensions::new(5, 4);
        assert!(inner.strictly_contains(CellCoord::new(1, 1)));
        assert!(inner.strictly_contains(CellCoord::new(3, 2)));
        assert!(!inner.strictly_contains(CellCoord::new(4, 2)));
        assert!(!inner.strictly_contains(CellCoord::new(1, 3)));
        assert!(!inner.strictly_contains(CellCoord::new(0, 1)));
    }
}
