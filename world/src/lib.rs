#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Immutable maze grid shared by every Maze Escape system.
//!
//! A [`Grid`] is produced once by the maze generator, owned by the level state
//! machine and replaced wholesale on level transitions. Systems only ever read
//! it: [`navigation`] answers shortest-path queries and [`query`] exposes the
//! structural scans used for landmark extraction and connectivity checks.

pub mod navigation;

use maze_escape_core::{CellCoord, CellState, Position};
use thiserror::Error;

/// Reasons a grid cannot be assembled from raw parts.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The grid must contain at least one row and one column.
    #[error("grid dimensions must be positive, got {columns}x{rows}")]
    EmptyDimensions {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },
    /// The cell buffer does not match `columns * rows`.
    #[error("expected {expected} cells, got {actual}")]
    CellCountMismatch {
        /// Cell count implied by the dimensions.
        expected: usize,
        /// Length of the provided buffer.
        actual: usize,
    },
    /// A landmark does not reference a floor cell inside the grid.
    #[error("landmark {cell:?} is not a floor cell")]
    LandmarkNotFloor {
        /// Offending landmark.
        cell: CellCoord,
    },
    /// A character in an ASCII layout has no cell meaning.
    #[error("unrecognised layout glyph {glyph:?} at column {column}, row {row}")]
    UnknownGlyph {
        /// Offending character.
        glyph: char,
        /// Column of the character.
        column: u32,
        /// Row of the character.
        row: u32,
    },
    /// An ASCII layout has rows of different widths.
    #[error("layout row {row} is {width} wide, expected {expected}")]
    RaggedLayout {
        /// Row index with the wrong width.
        row: u32,
        /// Width of that row.
        width: u32,
        /// Width of the first row.
        expected: u32,
    },
    /// An ASCII layout lacks an `S` start marker.
    #[error("layout has no start marker")]
    MissingStart,
}

/// Rectangular, row-major matrix of cell states plus its derived landmarks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<CellState>,
    start: CellCoord,
    goal: CellCoord,
    dead_ends: Vec<CellCoord>,
}

impl Grid {
    /// Assembles a grid from row-major cells and precomputed landmarks.
    ///
    /// `start` and `goal` must be floor cells. Dead-ends are stored as given,
    /// minus any occurrence of `start` or `goal`.
    pub fn new(
        columns: u32,
        rows: u32,
        cells: Vec<CellState>,
        start: CellCoord,
        goal: CellCoord,
        dead_ends: Vec<CellCoord>,
    ) -> Result<Self, GridError> {
        if columns == 0 || rows == 0 {
            return Err(GridError::EmptyDimensions { columns, rows });
        }

        let expected = (columns as usize) * (rows as usize);
        if cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }

        let mut grid = Self {
            columns,
            rows,
            cells,
            start,
            goal,
            dead_ends: Vec::new(),
        };

        for landmark in [start, goal].into_iter().chain(dead_ends.iter().copied()) {
            if !grid.is_floor(landmark) {
                return Err(GridError::LandmarkNotFloor { cell: landmark });
            }
        }

        grid.dead_ends = dead_ends
            .into_iter()
            .filter(|cell| *cell != start && *cell != goal)
            .collect();
        Ok(grid)
    }

    /// Parses an ASCII layout.
    ///
    /// `#` is a wall, `.` a floor, `~` void, `S` the start and `G` the goal
    /// (both floors). Without a `G` marker the goal coincides with the start.
    /// Dead-ends are derived with [`query::dead_end_candidates`].
    pub fn from_ascii(layout: &[&str]) -> Result<Self, GridError> {
        let rows = u32::try_from(layout.len()).unwrap_or(u32::MAX);
        let columns = layout
            .first()
            .map_or(0, |line| u32::try_from(line.chars().count()).unwrap_or(u32::MAX));

        let mut cells = Vec::with_capacity((columns as usize) * (rows as usize));
        let mut start = None;
        let mut goal = None;

        for (row, line) in (0u32..).zip(layout) {
            let width = u32::try_from(line.chars().count()).unwrap_or(u32::MAX);
            if width != columns {
                return Err(GridError::RaggedLayout {
                    row,
                    width,
                    expected: columns,
                });
            }

            for (column, glyph) in (0u32..).zip(line.chars()) {
                let state = match glyph {
                    '#' => CellState::Wall,
                    '.' => CellState::Floor,
                    '~' => CellState::Void,
                    'S' => {
                        start = Some(CellCoord::new(column, row));
                        CellState::Floor
                    }
                    'G' => {
                        goal = Some(CellCoord::new(column, row));
                        CellState::Floor
                    }
                    _ => return Err(GridError::UnknownGlyph { glyph, column, row }),
                };
                cells.push(state);
            }
        }

        if columns == 0 || rows == 0 {
            return Err(GridError::EmptyDimensions { columns, rows });
        }

        let start = start.ok_or(GridError::MissingStart)?;
        let goal = goal.unwrap_or(start);
        let skeleton = Self::new(columns, rows, cells, start, goal, Vec::new())?;
        let dead_ends = query::dead_end_candidates(&skeleton);
        skeleton.with_landmarks(goal, dead_ends)
    }

    /// Consumes the grid and re-assembles it with a new goal and dead-end set.
    pub fn with_landmarks(
        self,
        goal: CellCoord,
        dead_ends: Vec<CellCoord>,
    ) -> Result<Self, GridError> {
        Self::new(self.columns, self.rows, self.cells, self.start, goal, dead_ends)
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Player spawn cell.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.start
    }

    /// Goal cell, the furthest dead-end from the start.
    #[must_use]
    pub const fn goal(&self) -> CellCoord {
        self.goal
    }

    /// Dead-end cells in row-major order, excluding start and goal.
    #[must_use]
    pub fn dead_ends(&self) -> &[CellCoord] {
        &self.dead_ends
    }

    /// Reports whether the goal is distinct from the start.
    ///
    /// A degenerate maze without dead-ends collapses its goal onto the start;
    /// callers that need something to reach must check this.
    #[must_use]
    pub fn has_playable_goal(&self) -> bool {
        self.goal != self.start
    }

    /// Dense cell states stored in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Cell states of a single row.
    #[must_use]
    pub fn row(&self, row: u32) -> Option<&[CellState]> {
        if row >= self.rows {
            return None;
        }

        let width = self.columns as usize;
        let begin = (row as usize) * width;
        self.cells.get(begin..begin + width)
    }

    /// State of the provided cell, if it lies within the grid.
    #[must_use]
    pub fn state(&self, cell: CellCoord) -> Option<CellState> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the cell is inside the grid and a floor.
    #[must_use]
    pub fn is_floor(&self, cell: CellCoord) -> bool {
        self.state(cell) == Some(CellState::Floor)
    }

    /// Reports whether the cell containing the position is a floor.
    #[must_use]
    pub fn is_floor_at(&self, position: Position) -> bool {
        position.cell().is_some_and(|cell| self.is_floor(cell))
    }

    pub(crate) fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }

        let column = usize::try_from(cell.column()).ok()?;
        let row = usize::try_from(cell.row()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

/// Read-only structural scans over a [`Grid`].
pub mod query {
    use std::collections::VecDeque;

    use maze_escape_core::{CellCoord, CellState};

    use crate::{navigation::neighbors, Grid};

    /// Number of floor cells in the grid.
    #[must_use]
    pub fn floor_count(grid: &Grid) -> usize {
        grid.cells()
            .iter()
            .filter(|state| **state == CellState::Floor)
            .count()
    }

    /// Number of floor cells reachable from `origin` through 4-directional
    /// floor adjacency. Zero when `origin` is not a floor.
    #[must_use]
    pub fn reachable_floor_count(grid: &Grid, origin: CellCoord) -> usize {
        let Some(origin_index) = grid.index(origin) else {
            return 0;
        };
        if !grid.is_floor(origin) {
            return 0;
        }

        let mut visited = vec![false; grid.cells().len()];
        visited[origin_index] = true;
        let mut queue = VecDeque::from([origin]);
        let mut reached = 0;

        while let Some(cell) = queue.pop_front() {
            reached += 1;
            for neighbor in neighbors(cell, grid.columns(), grid.rows()) {
                let Some(index) = grid.index(neighbor) else {
                    continue;
                };
                if visited[index] || !grid.is_floor(neighbor) {
                    continue;
                }
                visited[index] = true;
                queue.push_back(neighbor);
            }
        }

        reached
    }

    /// Number of unordered floor-floor orthogonal adjacencies.
    #[must_use]
    pub fn floor_edge_count(grid: &Grid) -> usize {
        let mut edges = 0;
        for row in 0..grid.rows() {
            for column in 0..grid.columns() {
                let cell = CellCoord::new(column, row);
                if !grid.is_floor(cell) {
                    continue;
                }
                if grid.is_floor(CellCoord::new(column + 1, row)) {
                    edges += 1;
                }
                if grid.is_floor(CellCoord::new(column, row + 1)) {
                    edges += 1;
                }
            }
        }
        edges
    }

    /// Counts the orthogonal neighbours of `cell` that are walls.
    ///
    /// Void and out-of-range neighbours do not count.
    #[must_use]
    pub fn wall_neighbor_count(grid: &Grid, cell: CellCoord) -> usize {
        neighbors(cell, grid.columns(), grid.rows())
            .filter(|neighbor| grid.state(*neighbor) == Some(CellState::Wall))
            .count()
    }

    /// Scans every non-border cell in row-major order and returns the floors
    /// with exactly three wall neighbours.
    #[must_use]
    pub fn dead_end_candidates(grid: &Grid) -> Vec<CellCoord> {
        let mut candidates = Vec::new();
        if grid.rows() < 3 || grid.columns() < 3 {
            return candidates;
        }

        for row in 1..grid.rows() - 1 {
            for column in 1..grid.columns() - 1 {
                let cell = CellCoord::new(column, row);
                if grid.is_floor(cell) && wall_neighbor_count(grid, cell) == 3 {
                    candidates.push(cell);
                }
            }
        }

        candidates
    }

    /// Reports whether any floor cell lies on the outer edge of the grid.
    #[must_use]
    pub fn floor_touches_edge(grid: &Grid) -> bool {
        let last_column = grid.columns() - 1;
        let last_row = grid.rows() - 1;
        (0..grid.rows()).any(|row| {
            (0..grid.columns()).any(|column| {
                let on_edge = row == 0 || column == 0 || row == last_row || column == last_column;
                on_edge && grid.is_floor(CellCoord::new(column, row))
            })
        })
    }
}
