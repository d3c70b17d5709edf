#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Escape engine.
//!
//! This crate defines the vocabulary that connects the maze generator, the
//! navigation queries, the pure simulation systems and the adapters. Cells are
//! addressed with integer [`CellCoord`] values while entities move through
//! continuous [`Position`] space measured in cell units. The level state
//! machine consumes an [`InputSnapshot`] every tick and reports discrete
//! [`Cue`] values that adapters map to audio or visual feedback.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Escape.";

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Blocking cell carved out of the maze interior.
    Wall,
    /// Open cell that entities may occupy.
    Floor,
    /// Padding outside the carved maze. Never traversable.
    Void,
}

impl CellState {
    /// Reports whether entities may stand on a cell in this state.
    #[must_use]
    pub const fn is_traversable(self) -> bool {
        matches!(self, Self::Floor)
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Cell reached by moving `steps` cells in `direction`.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    #[must_use]
    pub fn step(self, direction: Direction, steps: u32) -> Option<CellCoord> {
        let (column_delta, row_delta) = direction.delta();
        let column = offset(self.column, column_delta, steps)?;
        let row = offset(self.row, row_delta, steps)?;
        Some(CellCoord::new(column, row))
    }

    /// Continuous position at the centre of the cell.
    #[must_use]
    pub fn center(self) -> Position {
        Position::new(self.column as f32 + 0.5, self.row as f32 + 0.5)
    }
}

fn offset(value: u32, delta: i32, steps: u32) -> Option<u32> {
    match delta {
        0 => Some(value),
        d if d > 0 => value.checked_add(steps),
        _ => value.checked_sub(steps),
    }
}

/// Continuous coordinate measured in cell units.
///
/// `x` grows with the column index and `y` with the row index. The fractional
/// part is the offset inside the cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal component in cell units.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical component in cell units.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Returns a copy translated by the provided deltas.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Cell containing the position, obtained by flooring both components.
    ///
    /// Positions with a negative or non-finite component lie outside every grid
    /// and yield `None`.
    #[must_use]
    pub fn cell(self) -> Option<CellCoord> {
        if !self.x.is_finite() || !self.y.is_finite() || self.x < 0.0 || self.y < 0.0 {
            return None;
        }

        Some(CellCoord::new(self.x.floor() as u32, self.y.floor() as u32))
    }
}

/// Physical record shared by the player, the pursuers and the goal-target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Current continuous position.
    pub position: Position,
    /// Travel speed in cells per second.
    pub speed: f32,
    /// Collision radius in cells.
    pub radius: f32,
}

impl Body {
    /// Creates a new body.
    #[must_use]
    pub const fn new(position: Position, speed: f32, radius: f32) -> Self {
        Self {
            position,
            speed,
            radius,
        }
    }

    /// Reports whether the two bodies overlap, comparing centre distance with
    /// the sum of radii.
    #[must_use]
    pub fn overlaps(&self, other: &Body) -> bool {
        self.position.distance(other.position) < self.radius + other.radius
    }

    /// Reports whether both bodies stand in the same grid cell.
    #[must_use]
    pub fn shares_cell_with(&self, other: &Body) -> bool {
        match (self.position.cell(), other.position.cell()) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

/// Cardinal movement directions, doubling as the four logical input actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All directions in clockwise order starting at north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit `(column, row)` delta of the direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }
}

/// Held state of the four logical actions captured by an input adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: [bool; 4],
}

impl InputSnapshot {
    /// Snapshot with no action held.
    #[must_use]
    pub const fn idle() -> Self {
        Self { held: [false; 4] }
    }

    /// Returns a copy with the provided action marked as held.
    #[must_use]
    pub fn with_held(mut self, direction: Direction) -> Self {
        self.held[direction.index()] = true;
        self
    }

    /// Marks or clears the provided action.
    pub fn set_held(&mut self, direction: Direction, held: bool) {
        self.held[direction.index()] = held;
    }

    /// Reports whether the action is currently held.
    #[must_use]
    pub const fn is_action_held(&self, direction: Direction) -> bool {
        self.held[direction.index()]
    }

    /// Reports whether no action is held.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.held.iter().all(|held| !held)
    }
}

/// Motion the player performed during the most recent tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Motion {
    /// No movement was applied.
    #[default]
    Idle,
    /// The last axis move applied in the tick went this way.
    Walking(Direction),
}

/// Discrete mode exposed to presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LevelMode {
    /// Intro screen announcing the level; simulation is paused.
    LevelIntro {
        /// Level about to be played.
        level: u32,
    },
    /// Full simulation runs.
    Playing,
}

/// Parameterless triggers emitted for the audio and visual collaborators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    /// A level intro screen started.
    LevelIntro {
        /// Level being announced.
        level: u32,
    },
    /// The intro finished and play started.
    PlayStarted,
    /// The activation window opened; pursuers are live.
    ActivationOpened,
    /// The activation window closed; pursuers froze.
    ActivationClosed,
    /// The player reached the goal.
    GoalReached,
    /// A pursuer caught the player.
    Caught,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn step_moves_along_direction() {
        let origin = CellCoord::new(3, 3);
        assert_eq!(origin.step(Direction::North, 2), Some(CellCoord::new(3, 1)));
        assert_eq!(origin.step(Direction::East, 1), Some(CellCoord::new(4, 3)));
        assert_eq!(origin.step(Direction::South, 2), Some(CellCoord::new(3, 5)));
        assert_eq!(origin.step(Direction::West, 3), Some(CellCoord::new(0, 3)));
        assert_eq!(origin.step(Direction::West, 4), None);
    }

    #[test]
    fn position_floors_into_cells() {
        assert_eq!(Position::new(2.99, 0.0).cell(), Some(CellCoord::new(2, 0)));
        assert_eq!(Position::new(1.5, 7.25).cell(), Some(CellCoord::new(1, 7)));
        assert_eq!(Position::new(-0.1, 1.0).cell(), None);
        assert_eq!(Position::new(f32::NAN, 1.0).cell(), None);
    }

    #[test]
    fn center_lies_inside_cell() {
        let cell = CellCoord::new(4, 9);
        assert_eq!(cell.center(), Position::new(4.5, 9.5));
        assert_eq!(cell.center().cell(), Some(cell));
    }

    #[test]
    fn bodies_overlap_strictly_inside_radius_sum() {
        let player = Body::new(Position::new(1.0, 1.0), 1.5, 0.25);
        let close = Body::new(Position::new(1.4, 1.0), 3.0, 0.25);
        let touching = Body::new(Position::new(1.5, 1.0), 3.0, 0.25);
        assert!(player.overlaps(&close));
        assert!(!player.overlaps(&touching));
    }

    #[test]
    fn input_snapshot_tracks_each_action() {
        let mut input = InputSnapshot::idle().with_held(Direction::East);
        assert!(input.is_action_held(Direction::East));
        assert!(!input.is_action_held(Direction::West));
        assert!(!input.is_idle());

        input.set_held(Direction::East, false);
        assert!(input.is_idle());
    }
}
