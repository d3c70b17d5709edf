#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pursuers that chase a moving target across the maze.
//!
//! Every update re-plans from scratch: the pursuer floors its own position and
//! the target's into cells, asks the navigation module for the shortest path
//! and steps toward the first cell of that path. Once both share a cell the
//! pursuer closes in on the exact target position instead.

use std::time::Duration;

use maze_escape_core::{Body, CellCoord, Position};
use maze_escape_world::{navigation, Grid};

/// Single pursuer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PursuitAgent {
    body: Body,
}

impl PursuitAgent {
    /// Wraps an existing body.
    #[must_use]
    pub const fn new(body: Body) -> Self {
        Self { body }
    }

    /// Creates a pursuer standing at the centre of `cell`.
    #[must_use]
    pub fn spawn_at(cell: CellCoord, speed: f32, radius: f32) -> Self {
        Self::new(Body::new(cell.center(), speed, radius))
    }

    /// Physical state of the pursuer.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.body.position
    }

    /// Advances the pursuer toward `target`.
    ///
    /// A zero `dt` leaves the pursuer untouched. An unreachable target holds
    /// the pursuer in place for this tick.
    pub fn update(&mut self, grid: &Grid, target: Position, dt: Duration) {
        let step = self.body.speed * dt.as_secs_f32();
        if step <= 0.0 {
            return;
        }

        let position = self.body.position;
        let (Some(source_cell), Some(target_cell)) = (position.cell(), target.cell()) else {
            return;
        };

        if source_cell == target_cell {
            let factor = step.min(1.0);
            self.body.position = position.offset(
                (target.x() - position.x()) * factor,
                (target.y() - position.y()) * factor,
            );
            return;
        }

        let Some(next) = navigation::next_step(grid, source_cell, target_cell) else {
            return;
        };

        let dx = axis_sign(source_cell.column(), next.column()) * step;
        let dy = axis_sign(source_cell.row(), next.row()) * step;

        let mut moved = position;
        let horizontal = moved.offset(dx, 0.0);
        if grid.is_floor_at(horizontal) {
            moved = horizontal;
        }
        let vertical = moved.offset(0.0, dy);
        if grid.is_floor_at(vertical) {
            moved = vertical;
        }
        self.body.position = moved;
    }

    /// Reports whether the pursuer touches `player`.
    #[must_use]
    pub fn check_collision(&self, player: &Body) -> bool {
        self.body.overlaps(player)
    }
}

/// Updates every pursuer against the same target snapshot.
pub fn pursue(agents: &mut [PursuitAgent], grid: &Grid, target: Position, dt: Duration) {
    for agent in agents.iter_mut() {
        agent.update(grid, target, dt);
    }
}

/// Index of the first pursuer touching `player`, if any.
#[must_use]
pub fn first_catch(agents: &[PursuitAgent], player: &Body) -> Option<usize> {
    agents.iter().position(|agent| agent.check_collision(player))
}

fn axis_sign(from: u32, to: u32) -> f32 {
    match to.cmp(&from) {
        std::cmp::Ordering::Greater => 1.0,
        std::cmp::Ordering::Less => -1.0,
        std::cmp::Ordering::Equal => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_sign_follows_step_direction() {
        assert_eq!(axis_sign(3, 4), 1.0);
        assert_eq!(axis_sign(3, 2), -1.0);
        assert_eq!(axis_sign(3, 3), 0.0);
    }

    #[test]
    fn spawn_centres_the_pursuer() {
        let agent = PursuitAgent::spawn_at(CellCoord::new(2, 5), 3.5, 0.25);
        assert_eq!(agent.position(), Position::new(2.5, 5.5));
        assert_eq!(agent.body().radius, 0.25);
    }
}
