//! Scripted input that walks the player toward the goal.

use maze_escape_core::{Direction, InputSnapshot, Position};
use maze_escape_world::{navigation, Grid};

/// Holds the action leading into the first cell of the shortest path from the
/// player to the goal. Returns an idle snapshot when no path exists.
pub(crate) fn steer(grid: &Grid, player: Position) -> InputSnapshot {
    let Some(from) = player.cell() else {
        return InputSnapshot::idle();
    };
    let path = navigation::find_path(grid, from, grid.goal());
    let Some(&next) = path.first() else {
        return InputSnapshot::idle();
    };

    Direction::ALL
        .into_iter()
        .find(|direction| from.step(*direction, 1) == Some(next))
        .map_or_else(InputSnapshot::idle, |direction| {
            InputSnapshot::idle().with_held(direction)
        })
}
