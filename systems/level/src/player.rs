use std::time::Duration;

use maze_escape_core::{Body, Direction, InputSnapshot, Motion};
use maze_escape_world::Grid;

const VERTICAL_THEN_HORIZONTAL: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::West,
    Direction::East,
];

/// Moves the player according to the held actions.
///
/// Each held direction is tried against the position produced by the previous
/// one and only applied when the destination is floor.
pub(crate) fn advance(
    player: &mut Body,
    grid: &Grid,
    input: &InputSnapshot,
    dt: Duration,
) -> Motion {
    let step = player.speed * dt.as_secs_f32();
    if step <= 0.0 {
        return Motion::Idle;
    }

    let mut motion = Motion::Idle;
    for direction in VERTICAL_THEN_HORIZONTAL {
        if !input.is_action_held(direction) {
            continue;
        }
        let (dx, dy) = direction.delta();
        let candidate = player.position.offset(dx as f32 * step, dy as f32 * step);
        if grid.is_floor_at(candidate) {
            player.position = candidate;
            motion = Motion::Walking(direction);
        }
    }
    motion
}
