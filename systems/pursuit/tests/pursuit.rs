use std::time::Duration;

use maze_escape_core::{Body, CellCoord, Position};
use maze_escape_system_pursuit::{first_catch, pursue, PursuitAgent};
use maze_escape_world::Grid;

const TENTH: Duration = Duration::from_millis(100);

fn corridor() -> Grid {
    Grid::from_ascii(&["#####", "#S..#", "###.#", "###G#", "#####"]).expect("valid layout")
}

fn agent_at(x: f32, y: f32) -> PursuitAgent {
    PursuitAgent::new(Body::new(Position::new(x, y), 3.0, 0.25))
}

fn assert_close(actual: Position, expected: Position) {
    assert!(
        actual.distance(expected) < 1e-4,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn zero_elapsed_time_is_idempotent() {
    let grid = corridor();
    let mut agent = agent_at(1.5, 1.5);
    let before = agent;

    for _ in 0..10 {
        agent.update(&grid, Position::new(3.5, 3.5), Duration::ZERO);
    }

    assert_eq!(agent, before);
}

#[test]
fn follows_first_path_cell() {
    let grid = corridor();
    let mut agent = agent_at(1.5, 1.5);

    agent.update(&grid, Position::new(3.5, 3.5), TENTH);

    assert_close(agent.position(), Position::new(1.8, 1.5));
}

#[test]
fn turns_the_corner_toward_target() {
    let grid = corridor();
    let mut agent = agent_at(3.5, 1.5);

    agent.update(&grid, Position::new(3.5, 3.5), TENTH);

    assert_close(agent.position(), Position::new(3.5, 1.8));
}

#[test]
fn closes_in_directly_when_sharing_a_cell() {
    let grid = corridor();
    let mut agent = agent_at(1.2, 1.2);

    agent.update(&grid, Position::new(1.8, 1.8), TENTH);

    assert_close(agent.position(), Position::new(1.38, 1.38));
}

#[test]
fn shared_cell_never_overshoots_target() {
    let grid = corridor();
    let mut agent = agent_at(1.2, 1.2);

    agent.update(&grid, Position::new(1.8, 1.8), Duration::from_secs(5));

    assert_close(agent.position(), Position::new(1.8, 1.8));
}

#[test]
fn step_into_wall_is_rejected_per_axis() {
    let grid = corridor();
    let mut agent = agent_at(1.5, 1.5);

    // A full second at three cells per second would land inside the east wall.
    agent.update(&grid, Position::new(3.5, 3.5), Duration::from_secs(1));

    assert_close(agent.position(), Position::new(1.5, 1.5));
}

#[test]
fn unreachable_target_holds_position() {
    let grid = Grid::from_ascii(&["#######", "#S.#G##", "#######"]).expect("valid layout");
    let mut agent = agent_at(1.5, 1.5);

    agent.update(&grid, grid.goal().center(), TENTH);

    assert_close(agent.position(), Position::new(1.5, 1.5));
}

#[test]
fn target_outside_grid_holds_position() {
    let grid = corridor();
    let mut agent = agent_at(1.5, 1.5);

    agent.update(&grid, Position::new(-3.0, 1.5), TENTH);

    assert_close(agent.position(), Position::new(1.5, 1.5));
}

#[test]
fn repeated_updates_reach_the_target_cell() {
    let grid = corridor();
    let mut agent = PursuitAgent::spawn_at(grid.start(), 3.0, 0.25);
    let target = grid.goal().center();

    for _ in 0..90 {
        agent.update(&grid, target, Duration::from_millis(16));
        assert!(grid.is_floor_at(agent.position()), "left the floor at {:?}", agent.position());
    }

    assert_eq!(agent.position().cell(), Some(CellCoord::new(3, 3)));
}

#[test]
fn collision_uses_radius_sum() {
    let agent = agent_at(2.0, 1.5);
    let near = Body::new(Position::new(2.4, 1.5), 1.5, 0.25);
    let far = Body::new(Position::new(2.6, 1.5), 1.5, 0.25);

    assert!(agent.check_collision(&near));
    assert!(!agent.check_collision(&far));
}

#[test]
fn pursue_moves_every_agent_and_reports_first_catch() {
    let grid = corridor();
    let mut agents = vec![agent_at(1.5, 1.5), agent_at(3.5, 2.5)];
    let target = Position::new(3.5, 3.5);

    pursue(&mut agents, &grid, target, TENTH);

    assert_close(agents[0].position(), Position::new(1.8, 1.5));
    assert_close(agents[1].position(), Position::new(3.5, 2.8));

    let player = Body::new(Position::new(3.5, 3.1), 1.5, 0.25);
    assert_eq!(first_catch(&agents, &player), Some(1));
}
