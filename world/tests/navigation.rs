use maze_escape_core::CellCoord;
use maze_escape_world::{navigation, query, Grid};

#[test]
fn l_shaped_corridor_yields_minimal_path() {
    let grid = Grid::from_ascii(&["#####", "#S..#", "###.#", "###G#", "#####"])
        .expect("valid layout");

    let path = navigation::find_path(&grid, CellCoord::new(1, 1), CellCoord::new(3, 3));

    assert_eq!(path.len(), 4, "expected four steps, got {path:?}");
    assert_eq!(
        path,
        vec![
            CellCoord::new(2, 1),
            CellCoord::new(3, 1),
            CellCoord::new(3, 2),
            CellCoord::new(3, 3),
        ]
    );
}

#[test]
fn walled_in_target_returns_empty_path() {
    let grid = Grid::from_ascii(&["#######", "#S.#G##", "#######"])
        .expect("valid layout");

    assert!(navigation::find_path(&grid, grid.start(), grid.goal()).is_empty());
    assert_eq!(navigation::next_step(&grid, grid.start(), grid.goal()), None);
}

#[test]
fn void_is_never_traversed() {
    let grid = Grid::from_ascii(&["#####", "#S~G#", "#####"]).expect("valid layout");

    assert!(navigation::find_path(&grid, grid.start(), grid.goal()).is_empty());
}

#[test]
fn wall_and_out_of_range_targets_return_empty_path() {
    let grid = Grid::from_ascii(&["#####", "#S..#", "#####"]).expect("valid layout");

    assert!(navigation::find_path(&grid, grid.start(), CellCoord::new(0, 0)).is_empty());
    assert!(navigation::find_path(&grid, grid.start(), CellCoord::new(40, 1)).is_empty());
    assert!(navigation::find_path(&grid, CellCoord::new(40, 1), grid.start()).is_empty());
}

#[test]
fn path_cells_are_adjacent_floors() {
    let grid = Grid::from_ascii(&[
        "#########",
        "#S..#...#",
        "#.#.#.#.#",
        "#.#...#.#",
        "#.#####.#",
        "#......G#",
        "#########",
    ])
    .expect("valid layout");

    let path = navigation::find_path(&grid, grid.start(), grid.goal());
    assert_eq!(path.last(), Some(&grid.goal()));

    let mut previous = grid.start();
    for cell in &path {
        assert!(grid.is_floor(*cell), "path crosses non-floor cell {cell:?}");
        assert_eq!(previous.manhattan_distance(*cell), 1);
        previous = *cell;
    }

    assert_eq!(path.len(), 10);
    assert_eq!(query::reachable_floor_count(&grid, grid.start()), query::floor_count(&grid));
}
