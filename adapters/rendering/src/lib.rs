#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Escape adapters.
//!
//! Adapters describe what is on screen with a [`Scene`], turn it into a
//! character-cell [`TextFrame`] and hand that frame to a [`RenderingBackend`].

use std::fmt;

use anyhow::Result as AnyResult;
use maze_escape_core::{CellCoord, CellState, LevelMode, Position};
use maze_escape_world::Grid;

/// Characters used for every kind of cell and inhabitant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphSet {
    /// Wall cells.
    pub wall: char,
    /// Floor cells.
    pub floor: char,
    /// Void padding around the maze.
    pub void: char,
    /// The player.
    pub player: char,
    /// The goal-target.
    pub goal: char,
    /// Pursuers.
    pub pursuer: char,
}

impl GlyphSet {
    fn cell(&self, state: CellState) -> char {
        match state {
            CellState::Wall => self.wall,
            CellState::Floor => self.floor,
            CellState::Void => self.void,
        }
    }
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self {
            wall: '#',
            floor: '.',
            void: ' ',
            player: '@',
            goal: 'G',
            pursuer: 'x',
        }
    }
}

/// Scene description assembled by adapters from simulation state.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene<'a> {
    /// Maze being played.
    pub grid: &'a Grid,
    /// Discrete mode; intro screens hide the maze.
    pub mode: LevelMode,
    /// Current level.
    pub level: u32,
    /// Player position.
    pub player: Position,
    /// Goal-target position.
    pub goal: Position,
    /// Pursuer positions.
    pub pursuers: Vec<Position>,
    /// Whether the activation window is open.
    pub activation_open: bool,
}

/// Rendered character frame, one string per line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextFrame {
    lines: Vec<String>,
}

impl TextFrame {
    /// Renders `scene` using `glyphs`.
    ///
    /// The frame always spans the grid plus one status line. Inhabitants are
    /// drawn in the cell containing their position, the player above the
    /// pursuers and the pursuers above the goal.
    #[must_use]
    pub fn render(scene: &Scene<'_>, glyphs: &GlyphSet) -> Self {
        let grid = scene.grid;
        let columns = grid.columns() as usize;

        let mut lines: Vec<String> = match scene.mode {
            LevelMode::LevelIntro { level } => intro_lines(grid, level),
            LevelMode::Playing => {
                let mut canvas: Vec<Vec<char>> = (0..grid.rows())
                    .map(|row| {
                        grid.row(row)
                            .unwrap_or_default()
                            .iter()
                            .map(|state| glyphs.cell(*state))
                            .collect()
                    })
                    .collect();

                plot(&mut canvas, scene.goal, glyphs.goal);
                for pursuer in &scene.pursuers {
                    plot(&mut canvas, *pursuer, glyphs.pursuer);
                }
                plot(&mut canvas, scene.player, glyphs.player);

                canvas
                    .into_iter()
                    .map(|line| line.into_iter().collect())
                    .collect()
            }
        };

        let status = format!(
            "Level {}{}",
            scene.level,
            if scene.activation_open { "  [pursuers awake]" } else { "" }
        );
        lines.push(pad_to(status, columns));

        Self { lines }
    }

    /// Lines of the frame from top to bottom.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl fmt::Display for TextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Rendering backend capable of presenting Maze Escape frames.
pub trait RenderingBackend {
    /// Presents one frame.
    fn present(&mut self, frame: &TextFrame) -> AnyResult<()>;
}

fn intro_lines(grid: &Grid, level: u32) -> Vec<String> {
    let columns = grid.columns() as usize;
    let title = format!("Level {level}");
    let middle = grid.rows() / 2;

    (0..grid.rows())
        .map(|row| {
            if row == middle {
                let indent = columns.saturating_sub(title.chars().count()) / 2;
                pad_to(format!("{}{title}", " ".repeat(indent)), columns)
            } else {
                " ".repeat(columns)
            }
        })
        .collect()
}

fn plot(canvas: &mut [Vec<char>], position: Position, glyph: char) {
    let Some(cell) = position.cell() else {
        return;
    };
    if let Some(slot) = slot_mut(canvas, cell) {
        *slot = glyph;
    }
}

fn slot_mut(canvas: &mut [Vec<char>], cell: CellCoord) -> Option<&mut char> {
    canvas
        .get_mut(cell.row() as usize)?
        .get_mut(cell.column() as usize)
}

fn pad_to(mut line: String, width: usize) -> String {
    let length = line.chars().count();
    if length < width {
        line.extend(std::iter::repeat(' ').take(width - length));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::from_ascii(&["~~~~~~~", "~#####~", "~#S.G#~", "~#####~"]).expect("valid layout")
    }

    fn scene(grid: &Grid, mode: LevelMode) -> Scene<'_> {
        Scene {
            grid,
            mode,
            level: 3,
            player: Position::new(2.5, 2.5),
            goal: Position::new(4.5, 2.5),
            pursuers: vec![Position::new(3.2, 2.9)],
            activation_open: false,
        }
    }

    #[test]
    fn playing_frame_draws_cells_and_inhabitants() {
        let grid = grid();
        let frame = TextFrame::render(&scene(&grid, LevelMode::Playing), &GlyphSet::default());

        assert_eq!(
            frame.lines(),
            &[
                "       ".to_owned(),
                " ##### ".to_owned(),
                " #@xG# ".to_owned(),
                " ##### ".to_owned(),
                "Level 3".to_owned(),
            ]
        );
    }

    #[test]
    fn player_is_drawn_above_other_inhabitants() {
        let grid = grid();
        let mut scene = scene(&grid, LevelMode::Playing);
        scene.pursuers = vec![scene.player];
        let frame = TextFrame::render(&scene, &GlyphSet::default());
        assert_eq!(frame.lines()[2], " #@.G# ");
    }

    #[test]
    fn positions_outside_the_grid_are_skipped() {
        let grid = grid();
        let mut scene = scene(&grid, LevelMode::Playing);
        scene.pursuers = vec![Position::new(-1.0, 2.0), Position::new(40.0, 1.0)];
        let frame = TextFrame::render(&scene, &GlyphSet::default());
        assert_eq!(frame.lines()[2], " #@.G# ");
    }

    #[test]
    fn intro_frame_hides_the_maze() {
        let grid = grid();
        let frame = TextFrame::render(
            &scene(&grid, LevelMode::LevelIntro { level: 3 }),
            &GlyphSet::default(),
        );

        assert_eq!(frame.lines().len(), 5);
        assert_eq!(frame.lines()[2], "Level 3");
        assert!(frame.lines()[..2]
            .iter()
            .all(|line| line.trim().is_empty()));
        assert!(!frame.to_string().contains('#'));
    }

    #[test]
    fn status_line_reports_open_gate() {
        let grid = grid();
        let mut scene = scene(&grid, LevelMode::Playing);
        scene.activation_open = true;
        let frame = TextFrame::render(&scene, &GlyphSet::default());
        assert_eq!(frame.lines()[4], "Level 3  [pursuers awake]");
    }

    #[test]
    fn display_joins_lines() {
        let grid = grid();
        let frame = TextFrame::render(&scene(&grid, LevelMode::Playing), &GlyphSet::default());
        assert_eq!(frame.to_string().lines().count(), 5);
    }
}
