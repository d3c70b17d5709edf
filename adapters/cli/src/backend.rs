use std::io::Write;

use anyhow::{Context, Result as AnyResult};
use maze_escape_rendering::{RenderingBackend, TextFrame};

/// Writes every frame to a byte sink followed by a blank separator line.
#[derive(Debug)]
pub(crate) struct TextBackend<W> {
    sink: W,
    presented: u64,
}

impl<W: Write> TextBackend<W> {
    pub(crate) fn new(sink: W) -> Self {
        Self { sink, presented: 0 }
    }

    pub(crate) fn presented(&self) -> u64 {
        self.presented
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, frame: &TextFrame) -> AnyResult<()> {
        writeln!(self.sink, "{frame}").context("failed to write frame")?;
        self.sink.flush().context("failed to flush frame")?;
        self.presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_escape_core::{LevelMode, Position};
    use maze_escape_rendering::{GlyphSet, Scene};
    use maze_escape_world::Grid;

    #[test]
    fn frames_are_separated_by_blank_lines() {
        let grid = Grid::from_ascii(&["###", "#S#", "###"]).expect("valid layout");
        let scene = Scene {
            grid: &grid,
            mode: LevelMode::Playing,
            level: 1,
            player: Position::new(1.5, 1.5),
            goal: Position::new(1.5, 1.5),
            pursuers: Vec::new(),
            activation_open: false,
        };
        let frame = TextFrame::render(&scene, &GlyphSet::default());

        let mut backend = TextBackend::new(Vec::new());
        backend.present(&frame).expect("write succeeds");
        backend.present(&frame).expect("write succeeds");
        assert_eq!(backend.presented(), 2);

        let output = String::from_utf8(backend.into_inner()).expect("utf-8 output");
        assert_eq!(output, "###\n#@#\n###\nLevel 1\n\n###\n#@#\n###\nLevel 1\n\n");
    }
}
