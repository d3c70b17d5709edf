use std::fmt;

use maze_escape_core::Cue;
use serde::Serialize;

/// Aggregate outcome of one headless run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RunSummary {
    pub(crate) seed: Option<u64>,
    pub(crate) frames: u64,
    pub(crate) simulated_ms: u64,
    pub(crate) final_level: u32,
    pub(crate) goals_reached: u32,
    pub(crate) catches: u32,
    pub(crate) activations: u32,
    pub(crate) frames_presented: u64,
}

impl RunSummary {
    pub(crate) fn record(&mut self, cue: Cue) {
        match cue {
            Cue::GoalReached => self.goals_reached += 1,
            Cue::Caught => self.catches += 1,
            Cue::ActivationOpened => self.activations += 1,
            Cue::LevelIntro { .. } | Cue::PlayStarted | Cue::ActivationClosed => {}
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.seed {
            Some(seed) => writeln!(f, "seed:          {seed}")?,
            None => writeln!(f, "seed:          entropy")?,
        }
        writeln!(
            f,
            "frames:        {} ({} ms simulated)",
            self.frames, self.simulated_ms
        )?;
        writeln!(f, "final level:   {}", self.final_level)?;
        writeln!(f, "goals reached: {}", self.goals_reached)?;
        writeln!(f, "catches:       {}", self.catches)?;
        write!(f, "activations:   {}", self.activations)
    }
}
