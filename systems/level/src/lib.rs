#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level state machine orchestrating one maze-escape session.
//!
//! The machine alternates between a timed intro screen and active play. While
//! playing it feeds the player's position to the activation gate, moves the
//! pursuers only while the gate is open, applies the player's input and then
//! resolves collisions: reaching the goal cell advances to a larger maze,
//! touching a pursuer restarts the current level on a freshly generated maze.

mod config;
mod player;

use std::{sync::Arc, time::Duration};

use maze_escape_core::{Body, Cue, InputSnapshot, LevelMode, Motion, Position};
use maze_escape_system_activation::{ActivationGate, GateTransition};
use maze_escape_system_maze_generation::{GenerationError, MazeGenerator};
use maze_escape_system_pursuit::{first_catch, pursue, PursuitAgent};
use maze_escape_world::Grid;
use thiserror::Error;
use tracing::{info, warn};

pub use config::{ConfigError, GameConfig, MIN_INTERIOR_SIDE};

/// Failures raised while loading or replacing a level.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The configuration was rejected before the first level was built.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The generator rejected the requested maze.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The generated maze has no goal distinct from its start.
    #[error("maze generated for level {level} has no goal distinct from the start")]
    DegenerateMaze {
        /// Level that was being loaded.
        level: u32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Intro { elapsed: Duration },
    Playing,
}

/// Everything that is rebuilt together whenever a level (re)starts.
#[derive(Clone, Debug)]
struct Stage {
    level: u32,
    grid: Arc<Grid>,
    player: Body,
    motion: Motion,
    goal: Body,
    agents: Vec<PursuitAgent>,
    gate: ActivationGate,
}

impl Stage {
    fn build(
        config: &GameConfig,
        generator: &mut MazeGenerator,
        level: u32,
    ) -> Result<Self, LevelError> {
        let grid = generator.generate(
            config.inner_dimensions(level),
            config.seed_cell,
            config.outer_dimensions(),
        )?;
        if !grid.has_playable_goal() {
            warn!(level, "rejecting maze without a distinct goal");
            return Err(LevelError::DegenerateMaze { level });
        }

        let speed = config.agent_speed(level);
        let agents = grid
            .dead_ends()
            .iter()
            .map(|&cell| PursuitAgent::spawn_at(cell, speed, config.agent_radius))
            .collect();
        let player = Body::new(
            grid.start().center(),
            config.player_speed,
            config.player_radius,
        );
        let goal = Body::new(grid.goal().center(), 0.0, config.player_radius);
        let gate = ActivationGate::new(config.activation(), player.position);

        Ok(Self {
            level,
            grid: Arc::new(grid),
            player,
            motion: Motion::Idle,
            goal,
            agents,
            gate,
        })
    }
}

/// Drives level progression, intro timing and per-tick simulation.
#[derive(Debug)]
pub struct LevelStateMachine {
    config: GameConfig,
    generator: MazeGenerator,
    phase: Phase,
    stage: Stage,
}

impl LevelStateMachine {
    /// Validates `config` and loads level 1 in its intro phase.
    ///
    /// No cue is reported for this first intro; callers read [`Self::mode`].
    pub fn new(config: GameConfig, mut generator: MazeGenerator) -> Result<Self, LevelError> {
        config.validate()?;
        let stage = Stage::build(&config, &mut generator, 1)?;
        info!(level = 1, pursuers = stage.agents.len(), "level loaded");

        Ok(Self {
            config,
            generator,
            phase: Phase::Intro {
                elapsed: Duration::ZERO,
            },
            stage,
        })
    }

    /// Advances the session by `dt`, pushing every cue raised on the way.
    ///
    /// On error the previous level stays in place untouched.
    pub fn tick(
        &mut self,
        dt: Duration,
        input: &InputSnapshot,
        cues: &mut Vec<Cue>,
    ) -> Result<(), LevelError> {
        if let Phase::Intro { elapsed } = self.phase {
            let elapsed = elapsed.saturating_add(dt);
            if elapsed >= self.config.intro_duration() {
                self.phase = Phase::Playing;
                cues.push(Cue::PlayStarted);
                info!(level = self.stage.level, "intro finished");
            } else {
                self.phase = Phase::Intro { elapsed };
            }
            return Ok(());
        }

        let stage = &mut self.stage;
        match stage.gate.update(stage.player.position, dt) {
            Some(GateTransition::Opened) => cues.push(Cue::ActivationOpened),
            Some(GateTransition::Closed) => cues.push(Cue::ActivationClosed),
            None => {}
        }

        if stage.gate.is_open() {
            pursue(&mut stage.agents, &stage.grid, stage.player.position, dt);
        }

        stage.motion = player::advance(&mut stage.player, &stage.grid, input, dt);

        if stage.player.shares_cell_with(&stage.goal) {
            cues.push(Cue::GoalReached);
            let next = stage.level.saturating_add(1);
            info!(from = stage.level, to = next, "goal reached, advancing");
            return self.load(next, cues);
        }

        if let Some(agent) = first_catch(&stage.agents, &stage.player) {
            cues.push(Cue::Caught);
            let level = stage.level;
            info!(level, agent, "player caught, restarting level");
            return self.load(level, cues);
        }

        Ok(())
    }

    fn load(&mut self, level: u32, cues: &mut Vec<Cue>) -> Result<(), LevelError> {
        let stage = Stage::build(&self.config, &mut self.generator, level)?;
        info!(
            level,
            columns = stage.grid.columns(),
            rows = stage.grid.rows(),
            pursuers = stage.agents.len(),
            "level loaded"
        );

        self.stage = stage;
        self.phase = Phase::Intro {
            elapsed: Duration::ZERO,
        };
        cues.push(Cue::LevelIntro { level });
        Ok(())
    }

    /// Current discrete mode.
    #[must_use]
    pub fn mode(&self) -> LevelMode {
        match self.phase {
            Phase::Intro { .. } => LevelMode::LevelIntro {
                level: self.stage.level,
            },
            Phase::Playing => LevelMode::Playing,
        }
    }

    /// Level being played or announced. Starts at 1.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.stage.level
    }

    /// Maze of the current level. Replaced by a new allocation on every load.
    #[must_use]
    pub fn grid(&self) -> &Arc<Grid> {
        &self.stage.grid
    }

    /// Player body.
    #[must_use]
    pub fn player(&self) -> &Body {
        &self.stage.player
    }

    /// Goal-target body.
    #[must_use]
    pub fn goal(&self) -> &Body {
        &self.stage.goal
    }

    /// Pursuers of the current level.
    #[must_use]
    pub fn agents(&self) -> &[PursuitAgent] {
        &self.stage.agents
    }

    /// Activation gate of the current level.
    #[must_use]
    pub fn gate(&self) -> &ActivationGate {
        &self.stage.gate
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only snapshot for presentation adapters.
    #[must_use]
    pub fn view(&self) -> LevelView<'_> {
        LevelView {
            mode: self.mode(),
            level: self.stage.level,
            grid: &self.stage.grid,
            player: self.stage.player.position,
            motion: self.stage.motion,
            goal: self.stage.goal.position,
            agents: &self.stage.agents,
            activation_open: self.stage.gate.is_open(),
        }
    }
}

/// Borrowed view of the session handed to presentation.
#[derive(Clone, Copy, Debug)]
pub struct LevelView<'a> {
    mode: LevelMode,
    level: u32,
    grid: &'a Grid,
    player: Position,
    motion: Motion,
    goal: Position,
    agents: &'a [PursuitAgent],
    activation_open: bool,
}

impl<'a> LevelView<'a> {
    /// Discrete mode.
    #[must_use]
    pub const fn mode(&self) -> LevelMode {
        self.mode
    }

    /// Current level.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Maze being played.
    #[must_use]
    pub const fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Player position.
    #[must_use]
    pub const fn player(&self) -> Position {
        self.player
    }

    /// Motion applied to the player on the last simulated tick.
    #[must_use]
    pub const fn motion(&self) -> Motion {
        self.motion
    }

    /// Goal-target position.
    #[must_use]
    pub const fn goal(&self) -> Position {
        self.goal
    }

    /// Positions of every pursuer.
    pub fn pursuers(&self) -> impl Iterator<Item = Position> + 'a {
        self.agents.iter().map(PursuitAgent::position)
    }

    /// Whether the activation window is open. Presentation widens the
    /// player's light radius while it is.
    #[must_use]
    pub const fn activation_open(&self) -> bool {
        self.activation_open
    }
}
