#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Maze Escape headlessly.
//!
//! The player is steered by an autopilot that follows the shortest path to
//! the goal, frames are printed as text and the run ends with a summary.

mod autopilot;
mod backend;
mod summary;

use std::{fs, io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use maze_escape_core::{Cue, InputSnapshot, LevelMode, WELCOME_BANNER};
use maze_escape_rendering::{GlyphSet, RenderingBackend, Scene, TextFrame};
use maze_escape_system_level::{GameConfig, LevelStateMachine, LevelView};
use maze_escape_system_maze_generation::MazeGenerator;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{backend::TextBackend, summary::RunSummary};

#[derive(Debug, Parser)]
#[command(name = "maze-escape", about = "Headless Maze Escape runner")]
struct Cli {
    /// Seed for maze generation; omitted seeds draw from system entropy.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 3_600)]
    frames: u64,
    /// Simulated milliseconds per frame.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// TOML file with game tuning.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the level intro duration from the configuration.
    #[arg(long)]
    intro_ms: Option<u64>,
    /// Print every Nth frame; zero disables frame output.
    #[arg(long, default_value_t = 30)]
    render_every: u64,
    /// Stop as soon as this level is announced.
    #[arg(long)]
    stop_at_level: Option<u32>,
    /// Print the summary as JSON instead of text.
    #[arg(long)]
    summary_json: bool,
}

/// Entry point for the Maze Escape command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let summary = run(&cli, config)?;

    if cli.summary_json {
        println!(
            "{}",
            serde_json::to_string(&summary).context("failed to encode summary")?
        );
    } else {
        println!("{summary}");
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            GameConfig::from_toml_str(&source)
                .with_context(|| format!("invalid configuration in {}", path.display()))?
        }
        None => GameConfig::default(),
    };

    if let Some(intro_ms) = cli.intro_ms {
        config.intro_ms = intro_ms;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn run(cli: &Cli, config: GameConfig) -> Result<RunSummary> {
    let generator = match cli.seed {
        Some(seed) => MazeGenerator::from_seed(seed),
        None => MazeGenerator::from_entropy(),
    };
    let mut machine =
        LevelStateMachine::new(config, generator).context("failed to load the first level")?;
    info!(seed = ?cli.seed, "{}", WELCOME_BANNER);

    let frame_dt = Duration::from_millis(cli.frame_ms);
    let glyphs = GlyphSet::default();
    let mut backend = TextBackend::new(io::stdout().lock());
    let mut summary = RunSummary {
        seed: cli.seed,
        ..RunSummary::default()
    };
    let mut cues = Vec::new();

    for frame in 0..cli.frames {
        let input = match machine.mode() {
            LevelMode::Playing => autopilot::steer(machine.grid(), machine.player().position),
            LevelMode::LevelIntro { .. } => InputSnapshot::idle(),
        };

        cues.clear();
        machine
            .tick(frame_dt, &input, &mut cues)
            .with_context(|| format!("simulation failed on frame {frame}"))?;
        summary.frames += 1;
        for cue in &cues {
            summary.record(*cue);
            log_cue(frame, *cue);
        }

        if cli.render_every > 0 && frame % cli.render_every == 0 {
            let text = TextFrame::render(&scene(&machine.view()), &glyphs);
            backend.present(&text)?;
        }

        if cli
            .stop_at_level
            .is_some_and(|level| machine.level() >= level)
        {
            info!(level = machine.level(), "stop level reached");
            break;
        }
    }

    summary.simulated_ms = summary.frames.saturating_mul(cli.frame_ms);
    summary.final_level = machine.level();
    summary.frames_presented = backend.presented();
    Ok(summary)
}

fn scene<'a>(view: &LevelView<'a>) -> Scene<'a> {
    Scene {
        grid: view.grid(),
        mode: view.mode(),
        level: view.level(),
        player: view.player(),
        goal: view.goal(),
        pursuers: view.pursuers().collect(),
        activation_open: view.activation_open(),
    }
}

fn log_cue(frame: u64, cue: Cue) {
    match cue {
        Cue::LevelIntro { level } => info!(frame, level, "level intro"),
        Cue::GoalReached => info!(frame, "goal reached"),
        Cue::Caught => info!(frame, "caught"),
        Cue::PlayStarted | Cue::ActivationOpened | Cue::ActivationClosed => {
            debug!(frame, ?cue, "cue")
        }
    }
}
