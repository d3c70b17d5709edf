#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Distance-triggered activation window that gates pursuer updates.
//!
//! The gate watches a tracked position. While dormant it accumulates the
//! Euclidean distance travelled between updates; once the total reaches the
//! configured threshold the window opens for a fixed duration, during which
//! distance accumulation is suspended. Closing the window resets the
//! accumulator and the reference position.

use std::time::Duration;

use maze_escape_core::Position;
use tracing::debug;

/// Configuration parameters required to construct the gate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    distance_threshold: f32,
    window: Duration,
}

impl Config {
    /// Creates a new configuration from the distance threshold (cells) and the
    /// window length.
    #[must_use]
    pub const fn new(distance_threshold: f32, window: Duration) -> Self {
        Self {
            distance_threshold,
            window,
        }
    }

    /// Distance that must be travelled before the window opens.
    #[must_use]
    pub const fn distance_threshold(&self) -> f32 {
        self.distance_threshold
    }

    /// Length of an open window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(5.0, Duration::from_millis(300))
    }
}

/// Whether the window is currently open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GatePhase {
    /// Accumulating distance; pursuers are frozen.
    Dormant,
    /// Window open; pursuers move.
    Active,
}

/// Phase change reported by [`ActivationGate::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateTransition {
    /// The threshold was crossed and the window opened.
    Opened,
    /// The window elapsed and the gate went dormant.
    Closed,
}

/// Two-state activation gate.
#[derive(Clone, Debug)]
pub struct ActivationGate {
    config: Config,
    last_position: Position,
    travelled: f32,
    phase: GatePhase,
    active_for: Duration,
}

impl ActivationGate {
    /// Creates a dormant gate tracking movement from `origin`.
    #[must_use]
    pub fn new(config: Config, origin: Position) -> Self {
        Self {
            config,
            last_position: origin,
            travelled: 0.0,
            phase: GatePhase::Dormant,
            active_for: Duration::ZERO,
        }
    }

    /// Feeds the tracked position observed this tick.
    ///
    /// The tick that crosses the threshold opens the window without counting
    /// its `dt`; later ticks accumulate active time until the window elapses.
    pub fn update(&mut self, tracked: Position, dt: Duration) -> Option<GateTransition> {
        match self.phase {
            GatePhase::Active => {
                self.active_for = self.active_for.saturating_add(dt);
                self.last_position = tracked;
                self.travelled = 0.0;

                if self.active_for < self.config.window {
                    return None;
                }

                self.phase = GatePhase::Dormant;
                self.active_for = Duration::ZERO;
                debug!("activation window closed");
                Some(GateTransition::Closed)
            }
            GatePhase::Dormant => {
                self.travelled += self.last_position.distance(tracked);
                self.last_position = tracked;

                if self.travelled < self.config.distance_threshold {
                    return None;
                }

                self.phase = GatePhase::Active;
                debug!(travelled = self.travelled, "activation window opened");
                Some(GateTransition::Opened)
            }
        }
    }

    /// Reports whether pursuers should move this tick.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase == GatePhase::Active
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    /// Distance accumulated since the last reset.
    #[must_use]
    pub fn travelled(&self) -> f32 {
        self.travelled
    }

    /// Time spent in the currently open window.
    #[must_use]
    pub fn active_for(&self) -> Duration {
        self.active_for
    }
}
