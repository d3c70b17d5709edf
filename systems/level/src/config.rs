//! Tunable parameters for the level state machine.

use std::time::Duration;

use maze_escape_core::CellCoord;
use maze_escape_system_activation::Config as ActivationConfig;
use maze_escape_system_maze_generation::Dimensions;
use serde::Deserialize;
use thiserror::Error;

/// Smallest interior side that always yields a dead-end distinct from the start.
pub const MIN_INTERIOR_SIDE: u32 = 5;

/// Reasons a configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("failed to parse game configuration")]
    Parse(#[from] toml::de::Error),
    /// The level 1 interior is too small to guarantee a playable goal.
    #[error("level 1 interior {columns}x{rows} is below the 5x5 minimum")]
    InteriorTooSmall {
        /// Interior columns at level 1.
        columns: u32,
        /// Interior rows at level 1.
        rows: u32,
    },
    /// The interior caps exceed the embedding field.
    #[error("interior caps {columns}x{rows} exceed the outer field {outer_columns}x{outer_rows}")]
    InteriorExceedsOuter {
        /// Interior column cap.
        columns: u32,
        /// Interior row cap.
        rows: u32,
        /// Outer columns.
        outer_columns: u32,
        /// Outer rows.
        outer_rows: u32,
    },
    /// The carving seed is not strictly inside the level 1 interior.
    #[error("seed cell {0:?} is not strictly inside the level 1 interior")]
    SeedOutsideInterior(CellCoord),
    /// A speed, radius or threshold is zero, negative or not finite.
    #[error("`{0}` must be positive and finite")]
    NonPositive(&'static str),
    /// The activation window has no duration.
    #[error("`activation_window_ms` must be greater than zero")]
    ZeroActivationWindow,
}

/// Game tuning loaded from TOML. Missing keys fall back to [`Default`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Length of the level intro screen in milliseconds.
    pub intro_ms: u64,
    /// Columns of the void embedding field.
    pub outer_columns: u32,
    /// Rows of the void embedding field.
    pub outer_rows: u32,
    /// Interior side length before per-level growth.
    pub base_inner_size: u32,
    /// Interior growth per level, applied to both axes.
    pub inner_growth_per_level: u32,
    /// Interior column cap.
    pub max_inner_columns: u32,
    /// Interior row cap.
    pub max_inner_rows: u32,
    /// Carving seed in interior coordinates.
    pub seed_cell: CellCoord,
    /// Player speed in cells per second.
    pub player_speed: f32,
    /// Player collision radius in cells.
    pub player_radius: f32,
    /// Pursuer collision radius in cells.
    pub agent_radius: f32,
    /// Pursuer speed before per-level growth.
    pub agent_base_speed: f32,
    /// Pursuer speed gained per level.
    pub agent_speed_per_level: f32,
    /// Pursuer speed cap.
    pub agent_max_speed: f32,
    /// Distance the player travels before the activation window opens.
    pub activation_distance: f32,
    /// Length of the activation window in milliseconds.
    pub activation_window_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            intro_ms: 3_000,
            outer_columns: 35,
            outer_rows: 20,
            base_inner_size: 8,
            inner_growth_per_level: 2,
            max_inner_columns: 35,
            max_inner_rows: 20,
            seed_cell: CellCoord::new(1, 1),
            player_speed: 1.5,
            player_radius: 0.25,
            agent_radius: 0.25,
            agent_base_speed: 3.0,
            agent_speed_per_level: 0.5,
            agent_max_speed: 6.0,
            activation_distance: 5.0,
            activation_window_ms: 300,
        }
    }
}

impl GameConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every invariant the state machine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("player_speed", self.player_speed),
            ("player_radius", self.player_radius),
            ("agent_radius", self.agent_radius),
            ("agent_base_speed", self.agent_base_speed),
            ("agent_max_speed", self.agent_max_speed),
            ("activation_distance", self.activation_distance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive(name));
            }
        }
        if !self.agent_speed_per_level.is_finite() || self.agent_speed_per_level < 0.0 {
            return Err(ConfigError::NonPositive("agent_speed_per_level"));
        }

        if self.activation_window_ms == 0 {
            return Err(ConfigError::ZeroActivationWindow);
        }

        if self.max_inner_columns > self.outer_columns || self.max_inner_rows > self.outer_rows {
            return Err(ConfigError::InteriorExceedsOuter {
                columns: self.max_inner_columns,
                rows: self.max_inner_rows,
                outer_columns: self.outer_columns,
                outer_rows: self.outer_rows,
            });
        }

        let first = self.inner_dimensions(1);
        if first.columns() < MIN_INTERIOR_SIDE || first.rows() < MIN_INTERIOR_SIDE {
            return Err(ConfigError::InteriorTooSmall {
                columns: first.columns(),
                rows: first.rows(),
            });
        }

        let seed = self.seed_cell;
        if seed.column() == 0
            || seed.row() == 0
            || seed.column() + 1 >= first.columns()
            || seed.row() + 1 >= first.rows()
        {
            return Err(ConfigError::SeedOutsideInterior(seed));
        }

        Ok(())
    }

    /// Interior size used for `level`.
    ///
    /// Grows by `inner_growth_per_level` per level on both axes and saturates
    /// at the configured caps.
    #[must_use]
    pub fn inner_dimensions(&self, level: u32) -> Dimensions {
        let side = level
            .saturating_mul(self.inner_growth_per_level)
            .saturating_add(self.base_inner_size);
        Dimensions::new(
            side.min(self.max_inner_columns),
            side.min(self.max_inner_rows),
        )
    }

    /// Size of the void embedding field.
    #[must_use]
    pub fn outer_dimensions(&self) -> Dimensions {
        Dimensions::new(self.outer_columns, self.outer_rows)
    }

    /// Pursuer speed for `level`, ramping linearly up to the cap.
    #[must_use]
    pub fn agent_speed(&self, level: u32) -> f32 {
        (level as f32 * self.agent_speed_per_level + self.agent_base_speed)
            .min(self.agent_max_speed)
    }

    /// Length of the level intro screen.
    #[must_use]
    pub fn intro_duration(&self) -> Duration {
        Duration::from_millis(self.intro_ms)
    }

    /// Activation gate parameters.
    #[must_use]
    pub fn activation(&self) -> ActivationConfig {
        ActivationConfig::new(
            self.activation_distance,
            Duration::from_millis(self.activation_window_ms),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn interior_grows_and_saturates() {
        let config = GameConfig::default();
        assert_eq!(config.inner_dimensions(1), Dimensions::new(10, 10));
        assert_eq!(config.inner_dimensions(5), Dimensions::new(18, 18));
        assert_eq!(config.inner_dimensions(6), Dimensions::new(20, 20));
        assert_eq!(config.inner_dimensions(7), Dimensions::new(22, 20));
        assert_eq!(config.inner_dimensions(40), Dimensions::new(35, 20));
        assert_eq!(config.inner_dimensions(u32::MAX), Dimensions::new(35, 20));
    }

    #[test]
    fn agent_speed_ramps_to_cap() {
        let config = GameConfig::default();
        assert!((config.agent_speed(1) - 3.5).abs() < f32::EPSILON);
        assert!((config.agent_speed(4) - 5.0).abs() < f32::EPSILON);
        assert!((config.agent_speed(6) - 6.0).abs() < f32::EPSILON);
        assert!((config.agent_speed(30) - 6.0).abs() < f32::EPSILON);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml_str(
            "intro_ms = 500\nseed_cell = { column = 3, row = 1 }\n",
        )
        .expect("valid config");
        assert_eq!(config.intro_ms, 500);
        assert_eq!(config.seed_cell, CellCoord::new(3, 1));
        assert_eq!(config.outer_columns, 35);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = GameConfig::from_toml_str("intro_seconds = 3\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn tiny_interior_is_rejected() {
        let config = GameConfig {
            base_inner_size: 1,
            inner_growth_per_level: 1,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InteriorTooSmall { columns: 2, rows: 2 })
        ));
    }

    #[test]
    fn oversized_caps_are_rejected() {
        let config = GameConfig {
            max_inner_rows: 21,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InteriorExceedsOuter { rows: 21, .. })
        ));
    }

    #[test]
    fn seed_on_interior_edge_is_rejected() {
        let config = GameConfig {
            seed_cell: CellCoord::new(9, 1),
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SeedOutsideInterior(_))
        ));
    }

    #[test]
    fn non_positive_values_are_rejected() {
        let config = GameConfig {
            player_speed: 0.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive("player_speed"))
        ));

        let config = GameConfig {
            activation_window_ms: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroActivationWindow)
        ));
    }
}
