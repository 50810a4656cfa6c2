//! Construction-time parameters for a backdrop instance.

use log::Level;
use serde::Deserialize;
use thiserror::Error;

use crate::cell::CellPos;

/// Rejected configuration values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("tick interval must be a positive number of milliseconds")]
    ZeroTickInterval,
    #[error("spawn interval must be a positive number of milliseconds")]
    ZeroSpawnInterval,
    #[error("cell size must be at least one pixel")]
    ZeroCellSize,
    #[error("maximum body length must be at least 1")]
    ZeroMaxLength,
    #[error("spawn attempts must be at least 1")]
    ZeroSpawnAttempts,
    #[error("initial target count {initial} exceeds maximum {max}")]
    TooManyInitialTargets { initial: usize, max: usize },
    #[error("turn chance {0} must be between 0.0 and 1.0")]
    TurnChanceOutOfRange(f64),
    #[error("interval of {0} ms exceeds the host timer limit of {max} ms", max = MAX_INTERVAL_MS)]
    IntervalTooLong(u32),
    #[error("unknown log level {0:?}")]
    UnknownLogLevel(String),
}

/// Browser timers take a signed 32-bit delay.
pub const MAX_INTERVAL_MS: u32 = i32::MAX as u32;

/// Options accepted from the host page. Every field is optional on the JS side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackdropConfig {
    pub tick_ms: u32,
    pub cell_size: u32,
    pub max_targets: usize,
    pub spawn_interval_ms: u32,
    pub initial_targets: usize,
    pub max_length: usize,
    pub start: CellPos,
    pub turn_chance: f64,
    pub spawn_attempts: u32,
    pub seed: Option<u64>,
    /// Console verbosity on the web host: `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            tick_ms: 300,
            cell_size: 25,
            max_targets: 5,
            spawn_interval_ms: 2000,
            initial_targets: 2,
            max_length: 8,
            start: CellPos::new(10, 10),
            turn_chance: 0.2,
            spawn_attempts: 10,
            seed: None,
            log_level: "info".to_owned(),
        }
    }
}

impl BackdropConfig {
    /// Single-target variant: one target on screen at a time.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            max_targets: 1,
            initial_targets: 1,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        for interval in [self.tick_ms, self.spawn_interval_ms] {
            if interval > MAX_INTERVAL_MS {
                return Err(ConfigError::IntervalTooLong(interval));
            }
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.max_length == 0 {
            return Err(ConfigError::ZeroMaxLength);
        }
        if self.spawn_attempts == 0 {
            return Err(ConfigError::ZeroSpawnAttempts);
        }
        if self.initial_targets > self.max_targets {
            return Err(ConfigError::TooManyInitialTargets {
                initial: self.initial_targets,
                max: self.max_targets,
            });
        }
        if !(0.0..=1.0).contains(&self.turn_chance) {
            return Err(ConfigError::TurnChanceOutOfRange(self.turn_chance));
        }
        self.log_level()?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownLogLevel`] for anything `log` does not name.
    pub fn log_level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::UnknownLogLevel(self.log_level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults_are_valid() {
        let config = BackdropConfig::default();
        assert_eq!(config.tick_ms, 300);
        assert_eq!(config.cell_size, 25);
        assert_eq!(config.max_targets, 5);
        assert_eq!(config.spawn_interval_ms, 2000);
        assert_eq!(config.initial_targets, 2);
        assert_eq!(config.max_length, 8);
        assert_eq!(config.start, CellPos::new(10, 10));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn minimal_variant_has_one_target() {
        let config = BackdropConfig::minimal();
        assert_eq!(config.max_targets, 1);
        assert_eq!(config.initial_targets, 1);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn zero_intervals_rejected() {
        let config = BackdropConfig {
            tick_ms: 0,
            ..BackdropConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickInterval));

        let config = BackdropConfig {
            spawn_interval_ms: 0,
            ..BackdropConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSpawnInterval));
    }

    #[test]
    fn zero_sizes_rejected() {
        let config = BackdropConfig {
            cell_size: 0,
            ..BackdropConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCellSize));

        let config = BackdropConfig {
            max_length: 0,
            ..BackdropConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxLength));

        let config = BackdropConfig {
            spawn_attempts: 0,
            ..BackdropConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSpawnAttempts));
    }

    #[test]
    fn initial_targets_above_max_rejected() {
        let config = BackdropConfig {
            max_targets: 1,
            initial_targets: 3,
            ..BackdropConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::TooManyInitialTargets { initial: 3, max: 1 }
        );
        assert_eq!(err.to_string(), "initial target count 3 exceeds maximum 1");
    }

    #[test]
    fn intervals_beyond_host_timer_limit_rejected() {
        let config = BackdropConfig {
            tick_ms: MAX_INTERVAL_MS + 1,
            ..BackdropConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::IntervalTooLong(MAX_INTERVAL_MS + 1))
        );

        let config = BackdropConfig {
            spawn_interval_ms: u32::MAX,
            ..BackdropConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::IntervalTooLong(u32::MAX)));

        let config = BackdropConfig {
            tick_ms: MAX_INTERVAL_MS,
            spawn_interval_ms: MAX_INTERVAL_MS,
            ..BackdropConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
        assert!(i32::try_from(config.tick_ms).is_ok());
    }

    #[test]
    fn log_level_parses_case_insensitively() {
        assert_eq!(BackdropConfig::default().log_level(), Ok(Level::Info));
        let config = BackdropConfig {
            log_level: "DEBUG".to_owned(),
            ..BackdropConfig::default()
        };
        assert_eq!(config.log_level(), Ok(Level::Debug));
    }

    #[test]
    fn unknown_log_level_rejected() {
        let config = BackdropConfig {
            log_level: "chatty".to_owned(),
            ..BackdropConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownLogLevel("chatty".to_owned()))
        );
    }

    #[test]
    fn zero_targets_is_allowed() {
        let config = BackdropConfig {
            max_targets: 0,
            initial_targets: 0,
            ..BackdropConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    proptest! {
        #[test]
        fn prop_turn_chance_outside_unit_range_rejected(
            chance in prop_oneof![(-10.0f64..-0.0001), (1.0001f64..10.0)],
        ) {
            let config = BackdropConfig {
                turn_chance: chance,
                ..BackdropConfig::default()
            };
            prop_assert_eq!(config.validate(), Err(ConfigError::TurnChanceOutOfRange(chance)));
        }
    }
}
