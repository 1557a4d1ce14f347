//! # Configuration
//!
//! All tunables travel as explicit values; nothing in the core reads ambient
//! state. A host loads a [`GameConfig`] once and hands the pieces to the
//! session, the engine and the model-calling provider.
//!
//! ## Usage
//! ```rust
//! use gridiron_core::config::{EngineConfig, GameConfig};
//!
//! let config = GameConfig::default();
//! let brisk = EngineConfig::brisk();
//! assert!(config.validate().is_ok());
//! assert!(brisk.timing.playback_speedup < config.engine.timing.playback_speedup);
//! ```
//!
//! ## Environment Variables
//! - `GRIDIRON_CONFIG_PATH`: JSON config file read by [`GameConfig::from_env`]
//! - `GRIDIRON_API_KEY`: fills an empty `provider.api_key`

mod rules_config;
mod timing_config;

pub use rules_config::RulesConfig;
pub use timing_config::{InterpolationConfig, TimingConfig};

use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

use crate::engine::timestep::MAX_PLAY_SECS;
use crate::error::ConfigError;
use crate::provider::ProviderConfig;

pub const CONFIG_PATH_ENV: &str = "GRIDIRON_CONFIG_PATH";
pub const API_KEY_ENV: &str = "GRIDIRON_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Play summaries passed back to the model as recent history (default: 5)
    pub history_len: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { history_len: 5 }
    }
}

/// Engine-side settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub timing: TimingConfig,
    pub interpolation: InterpolationConfig,
    pub rules: RulesConfig,
    pub session: SessionConfig,
}

impl EngineConfig {
    /// Snappier animations (plays run at 60% of narrated time)
    pub fn brisk() -> Self {
        let mut cfg = Self::default();
        cfg.timing.playback_speedup = 0.6;
        cfg
    }

    /// Animation time equals narrated time
    pub fn realtime() -> Self {
        let mut cfg = Self::default();
        cfg.timing.playback_speedup = 1.0;
        cfg
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let timing = &self.timing;
        if timing.ticks_per_second == 0 || timing.ticks_per_second > 120 {
            return Err(ConfigError::Validation(format!(
                "timing.ticks_per_second must be 1-120, got {}",
                timing.ticks_per_second
            )));
        }
        if !(timing.playback_speedup > 0.0 && timing.playback_speedup <= 4.0) {
            return Err(ConfigError::Validation(format!(
                "timing.playback_speedup must be in (0, 4], got {}",
                timing.playback_speedup
            )));
        }
        if !(0.0..=1.0).contains(&self.interpolation.animation_switch) {
            return Err(ConfigError::Validation(format!(
                "interpolation.animation_switch must be 0.0-1.0, got {}",
                self.interpolation.animation_switch
            )));
        }

        let rules = &self.rules;
        if !(rules.default_elapsed_secs > 0.0 && rules.default_elapsed_secs <= MAX_PLAY_SECS) {
            return Err(ConfigError::Validation(format!(
                "rules.default_elapsed_secs must be in (0, {MAX_PLAY_SECS}], got {}",
                rules.default_elapsed_secs
            )));
        }
        if !(rules.quarter_length_secs > 0.0) {
            return Err(ConfigError::Validation(format!(
                "rules.quarter_length_secs must be positive, got {}",
                rules.quarter_length_secs
            )));
        }
        for (name, spot) in [("kickoff_spot", rules.kickoff_spot), ("opening_spot", rules.opening_spot)] {
            if !(1..=99).contains(&spot) {
                return Err(ConfigError::Validation(format!(
                    "rules.{name} must be 1-99, got {spot}"
                )));
            }
        }
        if !(1..=99).contains(&rules.first_down_distance) {
            return Err(ConfigError::Validation(format!(
                "rules.first_down_distance must be 1-99, got {}",
                rules.first_down_distance
            )));
        }
        Ok(())
    }
}

/// Everything a host needs to run a match
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub provider: ProviderConfig,
    pub engine: EngineConfig,
}

impl GameConfig {
    /// Load GameConfig from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parse GameConfig from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.provider.validate()
    }

    /// Config named by `GRIDIRON_CONFIG_PATH` (defaults when unset), with the
    /// api key taken from `GRIDIRON_API_KEY` when the file leaves it empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                log::info!("Loading config from {}={}", CONFIG_PATH_ENV, path.trim());
                Self::load(path.trim())?
            }
            _ => Self::default(),
        };

        if config.provider.api_key.is_empty() {
            if let Ok(key) = env::var(API_KEY_ENV) {
                config.provider.api_key = key.trim().to_string();
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderKind;

    #[test]
    fn test_default_config() {
        let cfg = GameConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.engine.timing.ticks_per_second, 10);
        assert_eq!(cfg.engine.timing.playback_speedup, 0.75);
        assert_eq!(cfg.engine.rules.quarter_length_secs, 300.0);
        assert_eq!(cfg.engine.rules.touchdown_points, 7);
        assert!(!cfg.engine.interpolation.hold_absent_actors);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg = GameConfig::from_json(
            r#"{"provider": {"provider": "local", "model": "tiny"}, "engine": {"timing": {"playback_speedup": 1.0}}}"#,
        )
        .unwrap();
        assert_eq!(cfg.provider.provider, ProviderKind::Local);
        assert_eq!(cfg.provider.model, "tiny");
        assert_eq!(cfg.engine.timing.playback_speedup, 1.0);
        assert_eq!(cfg.engine.timing.ticks_per_second, 10);
        assert_eq!(cfg.engine.session.history_len, 5);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = GameConfig::from_json(r#"{"engine": {"timing": {"ticks_per_second": 0}}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let mut engine = EngineConfig::default();
        engine.rules.kickoff_spot = 100;
        assert!(engine.validate().is_err());

        let mut engine = EngineConfig::default();
        engine.rules.default_elapsed_secs = 600.0;
        assert!(engine.validate().is_err());
    }

    #[test]
    fn test_presets() {
        assert!(EngineConfig::brisk().validate().is_ok());
        assert_eq!(EngineConfig::realtime().timing.playback_speedup, 1.0);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("gridiron.json");
        fs::write(&path, r#"{"provider": {"useCompactEncoding": true}}"#).unwrap();

        let cfg = GameConfig::load(&path).unwrap();
        assert!(cfg.provider.use_compact_encoding);
        assert!(matches!(GameConfig::load(dir.path().join("missing.json")), Err(ConfigError::Io(_))));
    }
}
