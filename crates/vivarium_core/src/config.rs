//! Configuration management for simulation parameters.
//!
//! Strongly-typed structures mapping to a `vivarium.toml` file. Defaults
//! are hardcoded in the `Default` impls; a config file overrides them.
//!
//! ## Example `vivarium.toml`
//!
//! ```toml
//! [world]
//! width = 120
//! height = 80
//! seed = 42
//!
//! [events]
//! spawn_probability = 0.002
//! min_interval = 300
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// World-level simulation configuration: grid shape and the RNG seed.
/// Without a seed both the automaton and event scheduler draw entropy
/// seeds, and runs are not reproducible.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 120,
            height: 80,
            seed: None,
        }
    }
}

/// Event scheduler configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EventConfig {
    /// Per-tick Bernoulli spawn chance once the rate limit has elapsed.
    pub spawn_probability: f64,
    /// Minimum ticks between event spawns.
    pub min_interval: u32,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            spawn_probability: 0.002,
            min_interval: 300,
        }
    }
}

/// Top-level simulation configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub events: EventConfig,
}

impl SimConfig {
    /// Validates all parameter ranges.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            (1..=4096).contains(&self.world.width),
            "World width must be in [1, 4096]"
        );
        anyhow::ensure!(
            (1..=4096).contains(&self.world.height),
            "World height must be in [1, 4096]"
        );
        anyhow::ensure!(
            (0.0..=0.1).contains(&self.events.spawn_probability),
            "Event spawn probability must be in [0.0, 0.1]"
        );
        anyhow::ensure!(
            self.events.min_interval >= 1,
            "Event interval must be at least 1 tick"
        );
        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a file path.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {path}"))?;
        Self::from_toml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.world.width, 120);
        assert_eq!(config.world.height, 80);
        assert_eq!(config.events.min_interval, 300);
    }

    #[test]
    fn test_invalid_world_width() {
        let config = SimConfig {
            world: WorldConfig {
                width: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_spawn_probability() {
        let config = SimConfig {
            events: EventConfig {
                spawn_probability: 0.2,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_overrides_defaults() {
        let config = SimConfig::from_toml(
            r#"
            [world]
            width = 60
            height = 40
            seed = 7

            [events]
            spawn_probability = 0.01
            min_interval = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.world.width, 60);
        assert_eq!(config.world.seed, Some(7));
        assert_eq!(config.events.spawn_probability, 0.01);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimConfig::from_toml("[world]\nwidth = 30\nheight = 20\n").unwrap();
        assert_eq!(config.world.width, 30);
        assert_eq!(config.events.min_interval, 300);
    }
}
