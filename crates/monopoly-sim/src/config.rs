//! Simulation settings read from the environment.

use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_LAPS: u32 = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a non-negative integer, got `{value}`")]
    InvalidNumber { name: &'static str, value: String },

    #[error("MONOPOLY_LAPS must be at least 1")]
    ZeroLaps,
}

/// Where the data lives, how long to run, and where reports go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub laps: u32,
    /// Fixed seed for a reproducible run; `None` seeds from the OS
    pub seed: Option<u64>,
    pub board_path: PathBuf,
    pub chance_path: PathBuf,
    pub community_chest_path: PathBuf,
    pub output_dir: PathBuf,
}

impl SimConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup (the environment, or a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let laps = match lookup("MONOPOLY_LAPS") {
            Some(value) => parse_number("MONOPOLY_LAPS", &value)?,
            None => DEFAULT_LAPS,
        };
        if laps == 0 {
            return Err(ConfigError::ZeroLaps);
        }

        let seed = lookup("MONOPOLY_SEED")
            .map(|value| parse_number("MONOPOLY_SEED", &value))
            .transpose()?;

        let path = |key: &str, default: &str| {
            lookup(key)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Ok(Self {
            laps,
            seed,
            board_path: path("MONOPOLY_BOARD", "data/board_data.txt"),
            chance_path: path("MONOPOLY_CHANCE", "data/chances_data.txt"),
            community_chest_path: path(
                "MONOPOLY_COMMUNITY_CHEST",
                "data/community_chest_data.txt",
            ),
            output_dir: path("MONOPOLY_OUTPUT_DIR", "output"),
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SimConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.laps, 1000);
        assert_eq!(config.seed, None);
        assert_eq!(config.board_path, PathBuf::from("data/board_data.txt"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_overrides() {
        let config = SimConfig::from_lookup(lookup(&[
            ("MONOPOLY_LAPS", "50"),
            ("MONOPOLY_SEED", "42"),
            ("MONOPOLY_CHANCE", "/tmp/chance.txt"),
        ]))
        .unwrap();
        assert_eq!(config.laps, 50);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.chance_path, PathBuf::from("/tmp/chance.txt"));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            SimConfig::from_lookup(lookup(&[("MONOPOLY_LAPS", "many")])).unwrap_err(),
            ConfigError::InvalidNumber {
                name: "MONOPOLY_LAPS",
                value: "many".into()
            }
        );
        assert_eq!(
            SimConfig::from_lookup(lookup(&[("MONOPOLY_LAPS", "0")])).unwrap_err(),
            ConfigError::ZeroLaps
        );
        assert!(SimConfig::from_lookup(lookup(&[("MONOPOLY_SEED", "-1")])).is_err());
    }
}
