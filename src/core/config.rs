//! Simulation configuration
//!
//! Every knob the engine reads is collected here and passed explicitly into
//! the matcher, resolver and timeline. There is no global copy.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{Result, RoboError};

/// Configuration for one simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// A robot standing on the exit cell is forced to `Terminate`
    ///
    /// When off, robots on the exit keep following their deck and only
    /// despawn through an explicit `Terminate` card.
    pub touch_exit: bool,

    /// Number of robot slots, all of which start `Spawning` at the entrance
    ///
    /// Only one robot is admitted per tick, so the last slot enters the
    /// stage no earlier than tick `robot_count`.
    pub robot_count: usize,

    /// Upper bound on the number of ticks precomputed for a timeline
    ///
    /// The timeline stops earlier on completion or when a loop is found.
    pub max_ticks: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            touch_exit: true,
            robot_count: 6,
            max_ticks: 1000,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.robot_count == 0 {
            return Err(RoboError::InvalidConfig(
                "robot_count must be at least 1".into(),
            ));
        }

        if self.max_ticks == 0 {
            return Err(RoboError::InvalidConfig("max_ticks must be at least 1".into()));
        }

        Ok(())
    }
}
