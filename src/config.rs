//! Visualizer configuration.
//!
//! All fields have defaults, so a partial JSON document only overrides
//! what it names:
//!
//! ```rust
//! use vectorscope::VisualizerConfig;
//!
//! let config = VisualizerConfig::from_json(r#"{"final_stage": 4}"#).unwrap();
//! assert_eq!(config.final_stage, 4);
//! assert_eq!(config.interval_ms, 1500);
//! ```

use crate::error::{Result, VectorscopeError};
use crate::sequencer::stage::{MAX_FINAL_STAGE, MIN_FINAL_STAGE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Sequencer and neighbor-query settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Last stage of the reveal: 5 for the full variant with the neighbor
    /// fade-in, 4 for the reduced one.
    pub final_stage: u8,
    /// Time between stage advances.
    pub interval_ms: u64,
    /// Neighbors ranked for the result vector.
    pub neighbor_count: usize,
    /// Fade-in delay step between consecutive neighbors.
    pub neighbor_stagger_ms: u64,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            final_stage: MAX_FINAL_STAGE,
            interval_ms: 1500,
            neighbor_count: 3,
            neighbor_stagger_ms: 200,
        }
    }
}

impl VisualizerConfig {
    /// The 4-stage preset: neighbors appear with the result marker.
    pub fn reduced() -> Self {
        Self {
            final_stage: MIN_FINAL_STAGE,
            ..Self::default()
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn neighbor_stagger(&self) -> Duration {
        Duration::from_millis(self.neighbor_stagger_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_FINAL_STAGE..=MAX_FINAL_STAGE).contains(&self.final_stage) {
            return Err(VectorscopeError::InvalidConfig(format!(
                "final_stage must be {} or {}, got {}",
                MIN_FINAL_STAGE, MAX_FINAL_STAGE, self.final_stage
            )));
        }
        if self.interval_ms == 0 {
            return Err(VectorscopeError::InvalidConfig(
                "interval_ms must be positive".to_string(),
            ));
        }
        if self.neighbor_count == 0 {
            return Err(VectorscopeError::InvalidConfig(
                "neighbor_count must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
