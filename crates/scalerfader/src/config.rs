// SPDX-License-Identifier: MIT OR Apache-2.0
//! Container configuration.
//!
//! Settings are plain data built once by the host, validated, and handed to
//! the container. They can be written as RON:
//!
//! ```ron
//! (
//!     transition: (
//!         duration_ms: 3000,
//!         scale_start: 1.0,
//!         scale_end: 1.25,
//!         fade_fraction_start: 0.8,
//!         interpolator: Linear,
//!     ),
//!     start_immediately: true,
//! )
//! ```

use crate::error::ConfigError;
use scalerfader_animation::TransitionConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Settings for a [`crate::ScalerFader`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalerFaderConfig {
    /// Shape and timing of every transition
    pub transition: TransitionConfig,
    /// Start rotating on the first layout pass
    pub start_immediately: bool,
}

impl ScalerFaderConfig {
    /// Check every invariant
    pub fn validate(&self) -> Result<()> {
        self.transition.validate()?;
        Ok(())
    }

    /// Parse and validate RON text
    pub fn from_ron(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Load and validate a RON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_ron(&text)?;
        tracing::debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Write to a RON file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }
}
