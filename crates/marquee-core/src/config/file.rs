//! Config file loading
//!
//! Reads `~/.marquee/config.toml` (or an explicit path). Every field is
//! optional; missing sections fall back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::EngineConfig;
use crate::error::{MarqueeError, Result};

/// Lane layout settings used by embedders that lay out fixed-size items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneSettings {
    /// Extent of every item along the scroll axis
    pub item_extent: u16,
    /// Space between consecutive items
    pub gap: u16,
    /// Item labels; empty means the embedder's own defaults
    pub items: Vec<String>,
}

impl Default for LaneSettings {
    fn default() -> Self {
        Self {
            item_extent: 3,
            gap: 1,
            items: Vec::new(),
        }
    }
}

/// Full on-disk configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub lane: LaneSettings,
}

impl AppConfig {
    /// Parse from TOML text and validate
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path; a missing file is an error
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| MarqueeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load from a path if it exists, otherwise defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<()> {
        if self.lane.item_extent == 0 {
            return Err(MarqueeError::InvalidValue {
                field: "lane.item_extent",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Split item text into labels, one per non-empty line
pub fn parse_items(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read item labels from a file
pub fn load_items(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|source| MarqueeError::ItemsRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_items(&text))
}
