//! Effective configuration: config file plus command-line overrides

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use marquee_core::config::{load_items, AppConfig, AutoplayDirection, Axis, TiltDirection};
use marquee_core::paths;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TiltArg {
    Left,
    Right,
    None,
}

/// Flags that override values from the config file
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Config file (defaults to ~/.marquee/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Read item labels from a file, one per line
    #[arg(long, global = true)]
    pub items_file: Option<PathBuf>,

    /// Scroll on every frame
    #[arg(long, global = true, overrides_with = "no_autoplay")]
    pub autoplay: bool,

    /// Only move on drag and wheel input
    #[arg(long, global = true, overrides_with = "autoplay")]
    pub no_autoplay: bool,

    /// Autoplay distance per reference frame
    #[arg(long, global = true)]
    pub speed: Option<f32>,

    /// Autoplay direction
    #[arg(long, global = true, value_enum)]
    pub direction: Option<DirectionArg>,

    /// Lean of the lane
    #[arg(long, global = true, value_enum)]
    pub tilt: Option<TiltArg>,

    /// Pause autoplay while the mouse is over the lane
    #[arg(long, global = true)]
    pub pause_on_hover: bool,

    /// Scroll left-to-right instead of top-to-bottom
    #[arg(long, global = true)]
    pub horizontal: bool,
}

impl Overrides {
    /// Config file this run reads from
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(paths::config_file)
    }

    /// Load the config file and apply every flag on top
    ///
    /// An explicit `--config` must exist; the default location is optional.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => AppConfig::load_or_default(&paths::config_file())?,
        };
        if let Some(path) = &self.items_file {
            config.lane.items = read_items(path)?;
        }
        self.apply(&mut config);
        Ok(config)
    }

    /// Apply flag values to an already loaded config
    pub fn apply(&self, config: &mut AppConfig) {
        let engine = &mut config.engine;
        if self.autoplay {
            engine.autoplay = true;
        }
        if self.no_autoplay {
            engine.autoplay = false;
        }
        if let Some(speed) = self.speed {
            engine.autoplay_speed = speed;
        }
        if let Some(direction) = self.direction {
            engine.autoplay_direction = match direction {
                DirectionArg::Up => AutoplayDirection::Up,
                DirectionArg::Down => AutoplayDirection::Down,
            };
        }
        match self.tilt {
            Some(TiltArg::Left) => {
                engine.tilt_enabled = true;
                engine.tilt_direction = TiltDirection::Left;
            }
            Some(TiltArg::Right) => {
                engine.tilt_enabled = true;
                engine.tilt_direction = TiltDirection::Right;
            }
            Some(TiltArg::None) => engine.tilt_enabled = false,
            None => {}
        }
        if self.pause_on_hover {
            engine.pause_on_hover = true;
        }
        if self.horizontal {
            engine.axis = Axis::Horizontal;
        }
    }
}

fn read_items(path: &Path) -> Result<Vec<String>> {
    let items = load_items(path)?;
    if items.is_empty() {
        tracing::warn!(path = %path.display(), "Items file has no entries");
    }
    Ok(items)
}
