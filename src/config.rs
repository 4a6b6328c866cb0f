//! Configuration persistence for lanescope view settings

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LineColor {
    pub const CYAN: LineColor = LineColor {
        r: 0.0,
        g: 1.0,
        b: 1.0,
    };
    pub const YELLOW: LineColor = LineColor {
        r: 1.0,
        g: 1.0,
        b: 0.0,
    };

    /// Convert to RGBA bytes (0-255), always opaque
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            255,
        ]
    }
}

/// View and annotation settings persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Scale factor applied per zoom click (must be > 1)
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
    /// Raw wheel units per zoom click
    #[serde(default = "default_wheel_divisor")]
    pub wheel_divisor: f64,
    /// Well separation below which the lane box is not drawn
    #[serde(default = "default_min_lane_width")]
    pub min_lane_width: f64,
    /// Stroke width in image pixels
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    /// Color of the well line and lane box
    #[serde(default = "default_lane_color")]
    pub lane_color: LineColor,
    /// Color of the lane start line
    #[serde(default = "default_start_color")]
    pub start_color: LineColor,
    /// Surface size used by the renderer
    #[serde(default = "default_viewport")]
    pub viewport: (u32, u32),
}

fn default_zoom_step() -> f64 {
    1.2
}

fn default_wheel_divisor() -> f64 {
    40.0 // one 120-unit notch is three clicks
}

fn default_min_lane_width() -> f64 {
    10.0
}

fn default_line_width() -> f64 {
    5.0
}

fn default_lane_color() -> LineColor {
    LineColor::CYAN
}

fn default_start_color() -> LineColor {
    LineColor::YELLOW
}

fn default_viewport() -> (u32, u32) {
    (800, 600)
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom_step: default_zoom_step(),
            wheel_divisor: default_wheel_divisor(),
            min_lane_width: default_min_lane_width(),
            line_width: default_line_width(),
            lane_color: default_lane_color(),
            start_color: default_start_color(),
            viewport: default_viewport(),
        }
    }
}

impl ViewConfig {
    /// Directory name under the platform config dir
    pub const ID: &'static str = "lanescope";

    /// Default location: `<config dir>/lanescope/config.json`
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Read and validate a config file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::path() else {
            log::error!("No config directory available, settings not saved");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            anyhow::bail!("zoom_step must be greater than 1, got {}", self.zoom_step);
        }
        if !(self.wheel_divisor.is_finite() && self.wheel_divisor > 0.0) {
            anyhow::bail!("wheel_divisor must be positive, got {}", self.wheel_divisor);
        }
        if self.viewport.0 == 0 || self.viewport.1 == 0 {
            anyhow::bail!("viewport must be non-empty, got {:?}", self.viewport);
        }
        Ok(())
    }
}
