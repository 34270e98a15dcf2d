use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tools::{DEFAULT_ERASER_RADIUS, DEFAULT_PEN_COLOR, DEFAULT_PEN_WIDTH};

pub const DEFAULT_TITLE: &str = "Untitled";

/// Settings for a drawing surface.
///
/// Every field is optional in JSON; missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Accept only stylus touches
    pub palm_rejection: bool,
    pub pen_color: String,
    pub pen_width: f32,
    pub eraser_radius: f32,
    /// Shown as the title while no picture is loaded
    pub default_title: String,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            palm_rejection: false,
            pen_color: DEFAULT_PEN_COLOR.to_owned(),
            pen_width: DEFAULT_PEN_WIDTH,
            eraser_radius: DEFAULT_ERASER_RADIUS,
            default_title: DEFAULT_TITLE.to_owned(),
        }
    }
}

impl SurfaceConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::debug!("Loaded surface config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pen_width.is_finite() && self.pen_width > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "pen_width",
                reason: format!("must be a positive number, got {}", self.pen_width),
            });
        }
        if !(self.eraser_radius.is_finite() && self.eraser_radius >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "eraser_radius",
                reason: format!("must be zero or more, got {}", self.eraser_radius),
            });
        }
        if self.pen_color.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "pen_color",
                reason: "must not be empty".to_owned(),
            });
        }
        Ok(())
    }
}
