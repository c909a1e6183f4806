//! Editor configuration.

use crate::error::{CanvasError, CanvasResult};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default placement for newly added shapes, relative to the page origin.
pub const DEFAULT_PLACEMENT: Point = Point::new(100.0, 100.0);

/// Tunable editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Anchor given to every new shape instance.
    pub default_placement: Point,
    /// Extra distance accepted around shapes when hit testing the pointer.
    pub hit_tolerance: f64,
    /// Whether a fresh editor starts with one (active) page.
    pub create_initial_page: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_placement: DEFAULT_PLACEMENT,
            hit_tolerance: 0.0,
            create_initial_page: true,
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON. Missing fields use defaults.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CanvasError::Config(format!("Invalid config: {}", e)))?;
        if !(config.hit_tolerance.is_finite() && config.hit_tolerance >= 0.0) {
            return Err(CanvasError::Config(format!(
                "hit_tolerance must be a non-negative number, got {}",
                config.hit_tolerance
            )));
        }
        Ok(config)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> CanvasResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            CanvasError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }
}
