//! Render settings, loadable from JSON.
//!
//! Every field has a default, so a config file only needs to name the values
//! it changes:
//!
//! ```json
//! { "width": 800, "height": 600, "light_position": [0, 20, 5] }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::camera::Camera;
use crate::colors::{self, Color4};
use crate::light::{PointLight, DEFAULT_LIGHT_POSITION};
use crate::math::Vec3;
use crate::projection::{Projection, Viewport, DEFAULT_FOV_Y, DEFAULT_Z_FAR, DEFAULT_Z_NEAR};

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;

/// Rotation added to every mesh on each frame, in radians per axis.
pub const DEFAULT_SPIN: Vec3 = Vec3::splat(0.01);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub light_position: Vec3,
    pub clear_color: Color4,
    pub camera: Camera,
    pub spin: Vec3,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: "softrender".to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fov: DEFAULT_FOV_Y,
            near: DEFAULT_Z_NEAR,
            far: DEFAULT_Z_FAR,
            light_position: DEFAULT_LIGHT_POSITION,
            clear_color: colors::BLACK,
            camera: Camera::default(),
            spin: DEFAULT_SPIN,
        }
    }
}

impl RenderConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.near == self.far {
            return Err(ConfigError::Invalid(format!(
                "near and far planes coincide at {}",
                self.near
            )));
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn projection(&self) -> Projection {
        Projection::new(self.fov, self.viewport().aspect_ratio(), self.near, self.far)
    }

    pub fn light(&self) -> PointLight {
        PointLight::new(self.light_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_object_gives_defaults() {
        let config = RenderConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RenderConfig::default());
        assert_eq!(config.camera.position, Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = RenderConfig::from_json_str(
            r#"{ "width": 800, "light_position": [1, 2, 3],
                 "clear_color": { "r": 10, "g": 20, "b": 30, "a": 255 } }"#,
        )
        .unwrap();

        assert_eq!(config.width, 800);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.light().position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.clear_color, Color4::new(10, 20, 30, 255));
        assert_eq!(config.spin, DEFAULT_SPIN);
        assert_relative_eq!(config.projection().aspect_ratio(), 800.0 / 480.0);
    }

    #[test]
    fn camera_can_be_moved() {
        let config = RenderConfig::from_json_str(
            r#"{ "camera": { "position": [0, 5, 10], "target": [0, 0, 0] } }"#,
        )
        .unwrap();
        assert_eq!(config.camera.position, Vec3::new(0.0, 5.0, 10.0));
    }

    #[test]
    fn rejects_empty_viewport() {
        let err = RenderConfig::from_json_str(r#"{ "height": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = RenderConfig::from_json_str(r#"{ "width": "wide" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
