//! Startup configuration: built-in defaults, an optional JSON file, then CLI
//! overrides. Every section uses `#[serde(default)]` so partial files work.

use anyhow::{bail, ensure, Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::camera::{CAMERA_ROTATION_STEP, CAMERA_ZOOM_STEP, RADIUS_MIN, WORLD_UP};
use crate::projection::{DEFAULT_FAR_CLIP, DEFAULT_FOV_DEGREES, DEFAULT_NEAR_CLIP};

pub const DEFAULT_WINDOW_TITLE: &str = "Axis Viewer";
pub const DEFAULT_WINDOW_WIDTH: u32 = 1920;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 1080;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub window: WindowConfig,
}

/// Projection and orbit parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near_clip: f32,
    pub far_clip: f32,
    /// Radians applied per frame while a rotate key is held
    pub rotation_step: f32,
    /// World units applied per frame while a zoom key is held
    pub zoom_step: f32,
    pub position: [f32; 3],
    pub focus: [f32; 3],
    pub up: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: DEFAULT_FOV_DEGREES,
            near_clip: DEFAULT_NEAR_CLIP,
            far_clip: DEFAULT_FAR_CLIP,
            rotation_step: CAMERA_ROTATION_STEP,
            zoom_step: CAMERA_ZOOM_STEP,
            position: [0.0, 0.0, 10.0],
            focus: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_WINDOW_TITLE.to_string(),
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid viewer configuration")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading configuration: {:?}", path);

        let json = std::fs::read_to_string(path)
            .context(format!("Failed to read configuration file: {:?}", path))?;

        Self::from_json_str(&json).context(format!("Failed to parse configuration file: {:?}", path))
    }

    /// Reject values the camera and projection cannot work with
    pub fn validate(&self) -> Result<()> {
        self.camera.validate()?;
        self.window.validate()
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.fov_degrees.is_finite() && self.fov_degrees > 0.0 && self.fov_degrees < 180.0,
            "fov_degrees must be within (0, 180), got {}",
            self.fov_degrees
        );
        ensure!(
            self.near_clip.is_finite() && self.near_clip > 0.0,
            "near_clip must be positive, got {}",
            self.near_clip
        );
        ensure!(
            self.far_clip.is_finite() && self.far_clip > self.near_clip,
            "far_clip ({}) must be greater than near_clip ({})",
            self.far_clip,
            self.near_clip
        );
        ensure!(
            self.rotation_step.is_finite() && self.rotation_step > 0.0,
            "rotation_step must be positive, got {}",
            self.rotation_step
        );
        ensure!(
            self.zoom_step.is_finite() && self.zoom_step > 0.0,
            "zoom_step must be positive, got {}",
            self.zoom_step
        );

        let position = Vec3::from_array(self.position);
        let focus = Vec3::from_array(self.focus);
        let up = Vec3::from_array(self.up);

        ensure!(
            position.is_finite() && focus.is_finite() && up.is_finite(),
            "camera vectors must be finite"
        );
        ensure!(up.length_squared() > f32::EPSILON, "up must be non-zero");
        // Elevation is measured against world +Y, so no other up hint orbits safely
        ensure!(
            up.normalize().abs_diff_eq(WORLD_UP, 1e-4),
            "up must point along +Y, got {:?}",
            self.up
        );

        let offset = position - focus;
        if offset.length() < RADIUS_MIN {
            bail!(
                "camera position {:?} is within {} of focus {:?}",
                self.position,
                RADIUS_MIN,
                self.focus
            );
        }
        ensure!(
            offset.normalize().cross(up.normalize()).length() > 1e-3,
            "up {:?} is parallel to the initial view direction",
            self.up
        );

        Ok(())
    }
}

impl WindowConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "window size must be non-zero, got {}x{}",
            self.width,
            self.height
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ViewerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.window.height, 1080);
        assert_eq!(config.camera.position, [0.0, 0.0, 10.0]);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json_str(r#"{ "camera": { "fov_degrees": 60.0 } }"#).unwrap();

        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.camera.near_clip, DEFAULT_NEAR_CLIP);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn json_round_trip() {
        let mut config = ViewerConfig::default();
        config.window.title = "Axes".to_string();
        config.camera.zoom_step = 1.5;

        let json = serde_json::to_string_pretty(&config).unwrap();
        assert_eq!(ViewerConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ViewerConfig::from_json_str("{ camera: ").is_err());
        assert!(ViewerConfig::from_json_str(r#"{ "camera": { "fov_degrees": "wide" } }"#).is_err());
    }

    #[test]
    fn rejects_bad_clip_planes() {
        let mut config = ViewerConfig::default();
        config.camera.near_clip = 0.0;
        assert!(config.validate().is_err());

        let mut config = ViewerConfig::default();
        config.camera.far_clip = 0.05;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_fov() {
        for fov in [0.0, -10.0, 180.0, f32::NAN] {
            let mut config = ViewerConfig::default();
            config.camera.fov_degrees = fov;
            assert!(config.validate().is_err(), "fov {} accepted", fov);
        }
    }

    #[test]
    fn rejects_non_positive_steps() {
        let mut config = ViewerConfig::default();
        config.camera.rotation_step = 0.0;
        assert!(config.validate().is_err());

        let mut config = ViewerConfig::default();
        config.camera.zoom_step = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_degenerate_camera() {
        let mut config = ViewerConfig::default();
        config.camera.position = [0.0, 0.0, 0.0];
        assert!(config.validate().is_err());

        let mut config = ViewerConfig::default();
        config.camera.up = [0.0, 0.0, 0.0];
        assert!(config.validate().is_err());

        let mut config = ViewerConfig::default();
        config.camera.position = [0.0, 10.0, 0.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_up_off_world_y() {
        for up in [[1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, -1.0, 0.0], [0.2, 1.0, 0.0]] {
            let mut config = ViewerConfig::default();
            config.camera.position = [10.0, 0.0, 0.0];
            config.camera.up = up;
            assert!(config.validate().is_err(), "up {:?} accepted", up);
        }
    }

    #[test]
    fn accepts_scaled_world_y() {
        let mut config = ViewerConfig::default();
        config.camera.up = [0.0, 2.5, 0.0];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_window() {
        let mut config = ViewerConfig::default();
        config.window.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ViewerConfig::load("/nonexistent/axis-viewer.json").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read configuration file"));
    }
}
