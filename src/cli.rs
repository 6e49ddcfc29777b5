// cli.rs - Command-line interface configuration
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::ViewerConfig;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "axis-viewer")]
#[command(about = "Orbit a camera around a reference frame of XYZ axes", long_about = None)]
pub struct Cli {
    /// JSON configuration file; missing fields fall back to defaults
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Vertical field of view in degrees
    #[arg(long)]
    pub fov: Option<f32>,

    /// Initial window width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Initial window height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Radians rotated per frame while an arrow key is held
    #[arg(long = "rotation-step")]
    pub rotation_step: Option<f32>,

    /// World units zoomed per frame while +/- is held
    #[arg(long = "zoom-step")]
    pub zoom_step: Option<f32>,

    /// Disable the periodic FPS report
    #[arg(long, default_value = "false")]
    pub quiet: bool,
}

impl Cli {
    /// Defaults, then the config file, then flags; validated
    pub fn resolve_config(&self) -> Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)?,
            None => ViewerConfig::default(),
        };

        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut ViewerConfig) {
        if let Some(fov) = self.fov {
            config.camera.fov_degrees = fov;
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(step) = self.rotation_step {
            config.camera.rotation_step = step;
        }
        if let Some(step) = self.zoom_step {
            config.camera.zoom_step = step;
        }
    }
}
