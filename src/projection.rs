//! View and projection transforms derived fresh every frame from the camera pose.

use glam::Mat4;

use crate::camera::CameraPose;
use crate::config::CameraConfig;
use crate::core::DisplayContext;

pub const DEFAULT_FOV_DEGREES: f32 = 40.0;
pub const DEFAULT_NEAR_CLIP: f32 = 0.1;
pub const DEFAULT_FAR_CLIP: f32 = 100.0;

/// Perspective parameters; only `aspect` changes after startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl ProjectionParams {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_degrees,
            aspect,
            near,
            far,
        }
    }

    pub fn from_config(config: &CameraConfig, width: u32, height: u32) -> Self {
        let mut params = Self {
            fov_degrees: config.fov_degrees,
            near: config.near_clip,
            far: config.far_clip,
            ..Self::default()
        };
        params.set_viewport(width, height);
        params
    }

    /// Track a new framebuffer size. A minimised window reports a zero
    /// dimension; the previous aspect is kept in that case.
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        match DisplayContext::new(width, height).aspect_ratio() {
            Some(aspect) => {
                self.aspect = aspect;
                true
            }
            None => false,
        }
    }
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self::new(DEFAULT_FOV_DEGREES, 16.0 / 9.0, DEFAULT_NEAR_CLIP, DEFAULT_FAR_CLIP)
    }
}

/// Right-handed look-at from the pose eye toward its focus.
///
/// No validation: the orbit bounds keep the eye off the focus and the up
/// hint off the view axis.
pub fn build_view(pose: &CameraPose) -> Mat4 {
    Mat4::look_at_rh(pose.position, pose.focus, pose.up)
}

/// Right-handed perspective with wgpu's `[0, 1]` depth range
pub fn build_projection(params: &ProjectionParams) -> Mat4 {
    Mat4::perspective_rh(
        params.fov_degrees.to_radians(),
        params.aspect,
        params.near,
        params.far,
    )
}

/// Vertical field of view (degrees) encoded in a perspective matrix
pub fn vertical_fov_degrees(projection: &Mat4) -> f32 {
    (2.0 * (1.0 / projection.y_axis.y).atan()).to_degrees()
}

/// Matrices for a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewProjection {
    pub view: Mat4,
    pub projection: Mat4,
}

impl ViewProjection {
    pub fn for_frame(pose: &CameraPose, params: &ProjectionParams) -> Self {
        Self {
            view: build_view(pose),
            projection: build_projection(params),
        }
    }

    pub fn combined(&self) -> Mat4 {
        self.projection * self.view
    }
}
