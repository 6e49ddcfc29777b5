use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

use crate::config::CameraConfig;

pub const CAMERA_ROTATION_STEP: f32 = 0.05;
pub const CAMERA_ZOOM_STEP: f32 = 0.5;

/// Margin kept between `phi` and the poles so the up hint never lines up
/// with the view direction.
pub const PHI_EPSILON: f32 = 0.01;
pub const MIN_PHI: f32 = -FRAC_PI_2 + PHI_EPSILON;
pub const MAX_PHI: f32 = FRAC_PI_2 - PHI_EPSILON;
pub const RADIUS_MIN: f32 = 0.1;

/// Up hint of every orbit. `phi` is measured from the XZ plane, so the pole
/// margin only keeps the view off this axis.
pub const WORLD_UP: Vec3 = Vec3::Y;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoomDirection {
    In,
    Out,
}

/// One discrete camera action, produced once per frame for every held key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraCommand {
    Rotate(RotateDirection),
    Zoom(ZoomDirection),
    Reset,
}

/// Spherical camera coordinates around `focus`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Azimuth in radians, unbounded
    pub theta: f32,
    /// Elevation in radians, kept within `[MIN_PHI, MAX_PHI]`
    pub phi: f32,
    /// Distance from focus, never below `RADIUS_MIN`
    pub radius: f32,
    pub focus: Vec3,
    /// Always `WORLD_UP` once clamped
    pub up: Vec3,
}

impl OrbitState {
    pub fn new(theta: f32, phi: f32, radius: f32) -> Self {
        Self {
            theta,
            phi,
            radius,
            focus: Vec3::ZERO,
            up: WORLD_UP,
        }
        .clamped()
    }

    /// Recover orbit angles from a world-space camera position.
    ///
    /// A position sitting on the focus has no direction; it lands on the
    /// +Z side at the minimum radius.
    pub fn from_position(position: Vec3, focus: Vec3) -> Self {
        let offset = position - focus;
        let radius = offset.length();

        let (theta, phi) = if radius > f32::EPSILON {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).asin())
        } else {
            (0.0, 0.0)
        };

        Self {
            theta,
            phi,
            radius,
            focus,
            up: WORLD_UP,
        }
        .clamped()
    }

    /// Apply the elevation and radius bounds and pin the up hint
    pub fn clamped(self) -> Self {
        Self {
            phi: clamp_phi(self.phi),
            radius: self.radius.max(RADIUS_MIN),
            up: WORLD_UP,
            ..self
        }
    }

    /// Camera offset from the focus
    pub fn offset(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();

        Vec3::new(
            self.radius * cos_phi * sin_theta,
            self.radius * sin_phi,
            self.radius * cos_phi * cos_theta,
        )
    }
}

impl Default for OrbitState {
    fn default() -> Self {
        Self::new(0.0, 0.0, 10.0)
    }
}

fn clamp_phi(phi: f32) -> f32 {
    phi.clamp(MIN_PHI, MAX_PHI)
}

/// Camera placement derived from an `OrbitState`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub focus: Vec3,
    pub up: Vec3,
}

impl CameraPose {
    pub fn view_direction(&self) -> Vec3 {
        (self.focus - self.position).normalize_or_zero()
    }
}

/// Orbit camera driven by discrete key steps
#[derive(Debug, Clone)]
pub struct CameraController {
    state: OrbitState,
    initial: OrbitState,
    rotation_step: f32,
    zoom_step: f32,
}

impl CameraController {
    pub fn new(position: Vec3, focus: Vec3) -> Self {
        Self::from_orbit(OrbitState::from_position(position, focus))
    }

    pub fn from_orbit(state: OrbitState) -> Self {
        let state = state.clamped();
        Self {
            state,
            initial: state,
            rotation_step: CAMERA_ROTATION_STEP,
            zoom_step: CAMERA_ZOOM_STEP,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(
            Vec3::from_array(config.position),
            Vec3::from_array(config.focus),
        )
        .with_steps(config.rotation_step, config.zoom_step)
    }

    /// Step sizes used by `apply`
    pub fn with_steps(mut self, rotation_step: f32, zoom_step: f32) -> Self {
        self.rotation_step = rotation_step;
        self.zoom_step = zoom_step;
        self
    }

    pub fn state(&self) -> &OrbitState {
        &self.state
    }

    pub fn apply_rotation(&mut self, direction: RotateDirection, step: f32) {
        match direction {
            RotateDirection::Left => self.state.theta -= step,
            RotateDirection::Right => self.state.theta += step,
            RotateDirection::Up => self.state.phi = clamp_phi(self.state.phi + step),
            RotateDirection::Down => self.state.phi = clamp_phi(self.state.phi - step),
        }
    }

    pub fn apply_zoom(&mut self, direction: ZoomDirection, step: f32) {
        match direction {
            ZoomDirection::In => self.state.radius = (self.state.radius - step).max(RADIUS_MIN),
            ZoomDirection::Out => self.state.radius += step,
        }
    }

    /// Apply one command using the configured step sizes
    pub fn apply(&mut self, command: CameraCommand) {
        match command {
            CameraCommand::Rotate(direction) => self.apply_rotation(direction, self.rotation_step),
            CameraCommand::Zoom(direction) => self.apply_zoom(direction, self.zoom_step),
            CameraCommand::Reset => self.reset(),
        }
    }

    /// Return to the orbit the controller was built with
    pub fn reset(&mut self) {
        self.state = self.initial;
    }

    pub fn current_pose(&self) -> CameraPose {
        CameraPose {
            position: self.state.focus + self.state.offset(),
            focus: self.state.focus,
            up: self.state.up,
        }
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::from_orbit(OrbitState::default())
    }
}
