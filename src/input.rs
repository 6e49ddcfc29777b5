//! Per-frame translation of held buttons into camera commands.
//!
//! A held key applies one step every frame it stays down, so opposing keys
//! held together both apply and cancel out.

use crate::camera::{CameraCommand, CameraController};
use crate::core::{Button, Controller};

/// Commands for every camera button currently held, in application order
pub fn poll_commands(controller: &dyn Controller) -> Vec<CameraCommand> {
    Button::CAMERA
        .iter()
        .filter(|&&button| controller.is_down(button))
        .filter_map(|button| button.camera_command())
        .collect()
}

/// Apply this frame's held input to the camera, returning how many commands ran
pub fn apply_held_input(controller: &dyn Controller, camera: &mut CameraController) -> usize {
    let commands = poll_commands(controller);
    for command in &commands {
        camera.apply(*command);
    }
    commands.len()
}

pub fn quit_requested(controller: &dyn Controller) -> bool {
    controller.is_down(Button::Escape)
}
