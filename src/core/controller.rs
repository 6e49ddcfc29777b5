use crate::camera::{CameraCommand, RotateDirection, ZoomDirection};

/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    ZoomIn,
    ZoomOut,
    Reset,
    Escape,
}

impl Button {
    /// Camera buttons in the order their commands are applied each frame
    pub const CAMERA: [Button; 7] = [
        Button::Reset,
        Button::ArrowLeft,
        Button::ArrowRight,
        Button::ArrowUp,
        Button::ArrowDown,
        Button::ZoomIn,
        Button::ZoomOut,
    ];

    /// Camera action bound to this button, if any
    pub const fn camera_command(self) -> Option<CameraCommand> {
        match self {
            Button::ArrowLeft => Some(CameraCommand::Rotate(RotateDirection::Left)),
            Button::ArrowRight => Some(CameraCommand::Rotate(RotateDirection::Right)),
            Button::ArrowUp => Some(CameraCommand::Rotate(RotateDirection::Up)),
            Button::ArrowDown => Some(CameraCommand::Rotate(RotateDirection::Down)),
            Button::ZoomIn => Some(CameraCommand::Zoom(ZoomDirection::In)),
            Button::ZoomOut => Some(CameraCommand::Zoom(ZoomDirection::Out)),
            Button::Reset => Some(CameraCommand::Reset),
            Button::Escape => None,
        }
    }
}

/// Controller - handles button input states
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;
}
