use std::collections::HashSet;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, Controller};

/// Adapter that bridges Winit keyboard events to the Controller trait
#[derive(Debug, Clone, Default)]
pub struct WinitController {
    /// Currently pressed buttons
    pressed_keys: HashSet<Button>,
}

impl WinitController {
    /// Create a new WinitController with no pressed keys
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a Winit WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        match event.state {
                            ElementState::Pressed => self.press(button),
                            ElementState::Released => self.release(button),
                        }
                    }
                }
            }
            // Releases that happen while unfocused never arrive
            WindowEvent::Focused(false) => self.clear(),
            _ => {}
        }
    }

    pub fn press(&mut self, button: Button) {
        self.pressed_keys.insert(button);
    }

    pub fn release(&mut self, button: Button) {
        self.pressed_keys.remove(&button);
    }

    pub fn clear(&mut self) {
        self.pressed_keys.clear();
    }

    /// Map Winit KeyCode to Button
    pub fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::ArrowLeft => Some(Button::ArrowLeft),
            KeyCode::ArrowRight => Some(Button::ArrowRight),
            KeyCode::ArrowUp => Some(Button::ArrowUp),
            KeyCode::ArrowDown => Some(Button::ArrowDown),
            KeyCode::Equal | KeyCode::NumpadAdd => Some(Button::ZoomIn),
            KeyCode::Minus | KeyCode::NumpadSubtract => Some(Button::ZoomOut),
            KeyCode::KeyR => Some(Button::Reset),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // `KeyEvent` has private platform fields and cannot be built here, so key
    // presses go through press/release directly

    fn nothing_held(controller: &WinitController) -> bool {
        Button::CAMERA.iter().all(|&button| !controller.is_down(button))
            && !controller.is_down(Button::Escape)
    }

    #[test]
    fn test_new_controller_empty() {
        let controller = WinitController::new();
        assert!(nothing_held(&controller));
    }

    #[test]
    fn test_press_and_release() {
        let mut controller = WinitController::new();
        controller.press(Button::ArrowLeft);
        controller.press(Button::ZoomIn);

        assert!(controller.is_down(Button::ArrowLeft));
        assert!(controller.is_down(Button::ZoomIn));

        controller.release(Button::ArrowLeft);
        assert!(!controller.is_down(Button::ArrowLeft));
        assert!(controller.is_down(Button::ZoomIn));
    }

    #[test]
    fn test_repeated_press_released_once() {
        let mut controller = WinitController::new();
        controller.press(Button::ArrowUp);
        controller.press(Button::ArrowUp);
        controller.release(Button::ArrowUp);

        assert!(!controller.is_down(Button::ArrowUp));
    }

    #[test]
    fn test_release_unpressed_is_noop() {
        let mut controller = WinitController::new();
        controller.release(Button::Reset);
        assert!(nothing_held(&controller));
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut controller = WinitController::new();
        controller.press(Button::ArrowDown);
        controller.press(Button::ZoomOut);

        controller.clear();
        assert!(nothing_held(&controller));
    }

    #[test]
    fn test_focus_lost_event_releases_keys() {
        let mut controller = WinitController::new();
        controller.press(Button::ArrowRight);
        controller.press(Button::Escape);

        controller.process_event(&WindowEvent::Focused(false));
        assert!(nothing_held(&controller));
    }

    #[test]
    fn test_focus_gained_event_keeps_keys() {
        let mut controller = WinitController::new();
        controller.press(Button::ZoomIn);

        controller.process_event(&WindowEvent::Focused(true));
        assert!(controller.is_down(Button::ZoomIn));
    }

    #[test]
    fn test_keycode_mapping() {
        assert_eq!(WinitController::keycode_to_button(KeyCode::ArrowLeft), Some(Button::ArrowLeft));
        assert_eq!(WinitController::keycode_to_button(KeyCode::Equal), Some(Button::ZoomIn));
        assert_eq!(WinitController::keycode_to_button(KeyCode::NumpadAdd), Some(Button::ZoomIn));
        assert_eq!(WinitController::keycode_to_button(KeyCode::Minus), Some(Button::ZoomOut));
        assert_eq!(WinitController::keycode_to_button(KeyCode::NumpadSubtract), Some(Button::ZoomOut));
        assert_eq!(WinitController::keycode_to_button(KeyCode::KeyR), Some(Button::Reset));
        assert_eq!(WinitController::keycode_to_button(KeyCode::Escape), Some(Button::Escape));
        assert_eq!(WinitController::keycode_to_button(KeyCode::KeyW), None);
    }
}
