//! Input Module
//!
//! Provides platform-agnostic input handling for keyboard and mouse.
//! This module is decoupled from any specific windowing system (like winit)
//! to allow for flexible integration.
//!
//! # Example
//!
//! ```rust,ignore
//! use terrain_editor_engine::input::{InputState, KeyCode, MouseButton};
//!
//! let mut input = InputState::new();
//!
//! // Key press: held state is tracked, bound commands are returned
//! if let Some(command) = input.handle_key(KeyCode::W, true) {
//!     command.apply_to_camera(&mut camera);
//! }
//!
//! // Left-drag rotates the camera
//! input.mouse.set_button(MouseButton::Left, true);
//! if let Some(delta) = input.mouse.set_position(120.0, 80.0) {
//!     camera.apply_mouse_drag(delta.x, delta.y);
//! }
//! ```

pub mod controls;
pub mod keyboard;
pub mod mouse;

// Re-export commonly used types at module level
pub use controls::{
    COARSE_STEP, EditorCommand, FINE_STEP, apply_held_movement, camera_status, command_for_key,
};
pub use keyboard::{KeyCode, KeyboardState, MovementKeys, ShiftKeys};
pub use mouse::{MouseButton, MouseState, Position};

/// Combined input state for both keyboard and mouse.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
}

impl InputState {
    /// Create a new input state with all inputs in their default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a key event. Presses return the bound command, if any.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> Option<EditorCommand> {
        self.keyboard.handle_key(key, pressed);
        if pressed {
            command_for_key(key, self.keyboard.shift_held())
        } else {
            None
        }
    }

    /// Reset all input state to defaults (e.g. on focus loss).
    pub fn reset(&mut self) {
        self.keyboard.reset();
        self.mouse.reset();
    }
}
