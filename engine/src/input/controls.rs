//! Editor Controls
//!
//! Maps keys to editor commands and drives the camera from held movement
//! keys.
//!
//! | Key        | Command                          |
//! |------------|----------------------------------|
//! | W / S      | walk forward / back              |
//! | A / D      | strafe left / right              |
//! | Shift      | coarse step (1.0 instead of 0.1) |
//! | F          | toggle wireframe                 |
//! | T          | toggle tessellation              |
//! | Escape     | quit                             |

use super::keyboard::{KeyCode, KeyboardState};
use crate::camera::Camera;

/// Per-press movement step without Shift
pub const FINE_STEP: f32 = 0.1;
/// Per-press movement step with Shift held
pub const COARSE_STEP: f32 = 1.0;

/// A discrete editor action triggered by a key press
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorCommand {
    Walk(f32),
    Strafe(f32),
    ToggleWireframe,
    ToggleTessellation,
    Quit,
}

/// Movement step for the current modifier state.
pub fn step_size(shift: bool) -> f32 {
    if shift { COARSE_STEP } else { FINE_STEP }
}

/// Command bound to a key press, if any.
pub fn command_for_key(key: KeyCode, shift: bool) -> Option<EditorCommand> {
    let step = step_size(shift);
    match key {
        KeyCode::W => Some(EditorCommand::Walk(step)),
        KeyCode::S => Some(EditorCommand::Walk(-step)),
        KeyCode::A => Some(EditorCommand::Strafe(-step)),
        KeyCode::D => Some(EditorCommand::Strafe(step)),
        KeyCode::F => Some(EditorCommand::ToggleWireframe),
        KeyCode::T => Some(EditorCommand::ToggleTessellation),
        KeyCode::Escape => Some(EditorCommand::Quit),
        _ => None,
    }
}

impl EditorCommand {
    /// Apply a movement command to the camera. Returns `true` if it moved.
    pub fn apply_to_camera(self, camera: &mut Camera) -> bool {
        match self {
            EditorCommand::Walk(amount) => camera.walk(amount),
            EditorCommand::Strafe(amount) => camera.strafe(amount),
            _ => return false,
        }
        true
    }
}

/// Continuous movement while keys are held.
///
/// Moves `movement_speed` units per second, ten times faster with Shift.
/// Returns `true` if the camera moved.
pub fn apply_held_movement(camera: &mut Camera, keyboard: &KeyboardState, delta_time: f32) -> bool {
    let keys = &keyboard.movement;
    if !keys.any_pressed() || delta_time <= 0.0 {
        return false;
    }

    let amount = camera.movement_speed() * delta_time * step_size(keyboard.shift_held())
        / FINE_STEP;
    let forward = keys.forward_axis() as f32;
    let right = keys.right_axis() as f32;
    if forward != 0.0 {
        camera.walk(forward * amount);
    }
    if right != 0.0 {
        camera.strafe(right * amount);
    }
    forward != 0.0 || right != 0.0
}

/// Status line shown after every camera change.
pub fn camera_status(camera: &Camera, fps: f32) -> String {
    let p = camera.position();
    let r = camera.rotation();
    format!(
        "Camera ({:.2}, {:.2}, {:.2}), Rotation ({:.1}, {:.1}, {:.1}), FPS {}",
        p.x,
        p.y,
        p.z,
        r.x,
        r.y,
        r.z,
        fps.round() as u32
    )
}
