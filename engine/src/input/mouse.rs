//! Mouse Input Module
//!
//! Contains mouse state tracking for cursor position and left-button
//! drags. Decoupled from winit to use generic types.

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Additional mouse buttons (button 4, 5, etc.)
    Other(u16),
}

/// 2D position in window pixels (origin top-left).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create a new position.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Position {
    fn from(tuple: (f32, f32)) -> Self {
        Self { x: tuple.0, y: tuple.1 }
    }
}

/// Complete mouse state tracking.
///
/// A left-button press starts a drag at the cursor; each move while held
/// yields the pixel delta since the previous move. When the cursor position
/// is unknown at press time, the first move while held sets the anchor.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    /// Current cursor position in pixels.
    pub position: Option<Position>,

    /// Cursor position at the last processed drag step.
    pub drag_anchor: Option<Position>,

    /// Whether the left button is held.
    pub left_held: bool,
}

impl MouseState {
    /// Create a new mouse state with no position and all buttons released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the cursor position.
    ///
    /// Returns the pixel delta `(dx, dy)` if a drag is in progress.
    pub fn set_position(&mut self, x: f64, y: f64) -> Option<Position> {
        let current = Position::new(x as f32, y as f32);
        self.position = Some(current);

        if !self.left_held {
            return None;
        }
        let anchor = self.drag_anchor.replace(current)?;
        Some(Position::new(current.x - anchor.x, current.y - anchor.y))
    }

    /// Handle a mouse button press/release event.
    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        if button == MouseButton::Left {
            self.left_held = pressed;
            self.drag_anchor = if pressed { self.position } else { None };
        }
    }

    /// Whether a left-button drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.left_held
    }

    /// Handle the cursor leaving the window.
    ///
    /// A held drag continues, re-anchored where the cursor comes back in.
    pub fn leave_window(&mut self) {
        self.position = None;
        self.drag_anchor = None;
    }

    /// Reset all mouse state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
