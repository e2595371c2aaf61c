use glam::Vec2;

/// One camera gesture, already classified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraInput {
    /// Orbit by a pointer delta in pixels.
    Rotate(Vec2),
    /// Pan by a pointer delta in pixels.
    Pan(Vec2),
    /// Dolly by wheel notches; positive zooms in.
    Zoom(f32),
}

/// Pointer button held during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left / primary: orbit (pan with shift).
    Primary,
    /// Middle: dolly by vertical drag.
    Middle,
    /// Right / secondary: pan.
    Secondary,
}

/// Pixels of vertical middle-drag per wheel notch.
const MIDDLE_DRAG_PIXELS_PER_NOTCH: f32 = 50.0;

/// Turns raw pointer events into [`CameraInput`] gestures.
#[derive(Debug, Default, Clone)]
pub struct PointerTracker {
    last_pos: Option<Vec2>,
    button: Option<PointerButton>,
    shift: bool,
}

impl PointerTracker {
    /// Tracker with no button held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A button went down at `at`.
    pub fn press(&mut self, button: PointerButton, at: Vec2) {
        self.button = Some(button);
        self.last_pos = Some(at);
    }

    /// Buttons released.
    pub fn release(&mut self) {
        self.button = None;
    }

    /// Shift modifier state.
    pub fn set_shift(&mut self, shift: bool) {
        self.shift = shift;
    }

    /// Pointer moved to `at`. Returns the gesture when a button is held.
    pub fn moved(&mut self, at: Vec2) -> Option<CameraInput> {
        let delta = at - self.last_pos.unwrap_or(at);
        self.last_pos = Some(at);

        match self.button? {
            PointerButton::Primary if self.shift => Some(CameraInput::Pan(delta)),
            PointerButton::Primary => Some(CameraInput::Rotate(delta)),
            PointerButton::Secondary => Some(CameraInput::Pan(delta)),
            PointerButton::Middle => Some(CameraInput::Zoom(
                -delta.y / MIDDLE_DRAG_PIXELS_PER_NOTCH,
            )),
        }
    }

    /// Wheel scrolled by `lines`; positive scrolls away from the user.
    #[must_use]
    pub fn wheel(&self, lines: f32) -> CameraInput {
        CameraInput::Zoom(lines)
    }
}
