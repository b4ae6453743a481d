use glam::Vec2;
use rustc_hash::FxHashSet;

/// Platform-independent mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer state for the current frame.
///
/// Platform layers feed raw events in; camera controls read the per-frame
/// deltas and [`end_frame`](Self::end_frame) clears them.
#[derive(Default, Debug, Clone)]
pub struct Input {
    /// Cursor position inside the viewport
    pub cursor_position: Vec2,
    /// Cursor movement accumulated this frame (dx, dy)
    pub cursor_delta: Vec2,
    /// Scroll amount accumulated this frame (x, y)
    pub scroll_delta: Vec2,
    /// Viewport size in pixels
    pub screen_size: Vec2,
    /// Buttons currently held
    pub mouse_buttons: FxHashSet<MouseButton>,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the per-frame deltas so the camera stops once input stops.
    pub fn end_frame(&mut self) {
        self.cursor_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }

    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.screen_size = Vec2::new(width as f32, height as f32);
    }

    pub fn handle_cursor_move(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        // First event only establishes the position.
        if self.cursor_position != Vec2::ZERO {
            self.cursor_delta += new_pos - self.cursor_position;
        }
        self.cursor_position = new_pos;
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.mouse_buttons.insert(button);
        } else {
            self.mouse_buttons.remove(&button);
        }
    }

    /// Line-based wheel delta.
    pub fn handle_mouse_wheel(&mut self, x: f32, y: f32) {
        self.scroll_delta += Vec2::new(x, y);
    }

    /// Pixel-based wheel delta (trackpads), scaled down to line units.
    pub fn handle_pixel_scroll(&mut self, x: f64, y: f64) {
        self.scroll_delta += Vec2::new(x as f32, y as f32) * 0.1;
    }

    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }
}
