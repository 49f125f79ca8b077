use super::palette::Colour;
use crate::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Where rendered pixels go. `place_pixel` may be called with out-of-frame
/// coordinates (sprites clipping the right/bottom edge); implementations
/// drop those. `draw_frame` marks the end of a frame.
pub trait Screen {
    fn place_pixel(&mut self, x: usize, y: usize, colour: Colour);

    fn draw_frame(&mut self);
}

/// In-memory frame storage; frontends copy it out after each frame.
pub struct FrameBuffer {
    frame: [Colour; DISPLAY_WIDTH * DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            frame: [Colour(0, 0, 0); DISPLAY_WIDTH * DISPLAY_HEIGHT],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Colour {
        self.frame[y * DISPLAY_WIDTH + x]
    }

    pub fn pixels(&self) -> &[Colour] {
        &self.frame
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for FrameBuffer {
    fn place_pixel(&mut self, x: usize, y: usize, colour: Colour) {
        if x < DISPLAY_WIDTH && y < DISPLAY_HEIGHT {
            self.frame[y * DISPLAY_WIDTH + x] = colour;
        }
    }

    fn draw_frame(&mut self) {}
}
