//! Drawing abstraction between the joystick core and the host surface.
//!
//! The core never talks to a windowing system directly; it draws through the
//! [`Surface`] trait so that hosts can back it with whatever painter they
//! have (the `ui` module backs it with egui) and tests can back it with a
//! recording double.

use crate::joystick::Vec2;

/// RGBA color with 8-bit channels.
///
/// Stored as raw u8 values for direct compatibility with egui's `Color32`,
/// so host adapters convert without scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Host-provided drawing surface sized to the viewport.
///
/// The controller repaints the whole overlay every tick, so implementations
/// never need to retain geometry between frames.
pub trait Surface {
    /// Erase everything drawn on the previous tick.
    fn clear(&mut self);

    /// Fill a circle centered at `center`.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Stroke a straight segment between two points.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
}
