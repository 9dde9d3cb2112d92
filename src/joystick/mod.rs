//! Virtual joystick subsystem
//!
//! Implements the dual-stick input pipeline:
//!
//! 1. [`vector`] - 2D vector value math
//! 2. [`stick`] - Per-stick state machine, physics and classification
//! 3. [`controller`] - Routing, layout, frame pass and aggregated snapshot
//!
//! # Architecture
//!
//! ```text
//! Pointer events ──► Controller ──► Stick ×2 ──► ControllerOutput
//!                    (Routing)     (Physics)    (Polled snapshot)
//! ```
//!
//! The subsystem is single-threaded and caller-driven: the host feeds it
//! pointer events as they arrive and calls the controller's tick once per
//! display refresh.

pub mod controller;
pub mod stick;
pub mod vector;

pub use controller::{ControllerOutput, JoystickController};
pub use stick::{AxisInput, Direction, DirectionChange, Side, VirtualJoystick};
pub use vector::Vec2;

use serde::{Deserialize, Serialize};

use crate::surface::Color;

/// Which screen edge the pair of joysticks is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Bottom,
    Top,
    Left,
    Right,
}

/// Construction options for the complete controller.
///
/// Geometry is fixed after construction (origins still move on re-layout);
/// colors and opacity only affect rendering, never the input math.
#[derive(Clone, Debug)]
pub struct ControllerOptions {
    /// Whether the overlay starts out capturing input.
    pub enabled: bool,

    /// Travel radius of each stick's capture circle in surface pixels.
    pub joystick_size: f32,

    /// Radius of the draggable handle in surface pixels.
    pub handle_size: f32,

    /// Screen edge the stick pair is anchored to.
    pub position: Position,

    /// Overlay opacity in [0, 1], applied by the host surface.
    pub opacity: f32,

    /// Fill color of both base circles.
    pub base_color: Color,

    /// Handle color of the left stick.
    pub left_color: Color,

    /// Handle color of the right stick.
    pub right_color: Color,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            joystick_size: 50.0,
            handle_size: 25.0,
            position: Position::Bottom,
            opacity: 0.7,
            base_color: stick::BASE_COLOR,
            left_color: stick::LEFT_HANDLE_COLOR,
            right_color: stick::RIGHT_HANDLE_COLOR,
        }
    }
}
