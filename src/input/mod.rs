//! Pointer input model shared by the joystick core and host adapters
//!
//! The core consumes a flat stream of `(pointer id, position, phase)`
//! samples; everything window-toolkit-specific (egui events, winit events,
//! test fixtures) is translated into this stream by an adapter, which keeps
//! the core free of any windowing dependency and lets tests feed synthetic
//! sequences.
//!
//! ```text
//! Host events ──► Adapter ──► PointerEvent stream ──► JoystickController
//! ```

pub mod gesture;

pub use gesture::TapToggle;

use serde::{Deserialize, Serialize};

use crate::joystick::Vec2;

/// Identity assigned by the host event source, stable from `Start` to
/// `End` of one press.
pub type PointerId = u64;

/// Sentinel identity for the host's single mouse pointer.
pub const MOUSE_POINTER: PointerId = u64::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Start,
    Move,
    End,
}

/// One pointer sample from the host event source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub pos: Vec2,
    pub phase: PointerPhase,
}

impl PointerEvent {
    pub fn start(id: PointerId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            phase: PointerPhase::Start,
        }
    }

    pub fn moved(id: PointerId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            phase: PointerPhase::Move,
        }
    }

    pub fn end(id: PointerId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            phase: PointerPhase::End,
        }
    }
}

/// Host capability class from the construction-time probe.
///
/// Selects which default toggle binding is active (three-finger double tap
/// on touch devices, a key chord on desktops); the input math is identical
/// on both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Touch,
    Desktop,
}

impl DeviceClass {
    pub fn from_touch_capability(has_touch: bool) -> Self {
        if has_touch {
            DeviceClass::Touch
        } else {
            DeviceClass::Desktop
        }
    }
}
