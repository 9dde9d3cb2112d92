use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::stick::{AxisInput, DirectionChange, Side, VirtualJoystick};
use super::vector::Vec2;
use super::{ControllerOptions, Position};
use crate::input::gesture::TapToggle;
use crate::input::{DeviceClass, PointerEvent, PointerId, PointerPhase};
use crate::surface::Surface;

/// Distance from the surface edge to each joystick origin.
const EDGE_PADDING: f32 = 80.0;

/// Aggregate input state of both sticks, refreshed once per tick.
///
/// This is the snapshot the embedding game/emulator layer polls once per
/// frame; reading it is a plain copy and never blocks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControllerOutput {
    pub left: AxisInput,
    pub right: AxisInput,
}

/// Owns the two sticks, routes pointer events to them by identity, drives
/// the per-frame update/render pass and caches the aggregate snapshot.
///
/// Construction is initialization: a controller cannot exist without a
/// laid-out pair of sticks, so there is no uninitialized state to query.
/// Teardown is `Drop` — the host owns the frame loop and the surface, so
/// dropping the controller and cancelling the host's repaint request detach
/// everything.
///
/// All mutation happens either inside [`handle_event`](Self::handle_event) /
/// [`observe_touch_count`](Self::observe_touch_count) (event handlers) or
/// inside [`tick`](Self::tick) (the frame callback). The host applies the
/// frame's queued events before calling `tick`, so
/// [`input`](Self::input) always reflects a consistent post-update state.
pub struct JoystickController {
    /// Fixed order: left, then right. Routing and the tick pass iterate in
    /// this order, which is what gives the left stick capture priority.
    sticks: [VirtualJoystick; 2],
    /// Pointer identity currently owning each stick's drag, if any.
    captures: [Option<PointerId>; 2],
    output: ControllerOutput,
    enabled: bool,
    device: DeviceClass,
    position: Position,
    tap_toggle: TapToggle,
}

impl JoystickController {
    pub fn new(options: ControllerOptions, viewport: Vec2, device: DeviceClass) -> Self {
        let (left_origin, right_origin) = origins(options.position, viewport);
        let left = VirtualJoystick::new(
            left_origin,
            options.joystick_size,
            options.handle_size,
            Side::Left,
            options.base_color,
            options.left_color,
        );
        let right = VirtualJoystick::new(
            right_origin,
            options.joystick_size,
            options.handle_size,
            Side::Right,
            options.base_color,
            options.right_color,
        );

        info!(
            "Joystick controller initialized ({:?} layout, {:?} device)",
            options.position, device
        );

        Self {
            sticks: [left, right],
            captures: [None, None],
            output: ControllerOutput::default(),
            enabled: options.enabled,
            device,
            position: options.position,
            tap_toggle: TapToggle::default(),
        }
    }

    /// Recomputes both origins for a new viewport. Must be called on every
    /// resize; drag state is preserved, only geometry moves.
    pub fn layout(&mut self, viewport: Vec2) {
        let (left_origin, right_origin) = origins(self.position, viewport);
        self.sticks[0].relocate(left_origin);
        self.sticks[1].relocate(right_origin);
        debug!(
            "Joysticks laid out at {left_origin:?} / {right_origin:?} for viewport {viewport:?}"
        );
    }

    /// Routes one pointer sample.
    ///
    /// A `Start` is attributed to the first stick (left before right) whose
    /// capture circle contains the point and which is not already owned by
    /// another pointer; outside both circles it is dropped. `Move` and `End`
    /// only ever reach the stick owning that pointer identity, so two
    /// concurrent drags never cross-talk. Starts are suppressed while
    /// disabled.
    pub fn handle_event(&mut self, event: PointerEvent) -> Option<DirectionChange> {
        match event.phase {
            PointerPhase::Start => {
                if self.enabled {
                    self.capture(event.id, event.pos);
                }
                None
            }
            PointerPhase::Move => {
                for (stick, capture) in self.sticks.iter_mut().zip(&self.captures) {
                    if *capture == Some(event.id) {
                        stick.drag_to(event.pos);
                    }
                }
                None
            }
            PointerPhase::End => {
                for (stick, capture) in self.sticks.iter_mut().zip(&mut self.captures) {
                    if *capture == Some(event.id) {
                        *capture = None;
                        let change = stick.end_drag();
                        if let Some(change) = &change {
                            log_change(change);
                        }
                        return change;
                    }
                }
                None
            }
        }
    }

    fn capture(&mut self, id: PointerId, pos: Vec2) {
        for (stick, capture) in self.sticks.iter_mut().zip(&mut self.captures) {
            if capture.is_none() && stick.contains(pos) {
                stick.begin_drag(pos);
                *capture = Some(id);
                debug!("{} joystick captured pointer {id}", stick.side());
                return;
            }
        }
    }

    /// Runs one frame: clears the surface, then (while enabled) updates and
    /// draws both sticks in fixed left/right order and refreshes the cached
    /// snapshot. While disabled nothing is drawn and the snapshot stays
    /// zeroed, so the pass is near-free.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> Vec<DirectionChange> {
        surface.clear();
        let mut changes = Vec::new();
        if !self.enabled {
            return changes;
        }
        for stick in &mut self.sticks {
            if let Some(change) = stick.update() {
                log_change(&change);
                changes.push(change);
            }
            stick.draw(surface);
        }
        self.output = ControllerOutput {
            left: self.sticks[0].input(),
            right: self.sticks[1].input(),
        };
        changes
    }

    /// The snapshot cached by the last tick. Safe to call from outside the
    /// frame loop at any frequency.
    pub fn input(&self) -> ControllerOutput {
        self.output
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn toggle(&mut self) {
        if self.enabled {
            self.disable();
        } else {
            self.enable();
        }
    }

    pub fn enable(&mut self) {
        if self.enabled {
            return;
        }
        self.enabled = true;
        info!("Joystick controller enabled");
    }

    /// Disables the overlay: releases any active drags, clears captures and
    /// zeroes the snapshot so no input is captured while disabled.
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        for (stick, capture) in self.sticks.iter_mut().zip(&mut self.captures) {
            if capture.take().is_some() {
                stick.end_drag();
            }
        }
        self.output = ControllerOutput::default();
        info!("Joystick controller disabled");
    }

    /// Feeds the built-in three-finger double-tap toggle with the number of
    /// touches down after a touch-start. Only acted on for touch devices;
    /// deliberately not gated on `enabled`, since the gesture must be able
    /// to re-enable a disabled overlay.
    pub fn observe_touch_count(&mut self, touches_down: usize, at: DateTime<Local>) {
        if self.device != DeviceClass::Touch {
            return;
        }
        if self.tap_toggle.observe(touches_down, at) {
            self.toggle();
        }
    }

    pub fn device_class(&self) -> DeviceClass {
        self.device
    }

    /// Updates the capability classification, e.g. when a host that probed
    /// as desktop sees its first real touch. Affects only the gesture
    /// binding, never the input math.
    pub fn set_device_class(&mut self, device: DeviceClass) {
        if self.device != device {
            debug!("Device class changed to {device:?}");
            self.device = device;
        }
    }

    pub fn stick(&self, side: Side) -> &VirtualJoystick {
        match side {
            Side::Left => &self.sticks[0],
            Side::Right => &self.sticks[1],
        }
    }
}

fn log_change(change: &DirectionChange) {
    debug!(
        "{} joystick: {} (x: {:.2}, y: {:.2})",
        change.side, change.direction, change.x, change.y
    );
}

/// Placement table for the two origins. Degenerate viewports (non-finite or
/// non-positive dimensions) clamp placement onto the surface instead of
/// producing NaN positions.
fn origins(position: Position, viewport: Vec2) -> (Vec2, Vec2) {
    let width = sanitize(viewport.x);
    let height = sanitize(viewport.y);
    let (left, right) = match position {
        Position::Bottom => (
            Vec2::new(EDGE_PADDING, height - EDGE_PADDING),
            Vec2::new(width - EDGE_PADDING, height - EDGE_PADDING),
        ),
        Position::Top => (
            Vec2::new(EDGE_PADDING, EDGE_PADDING),
            Vec2::new(width - EDGE_PADDING, EDGE_PADDING),
        ),
        Position::Left => (
            Vec2::new(EDGE_PADDING, height / 2.0),
            Vec2::new(EDGE_PADDING, height - EDGE_PADDING),
        ),
        Position::Right => (
            Vec2::new(width - EDGE_PADDING, height / 2.0),
            Vec2::new(width - EDGE_PADDING, height - EDGE_PADDING),
        ),
    };
    (clamp_onto(left, width, height), clamp_onto(right, width, height))
}

fn sanitize(dimension: f32) -> f32 {
    if dimension.is_finite() {
        dimension.max(0.0)
    } else {
        0.0
    }
}

fn clamp_onto(point: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(point.x.clamp(0.0, width), point.y.clamp(0.0, height))
}
