use serde::{Deserialize, Serialize};
use std::fmt;

use super::vector::Vec2;
use crate::surface::{Color, Surface};

/// Fraction of the travel radius treated as the center dead zone.
const DEAD_ZONE: f32 = 0.3;

/// Per-tick damping toward the origin while released; exponential
/// spring-return with a fixed point at the origin.
const RETURN_FRICTION: f32 = 0.25;

/// Residual below which the returning handle snaps onto the origin.
const SNAP_DISTANCE: f32 = 0.1;

const DRAG_LINE_WIDTH: f32 = 2.0;
const DRAG_LINE_ALPHA: u8 = 0x80;

pub const BASE_COLOR: Color = Color::rgb(0x70, 0x70, 0x70);
pub const LEFT_HANDLE_COLOR: Color = Color::rgb(0x34, 0x98, 0xdb);
pub const RIGHT_HANDLE_COLOR: Color = Color::rgb(0xe7, 0x4c, 0x3c);

/// Which of the two sticks this is. Fixed at construction; there is exactly
/// one stick per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Discrete 4-way classification of a stick's displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Center,
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Center => write!(f, "center"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Normalized reading of one stick: displacement components in [-1, 1] and
/// the discrete direction, both as of the last completed update.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisInput {
    pub x: f32,
    pub y: f32,
    pub direction: Direction,
}

/// Emitted when a stick's discrete direction changes; duplicates are
/// suppressed between changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionChange {
    pub side: Side,
    pub direction: Direction,
    pub x: f32,
    pub y: f32,
}

/// Classifies a raw displacement. Boundary angles sit exactly on the
/// `y = ±x` diagonals: -45° resolves right, 45° down, 135° left, -135° up.
fn direction_for(offset: Vec2, radius: f32) -> Direction {
    if offset.length() <= radius * DEAD_ZONE {
        return Direction::Center;
    }
    let Vec2 { x, y } = offset;
    if x > 0.0 && -x <= y && y < x {
        Direction::Right
    } else if y > 0.0 && -y < x && x <= y {
        Direction::Down
    } else if x < 0.0 && ((0.0 <= y && y <= -x) || (x < y && y < 0.0)) {
        Direction::Left
    } else {
        Direction::Up
    }
}

/// One on-screen joystick: an anchored base circle plus a draggable handle.
///
/// The stick is either at rest or dragging. While dragging, the handle
/// follows the routed pointer but saturates at the travel radius; once
/// released it spring-returns to the origin. The discrete direction is
/// `Center` from the instant of release — the return animation is cosmetic.
pub struct VirtualJoystick {
    side: Side,
    origin: Vec2,
    handle: Vec2,
    radius: f32,
    handle_radius: f32,
    drag_target: Vec2,
    dragging: bool,
    last_direction: Direction,
    base_color: Color,
    handle_color: Color,
}

impl VirtualJoystick {
    pub fn new(
        origin: Vec2,
        radius: f32,
        handle_radius: f32,
        side: Side,
        base_color: Color,
        handle_color: Color,
    ) -> Self {
        Self {
            side,
            origin,
            handle: origin,
            radius,
            handle_radius,
            drag_target: origin,
            dragging: false,
            last_direction: Direction::Center,
            base_color,
            handle_color,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn handle_position(&self) -> Vec2 {
        self.handle
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether `point` falls inside this stick's capture circle.
    pub fn contains(&self, point: Vec2) -> bool {
        (point - self.origin).length() <= self.radius
    }

    /// Starts a drag. The controller routes only points inside the capture
    /// circle here.
    pub fn begin_drag(&mut self, point: Vec2) {
        self.dragging = true;
        self.drag_target = point;
    }

    /// Tracks the pointer while dragging; a move never starts a drag.
    pub fn drag_to(&mut self, point: Vec2) {
        if self.dragging {
            self.drag_target = point;
        }
    }

    /// Releases the stick. The direction is re-evaluated to `Center`
    /// immediately; the handle itself animates back over later updates.
    pub fn end_drag(&mut self) -> Option<DirectionChange> {
        self.dragging = false;
        self.refresh_direction()
    }

    /// Re-anchors the stick after a layout change. The handle snaps to the
    /// new origin; an in-progress drag is preserved and re-evaluated against
    /// the new geometry on the next update.
    pub fn relocate(&mut self, origin: Vec2) {
        self.origin = origin;
        self.handle = origin;
    }

    /// Advances the handle one frame and re-classifies the direction,
    /// reporting a change if it differs from the previously reported one.
    ///
    /// After this returns, `|handle - origin| <= radius` holds.
    pub fn update(&mut self) -> Option<DirectionChange> {
        if self.dragging {
            let diff = self.drag_target - self.origin;
            let reach = diff.length().min(self.radius);
            self.handle = self.origin + diff.normalized() * reach;
        } else {
            self.handle = self.handle + (self.origin - self.handle) * RETURN_FRICTION;
            // Snap once the residual is subpixel to avoid endless near-zero
            // drift that would keep the origin from being a true fixed point.
            if (self.handle - self.origin).length() < SNAP_DISTANCE {
                self.handle = self.origin;
            }
        }
        self.refresh_direction()
    }

    fn refresh_direction(&mut self) -> Option<DirectionChange> {
        let direction = if self.dragging {
            direction_for(self.handle - self.origin, self.radius)
        } else {
            Direction::Center
        };
        if direction == self.last_direction {
            return None;
        }
        self.last_direction = direction;
        let input = self.input();
        Some(DirectionChange {
            side: self.side,
            direction,
            x: input.x,
            y: input.y,
        })
    }

    /// Current normalized reading, consistent with the last completed
    /// [`update`](Self::update) or [`end_drag`](Self::end_drag).
    pub fn input(&self) -> AxisInput {
        let n = (self.handle - self.origin) / self.radius;
        AxisInput {
            x: n.x,
            y: n.y,
            direction: self.last_direction,
        }
    }

    /// Draws the base, the handle and, while dragging, a half-alpha line
    /// from origin to handle. Never mutates stick state.
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.origin, self.radius, self.base_color);
        surface.fill_circle(self.handle, self.handle_radius, self.handle_color);
        if self.dragging {
            surface.stroke_line(
                self.origin,
                self.handle,
                DRAG_LINE_WIDTH,
                self.handle_color.with_alpha(DRAG_LINE_ALPHA),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Vec2 = Vec2 { x: 100.0, y: 100.0 };
    const RADIUS: f32 = 50.0;

    fn stick() -> VirtualJoystick {
        VirtualJoystick::new(
            ORIGIN,
            RADIUS,
            25.0,
            Side::Left,
            BASE_COLOR,
            LEFT_HANDLE_COLOR,
        )
    }

    fn displacement(stick: &VirtualJoystick) -> f32 {
        (stick.handle_position() - stick.origin()).length()
    }

    #[derive(Default)]
    struct RecordingSurface {
        circles: Vec<(Vec2, f32, Color)>,
        lines: Vec<(Vec2, Vec2)>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {}

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
            self.circles.push((center, radius, color));
        }

        fn stroke_line(&mut self, from: Vec2, to: Vec2, _width: f32, _color: Color) {
            self.lines.push((from, to));
        }
    }

    #[test]
    fn handle_stays_within_radius_for_inner_points() {
        for target in [
            Vec2::new(110.0, 100.0),
            Vec2::new(100.0, 70.0),
            Vec2::new(130.0, 130.0),
            Vec2::new(65.0, 100.0),
        ] {
            let mut s = stick();
            s.begin_drag(target);
            s.update();
            assert!(displacement(&s) <= RADIUS + 1e-4);
            assert!(displacement(&s) < RADIUS, "interior point must not saturate");
        }
    }

    #[test]
    fn handle_saturates_at_rim_for_far_points() {
        let mut s = stick();
        s.begin_drag(Vec2::new(120.0, 100.0));
        s.drag_to(Vec2::new(600.0, 600.0));
        s.update();
        assert!((displacement(&s) - RADIUS).abs() < 1e-3);
        // (500, 500) offset is exactly the 45° boundary, which resolves down.
        assert_eq!(s.input().direction, Direction::Down);
    }

    #[test]
    fn spring_return_reaches_a_fixed_point() {
        let mut s = stick();
        s.begin_drag(Vec2::new(150.0, 100.0));
        s.update();
        s.end_drag();

        let mut previous = displacement(&s);
        for _ in 0..200 {
            s.update();
            let now = displacement(&s);
            assert!(now <= previous);
            previous = now;
        }
        assert_eq!(s.handle_position(), ORIGIN);
        s.update();
        assert_eq!(s.handle_position(), ORIGIN, "origin is a fixed point");
    }

    #[test]
    fn release_reports_center_before_the_handle_returns() {
        let mut s = stick();
        s.begin_drag(Vec2::new(150.0, 100.0));
        let change = s.update().expect("first drag update reports a direction");
        assert_eq!(change.direction, Direction::Right);

        let release = s.end_drag().expect("release reports the change to center");
        assert_eq!(release.direction, Direction::Center);
        assert_eq!(s.input().direction, Direction::Center);

        // Handle is still visibly displaced; the animation is cosmetic.
        assert!(s.handle_position().x > ORIGIN.x);
        assert_eq!(s.update(), None);
        assert_eq!(s.input().direction, Direction::Center);
    }

    #[test]
    fn boundary_angles_resolve_deterministically() {
        let cases = [
            (Vec2::new(130.0, 70.0), Direction::Right), // -45°
            (Vec2::new(130.0, 130.0), Direction::Down), // 45°
            (Vec2::new(70.0, 130.0), Direction::Left),  // 135°
            (Vec2::new(70.0, 70.0), Direction::Up),     // -135°
            (Vec2::new(70.0, 100.0), Direction::Left),  // 180°
        ];
        for (target, expected) in cases {
            let mut s = stick();
            s.begin_drag(target);
            s.update();
            assert_eq!(s.input().direction, expected, "target {target:?}");
        }
    }

    #[test]
    fn dead_zone_classifies_as_center_regardless_of_angle() {
        for target in [
            Vec2::new(115.0, 100.0), // exactly 0.3 × radius
            Vec2::new(110.0, 90.0),
            Vec2::new(93.0, 107.0),
        ] {
            let mut s = stick();
            s.begin_drag(target);
            s.update();
            assert_eq!(s.input().direction, Direction::Center, "target {target:?}");
        }

        let mut s = stick();
        s.begin_drag(Vec2::new(116.0, 100.0));
        s.update();
        assert_eq!(s.input().direction, Direction::Right);
    }

    #[test]
    fn full_rightward_deflection() {
        let mut s = stick();
        s.begin_drag(Vec2::new(150.0, 100.0));
        s.update();
        let input = s.input();
        assert_eq!(input.x, 1.0);
        assert_eq!(input.y, 0.0);
        assert_eq!(input.direction, Direction::Right);
    }

    #[test]
    fn partial_downward_deflection() {
        let mut s = stick();
        s.begin_drag(Vec2::new(100.0, 130.0));
        s.update();
        let input = s.input();
        assert_eq!(input.x, 0.0);
        assert!((input.y - 0.6).abs() < 1e-6);
        assert_eq!(input.direction, Direction::Down);
    }

    #[test]
    fn diagonal_above_dead_zone_is_down() {
        let mut s = stick();
        s.begin_drag(Vec2::new(115.0, 115.0));
        s.update();
        assert_eq!(s.input().direction, Direction::Down);
    }

    #[test]
    fn duplicate_direction_reports_are_suppressed() {
        let mut s = stick();
        s.begin_drag(Vec2::new(150.0, 100.0));
        assert!(s.update().is_some());
        assert_eq!(s.update(), None);
        s.drag_to(Vec2::new(145.0, 90.0));
        assert_eq!(s.update(), None, "same direction, no new report");
    }

    #[test]
    fn relocate_preserves_an_active_drag() {
        let mut s = stick();
        s.begin_drag(Vec2::new(150.0, 100.0));
        s.update();

        let moved = Vec2::new(300.0, 400.0);
        s.relocate(moved);
        assert!(s.is_dragging());
        assert_eq!(s.handle_position(), moved);

        s.update();
        assert!((s.handle_position() - moved).length() <= RADIUS + 1e-4);
    }

    #[test]
    fn draw_emits_base_handle_and_drag_line() {
        let mut s = stick();
        let mut surface = RecordingSurface::default();
        s.draw(&mut surface);
        assert_eq!(surface.circles.len(), 2);
        assert!(surface.lines.is_empty(), "no drag line at rest");

        s.begin_drag(Vec2::new(150.0, 100.0));
        s.update();
        let before = s.input();
        let mut surface = RecordingSurface::default();
        s.draw(&mut surface);
        assert_eq!(surface.circles.len(), 2);
        assert_eq!(surface.lines.len(), 1);
        assert_eq!(s.input(), before, "rendering never mutates state");
    }
}
