//! Dual on-screen virtual joystick overlay.
//!
//! Converts a host pointer/touch event stream into two normalized 2-axis
//! analog readings with discrete 4-way direction classification, rendered
//! as a pair of on-screen sticks with spring-return physics.
//!
//! ```text
//! Pointer events ──► JoystickController ──► VirtualJoystick ×2 ──► ControllerOutput
//!                    (routing, layout)      (physics, classify)     (polled snapshot)
//! ```
//!
//! The core ([`joystick`], [`input`], [`surface`]) has no windowing
//! dependency: hosts feed it pointer events, call `tick` once per display
//! refresh and poll the snapshot. The [`ui`] module adapts the core to an
//! egui window; [`config`] loads the overlay options from a TOML file.

pub mod config;
pub mod input;
pub mod joystick;
pub mod surface;
pub mod ui;
