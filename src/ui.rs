//! egui host adapter
//!
//! Bridges the windowing world to the windowing-free core: translates egui
//! pointer and touch events into the [`PointerEvent`] stream, implements
//! [`Surface`] on the egui painter, feeds the toggle bindings and drives
//! the controller's tick from eframe's per-frame `update` callback.
//!
//! Touches carry their own ids; the mouse is mapped to the sentinel pointer
//! and suppressed while any touch is active, so egui's synthesized pointer
//! events for the first touch never double-route a drag.

use std::collections::HashSet;

use chrono::Local;
use eframe::egui::{self, Color32, Context, Key, Painter, Pos2, Stroke};

use crate::input::{DeviceClass, PointerEvent, PointerPhase, MOUSE_POINTER};
use crate::joystick::{ControllerOptions, JoystickController, Vec2};
use crate::surface::{Color, Surface};

pub struct TouchstickApp {
    controller: JoystickController,
    opacity: f32,
    viewport: Vec2,
    active_touches: HashSet<u64>,
}

impl TouchstickApp {
    pub fn new(cc: &eframe::CreationContext<'_>, options: ControllerOptions) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let rect = cc.egui_ctx.screen_rect();
        let viewport = Vec2::new(rect.width(), rect.height());
        let opacity = options.opacity;
        // eframe cannot probe touch hardware up front; start as desktop and
        // promote on the first real touch event.
        let device = DeviceClass::from_touch_capability(false);
        let controller = JoystickController::new(options, viewport, device);

        Self {
            controller,
            opacity,
            viewport,
            active_touches: HashSet::new(),
        }
    }

    fn forward_input(&mut self, ctx: &Context) {
        let events: Vec<egui::Event> = ctx.input(|i| i.events.clone());
        for event in &events {
            match event {
                egui::Event::Touch { id, phase, pos, .. } => {
                    self.controller.set_device_class(DeviceClass::Touch);
                    let phase = match phase {
                        egui::TouchPhase::Start => {
                            self.active_touches.insert(id.0);
                            self.controller
                                .observe_touch_count(self.active_touches.len(), Local::now());
                            PointerPhase::Start
                        }
                        egui::TouchPhase::Move => PointerPhase::Move,
                        egui::TouchPhase::End | egui::TouchPhase::Cancel => {
                            self.active_touches.remove(&id.0);
                            PointerPhase::End
                        }
                    };
                    self.controller.handle_event(PointerEvent {
                        id: id.0,
                        pos: to_vec(*pos),
                        phase,
                    });
                }
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed,
                    ..
                } if self.active_touches.is_empty() => {
                    let phase = if *pressed {
                        PointerPhase::Start
                    } else {
                        PointerPhase::End
                    };
                    self.controller.handle_event(PointerEvent {
                        id: MOUSE_POINTER,
                        pos: to_vec(*pos),
                        phase,
                    });
                }
                egui::Event::PointerMoved(pos) if self.active_touches.is_empty() => {
                    self.controller
                        .handle_event(PointerEvent::moved(MOUSE_POINTER, to_vec(*pos)));
                }
                _ => {}
            }
        }

        // Desktop toggle binding: Ctrl+Shift+J.
        if self.controller.device_class() == DeviceClass::Desktop
            && ctx.input(|i| i.modifiers.ctrl && i.modifiers.shift && i.key_pressed(Key::J))
        {
            self.controller.toggle();
        }
    }

    fn snapshot_readout(&self, ui: &mut egui::Ui) {
        let output = self.controller.input();
        let status = if self.controller.enabled() {
            "enabled"
        } else {
            "disabled"
        };
        ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
            ui.label(format!(
                "L: {} ({:+.2}, {:+.2})   R: {} ({:+.2}, {:+.2})   [{status}]",
                output.left.direction,
                output.left.x,
                output.left.y,
                output.right.direction,
                output.right.x,
                output.right.y,
            ));
        });
    }
}

impl eframe::App for TouchstickApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let rect = ctx.screen_rect();
        let viewport = Vec2::new(rect.width(), rect.height());
        if viewport != self.viewport {
            self.viewport = viewport;
            self.controller.layout(viewport);
        }

        self.forward_input(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show(ctx, |ui| {
                {
                    let mut surface = PainterSurface {
                        painter: ui.painter(),
                        opacity: self.opacity,
                    };
                    self.controller.tick(&mut surface);
                }
                self.snapshot_readout(ui);
            });

        // Keep the cooperative frame loop running; dropping the app (and
        // with it the controller) ends it.
        ctx.request_repaint();
    }
}

struct PainterSurface<'a> {
    painter: &'a Painter,
    opacity: f32,
}

impl PainterSurface<'_> {
    fn color32(&self, color: Color) -> Color32 {
        let a = (color.a as f32 * self.opacity).round() as u8;
        Color32::from_rgba_unmultiplied(color.r, color.g, color.b, a)
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self) {
        // egui repaints from scratch every frame; there is nothing to erase.
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.painter
            .circle_filled(to_pos(center), radius, self.color32(color));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.painter.line_segment(
            [to_pos(from), to_pos(to)],
            Stroke::new(width, self.color32(color)),
        );
    }
}

fn to_pos(v: Vec2) -> Pos2 {
    Pos2::new(v.x, v.y)
}

fn to_vec(p: Pos2) -> Vec2 {
    Vec2::new(p.x, p.y)
}
