#![cfg(feature = "egui")]

use eframe::egui::{self, Event, Key, Pos2};

use crate::editor::{EditorKey, InputEvent, PointerButton, WheelDirection};
use crate::geometry::Point;

fn to_point(pos: Pos2, origin: Pos2) -> Point {
    Point::new(pos.x - origin.x, pos.y - origin.y)
}

fn map_button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Primary),
        egui::PointerButton::Secondary => Some(PointerButton::Secondary),
        egui::PointerButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

fn map_key(key: Key) -> Option<EditorKey> {
    Some(match key {
        Key::R => EditorKey::Router,
        Key::S => EditorKey::Switch,
        Key::N => EditorKey::Neutral,
        Key::C => EditorKey::Clear,
        Key::Escape => EditorKey::Escape,
        Key::Delete | Key::Backspace => EditorKey::Delete,
        Key::ArrowUp => EditorKey::ArrowUp,
        Key::ArrowDown => EditorKey::ArrowDown,
        Key::ArrowLeft => EditorKey::ArrowLeft,
        Key::ArrowRight => EditorKey::ArrowRight,
        _ => return None,
    })
}

/// Convert this frame's raw egui events into editor events.
///
/// Positions are made relative to `origin`, the top-left of the canvas.
/// Presses and wheel ticks outside the canvas are dropped; moves and releases
/// are always forwarded so a drag that leaves the canvas still ends.
pub fn translate_events(input: &egui::InputState, origin: Pos2, hovered: bool) -> Vec<InputEvent> {
    let mut out = Vec::new();
    for event in &input.events {
        match event {
            Event::PointerMoved(pos) => out.push(InputEvent::Move { pos: to_point(*pos, origin) }),
            Event::PointerButton { pos, button, pressed, .. } => {
                let Some(button) = map_button(*button) else { continue };
                let pos = to_point(*pos, origin);
                if *pressed {
                    if hovered {
                        out.push(InputEvent::Press { pos, button });
                    }
                } else {
                    out.push(InputEvent::Release { pos, button });
                }
            }
            Event::MouseWheel { delta, .. } if hovered && delta.y != 0.0 => {
                let Some(pos) = input.pointer.hover_pos() else { continue };
                let direction = if delta.y > 0.0 { WheelDirection::In } else { WheelDirection::Out };
                out.push(InputEvent::Wheel { pos: to_point(pos, origin), direction });
            }
            Event::Key { key, pressed: true, repeat, modifiers, .. } => {
                if modifiers.command || modifiers.alt {
                    continue;
                }
                // Arrow keys may auto-repeat; mode keys fire once per press.
                if *repeat && !matches!(key, Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight) {
                    continue;
                }
                if let Some(key) = map_key(*key) {
                    out.push(InputEvent::Key(key));
                }
            }
            _ => {}
        }
    }
    out
}
