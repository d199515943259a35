//! Input events as delivered by the windowing layer.
//!
//! Device specifics (wheel delta sign and units, key codes) are normalized by
//! the front-end before they reach the editor.

use crate::geometry::Point;

pub use super::view::WheelDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Keyboard commands understood by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    /// `r`: place routers.
    Router,
    /// `s`: place switches.
    Switch,
    /// `n`: neutral (select / connect) mode.
    Neutral,
    /// `c`: clear the whole topology.
    Clear,
    Escape,
    Delete,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl EditorKey {
    pub fn is_arrow(self) -> bool {
        matches!(
            self,
            EditorKey::ArrowUp | EditorKey::ArrowDown | EditorKey::ArrowLeft | EditorKey::ArrowRight
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Press { pos: Point, button: PointerButton },
    Move { pos: Point },
    Release { pos: Point, button: PointerButton },
    Key(EditorKey),
    Wheel { pos: Point, direction: WheelDirection },
}
