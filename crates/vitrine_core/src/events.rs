//! Input events
//!
//! A small, platform-agnostic event shape. The widget layer routes these by
//! target element; document-level events (Escape, resize) carry no target.

use crate::dom::ElementId;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const CLICK: EventType = 1;
    pub const FOCUS: EventType = 10;
    pub const BLUR: EventType = 11;
    pub const KEY_DOWN: EventType = 20;
    /// Text input event (character input into a field)
    pub const TEXT_INPUT: EventType = 22;
    pub const RESIZE: EventType = 40;
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    /// Element the event happened on; `None` for document-level events
    pub target: Option<ElementId>,
    pub data: EventData,
    pub timestamp: u64,
    pub propagation_stopped: bool,
    pub default_prevented: bool,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
        button: u8,
    },
    Key {
        /// Virtual key code (use KeyCode constants)
        key: KeyCode,
        /// Keyboard modifier flags
        modifiers: Modifiers,
        /// Whether this is a repeat event
        repeat: bool,
    },
    /// Text input from keyboard or IME
    TextInput {
        /// The field's full value after the edit
        text: String,
    },
    Resize {
        width: u32,
        height: u32,
    },
    None,
}

impl Event {
    pub fn click(target: ElementId) -> Self {
        Self {
            event_type: event_types::CLICK,
            target: Some(target),
            data: EventData::None,
            timestamp: 0,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    pub fn key_down(target: Option<ElementId>, key: KeyCode) -> Self {
        Self {
            event_type: event_types::KEY_DOWN,
            target,
            data: EventData::Key {
                key,
                modifiers: Modifiers::NONE,
                repeat: false,
            },
            timestamp: 0,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    pub fn text_input(target: ElementId, text: impl Into<String>) -> Self {
        Self {
            event_type: event_types::TEXT_INPUT,
            target: Some(target),
            data: EventData::TextInput { text: text.into() },
            timestamp: 0,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    pub fn resize(width: u32, height: u32) -> Self {
        Self {
            event_type: event_types::RESIZE,
            target: None,
            data: EventData::Resize { width, height },
            timestamp: 0,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Suppress the platform's default action for this event
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Key code carried by a key event, if any
    pub fn key(&self) -> Option<KeyCode> {
        match self.data {
            EventData::Key { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// Virtual key codes (platform-agnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const BACKSPACE: KeyCode = KeyCode(0x08);
    pub const TAB: KeyCode = KeyCode(0x09);
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);

    // Arrow keys
    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const UP: KeyCode = KeyCode(0x26);
    pub const RIGHT: KeyCode = KeyCode(0x27);
    pub const DOWN: KeyCode = KeyCode(0x28);

    // Unknown/unmapped key
    pub const UNKNOWN: KeyCode = KeyCode(0);
}

/// Keyboard modifier flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { bits: 0 };
    pub const SHIFT: u8 = 0b0001;
    pub const CTRL: u8 = 0b0010;
    pub const ALT: u8 = 0b0100;

    /// Create new modifiers from flags
    pub const fn new(shift: bool, ctrl: bool, alt: bool) -> Self {
        let mut bits = 0;
        if shift {
            bits |= Self::SHIFT;
        }
        if ctrl {
            bits |= Self::CTRL;
        }
        if alt {
            bits |= Self::ALT;
        }
        Self { bits }
    }

    /// Check if shift is pressed
    pub const fn shift(&self) -> bool {
        self.bits & Self::SHIFT != 0
    }

    /// Check if ctrl is pressed
    pub const fn ctrl(&self) -> bool {
        self.bits & Self::CTRL != 0
    }

    /// Check if alt is pressed
    pub const fn alt(&self) -> bool {
        self.bits & Self::ALT != 0
    }

    /// Check if any modifier is pressed
    pub const fn any(&self) -> bool {
        self.bits != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prevent_default_is_sticky() {
        let mut event = Event::key_down(None, KeyCode::SPACE);
        assert!(!event.default_prevented);
        event.prevent_default();
        assert!(event.default_prevented);
    }

    #[test]
    fn key_accessor() {
        let event = Event::key_down(None, KeyCode::ESCAPE);
        assert_eq!(event.key(), Some(KeyCode::ESCAPE));
        let click = Event::click(ElementId::default());
        assert_eq!(click.key(), None);
    }

    #[test]
    fn modifier_bits() {
        let mods = Modifiers::new(true, false, true);
        assert!(mods.shift());
        assert!(!mods.ctrl());
        assert!(mods.alt());
        assert!(mods.any());
        assert!(!Modifiers::NONE.any());
    }
}
