//! Input model: event families, per-family event type enums, and payloads.
//!
//! Every family has a closed enum of event types. The enum's `ALL` list is the
//! order in which the dispatcher flushes that family's buffers, so it doubles
//! as the definition of intra-family delivery order across types.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;
use std::hash::Hash;

use crate::camera::Point;
use crate::consts::{AUXILIARY_BUTTON_MASK, PRIMARY_BUTTON_MASK, SECONDARY_BUTTON_MASK};

/// The four upstream input families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFamily {
    Pointer,
    Mouse,
    Touch,
    Keyboard,
}

impl fmt::Display for InputFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pointer => "pointer",
            Self::Mouse => "mouse",
            Self::Touch => "touch",
            Self::Keyboard => "keyboard",
        };
        f.write_str(name)
    }
}

/// A closed set of event types belonging to one [`InputFamily`].
pub trait EventKind: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Family the event types belong to.
    const FAMILY: InputFamily;
    /// Every variant, in flush order.
    const ALL: &'static [Self];

    /// Dense slot index, `0..ALL.len()`.
    fn index(self) -> usize;
}

/// Pointer event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventType {
    Down,
    Move,
    Enter,
    Up,
    Leave,
    Cancel,
}

impl EventKind for PointerEventType {
    const FAMILY: InputFamily = InputFamily::Pointer;
    const ALL: &'static [Self] = &[Self::Down, Self::Move, Self::Enter, Self::Up, Self::Leave, Self::Cancel];

    fn index(self) -> usize {
        self as usize
    }
}

/// Mouse event types. Wheel events travel through the mouse family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventType {
    Click,
    Enter,
    Leave,
    Down,
    Up,
    Move,
    Wheel,
}

impl EventKind for MouseEventType {
    const FAMILY: InputFamily = InputFamily::Mouse;
    const ALL: &'static [Self] =
        &[Self::Click, Self::Enter, Self::Leave, Self::Down, Self::Up, Self::Move, Self::Wheel];

    fn index(self) -> usize {
        self as usize
    }
}

/// Touch event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchEventType {
    Start,
    End,
    Move,
    Cancel,
}

impl EventKind for TouchEventType {
    const FAMILY: InputFamily = InputFamily::Touch;
    const ALL: &'static [Self] = &[Self::Start, Self::End, Self::Move, Self::Cancel];

    fn index(self) -> usize {
        self as usize
    }
}

/// Keyboard event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyboardEventType {
    KeyDown,
    KeyPress,
    KeyUp,
}

impl EventKind for KeyboardEventType {
    const FAMILY: InputFamily = InputFamily::Keyboard;
    const ALL: &'static [Self] = &[Self::KeyDown, Self::KeyPress, Self::KeyUp];

    fn index(self) -> usize {
        self as usize
    }
}

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Only shift held.
    #[must_use]
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// Device class reported for a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerType {
    Mouse,
    Touch,
    Pen,
}

impl PointerType {
    /// Touch and pen contacts share the same gesture rules.
    #[must_use]
    pub fn is_touch_like(self) -> bool {
        matches!(self, Self::Touch | Self::Pen)
    }
}

/// A pointer event as observed by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    /// Identity of the contact; unique while the contact is active.
    pub pointer_id: i32,
    pub pointer_type: PointerType,
    /// Whether the platform designates this contact as primary.
    pub is_primary: bool,
    /// Pressed-buttons bitmask (bit 0 = primary button).
    pub buttons: u16,
    pub modifiers: Modifiers,
    /// Position relative to the viewport, in CSS pixels.
    pub client: Point,
    /// Position relative to the target element as reported by the platform.
    /// Zero on either axis means "not reported".
    pub offset: Point,
    /// Movement since the previous event of the same pointer.
    pub movement: Point,
}

impl PointerEvent {
    /// A primary contact at `client` with no buttons held.
    #[must_use]
    pub fn new(pointer_id: i32, pointer_type: PointerType, client: Point) -> Self {
        Self {
            pointer_id,
            pointer_type,
            is_primary: true,
            buttons: 0,
            modifiers: Modifiers::default(),
            client,
            offset: Point::default(),
            movement: Point::default(),
        }
    }

    #[must_use]
    pub fn with_primary(mut self, is_primary: bool) -> Self {
        self.is_primary = is_primary;
        self
    }

    #[must_use]
    pub fn with_buttons(mut self, buttons: u16) -> Self {
        self.buttons = buttons;
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn with_movement(mut self, movement: Point) -> Self {
        self.movement = movement;
        self
    }

    #[must_use]
    pub fn is_primary_button_down(&self) -> bool {
        self.buttons & PRIMARY_BUTTON_MASK != 0
    }

    #[must_use]
    pub fn is_secondary_button_down(&self) -> bool {
        self.buttons & SECONDARY_BUTTON_MASK != 0
    }

    #[must_use]
    pub fn is_auxiliary_button_down(&self) -> bool {
        self.buttons & AUXILIARY_BUTTON_MASK != 0
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// A mouse event. Wheel events carry their delta in `wheel`.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    pub buttons: u16,
    pub modifiers: Modifiers,
    pub client: Point,
    pub offset: Point,
    pub movement: Point,
    pub wheel: Option<WheelDelta>,
}

impl MouseEvent {
    #[must_use]
    pub fn new(client: Point) -> Self {
        Self {
            buttons: 0,
            modifiers: Modifiers::default(),
            client,
            offset: Point::default(),
            movement: Point::default(),
            wheel: None,
        }
    }

    /// A wheel event at `client`.
    #[must_use]
    pub fn wheel(client: Point, delta: WheelDelta) -> Self {
        Self { wheel: Some(delta), ..Self::new(client) }
    }
}

/// A single touch point within a [`TouchEvent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub identifier: i32,
    pub client: Point,
}

/// A touch event listing every touch currently on the surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TouchEvent {
    pub touches: Vec<Touch>,
    pub modifiers: Modifiers,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the platform (e.g. `"Shift"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// A keyboard event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    /// Auto-repeat from a held key.
    pub repeat: bool,
}

impl KeyboardEvent {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: Key(key.into()), modifiers: Modifiers::default(), repeat: false }
    }
}
