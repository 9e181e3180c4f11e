//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and stylus events into a unified `InputEvent`
//! enum consumed by the editing session. Coordinates are in diagram units;
//! the host shell converts from view space before dispatching.

use railmap_core::Point;

/// Modifier keys held during a pointer or key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// The "precise placement" chord: disables snapping, moves in fine steps.
    pub fn precise(&self) -> bool {
        self.ctrl
    }
}

/// A normalized input event from any pointing device.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pencil contact).
    PointerDown { pos: Point, modifiers: Modifiers },

    /// Pointer moved while tracking.
    PointerMove { pos: Point, modifiers: Modifiers },

    /// Pointer released.
    PointerUp { pos: Point, modifiers: Modifiers },
}

impl InputEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self::PointerDown {
            pos: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::PointerMove {
            pos: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::PointerUp {
            pos: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        match self {
            Self::PointerDown { pos, .. } => Self::PointerDown { pos, modifiers },
            Self::PointerMove { pos, .. } => Self::PointerMove { pos, modifiers },
            Self::PointerUp { pos, .. } => Self::PointerUp { pos, modifiers },
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Self::PointerDown { pos, .. }
            | Self::PointerMove { pos, .. }
            | Self::PointerUp { pos, .. } => *pos,
        }
    }
}
