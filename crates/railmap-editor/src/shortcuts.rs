//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The map
//! lives here so every host shell shares one set of bindings.

use crate::input::Modifiers;

/// Actions keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Tool switching ──
    ToolSelect,
    ToolStation,
    ToolVirtual,
    ToolText,
    ToolLine,

    // ── Edit ──
    Undo,
    Redo,
    Delete,
    SelectAll,
    Deselect,
}

/// Resolves key events into shortcut actions.
///
/// `ctrl` and `meta` are interchangeable, so macOS ⌘ bindings work
/// unchanged elsewhere.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key value (e.g. `"z"`, `"Delete"`) to an action.
    /// Returns `None` if the combo has no binding.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let cmd = modifiers.ctrl || modifiers.meta;

        if cmd && modifiers.shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                "a" | "A" => Some(ShortcutAction::SelectAll),
                _ => None,
            };
        }

        match key {
            "v" | "V" => Some(ShortcutAction::ToolSelect),
            "s" | "S" => Some(ShortcutAction::ToolStation),
            "j" | "J" => Some(ShortcutAction::ToolVirtual),
            "t" | "T" => Some(ShortcutAction::ToolText),
            "l" | "L" => Some(ShortcutAction::ToolLine),
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Deselect),
            _ => None,
        }
    }
}
