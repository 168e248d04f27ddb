//! Pointer and keyboard processing.
//!
//! This module owns gesture recognition (click, double click, drag, rotate)
//! so the session only sees high-level [`DragAction`]s and never deals with
//! raw pointer travel or click timing.

pub mod drag;

pub use drag::{DragAction, DragController, DragPhase};

/// Keys the stash reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    /// Toggles the orientation of the dragged item.
    Rotate,
    /// Abandons the current drag.
    Cancel,
    Other,
}

impl KeyInput {
    /// Maps a character key; `r` rotates regardless of case.
    pub fn from_char(raw: char) -> Self {
        match raw.to_ascii_lowercase() {
            'r' => Self::Rotate,
            '\u{1b}' => Self::Cancel,
            _ => Self::Other,
        }
    }
}
