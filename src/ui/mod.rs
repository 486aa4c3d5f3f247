// src/ui/mod.rs
//! Picker UI building blocks
//!
//! This module provides:
//! - Icon buttons and their styles
//! - Focus navigation strategies
//! - The focus cursor and its dismiss stack
//! - Drawing helpers over embedded-graphics targets

pub mod components;
pub mod cursor;
pub mod navigator;
pub mod styling;
pub mod surface;

// Re-export commonly used items
pub use components::{Action, Button, ButtonSpec, PickerButton, WidgetId};
pub use cursor::{Cursor, CursorState, Dismiss, FocusTarget};
pub use navigator::{Direction, Focusable, Navigate, Navigator, NavigatorKind};
pub use styling::{ButtonStyle, ColorIndex};
