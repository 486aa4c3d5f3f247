// src/ui/components/mod.rs
//! UI components library

pub mod button;

pub use button::{Action, Button, ButtonSpec, PickerButton, WidgetId};
