//! Declarative picker content.
//!
//! Callers describe what a picker shows with plain data; the picker turns
//! the definitions into live widgets every time it opens. The definitions
//! are serde types so palettes can be stored as postcard blobs (see
//! [`crate::config::load_palette`]).

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::ui::components::button::{IconId, Label, bounded};
use crate::ui::styling::ButtonStyle;

/// One selectable entry of a picker group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerButtonDef {
    /// Icon identifier, reported to `on_click` when the entry is picked
    pub icon: IconId,
    pub label: Option<Label>,
    /// Defaults to [`ButtonStyle::LightShadowedWhite`]
    pub style: Option<ButtonStyle>,
    /// Icon box size in pixels; defaults to 16x16
    pub size: Option<(u32, u32)>,
}

impl PickerButtonDef {
    pub fn new(icon: &str) -> Self {
        Self {
            icon: bounded(icon),
            label: None,
            style: None,
            size: None,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(bounded(label));
        self
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Some((width, height));
        self
    }
}

/// Ordered buttons shown together as one grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDef {
    pub buttons: Vec<PickerButtonDef>,
}

impl GroupDef {
    pub fn new() -> Self {
        Self::default()
    }

    /// A group of default-styled buttons, one per icon.
    pub fn from_icons(icons: &[&str]) -> Self {
        Self {
            buttons: icons.iter().map(|icon| PickerButtonDef::new(icon)).collect(),
        }
    }

    pub fn with_button(mut self, button: PickerButtonDef) -> Self {
        self.buttons.push(button);
        self
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}
