//! Display and theme configuration.
//!
//! [`UiConfig`] is an immutable record handed to the [`Screen`](crate::screen::Screen)
//! when it is built. Both the config and picker palettes (lists of
//! [`GroupDef`]) can be stored as postcard blobs, e.g. in flash.

extern crate alloc;

use alloc::vec::Vec;

use embedded_graphics::prelude::*;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::picker::GroupDef;
use crate::ui::components::button::MAX_ICON_SIZE_PX;
use crate::ui::styling::ColorIndex;
use crate::ui::styling::colors::{BLACK, DARK_PURPLE, LIGHT_BLUE, WHITE};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiConfig {
    pub display_width: u32,
    pub display_height: u32,
    /// Picker panel background
    pub panel_fill: ColorIndex,
    /// Picker panel outline
    pub panel_border: ColorIndex,
    pub title_color: ColorIndex,
    /// Focus frame and tooltip
    pub cursor_color: ColorIndex,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            display_width: 160,
            display_height: 120,
            panel_fill: DARK_PURPLE,
            panel_border: BLACK,
            title_color: WHITE,
            cursor_color: LIGHT_BLUE,
        }
    }
}

impl UiConfig {
    /// Decode a postcard-encoded config.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|e| {
            warn!("Invalid UI config: {:?}", e);
            ConfigError::Decode
        })
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::Encode)
    }

    /// Center of the display, where pickers are anchored.
    pub fn center(&self) -> Point {
        Point::new(
            (self.display_width >> 1) as i32,
            (self.display_height >> 1) as i32,
        )
    }
}

/// Decode a postcard-encoded picker palette.
///
/// Icon sizes above [`MAX_ICON_SIZE_PX`] are rejected.
pub fn load_palette(bytes: &[u8]) -> Result<Vec<GroupDef>, ConfigError> {
    let groups: Vec<GroupDef> = postcard::from_bytes(bytes).map_err(|e| {
        warn!("Invalid picker palette: {:?}", e);
        ConfigError::Decode
    })?;

    let sizes = groups.iter().flat_map(|g| &g.buttons).filter_map(|b| b.size);
    for (width, height) in sizes {
        if width > MAX_ICON_SIZE_PX || height > MAX_ICON_SIZE_PX {
            warn!("Palette icon size {}x{} out of range", width, height);
            return Err(ConfigError::IconSize { width, height });
        }
    }
    Ok(groups)
}

pub fn encode_palette(groups: &[GroupDef]) -> Result<Vec<u8>, ConfigError> {
    postcard::to_allocvec(groups).map_err(|_| ConfigError::Encode)
}
