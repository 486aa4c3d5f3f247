//! Modal picker engine for small embedded displays
//!
//! This crate contains the platform-agnostic parts of an icon picker menu
//! system: parent-linked transforms, icon buttons, grid-laid-out picker
//! groups, focus navigation, and the modal show/hide protocol that lets
//! pickers nest and unwind back to whatever was focused before them.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).
//! Drawing goes to any `embedded_graphics::DrawTarget<Color = Rgb565>`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod picker;
pub mod screen;
pub mod transform;
pub mod ui;

pub use config::UiConfig;
pub use error::{ModalError, ModalResult};
pub use picker::{GroupDef, PickerButtonDef, PickerId, ShowOptions};
pub use screen::{Input, InputResult, Screen};
