//! Styling for picker widgets
//!
//! - [`colors`] - The indexed 16-color palette
//! - [`style`] - Named button styles and their resolved looks

pub mod colors;
pub mod style;

pub use colors::{ColorIndex, indexed};
pub use style::{ButtonLook, ButtonStyle};
