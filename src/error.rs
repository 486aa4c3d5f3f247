//! Error types for the picker engine.
//!
//! Almost every failure here is a protocol violation by the composing
//! application (re-showing a visible picker, closing pickers out of order,
//! opening an unrelated picker on top of another). They are reported as
//! errors instead of panics so an integration mistake is visible in the logs
//! of a running device.

use thiserror_no_std::Error;

use crate::picker::PickerId;
use crate::transform::XfrmId;
use crate::ui::components::button::WidgetId;
use crate::ui::cursor::Dismiss;

/// Errors raised by the transform arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The id refers to a node that was released (or never allocated).
    #[error("Stale transform handle: {0:?}")]
    Stale(XfrmId),

    /// Re-parenting would make the node its own ancestor.
    #[error("Transform cycle through {0:?}")]
    Cycle(XfrmId),
}

/// Errors raised by the modal show/hide protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModalError {
    /// No picker with this id exists on the screen
    #[error("Unknown picker: {0:?}")]
    UnknownPicker(PickerId),

    /// `show` was called on a picker that is already open
    #[error("Picker already visible: {0:?}")]
    AlreadyVisible(PickerId),

    /// The operation needs an open picker
    #[error("Picker not visible: {0:?}")]
    NotVisible(PickerId),

    /// A picker was opened while another one is open, from outside the
    /// topmost picker's callbacks
    #[error("Picker {requested:?} opened beside {open:?} instead of from inside it")]
    SiblingPicker {
        /// The picker being shown
        requested: PickerId,
        /// The picker currently on top
        open: PickerId,
    },

    /// The widget does not belong to the picker
    #[error("Unknown widget {widget:?} in picker {picker:?}")]
    UnknownWidget {
        picker: PickerId,
        widget: WidgetId,
    },

    /// The picker has no delete button and no group buttons
    #[error("Picker has nothing to focus")]
    NothingToFocus,

    /// A dismiss entry was popped from an empty stack
    #[error("Cancel stack is empty")]
    CancelStackEmpty,

    /// The top of the dismiss stack belongs to a different picker
    #[error("Cancel stack out of order (expected {expected:?}, found {found:?})")]
    CancelOrder {
        /// The entry the caller owns
        expected: Dismiss,
        /// The entry actually on top
        found: Dismiss,
    },

    /// Too many pickers nested at once
    #[error("Modal nesting too deep (max: {max})")]
    TooDeep {
        /// Maximum number of simultaneously open pickers
        max: usize,
    },

    #[error("Transform error: {0}")]
    Transform(TransformError),
}

impl From<TransformError> for ModalError {
    fn from(err: TransformError) -> Self {
        ModalError::Transform(err)
    }
}

/// Errors raised while decoding or encoding configuration blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to decode configuration")]
    Decode,

    #[error("Failed to encode configuration")]
    Encode,

    /// A palette entry asks for an icon box larger than a button allows
    #[error("Icon size {width}x{height} out of range")]
    IconSize { width: u32, height: u32 },
}

/// Errors raised by the robot driver slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DriverError {
    /// A hardware entry point was used before a driver was started
    #[error("driver not initialized")]
    NotInitialized,
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for modal operations
pub type ModalResult<T> = Result<T, ModalError>;

/// Result type for driver entry points
pub type DriverResult<T> = Result<T, DriverError>;
