//! Error types shared by the driver and registry
use display_interface::DisplayError;
use thiserror::Error;

use crate::interface::BusKind;
use crate::registry::DeviceSlot;

/// Errors surfaced to the display driver.
///
/// Identification and liveness failures are not errors, they come back as
/// `Option`/`bool` from the protocols.
#[derive(Debug, Error)]
pub enum PanelError {
    /// A bus primitive failed where the caller asked for the result
    #[error("bus error: {0:?}")]
    Bus(DisplayError),

    /// The transport handed to a panel is not the bus the panel is wired for
    #[error("panel expects a {expected:?} bus, transport is {found:?}")]
    BusMismatch {
        /// Bus declared by the descriptor
        expected: BusKind,
        /// Bus of the supplied transport
        found: BusKind,
    },

    /// Window coordinates outside the panel geometry
    #[error("window ({left},{top})-({right},{bottom}) outside {width}x{height}")]
    #[allow(missing_docs)]
    OutOfBounds {
        left: u16,
        top: u16,
        right: u16,
        bottom: u16,
        width: u16,
        height: u16,
    },

    /// A panel script carries a step larger than the panel's payload capacity
    #[error("{name}: {len}-byte step exceeds the {capacity}-byte payload capacity")]
    PayloadTooLarge {
        /// Panel model
        name: &'static str,
        /// Largest step in its scripts
        len: usize,
        /// Configured capacity
        capacity: usize,
    },

    /// Two descriptors registered under the same slot and id
    #[error("panel id 0x{id:06X} already registered for {slot:?}")]
    DuplicatePanel {
        /// Slot the panel was registered for
        slot: DeviceSlot,
        /// Duplicated panel id
        id: u32,
    },

    /// No registered panel with this id
    #[error("no panel with id 0x{id:06X} registered for {slot:?}")]
    UnknownPanel {
        /// Slot that was searched
        slot: DeviceSlot,
        /// Requested panel id
        id: u32,
    },

    /// ID probing did not match any registered panel
    #[error("no registered panel answered the id probe on {0:?}")]
    NotDetected(DeviceSlot),
}

impl From<DisplayError> for PanelError {
    fn from(err: DisplayError) -> Self {
        PanelError::Bus(err)
    }
}
