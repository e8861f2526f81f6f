//! Runtime handle on the installed panel
//!
//! [`Panel`] pairs a registered [`PanelDescriptor`] with the transport it
//! owns and is what the display driver calls into:
//!
//! - `init()` - power-on register initialization
//! - `enter_sleep()` - sleep in / sleep out
//! - `read_id()` - identification probe
//! - `esd_check()` / `check_and_recover()` - liveness polling
//! - `set_window()`, `invalidate()`, `invalidate_rect()`, `set_direction()`,
//!   `set_brightness()`, `pwr_ctrl()` - optional hooks, no-ops on panels
//!   that do not provide them
use crate::descriptor::{Direction, PanelDescriptor, Window};
use crate::error::PanelError;
use crate::interface::Transport;

/// Outcome of [`Panel::check_and_recover`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EsdStatus {
    /// The panel answered normally
    Healthy,
    /// The panel did not answer and was re-initialized
    Recovered,
}

/// A panel bound to its transport
pub struct Panel<'a> {
    descriptor: &'a PanelDescriptor,
    transport: Transport,
}

impl<'a> Panel<'a> {
    /// Bind `transport` to the panel described by `descriptor`.
    ///
    /// Fails if the transport is not the bus the descriptor is wired for.
    pub fn new(descriptor: &'a PanelDescriptor, transport: Transport) -> Result<Self, PanelError> {
        let expected = descriptor.bus.kind();
        let found = transport.kind();
        if expected != found {
            return Err(PanelError::BusMismatch { expected, found });
        }
        Ok(Panel {
            descriptor,
            transport,
        })
    }

    /// The panel's descriptor
    pub fn descriptor(&self) -> &'a PanelDescriptor {
        self.descriptor
    }

    /// The owned transport
    pub fn transport(&mut self) -> &mut Transport {
        &mut self.transport
    }

    /// Give the transport back
    pub fn release(self) -> Transport {
        self.transport
    }

    /// Run the power-on initialization
    pub fn init(&mut self) -> Result<(), PanelError> {
        self.descriptor
            .ops
            .init(self.descriptor, &mut self.transport)
    }

    /// Enter (`true`) or leave (`false`) sleep
    pub fn enter_sleep(&mut self, is_sleep: bool) -> Result<(), PanelError> {
        self.descriptor
            .ops
            .enter_sleep(self.descriptor, &mut self.transport, is_sleep)
    }

    /// Probe the panel ID
    pub fn read_id(&mut self) -> u32 {
        self.descriptor
            .ops
            .read_id(self.descriptor, &mut self.transport)
    }

    /// True while the panel responds normally
    pub fn esd_check(&mut self) -> bool {
        self.descriptor
            .ops
            .esd_check(self.descriptor, &mut self.transport)
    }

    /// Run the ESD check and re-initialize the panel if it failed.
    ///
    /// The hardware reset pulse belongs to the display driver's power
    /// sequencing and is expected to have been issued by the caller when
    /// this returns [`EsdStatus::Recovered`].
    pub fn check_and_recover(&mut self) -> Result<EsdStatus, PanelError> {
        if self.esd_check() {
            return Ok(EsdStatus::Healthy);
        }
        log::warn!("{}: ESD check failed, re-initializing", self.descriptor.name);
        self.init()?;
        Ok(EsdStatus::Recovered)
    }

    /// Restrict the following pixel writes to `window`
    pub fn set_window(&mut self, window: Window) -> Result<(), PanelError> {
        window.check(self.descriptor.width, self.descriptor.height)?;
        self.descriptor
            .ops
            .set_window(self.descriptor, &mut self.transport, window)
    }

    /// Prepare a full-screen pixel write
    pub fn invalidate(&mut self) -> Result<(), PanelError> {
        self.descriptor
            .ops
            .invalidate(self.descriptor, &mut self.transport)
    }

    /// Prepare a pixel write of `window`
    pub fn invalidate_rect(&mut self, window: Window) -> Result<(), PanelError> {
        window.check(self.descriptor.width, self.descriptor.height)?;
        self.descriptor
            .ops
            .invalidate_rect(self.descriptor, &mut self.transport, window)
    }

    /// Change the scan direction
    pub fn set_direction(&mut self, direction: Direction) -> Result<(), PanelError> {
        self.descriptor
            .ops
            .set_direction(self.descriptor, &mut self.transport, direction)
    }

    /// Set the panel-internal brightness
    pub fn set_brightness(&mut self, level: u8) -> Result<(), PanelError> {
        self.descriptor
            .ops
            .set_brightness(self.descriptor, &mut self.transport, level)
    }

    /// Panel-side power control
    pub fn pwr_ctrl(&mut self, on: bool) -> Result<(), PanelError> {
        self.descriptor
            .ops
            .pwr_ctrl(self.descriptor, &mut self.transport, on)
    }
}
