//! ESD liveness check
//!
//! After an electrostatic discharge or a rail glitch a panel can silently
//! drop out of normal mode. The display driver polls this check and resets
//! and re-initializes the panel when it fails.
use crate::cmd::Cmd;
use crate::config::{EsdPolicy, PanelConfig};
use crate::flag::Flag;
use crate::interface::{BusKind, Transport};
use crate::sequence::{self, Sequence};

/// Status register read and the values that mean "alive"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsdProbe {
    /// Status register, DCS read power mode by default
    pub reg: u8,
    /// Accepted status values
    pub healthy: Vec<u8>,
    /// Script run before each read, e.g. the max return packet size
    pub prepare: Sequence,
}

impl EsdProbe {
    /// Read power mode and expect `0x9C`
    pub fn new() -> Self {
        EsdProbe {
            reg: Cmd::READ_POWER_MODE,
            healthy: vec![Flag::POWER_MODE_HEALTHY],
            prepare: Sequence::new(),
        }
    }

    /// Read a different status register
    pub fn reg(mut self, reg: u8) -> Self {
        self.reg = reg;
        self
    }

    /// Replace the accepted status values
    pub fn healthy(mut self, values: &[u8]) -> Self {
        self.healthy = values.to_vec();
        self
    }

    /// Script run before each read
    pub fn prepare(mut self, seq: Sequence) -> Self {
        self.prepare = seq;
        self
    }
}

impl Default for EsdProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Check whether the panel still answers with a healthy status.
///
/// On MIPI with [`EsdPolicy::ToggleLpHs`] the read happens in low-power
/// mode and the link is put back to high-speed afterwards.
pub fn esd_check(transport: &mut Transport, probe: &EsdProbe, config: &PanelConfig) -> bool {
    let toggle = transport.kind() == BusKind::Mipi && config.esd_policy == EsdPolicy::ToggleLpHs;
    if toggle {
        if let Err(e) = transport.set_lp_mode() {
            log::warn!("esd: could not enter LP mode: {:?}", e);
        }
    }

    let mut healthy = false;
    for attempt in 1..=config.retries {
        sequence::run(&probe.prepare, transport, config);
        let mut status = [0u8; 1];
        match transport.read_register(probe.reg, &mut status) {
            Ok(0) => log::debug!("esd: attempt {}/{}: no status byte", attempt, config.retries),
            Ok(_) if probe.healthy.contains(&status[0]) => {
                log::debug!("esd: status 0x{:02X} on attempt {}", status[0], attempt);
                healthy = true;
                break;
            }
            Ok(_) => log::debug!(
                "esd: attempt {}/{}: status 0x{:02X}, expected {:02X?}",
                attempt,
                config.retries,
                status[0],
                probe.healthy
            ),
            Err(e) => log::warn!("esd: attempt {}: read failed: {:?}", attempt, e),
        }
    }

    if toggle {
        if let Err(e) = transport.set_hs_mode() {
            log::warn!("esd: could not return to HS mode: {:?}", e);
        }
    }
    if !healthy {
        log::error!("esd: panel not responding after {} attempts", config.retries);
    }
    healthy
}
