//! Panel descriptors and the operations every panel model provides
//!
//! A [`PanelDescriptor`] is the static description of one panel model:
//! geometry, bus parameters, protocol configuration and its
//! [`PanelOperations`]. Most models are pure data and use
//! [`ScriptedPanel`]; models that need window addressing or other extras
//! wrap it and override the optional hooks.
use std::fmt;

use crate::cmd::Cmd;
use crate::config::{BusInfo, LcdMode, MipiWorkMode, PanelConfig, ResetTiming};
use crate::error::PanelError;
use crate::esd::{self, EsdProbe};
use crate::identify::{self, IdCheck, UNIDENTIFIED};
use crate::interface::{MipiWriteMode, Transport};
use crate::sequence::{self, Sequence};

/// Inclusive pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Window {
    pub left: u16,
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
}

impl Window {
    /// Rectangle from its corners
    pub const fn new(left: u16, top: u16, right: u16, bottom: u16) -> Self {
        Window {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Whole panel
    pub const fn full(width: u16, height: u16) -> Self {
        Window::new(0, 0, width.saturating_sub(1), height.saturating_sub(1))
    }

    /// Check the rectangle is ordered and inside `width` x `height`
    pub fn check(&self, width: u16, height: u16) -> Result<(), PanelError> {
        if self.left > self.right
            || self.top > self.bottom
            || self.right >= width
            || self.bottom >= height
        {
            return Err(PanelError::OutOfBounds {
                left: self.left,
                top: self.top,
                right: self.right,
                bottom: self.bottom,
                width,
                height,
            });
        }
        Ok(())
    }
}

/// Scan direction of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub enum Direction {
    #[default]
    Normal,
    Rot90,
    Rot180,
    Rot270,
    MirrorH,
    MirrorV,
    MirrorHV,
}

/// Hooks the display driver calls on a panel.
///
/// `init`, `enter_sleep`, `read_id` and `esd_check` are required, the rest
/// default to doing nothing.
pub trait PanelOperations {
    /// Power-on register initialization
    fn init(&self, panel: &PanelDescriptor, transport: &mut Transport) -> Result<(), PanelError>;

    /// Enter (`true`) or leave (`false`) sleep
    fn enter_sleep(
        &self,
        panel: &PanelDescriptor,
        transport: &mut Transport,
        is_sleep: bool,
    ) -> Result<(), PanelError>;

    /// Probe the panel ID, [`UNIDENTIFIED`] if it does not answer
    fn read_id(&self, panel: &PanelDescriptor, transport: &mut Transport) -> u32;

    /// True while the panel responds normally
    fn esd_check(&self, panel: &PanelDescriptor, transport: &mut Transport) -> bool;

    /// Restrict the following pixel writes to `window`
    fn set_window(
        &self,
        _panel: &PanelDescriptor,
        _transport: &mut Transport,
        _window: Window,
    ) -> Result<(), PanelError> {
        Ok(())
    }

    /// Prepare a full-screen pixel write
    fn invalidate(&self, _panel: &PanelDescriptor, _transport: &mut Transport) -> Result<(), PanelError> {
        Ok(())
    }

    /// Prepare a pixel write of `window`
    fn invalidate_rect(
        &self,
        _panel: &PanelDescriptor,
        _transport: &mut Transport,
        _window: Window,
    ) -> Result<(), PanelError> {
        Ok(())
    }

    /// Change the scan direction
    fn set_direction(
        &self,
        _panel: &PanelDescriptor,
        _transport: &mut Transport,
        _direction: Direction,
    ) -> Result<(), PanelError> {
        Ok(())
    }

    /// Set the panel-internal brightness
    fn set_brightness(
        &self,
        _panel: &PanelDescriptor,
        _transport: &mut Transport,
        _level: u8,
    ) -> Result<(), PanelError> {
        Ok(())
    }

    /// Panel-side power control
    fn pwr_ctrl(
        &self,
        _panel: &PanelDescriptor,
        _transport: &mut Transport,
        _on: bool,
    ) -> Result<(), PanelError> {
        Ok(())
    }

    /// Every script the model plays, checked against the payload capacity
    /// when the panel is registered
    fn scripts(&self) -> Vec<&Sequence> {
        Vec::new()
    }
}

/// Static description of one panel model
pub struct PanelDescriptor {
    /// Model name, for logs
    pub name: &'static str,
    /// ID the panel reports from `read_id`
    pub lcd_id: u32,
    /// Horizontal resolution
    pub width: u16,
    /// Vertical resolution
    pub height: u16,
    /// Controller interface mode
    pub mode: LcdMode,
    /// Bus parameters
    pub bus: BusInfo,
    /// Reset pulse timing
    pub reset: ResetTiming,
    /// Protocol configuration
    pub config: PanelConfig,
    /// Panel operations
    pub ops: Box<dyn PanelOperations>,
}

impl fmt::Debug for PanelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelDescriptor")
            .field("name", &self.name)
            .field("lcd_id", &format_args!("0x{:06X}", self.lcd_id))
            .field("width", &self.width)
            .field("height", &self.height)
            .field("mode", &self.mode)
            .field("bus", &self.bus.kind())
            .finish_non_exhaustive()
    }
}

impl PanelDescriptor {
    /// True for MIPI panels that run in video mode once initialized
    pub fn streams_video(&self) -> bool {
        matches!(&self.bus, BusInfo::Mipi(info) if info.work_mode == MipiWorkMode::Video)
    }
}

/// Panel model driven entirely by scripts and probe data
#[derive(Debug, Clone)]
pub struct ScriptedPanel {
    /// Power-on initialization
    pub init: Sequence,
    /// Enter sleep
    pub sleep_in: Sequence,
    /// Leave sleep
    pub sleep_out: Sequence,
    /// Identification
    pub id: IdCheck,
    /// Liveness check, `None` for panels without a usable status register
    pub esd: Option<EsdProbe>,
    /// DCS brightness register, for panels with internal dimming
    pub brightness_reg: Option<u8>,
}

impl ScriptedPanel {
    /// Panel with an init script and a fixed ID, everything else empty
    pub fn new(init: Sequence, id: IdCheck) -> Self {
        ScriptedPanel {
            init,
            sleep_in: Sequence::new(),
            sleep_out: Sequence::new(),
            id,
            esd: None,
            brightness_reg: None,
        }
    }

    /// Sleep in/out scripts
    pub fn sleep(mut self, sleep_in: Sequence, sleep_out: Sequence) -> Self {
        self.sleep_in = sleep_in;
        self.sleep_out = sleep_out;
        self
    }

    /// ESD probe
    pub fn esd(mut self, probe: EsdProbe) -> Self {
        self.esd = Some(probe);
        self
    }

    /// DCS brightness register
    pub fn brightness(mut self, reg: u8) -> Self {
        self.brightness_reg = Some(reg);
        self
    }
}

impl PanelOperations for ScriptedPanel {
    fn init(&self, panel: &PanelDescriptor, transport: &mut Transport) -> Result<(), PanelError> {
        log::info!("{}: init ({} steps)", panel.name, self.init.len());
        transport.set_cmd_mode()?;
        sequence::run(&self.init, transport, &panel.config);
        if panel.streams_video() {
            log::debug!("{}: back to video mode", panel.name);
            transport.set_video_mode()?;
        }
        Ok(())
    }

    fn enter_sleep(
        &self,
        panel: &PanelDescriptor,
        transport: &mut Transport,
        is_sleep: bool,
    ) -> Result<(), PanelError> {
        log::info!("{}: sleep {}", panel.name, if is_sleep { "in" } else { "out" });
        let seq = if is_sleep {
            &self.sleep_in
        } else {
            &self.sleep_out
        };
        sequence::run(seq, transport, &panel.config);
        Ok(())
    }

    fn read_id(&self, panel: &PanelDescriptor, transport: &mut Transport) -> u32 {
        match &self.id {
            IdCheck::Fixed(id) => *id,
            IdCheck::Probe(probe) => {
                identify::read_id(transport, probe, &panel.config).unwrap_or(UNIDENTIFIED)
            }
        }
    }

    fn esd_check(&self, panel: &PanelDescriptor, transport: &mut Transport) -> bool {
        match &self.esd {
            Some(probe) => esd::esd_check(transport, probe, &panel.config),
            None => true,
        }
    }

    fn set_brightness(
        &self,
        panel: &PanelDescriptor,
        transport: &mut Transport,
        level: u8,
    ) -> Result<(), PanelError> {
        let Some(reg) = self.brightness_reg else {
            return Ok(());
        };
        log::debug!("{}: brightness {}", panel.name, level);
        transport.write(None, &[reg, level], MipiWriteMode::Dcs)?;
        Ok(())
    }

    fn scripts(&self) -> Vec<&Sequence> {
        let mut scripts = vec![&self.init, &self.sleep_in, &self.sleep_out];
        if let IdCheck::Probe(probe) = &self.id {
            scripts.push(&probe.unlock);
        }
        if let Some(esd) = &self.esd {
            scripts.push(&esd.prepare);
        }
        scripts
    }
}

/// Column/page address writes shared by the command-mode panels
pub(crate) fn write_window(transport: &mut Transport, window: Window) -> Result<(), PanelError> {
    let [l_hi, l_lo] = window.left.to_be_bytes();
    let [r_hi, r_lo] = window.right.to_be_bytes();
    let [t_hi, t_lo] = window.top.to_be_bytes();
    let [b_hi, b_lo] = window.bottom.to_be_bytes();
    transport.write(
        None,
        &[Cmd::SET_COLUMN_ADDRESS, l_hi, l_lo, r_hi, r_lo],
        MipiWriteMode::Dcs,
    )?;
    transport.write(
        None,
        &[Cmd::SET_PAGE_ADDRESS, t_hi, t_lo, b_hi, b_lo],
        MipiWriteMode::Dcs,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_window_covers_the_panel() {
        let w = Window::full(240, 320);
        assert_eq!(w, Window::new(0, 0, 239, 319));
        assert!(w.check(240, 320).is_ok());
    }

    #[test]
    fn window_outside_panel_is_rejected() {
        assert!(Window::new(0, 0, 240, 10).check(240, 320).is_err());
        assert!(Window::new(10, 0, 5, 10).check(240, 320).is_err());
    }
}
