//! Supported panel models
//!
//! Each model file holds its scripts, probe data and bus parameters and
//! exposes a `descriptor()` constructor. [`register_all`] puts them into a
//! registry in probe order, the dummy panel last so it only wins when
//! nothing else answers.
use crate::cmd::Cmd;
use crate::descriptor::{self, Direction, PanelDescriptor, PanelOperations, ScriptedPanel, Window};
use crate::error::PanelError;
use crate::flag::Flag;
use crate::interface::{MipiWriteMode, Transport};
use crate::registry::{DeviceSlot, PanelRegistry};
use crate::sequence::Sequence;

pub mod dummy;
pub mod hx8394;
pub mod ili9341;
pub mod nt35516;
pub mod s6e8aa0;
pub mod st7789;

/// Register every supported model
pub fn register_all(registry: &mut PanelRegistry) -> Result<(), PanelError> {
    registry.register(DeviceSlot::Main, hx8394::descriptor())?;
    registry.register(DeviceSlot::Main, nt35516::descriptor())?;
    registry.register(DeviceSlot::Main, s6e8aa0::descriptor())?;
    registry.register(DeviceSlot::Main, ili9341::descriptor())?;
    registry.register(DeviceSlot::Sub, st7789::descriptor())?;
    registry.register(DeviceSlot::Main, dummy::descriptor())?;
    Ok(())
}

/// Command-mode controller with a frame memory (MCU and SPI panels):
/// scripted init/sleep/probes plus column/page window addressing
pub struct CommandModePanel {
    script: ScriptedPanel,
    /// MADCTL value for [`Direction::Normal`]
    madctl_base: u8,
}

impl CommandModePanel {
    /// Wrap a scripted panel, `madctl_base` is its normal address mode
    pub fn new(script: ScriptedPanel, madctl_base: u8) -> Self {
        CommandModePanel {
            script,
            madctl_base,
        }
    }

    fn madctl(&self, direction: Direction) -> u8 {
        let bits = match direction {
            Direction::Normal => 0,
            Direction::Rot90 => Flag::MADCTL_ROW_COLUMN_EXCHANGE | Flag::MADCTL_COLUMN_ORDER,
            Direction::Rot180 => Flag::MADCTL_ROW_ORDER | Flag::MADCTL_COLUMN_ORDER,
            Direction::Rot270 => Flag::MADCTL_ROW_COLUMN_EXCHANGE | Flag::MADCTL_ROW_ORDER,
            Direction::MirrorH => Flag::MADCTL_COLUMN_ORDER,
            Direction::MirrorV => Flag::MADCTL_ROW_ORDER,
            Direction::MirrorHV => Flag::MADCTL_ROW_ORDER | Flag::MADCTL_COLUMN_ORDER,
        };
        self.madctl_base ^ bits
    }
}

impl PanelOperations for CommandModePanel {
    fn init(&self, panel: &PanelDescriptor, transport: &mut Transport) -> Result<(), PanelError> {
        self.script.init(panel, transport)
    }

    fn enter_sleep(
        &self,
        panel: &PanelDescriptor,
        transport: &mut Transport,
        is_sleep: bool,
    ) -> Result<(), PanelError> {
        self.script.enter_sleep(panel, transport, is_sleep)
    }

    fn read_id(&self, panel: &PanelDescriptor, transport: &mut Transport) -> u32 {
        self.script.read_id(panel, transport)
    }

    fn esd_check(&self, panel: &PanelDescriptor, transport: &mut Transport) -> bool {
        self.script.esd_check(panel, transport)
    }

    fn set_window(
        &self,
        _panel: &PanelDescriptor,
        transport: &mut Transport,
        window: Window,
    ) -> Result<(), PanelError> {
        descriptor::write_window(transport, window)
    }

    fn invalidate(&self, panel: &PanelDescriptor, transport: &mut Transport) -> Result<(), PanelError> {
        self.invalidate_rect(panel, transport, Window::full(panel.width, panel.height))
    }

    fn invalidate_rect(
        &self,
        panel: &PanelDescriptor,
        transport: &mut Transport,
        window: Window,
    ) -> Result<(), PanelError> {
        self.set_window(panel, transport, window)?;
        transport.write(None, &[Cmd::WRITE_MEMORY_START], MipiWriteMode::Dcs)?;
        Ok(())
    }

    fn set_direction(
        &self,
        panel: &PanelDescriptor,
        transport: &mut Transport,
        direction: Direction,
    ) -> Result<(), PanelError> {
        let madctl = self.madctl(direction);
        log::debug!("{}: direction {:?} (MADCTL 0x{:02X})", panel.name, direction, madctl);
        transport.write(None, &[Cmd::SET_ADDRESS_MODE, madctl], MipiWriteMode::Dcs)?;
        Ok(())
    }

    fn set_brightness(
        &self,
        panel: &PanelDescriptor,
        transport: &mut Transport,
        level: u8,
    ) -> Result<(), PanelError> {
        self.script.set_brightness(panel, transport, level)
    }

    fn scripts(&self) -> Vec<&Sequence> {
        self.script.scripts()
    }
}

/// Sleep-in script shared by DCS compliant controllers
pub(crate) fn dcs_sleep_in() -> Sequence {
    Sequence::new()
        .send(&[Cmd::DISPLAY_OFF])
        .sleep(20)
        .send(&[Cmd::SLEEP_IN])
        .sleep(120)
}

/// Sleep-out script shared by DCS compliant controllers
pub(crate) fn dcs_sleep_out() -> Sequence {
    Sequence::new()
        .send(&[Cmd::SLEEP_OUT])
        .sleep(120)
        .send(&[Cmd::DISPLAY_ON])
        .sleep(20)
}
