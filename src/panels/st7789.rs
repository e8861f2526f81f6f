//! Sitronix ST7789 240x240 TFT on 4-wire SPI, used as the sub display
use crate::cmd::Cmd;
use crate::config::{BusInfo, LcdMode, PanelConfig, ResetTiming, SpiInfo, SpiLineMode};
use crate::descriptor::{PanelDescriptor, ScriptedPanel};
use crate::flag::Flag;
use crate::identify::{IdCheck, IdProbe, Signature};
use crate::sequence::Sequence;

use super::CommandModePanel;

/// Logical ID
pub const LCD_ID: u32 = 0x8552;

const SPI: SpiInfo = SpiInfo {
    line_mode: SpiLineMode::FourWire,
    bus_width: 8,
    speed_hz: 40_000_000,
};

fn init() -> Sequence {
    Sequence::new()
        .send(&[Cmd::SOFT_RESET])
        .sleep(150)
        .send(&[Cmd::SLEEP_OUT])
        .sleep(10)
        .send(&[Cmd::SET_PIXEL_FORMAT, Flag::PIXEL_FORMAT_RGB565])
        .send(&[Cmd::SET_ADDRESS_MODE, 0x00])
        .send(&[0xB2, 0x0C, 0x0C, 0x00, 0x33, 0x33])
        .send(&[0xBB, 0x35])
        .send(&[0xC3, 0x13])
        .send(&[0x21])
        .send(&[Cmd::DISPLAY_ON])
        .sleep(10)
}

fn id_probe() -> IdProbe {
    IdProbe::new(LCD_ID, Signature::exact(&[0x85, 0x85, 0x52])).read(Cmd::READ_DISPLAY_ID, 3)
}

/// Panel descriptor
pub fn descriptor() -> PanelDescriptor {
    let script = ScriptedPanel::new(init(), IdCheck::Probe(id_probe()))
        .sleep(super::dcs_sleep_in(), super::dcs_sleep_out());
    PanelDescriptor {
        name: "st7789",
        lcd_id: LCD_ID,
        width: 240,
        height: 240,
        mode: LcdMode::Mcu,
        bus: BusInfo::Spi(SPI),
        reset: ResetTiming {
            high_ms: 10,
            low_ms: 10,
            settle_ms: 120,
        },
        config: PanelConfig::new(),
        ops: Box::new(CommandModePanel::new(script, 0x00)),
    }
}
