//! Ilitek ILI9341 240x320 TFT on an 8080 parallel bus
use crate::cmd::Cmd;
use crate::config::{BusInfo, LcdMode, McuBusMode, McuInfo, McuTiming, PanelConfig, ResetTiming};
use crate::descriptor::{PanelDescriptor, ScriptedPanel};
use crate::esd::EsdProbe;
use crate::flag::Flag;
use crate::identify::{IdCheck, IdProbe, Signature};
use crate::sequence::Sequence;

use super::CommandModePanel;

/// Logical ID
pub const LCD_ID: u32 = 0x9341;

/// Read ID4: dummy, version, 0x93, 0x41
const READ_ID4: u8 = 0xD3;

const MCU: McuInfo = McuInfo {
    bus_mode: McuBusMode::I8080,
    bus_width: 16,
    bpp: 16,
    timing: McuTiming {
        rcss: 25,
        rlpw: 70,
        rhpw: 70,
        wcss: 10,
        wlpw: 15,
        whpw: 15,
    },
};

fn init() -> Sequence {
    Sequence::new()
        .send(&[Cmd::SOFT_RESET])
        .sleep(5)
        .send(&[0xCB, 0x39, 0x2C, 0x00, 0x34, 0x02])
        .send(&[0xCF, 0x00, 0xC1, 0x30])
        .send(&[0xE8, 0x85, 0x00, 0x78])
        .send(&[0xC0, 0x23])
        .send(&[0xC1, 0x10])
        .send(&[0xC5, 0x3E, 0x28])
        .send(&[0xC7, 0x86])
        .send(&[Cmd::SET_ADDRESS_MODE, Flag::MADCTL_BGR])
        .send(&[Cmd::SET_PIXEL_FORMAT, Flag::PIXEL_FORMAT_RGB565])
        .send(&[0xB1, 0x00, 0x18])
        .send(&[Cmd::SET_TEAR_ON, 0x00])
        .send(&[Cmd::SLEEP_OUT])
        .sleep(120)
        .send(&[Cmd::DISPLAY_ON])
        .sleep(20)
}

fn id_probe() -> IdProbe {
    IdProbe::new(LCD_ID, Signature::new().byte(2, 0x93).byte(3, 0x41)).read(READ_ID4, 4)
}

/// Panel descriptor
pub fn descriptor() -> PanelDescriptor {
    let script = ScriptedPanel::new(init(), IdCheck::Probe(id_probe()))
        .sleep(super::dcs_sleep_in(), super::dcs_sleep_out())
        .esd(EsdProbe::new());
    PanelDescriptor {
        name: "ili9341",
        lcd_id: LCD_ID,
        width: 240,
        height: 320,
        mode: LcdMode::Mcu,
        bus: BusInfo::Mcu(MCU),
        reset: ResetTiming {
            high_ms: 10,
            low_ms: 10,
            settle_ms: 120,
        },
        config: PanelConfig::new(),
        ops: Box::new(CommandModePanel::new(script, Flag::MADCTL_BGR)),
    }
}
