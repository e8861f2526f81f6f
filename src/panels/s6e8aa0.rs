//! Samsung S6E8AA0 720x1280 AMOLED, MIPI command mode
//!
//! Several silicon revisions ship under the same ID; the third byte of the
//! DCS ID read-back tells them apart and all are accepted.
use crate::cmd::{Cmd, DataType};
use crate::config::{
    BusInfo, EsdPolicy, LcdMode, MipiInfo, MipiWorkMode, PanelConfig, Polarity, ResetTiming,
    VideoTiming,
};
use crate::descriptor::{PanelDescriptor, ScriptedPanel};
use crate::esd::EsdProbe;
use crate::flag::Flag;
use crate::identify::{IdCheck, IdProbe, Signature};
use crate::interface::MipiWriteMode;
use crate::sequence::Sequence;

/// Logical ID
pub const LCD_ID: u32 = 0x40_0002;

/// Revision codes found in the third ID byte
pub const REVISIONS: [u8; 3] = [0x02, 0x03, 0x05];

const TEST_KEY_ON: [u8; 3] = [0xF0, 0x5A, 0x5A];
const TEST_KEY_OFF: [u8; 3] = [0xF0, 0xA5, 0xA5];

const MIPI: MipiInfo = MipiInfo {
    work_mode: MipiWorkMode::Command,
    video_bus_width: 24,
    lanes: 4,
    phy_freq_khz: 500_000,
    h_sync_pol: Polarity::Positive,
    v_sync_pol: Polarity::Positive,
    de_pol: Polarity::Positive,
    te_pol: Polarity::Positive,
    timing: VideoTiming {
        hfp: 18,
        hbp: 14,
        hsync: 2,
        vfp: 13,
        vbp: 1,
        vsync: 2,
    },
};

fn init() -> Sequence {
    Sequence::new()
        .send(&TEST_KEY_ON)
        .send(&[
            0xF8, 0x25, 0x34, 0x00, 0x00, 0x00, 0x8D, 0x00, 0x43, 0x6E, 0x10, 0x27, 0x00, 0x00,
            0x10, 0x00, 0x00, 0x20, 0x02, 0x08, 0x08, 0x23, 0x23, 0xC0, 0xC8, 0x08, 0x48, 0xC1,
            0x00, 0xC3, 0xFF, 0xFF, 0xC8,
        ])
        .send(&[0xF2, 0x80, 0x03, 0x0D])
        .send(&[0xF6, 0x00, 0x02, 0x00])
        .send(&[0xB6, 0x0C, 0x02, 0x03, 0x32, 0xFF, 0x44, 0x44, 0xC0, 0x00])
        .send(&[0xD9, 0x14, 0x40, 0x0C, 0xCB, 0xCE, 0x6E, 0xC4, 0x0F, 0x40, 0x40, 0xCE, 0x00, 0x60, 0x19])
        .send(&[Cmd::SET_TEAR_ON, 0x00])
        .send(&TEST_KEY_OFF)
        .send(&[Cmd::SLEEP_OUT])
        .sleep(120)
        .send(&[Cmd::WRITE_CTRL_DISPLAY, Flag::CTRL_BRIGHTNESS_ON])
        .send(&[Cmd::DISPLAY_ON])
        .sleep(20)
}

fn id_probe() -> IdProbe {
    IdProbe::new(
        LCD_ID,
        Signature::new().byte(0, 0x40).byte(1, 0x00).any_of(2, &REVISIONS),
    )
    .unlock(
        Sequence::new()
            .send(&TEST_KEY_ON)
            .send_typed(DataType::SET_MAX_RETURN_PACKET_SIZE, &[0x03, 0x00]),
    )
    .read(Cmd::READ_DISPLAY_ID, 3)
    .toggle_eotp()
}

fn esd_probe() -> EsdProbe {
    EsdProbe::new()
        .healthy(&[Flag::POWER_MODE_HEALTHY, Flag::POWER_MODE_HEALTHY_NO_BOOSTER])
        .prepare(Sequence::new().send_typed(DataType::SET_MAX_RETURN_PACKET_SIZE, &[0x01, 0x00]))
}

/// Panel descriptor
pub fn descriptor() -> PanelDescriptor {
    PanelDescriptor {
        name: "s6e8aa0",
        lcd_id: LCD_ID,
        width: 720,
        height: 1280,
        mode: LcdMode::Dsi,
        bus: BusInfo::Mipi(MIPI),
        reset: ResetTiming {
            high_ms: 5,
            low_ms: 5,
            settle_ms: 25,
        },
        config: PanelConfig::new()
            .esd_policy(EsdPolicy::InVfp)
            .write_mode(MipiWriteMode::Dcs),
        ops: Box::new(
            ScriptedPanel::new(init(), IdCheck::Probe(id_probe()))
                .sleep(super::dcs_sleep_in(), super::dcs_sleep_out())
                .esd(esd_probe())
                .brightness(Cmd::WRITE_DISPLAY_BRIGHTNESS),
        ),
    }
}
