//! Himax HX8394 720x1280 MIPI video-mode panel
use crate::cmd::{Cmd, DataType};
use crate::config::{
    BusInfo, LcdMode, MipiInfo, MipiWorkMode, PanelConfig, Polarity, ResetTiming, VideoTiming,
};
use crate::descriptor::{PanelDescriptor, ScriptedPanel};
use crate::esd::EsdProbe;
use crate::flag::Flag;
use crate::identify::{IdCheck, IdProbe, Signature};
use crate::sequence::Sequence;

/// Logical ID
pub const LCD_ID: u32 = 0x8394;

/// Read-back of register 0xF4
const ID_REG: u8 = 0xF4;

const SET_EXTC: [u8; 4] = [0xB9, 0xFF, 0x83, 0x94];

const MIPI: MipiInfo = MipiInfo {
    work_mode: MipiWorkMode::Video,
    video_bus_width: 24,
    lanes: 4,
    phy_freq_khz: 500_000,
    h_sync_pol: Polarity::Positive,
    v_sync_pol: Polarity::Positive,
    de_pol: Polarity::Positive,
    te_pol: Polarity::Positive,
    timing: VideoTiming {
        hfp: 80,
        hbp: 60,
        hsync: 60,
        vfp: 12,
        vbp: 15,
        vsync: 4,
    },
};

const RESET: ResetTiming = ResetTiming {
    high_ms: 5,
    low_ms: 15,
    settle_ms: 120,
};

fn init() -> Sequence {
    Sequence::new()
        .send(&SET_EXTC)
        .send(&[0xBA, 0x33, 0x83, 0xA0, 0x6D, 0xB2, 0x00])
        .send(&[0xB1, 0x6C, 0x10, 0x10, 0x24, 0x04, 0x11, 0xF1, 0x80, 0xEA, 0x96])
        .send(&[0xB2, 0x00, 0x64, 0x10, 0x07, 0x32, 0x1C, 0x08, 0x08, 0x1C, 0x4D, 0x00])
        .send(&[0xB4, 0x00, 0xFF, 0x03, 0x5A, 0x03, 0x5A, 0x03, 0x5A, 0x01, 0x70, 0x01, 0x70])
        .send(&[0xCC, 0x09])
        .send(&[Cmd::SLEEP_OUT])
        .sleep(120)
        .send(&[Cmd::DISPLAY_ON])
        .sleep(20)
}

fn id_probe() -> IdProbe {
    IdProbe::new(LCD_ID, Signature::exact(&[0x94]))
        .unlock(
            Sequence::new()
                .send(&SET_EXTC)
                .send_typed(DataType::SET_MAX_RETURN_PACKET_SIZE, &[0x01, 0x00]),
        )
        .read(ID_REG, 1)
        .toggle_eotp()
}

fn esd_probe() -> EsdProbe {
    EsdProbe::new()
        .healthy(&[Flag::POWER_MODE_HEALTHY_NO_BOOSTER])
        .prepare(Sequence::new().send_typed(DataType::SET_MAX_RETURN_PACKET_SIZE, &[0x01, 0x00]))
}

/// Panel descriptor
pub fn descriptor() -> PanelDescriptor {
    PanelDescriptor {
        name: "hx8394",
        lcd_id: LCD_ID,
        width: 720,
        height: 1280,
        mode: LcdMode::Dsi,
        bus: BusInfo::Mipi(MIPI),
        reset: RESET,
        config: PanelConfig::new(),
        ops: Box::new(
            ScriptedPanel::new(init(), IdCheck::Probe(id_probe()))
                .sleep(super::dcs_sleep_in(), super::dcs_sleep_out())
                .esd(esd_probe()),
        ),
    }
}
