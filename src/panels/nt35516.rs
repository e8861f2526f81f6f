//! Novatek NT35516 540x960 MIPI command-mode panel
//!
//! The controller needs a short gap after every packet while its manufacturer
//! pages are open, hence the inter-command delay.
use crate::cmd::{Cmd, DataType};
use crate::config::{
    BusInfo, LcdMode, MipiInfo, MipiWorkMode, PanelConfig, Polarity, ResetTiming, VideoTiming,
};
use crate::descriptor::{PanelDescriptor, ScriptedPanel};
use crate::esd::EsdProbe;
use crate::identify::{IdCheck, IdProbe, Signature};
use crate::interface::MipiWriteMode;
use crate::sequence::Sequence;

/// Logical ID
pub const LCD_ID: u32 = 0x16;

/// Payload buffer size of the vendor command tables
pub const MAX_DATA: usize = 48;

const PAGE1: [u8; 6] = [0xF0, 0x55, 0xAA, 0x52, 0x08, 0x01];
const PAGE0: [u8; 6] = [0xF0, 0x55, 0xAA, 0x52, 0x08, 0x00];

const MIPI: MipiInfo = MipiInfo {
    work_mode: MipiWorkMode::Command,
    video_bus_width: 24,
    lanes: 2,
    phy_freq_khz: 350_000,
    h_sync_pol: Polarity::Positive,
    v_sync_pol: Polarity::Positive,
    de_pol: Polarity::Positive,
    te_pol: Polarity::Positive,
    timing: VideoTiming {
        hfp: 16,
        hbp: 16,
        hsync: 4,
        vfp: 8,
        vbp: 8,
        vsync: 2,
    },
};

fn init() -> Sequence {
    Sequence::new()
        .send(&PAGE1)
        .send(&[0xB0, 0x0A, 0x0A, 0x0A])
        .send(&[0xB6, 0x44, 0x44, 0x44])
        .send(&[0xB1, 0x0A, 0x0A, 0x0A])
        .send(&[0xB7, 0x34, 0x34, 0x34])
        .send(&[0xBC, 0x00, 0xA0, 0x00])
        .send(&[0xBD, 0x00, 0xA0, 0x00])
        .send(&PAGE0)
        .send(&[0xB1, 0x4C, 0x04])
        .send(&[Cmd::SET_TEAR_ON, 0x00])
        .send(&[Cmd::SLEEP_OUT])
        .sleep(120)
        .send(&[Cmd::DISPLAY_ON])
        .sleep(20)
}

fn id_probe() -> IdProbe {
    IdProbe::new(LCD_ID, Signature::new().byte(1, 0x16))
        .unlock(
            Sequence::new()
                .send(&PAGE1)
                .send_typed(DataType::SET_MAX_RETURN_PACKET_SIZE, &[0x03, 0x00]),
        )
        .read(0xC5, 3)
}

fn esd_probe() -> EsdProbe {
    EsdProbe::new()
        .prepare(Sequence::new().send_typed(DataType::SET_MAX_RETURN_PACKET_SIZE, &[0x01, 0x00]))
}

/// Panel descriptor
pub fn descriptor() -> PanelDescriptor {
    PanelDescriptor {
        name: "nt35516",
        lcd_id: LCD_ID,
        width: 540,
        height: 960,
        mode: LcdMode::Dsi,
        bus: BusInfo::Mipi(MIPI),
        reset: ResetTiming {
            high_ms: 20,
            low_ms: 20,
            settle_ms: 120,
        },
        config: PanelConfig::new()
            .inter_cmd_delay_us(20)
            .max_payload(MAX_DATA)
            .write_mode(MipiWriteMode::Generic),
        ops: Box::new(
            ScriptedPanel::new(init(), IdCheck::Probe(id_probe()))
                .sleep(super::dcs_sleep_in(), super::dcs_sleep_out())
                .esd(esd_probe()),
        ),
    }
}
