//! Registry and panel handle tests: probing, selection and the runtime hooks.
//!
//! Run with: cargo test --test registry

mod common;

use common::{bus_calls, calls, new_trace, reads, Call, StubMcu, StubMipi, StubSpi};
use sprdfb_panel::config::{BusInfo, MipiWorkMode};
use sprdfb_panel::esd::EsdProbe;
use sprdfb_panel::panels::{self, dummy, hx8394, ili9341, nt35516, s6e8aa0, st7789};
use sprdfb_panel::{
    BusKind, DeviceSlot, Direction, EsdStatus, IdCheck, PanelDescriptor, PanelError,
    PanelRegistry, ScriptedPanel, Sequence, Window, UNIDENTIFIED,
};

fn registry() -> PanelRegistry {
    let mut registry = PanelRegistry::new();
    panels::register_all(&mut registry).unwrap();
    registry
}

/// MIPI panel with a two-command init and a fixed ID
fn fixed_mipi_panel(id: u32, esd: Option<EsdProbe>) -> PanelDescriptor {
    let mut ops = ScriptedPanel::new(
        Sequence::new().send(&[0x11]).sleep(120).send(&[0x29]),
        IdCheck::Fixed(id),
    );
    if let Some(probe) = esd {
        ops = ops.esd(probe);
    }
    let mut desc = hx8394::descriptor();
    desc.name = "fixed";
    desc.lcd_id = id;
    desc.ops = Box::new(ops);
    desc
}

#[test]
fn every_model_registers() {
    let registry = registry();
    assert_eq!(registry.len(), 6);
    assert_eq!(registry.panels(DeviceSlot::Main).count(), 5);
    assert!(registry.get(DeviceSlot::Sub, st7789::LCD_ID).is_some());
    assert!(registry.get(DeviceSlot::Main, st7789::LCD_ID).is_none());
}

#[test]
fn probe_picks_the_first_answering_panel() {
    let registry = registry();
    let trace = new_trace();
    let transport = StubMipi::new(&trace).reply(0xF4, &[0x94]).into_transport();

    let panel = registry.probe(DeviceSlot::Main, transport).unwrap();

    assert_eq!(panel.descriptor().name, "hx8394");
    assert_eq!(reads(&trace), 1);
}

#[test]
fn probe_moves_on_after_a_silent_candidate() {
    let registry = registry();
    let trace = new_trace();
    let transport = StubMipi::new(&trace)
        .reply(0xC5, &[0x55, 0x16, 0x00])
        .into_transport();

    let panel = registry.probe(DeviceSlot::Main, transport).unwrap();

    assert_eq!(panel.descriptor().lcd_id, nt35516::LCD_ID);
    // four failed hx8394 attempts, then one nt35516 read
    assert_eq!(reads(&trace), 5);
}

#[test]
fn probe_accepts_any_listed_revision() {
    let registry = registry();
    let trace = new_trace();
    let transport = StubMipi::new(&trace)
        .reply(0x04, &[0x40, 0x00, 0x05])
        .into_transport();

    let panel = registry.probe(DeviceSlot::Main, transport).unwrap();

    assert_eq!(panel.descriptor().lcd_id, s6e8aa0::LCD_ID);
}

#[test]
fn probe_fails_when_nothing_answers() {
    let registry = registry();
    let trace = new_trace();
    let transport = StubMipi::new(&trace).into_transport();

    let result = registry.probe(DeviceSlot::Main, transport);

    assert!(matches!(
        result.err(),
        Some(PanelError::NotDetected(DeviceSlot::Main))
    ));
}

#[test]
fn probe_only_asks_panels_on_the_transport_bus() {
    let registry = registry();
    let trace = new_trace();
    let transport = StubMcu::new(&trace)
        .reply(0xD3, &[0x00, 0x00, 0x93, 0x41])
        .into_transport();

    let panel = registry.probe(DeviceSlot::Main, transport).unwrap();

    assert_eq!(panel.descriptor().lcd_id, ili9341::LCD_ID);
    assert_eq!(bus_calls(&trace)[0], Call::McuCmd(0xD3));
}

#[test]
fn dummy_panel_catches_an_empty_mcu_bus() {
    let registry = registry();
    let trace = new_trace();
    let transport = StubMcu::new(&trace).into_transport();

    let panel = registry.probe(DeviceSlot::Main, transport).unwrap();

    assert_eq!(panel.descriptor().lcd_id, dummy::LCD_ID);
}

#[test]
fn sub_slot_has_its_own_panels() {
    let registry = registry();
    let trace = new_trace();
    let transport = StubSpi::new(&trace)
        .reply(0x04, &[0x85, 0x85, 0x52])
        .into_transport();

    let panel = registry.probe(DeviceSlot::Sub, transport).unwrap();

    assert_eq!(panel.descriptor().name, "st7789");
}

#[test]
fn duplicate_ids_are_rejected_per_slot() {
    let mut registry = PanelRegistry::new();
    registry.register(DeviceSlot::Main, hx8394::descriptor()).unwrap();

    assert!(matches!(
        registry.register(DeviceSlot::Main, hx8394::descriptor()),
        Err(PanelError::DuplicatePanel {
            slot: DeviceSlot::Main,
            id: hx8394::LCD_ID
        })
    ));
    assert!(registry.register(DeviceSlot::Sub, hx8394::descriptor()).is_ok());
}

#[test]
fn scripts_larger_than_the_payload_capacity_are_rejected() {
    let mut desc = hx8394::descriptor();
    desc.config = desc.config.max_payload(8);

    let err = PanelRegistry::new()
        .register(DeviceSlot::Main, desc)
        .unwrap_err();

    assert!(matches!(
        err,
        PanelError::PayloadTooLarge {
            name: "hx8394",
            len: 13,
            capacity: 8
        }
    ));
}

#[test]
fn select_unknown_id_fails() {
    let registry = registry();
    let trace = new_trace();

    let result = registry.select(DeviceSlot::Main, 0x1234, StubMipi::new(&trace).into_transport());

    assert!(matches!(
        result.err(),
        Some(PanelError::UnknownPanel {
            slot: DeviceSlot::Main,
            id: 0x1234
        })
    ));
}

#[test]
fn select_rejects_a_transport_on_the_wrong_bus() {
    let registry = registry();
    let trace = new_trace();

    let result = registry.select(
        DeviceSlot::Main,
        hx8394::LCD_ID,
        StubSpi::new(&trace).into_transport(),
    );

    assert!(matches!(
        result.err(),
        Some(PanelError::BusMismatch {
            expected: BusKind::Mipi,
            found: BusKind::Spi
        })
    ));
}

#[test]
fn init_switches_to_command_mode_then_plays_the_script() {
    let mut registry = PanelRegistry::new();
    registry.register(DeviceSlot::Main, fixed_mipi_panel(0x42, None)).unwrap();
    let trace = new_trace();

    let mut panel = registry
        .select(DeviceSlot::Main, 0x42, StubMipi::new(&trace).into_transport())
        .unwrap();
    panel.init().unwrap();

    assert_eq!(
        calls(&trace),
        vec![
            Call::CmdMode,
            Call::GenWrite(vec![0x11]),
            Call::DelayMs(120),
            Call::GenWrite(vec![0x29]),
            Call::VideoMode,
        ]
    );
}

#[test]
fn command_mode_panel_stays_in_command_mode_after_init() {
    let mut registry = PanelRegistry::new();
    let mut desc = fixed_mipi_panel(0x42, None);
    if let BusInfo::Mipi(info) = &mut desc.bus {
        info.work_mode = MipiWorkMode::Command;
    }
    registry.register(DeviceSlot::Main, desc).unwrap();
    let trace = new_trace();

    let mut panel = registry
        .select(DeviceSlot::Main, 0x42, StubMipi::new(&trace).into_transport())
        .unwrap();
    panel.init().unwrap();

    let trace = calls(&trace);
    assert!(!trace.contains(&Call::VideoMode));
    assert_eq!(trace.last(), Some(&Call::GenWrite(vec![0x29])));
}

#[test]
fn sleep_in_and_out_play_their_scripts() {
    let registry = registry();
    let trace = new_trace();
    let mut panel = registry
        .select(DeviceSlot::Main, hx8394::LCD_ID, StubMipi::new(&trace).into_transport())
        .unwrap();

    panel.enter_sleep(true).unwrap();
    panel.enter_sleep(false).unwrap();

    assert_eq!(
        bus_calls(&trace),
        vec![
            Call::GenWrite(vec![0x28]),
            Call::GenWrite(vec![0x10]),
            Call::GenWrite(vec![0x11]),
            Call::GenWrite(vec![0x29]),
        ]
    );
}

#[test]
fn unanswered_probe_reads_as_unidentified() {
    let registry = registry();
    let trace = new_trace();
    let mut panel = registry
        .select(DeviceSlot::Main, hx8394::LCD_ID, StubMipi::new(&trace).into_transport())
        .unwrap();

    assert_eq!(panel.read_id(), UNIDENTIFIED);
}

#[test]
fn healthy_panel_is_left_alone() {
    let mut registry = PanelRegistry::new();
    registry
        .register(DeviceSlot::Main, fixed_mipi_panel(0x42, Some(EsdProbe::new())))
        .unwrap();
    let trace = new_trace();
    let transport = StubMipi::new(&trace).reply(0x0A, &[0x9C]).into_transport();
    let mut panel = registry.select(DeviceSlot::Main, 0x42, transport).unwrap();

    assert_eq!(panel.check_and_recover().unwrap(), EsdStatus::Healthy);
    assert!(!calls(&trace).contains(&Call::GenWrite(vec![0x11])));
}

#[test]
fn failed_esd_check_reinitializes_the_panel() {
    let mut registry = PanelRegistry::new();
    registry
        .register(DeviceSlot::Main, fixed_mipi_panel(0x42, Some(EsdProbe::new())))
        .unwrap();
    let trace = new_trace();
    let transport = StubMipi::new(&trace).reply(0x0A, &[0x08]).into_transport();
    let mut panel = registry.select(DeviceSlot::Main, 0x42, transport).unwrap();

    assert_eq!(panel.check_and_recover().unwrap(), EsdStatus::Recovered);
    assert_eq!(reads(&trace), 4);
    let trace = calls(&trace);
    assert_eq!(
        trace[trace.len() - 3..],
        [Call::DelayMs(120), Call::GenWrite(vec![0x29]), Call::VideoMode]
    );
}

#[test]
fn video_panel_streams_again_after_recovery() {
    let mut registry = PanelRegistry::new();
    registry.register(DeviceSlot::Main, hx8394::descriptor()).unwrap();
    let trace = new_trace();
    let transport = StubMipi::new(&trace).reply(0x0A, &[0x00]).into_transport();
    let mut panel = registry
        .select(DeviceSlot::Main, hx8394::LCD_ID, transport)
        .unwrap();

    assert_eq!(panel.check_and_recover().unwrap(), EsdStatus::Recovered);
    let trace = calls(&trace);
    assert!(trace.contains(&Call::CmdMode));
    assert_eq!(trace.last(), Some(&Call::VideoMode));
}

#[test]
fn panel_without_esd_probe_is_always_healthy() {
    let mut registry = PanelRegistry::new();
    registry.register(DeviceSlot::Main, fixed_mipi_panel(0x42, None)).unwrap();
    let trace = new_trace();
    let mut panel = registry
        .select(DeviceSlot::Main, 0x42, StubMipi::new(&trace).into_transport())
        .unwrap();

    assert!(panel.esd_check());
    assert!(calls(&trace).is_empty());
}

#[test]
fn invalidate_rect_addresses_the_frame_memory() {
    let registry = registry();
    let trace = new_trace();
    let mut panel = registry
        .select(DeviceSlot::Main, ili9341::LCD_ID, StubMcu::new(&trace).into_transport())
        .unwrap();

    panel.invalidate_rect(Window::new(16, 300, 239, 319)).unwrap();

    assert_eq!(
        calls(&trace),
        vec![
            Call::McuCmd(0x2A),
            Call::McuData(0x00),
            Call::McuData(0x10),
            Call::McuData(0x00),
            Call::McuData(0xEF),
            Call::McuCmd(0x2B),
            Call::McuData(0x01),
            Call::McuData(0x2C),
            Call::McuData(0x01),
            Call::McuData(0x3F),
            Call::McuCmd(0x2C),
        ]
    );
}

#[test]
fn window_outside_the_panel_never_reaches_the_bus() {
    let registry = registry();
    let trace = new_trace();
    let mut panel = registry
        .select(DeviceSlot::Main, ili9341::LCD_ID, StubMcu::new(&trace).into_transport())
        .unwrap();

    let err = panel.set_window(Window::new(0, 0, 240, 320)).unwrap_err();

    assert!(matches!(err, PanelError::OutOfBounds { width: 240, height: 320, .. }));
    assert!(calls(&trace).is_empty());
}

#[test]
fn set_direction_writes_the_address_mode() {
    let registry = registry();
    let trace = new_trace();
    let mut panel = registry
        .select(DeviceSlot::Main, ili9341::LCD_ID, StubMcu::new(&trace).into_transport())
        .unwrap();

    panel.set_direction(Direction::Rot180).unwrap();

    assert_eq!(calls(&trace), vec![Call::McuCmdData(0x36, 0xC8)]);
}

#[test]
fn optional_hooks_are_no_ops_on_plain_panels() {
    let registry = registry();
    let trace = new_trace();
    let mut panel = registry
        .select(DeviceSlot::Main, hx8394::LCD_ID, StubMipi::new(&trace).into_transport())
        .unwrap();

    panel.invalidate().unwrap();
    panel.set_direction(Direction::MirrorH).unwrap();
    panel.set_brightness(0x80).unwrap();
    panel.pwr_ctrl(false).unwrap();

    assert!(calls(&trace).is_empty());
}

#[test]
fn oled_brightness_is_a_dcs_write() {
    let registry = registry();
    let trace = new_trace();
    let mut panel = registry
        .select(DeviceSlot::Main, s6e8aa0::LCD_ID, StubMipi::new(&trace).into_transport())
        .unwrap();

    panel.set_brightness(0x7F).unwrap();

    assert_eq!(calls(&trace), vec![Call::DcsWrite(vec![0x51, 0x7F])]);
}

#[test]
fn released_transport_can_be_probed_again() {
    let registry = registry();
    let trace = new_trace();
    let panel = registry
        .select(DeviceSlot::Main, hx8394::LCD_ID, StubMipi::new(&trace).into_transport())
        .unwrap();

    let transport = panel.release();

    assert_eq!(transport.kind(), BusKind::Mipi);
}
