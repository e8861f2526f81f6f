//! Probe, initialize and ESD-check a panel over a simulated DSI host.
//!
//! The simulated controller answers like an HX8394 module: its ID register
//! reads back `0x94` and the power mode register reports a healthy panel
//! once the sleep-out command arrived. Halfway through, the status register
//! is corrupted to show the recovery path.
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Context;
use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use sprdfb_panel::{
    panels, Cmd, DeviceSlot, EsdStatus, Flag, MipiOps, PanelRegistry, Transport, Window,
};

/// Register file shared between the simulated host and `main`
type Registers = Rc<RefCell<HashMap<u8, Vec<u8>>>>;

struct SimulatedDsi {
    registers: Registers,
}

impl SimulatedDsi {
    fn write(&mut self, kind: &str, buf: &[u8]) -> Result<(), DisplayError> {
        log::trace!("{} write {:02X?}", kind, buf);
        let mut regs = self.registers.borrow_mut();
        match buf.first().copied() {
            Some(Cmd::SLEEP_OUT) => {
                regs.insert(Cmd::READ_POWER_MODE, vec![Flag::POWER_MODE_HEALTHY_NO_BOOSTER]);
            }
            Some(Cmd::SLEEP_IN) => {
                regs.insert(Cmd::READ_POWER_MODE, vec![Flag::NORMAL_MODE_ON]);
            }
            _ => {}
        }
        Ok(())
    }
}

impl MipiOps for SimulatedDsi {
    fn set_cmd_mode(&mut self) -> Result<(), DisplayError> {
        log::trace!("cmd mode");
        Ok(())
    }

    fn set_video_mode(&mut self) -> Result<(), DisplayError> {
        log::trace!("video mode");
        Ok(())
    }

    fn set_lp_mode(&mut self) -> Result<(), DisplayError> {
        log::trace!("lp mode");
        Ok(())
    }

    fn set_hs_mode(&mut self) -> Result<(), DisplayError> {
        log::trace!("hs mode");
        Ok(())
    }

    fn gen_write(&mut self, buf: &[u8]) -> Result<(), DisplayError> {
        self.write("generic", buf)
    }

    fn dcs_write(&mut self, buf: &[u8]) -> Result<(), DisplayError> {
        self.write("dcs", buf)
    }

    fn force_write(&mut self, data_type: u8, buf: &[u8]) -> Result<(), DisplayError> {
        log::trace!("forced write, data type 0x{:02X}", data_type);
        self.write("forced", buf)
    }

    fn force_read(&mut self, reg: u8, out: &mut [u8]) -> Result<usize, DisplayError> {
        let regs = self.registers.borrow();
        let value = regs.get(&reg).ok_or(DisplayError::BusWriteError)?;
        let n = value.len().min(out.len());
        out[..n].copy_from_slice(&value[..n]);
        log::trace!("read [{:02X}h] -> {:02X?}", reg, &out[..n]);
        Ok(n)
    }

    fn eotp_set(&mut self, rx_enable: bool, tx_enable: bool) -> Result<(), DisplayError> {
        log::trace!("eotp rx={} tx={}", rx_enable, tx_enable);
        Ok(())
    }
}

/// Blocking delay on the host thread
struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

fn main() -> anyhow::Result<()> {
    // also bridges `log` records from the library
    FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .try_init()
        .map_err(|e| anyhow::anyhow!("setting default subscriber failed: {e}"))?;

    let registers: Registers = Rc::new(RefCell::new(HashMap::from([
        (0xF4, vec![0x94]),
        (Cmd::READ_POWER_MODE, vec![Flag::NORMAL_MODE_ON]),
    ])));

    let mut registry = PanelRegistry::new();
    panels::register_all(&mut registry).context("building the panel table")?;
    log::info!("{} panel models registered", registry.len());

    let transport = Transport::mipi(
        SimulatedDsi {
            registers: Rc::clone(&registers),
        },
        StdDelay,
    );
    let mut panel = registry
        .probe(DeviceSlot::Main, transport)
        .context("probing the main display")?;
    let desc = panel.descriptor();
    log::info!("{}: {}x{} {:?}", desc.name, desc.width, desc.height, desc.mode);

    panel.init()?;
    panel.invalidate_rect(Window::full(desc.width, desc.height))?;

    let status = panel.check_and_recover()?;
    log::info!("esd check after init: {:?}", status);

    // glitch: status register falls back to a sleeping panel
    registers
        .borrow_mut()
        .insert(Cmd::READ_POWER_MODE, vec![Flag::NORMAL_MODE_ON]);
    let status = panel.check_and_recover()?;
    anyhow::ensure!(status == EsdStatus::Recovered, "glitch went unnoticed");
    log::info!("esd check after glitch: {:?}", status);

    panel.enter_sleep(true)?;
    panel.enter_sleep(false)?;
    anyhow::ensure!(panel.esd_check(), "panel unhealthy after sleep out");

    log::info!("done");
    Ok(())
}
