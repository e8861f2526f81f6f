//! Recording bus stubs shared by the integration tests.
//!
//! Every stub appends to one shared [`Trace`] so a test can assert on the
//! exact order of writes, reads and delays across the bus and the delay
//! provider. Reads are answered from per-register reply scripts: each read
//! consumes the next reply, the last one repeats once the script runs out.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;
use sprdfb_panel::{McuOps, MipiOps, SpiOps, Transport};

/// Everything a stub saw, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CmdMode,
    VideoMode,
    LpMode,
    HsMode,
    GenWrite(Vec<u8>),
    DcsWrite(Vec<u8>),
    ForceWrite(u8, Vec<u8>),
    Read(u8, usize),
    Eotp(bool, bool),
    SpiCmd(u32),
    SpiData(u32),
    SpiRead,
    McuCmd(u32),
    McuData(u32),
    McuCmdData(u32, u32),
    McuRead,
    DelayMs(u32),
    DelayUs(u32),
    DelayNs(u32),
}

pub type Trace = Rc<RefCell<Vec<Call>>>;

pub fn new_trace() -> Trace {
    Rc::new(RefCell::new(Vec::new()))
}

/// Snapshot of the trace
pub fn calls(trace: &Trace) -> Vec<Call> {
    trace.borrow().clone()
}

/// Number of register reads issued on any bus
pub fn reads(trace: &Trace) -> usize {
    trace
        .borrow()
        .iter()
        .filter(|c| matches!(c, Call::Read(..) | Call::SpiRead | Call::McuRead))
        .count()
}

/// Calls without the delays
pub fn bus_calls(trace: &Trace) -> Vec<Call> {
    trace
        .borrow()
        .iter()
        .filter(|c| !matches!(c, Call::DelayMs(_) | Call::DelayUs(_) | Call::DelayNs(_)))
        .cloned()
        .collect()
}

#[derive(Debug, Clone)]
enum Reply {
    Bytes(Vec<u8>),
    Fail,
}

#[derive(Debug, Default)]
struct Replies {
    scripts: HashMap<u8, VecDeque<Reply>>,
}

impl Replies {
    fn push(&mut self, reg: u8, reply: Reply) {
        self.scripts.entry(reg).or_default().push_back(reply);
    }

    fn next(&mut self, reg: u8) -> Reply {
        match self.scripts.get_mut(&reg) {
            Some(script) if script.len() > 1 => script.pop_front().unwrap_or(Reply::Fail),
            Some(script) => script.front().cloned().unwrap_or(Reply::Fail),
            None => Reply::Fail,
        }
    }
}

/// Delay provider that only records
pub struct RecordingDelay(pub Trace);

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(Call::DelayNs(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().push(Call::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().push(Call::DelayMs(ms));
    }
}

/// MIPI DSI host stub
pub struct StubMipi {
    trace: Trace,
    replies: Replies,
    fail_writes: bool,
}

impl StubMipi {
    pub fn new(trace: &Trace) -> Self {
        StubMipi {
            trace: Rc::clone(trace),
            replies: Replies::default(),
            fail_writes: false,
        }
    }

    /// Queue a read-back for `reg`
    pub fn reply(mut self, reg: u8, bytes: &[u8]) -> Self {
        self.replies.push(reg, Reply::Bytes(bytes.to_vec()));
        self
    }

    /// Queue a failing read of `reg`
    pub fn fail(mut self, reg: u8) -> Self {
        self.replies.push(reg, Reply::Fail);
        self
    }

    /// Every write returns an error (still recorded)
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn into_transport(self) -> Transport {
        let delay = RecordingDelay(Rc::clone(&self.trace));
        Transport::mipi(self, delay)
    }

    fn record(&self, call: Call) {
        self.trace.borrow_mut().push(call);
    }

    fn write_result(&self) -> Result<(), DisplayError> {
        if self.fail_writes {
            Err(DisplayError::BusWriteError)
        } else {
            Ok(())
        }
    }
}

impl MipiOps for StubMipi {
    fn set_cmd_mode(&mut self) -> Result<(), DisplayError> {
        self.record(Call::CmdMode);
        Ok(())
    }

    fn set_video_mode(&mut self) -> Result<(), DisplayError> {
        self.record(Call::VideoMode);
        Ok(())
    }

    fn set_lp_mode(&mut self) -> Result<(), DisplayError> {
        self.record(Call::LpMode);
        Ok(())
    }

    fn set_hs_mode(&mut self) -> Result<(), DisplayError> {
        self.record(Call::HsMode);
        Ok(())
    }

    fn gen_write(&mut self, buf: &[u8]) -> Result<(), DisplayError> {
        self.record(Call::GenWrite(buf.to_vec()));
        self.write_result()
    }

    fn dcs_write(&mut self, buf: &[u8]) -> Result<(), DisplayError> {
        self.record(Call::DcsWrite(buf.to_vec()));
        self.write_result()
    }

    fn force_write(&mut self, data_type: u8, buf: &[u8]) -> Result<(), DisplayError> {
        self.record(Call::ForceWrite(data_type, buf.to_vec()));
        self.write_result()
    }

    fn force_read(&mut self, reg: u8, out: &mut [u8]) -> Result<usize, DisplayError> {
        self.record(Call::Read(reg, out.len()));
        match self.replies.next(reg) {
            Reply::Bytes(bytes) => {
                let n = bytes.len().min(out.len());
                out[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
            Reply::Fail => Err(DisplayError::BusWriteError),
        }
    }

    fn eotp_set(&mut self, rx_enable: bool, tx_enable: bool) -> Result<(), DisplayError> {
        self.record(Call::Eotp(rx_enable, tx_enable));
        Ok(())
    }
}

/// Word-oriented read state shared by the SPI and MCU stubs: a command
/// selects the register, each read returns its next byte
#[derive(Debug, Default)]
struct WordReader {
    replies: Replies,
    pending: VecDeque<u8>,
    failing: bool,
}

impl WordReader {
    fn select(&mut self, reg: u32) {
        match self.replies.next(reg as u8) {
            Reply::Bytes(bytes) => {
                self.pending = bytes.into();
                self.failing = false;
            }
            Reply::Fail => {
                self.pending.clear();
                self.failing = true;
            }
        }
    }

    fn next(&mut self) -> Result<u32, DisplayError> {
        if self.failing {
            return Err(DisplayError::BusWriteError);
        }
        Ok(u32::from(self.pending.pop_front().unwrap_or(0)))
    }
}

/// SPI panel stub
pub struct StubSpi {
    trace: Trace,
    reader: WordReader,
}

impl StubSpi {
    pub fn new(trace: &Trace) -> Self {
        StubSpi {
            trace: Rc::clone(trace),
            reader: WordReader::default(),
        }
    }

    pub fn reply(mut self, reg: u8, bytes: &[u8]) -> Self {
        self.reader.replies.push(reg, Reply::Bytes(bytes.to_vec()));
        self
    }

    pub fn into_transport(self) -> Transport {
        let delay = RecordingDelay(Rc::clone(&self.trace));
        Transport::spi(self, delay)
    }
}

impl SpiOps for StubSpi {
    fn send_cmd(&mut self, cmd: u32) -> Result<(), DisplayError> {
        self.trace.borrow_mut().push(Call::SpiCmd(cmd));
        self.reader.select(cmd);
        Ok(())
    }

    fn send_data(&mut self, data: u32) -> Result<(), DisplayError> {
        self.trace.borrow_mut().push(Call::SpiData(data));
        Ok(())
    }

    fn read(&mut self, out: &mut u32) -> Result<(), DisplayError> {
        self.trace.borrow_mut().push(Call::SpiRead);
        *out = self.reader.next()?;
        Ok(())
    }
}

/// MCU parallel bus stub
pub struct StubMcu {
    trace: Trace,
    reader: WordReader,
}

impl StubMcu {
    pub fn new(trace: &Trace) -> Self {
        StubMcu {
            trace: Rc::clone(trace),
            reader: WordReader::default(),
        }
    }

    pub fn reply(mut self, reg: u8, bytes: &[u8]) -> Self {
        self.reader.replies.push(reg, Reply::Bytes(bytes.to_vec()));
        self
    }

    pub fn into_transport(self) -> Transport {
        let delay = RecordingDelay(Rc::clone(&self.trace));
        Transport::mcu(self, delay)
    }
}

impl McuOps for StubMcu {
    fn send_cmd(&mut self, cmd: u32) -> Result<(), DisplayError> {
        self.trace.borrow_mut().push(Call::McuCmd(cmd));
        self.reader.select(cmd);
        Ok(())
    }

    fn send_data(&mut self, data: u32) -> Result<(), DisplayError> {
        self.trace.borrow_mut().push(Call::McuData(data));
        Ok(())
    }

    fn send_cmd_data(&mut self, cmd: u32, data: u32) -> Result<(), DisplayError> {
        self.trace.borrow_mut().push(Call::McuCmdData(cmd, data));
        Ok(())
    }

    fn read_data(&mut self) -> Result<u32, DisplayError> {
        self.trace.borrow_mut().push(Call::McuRead);
        self.reader.next()
    }
}
