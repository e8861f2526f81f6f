//! Panel identification by register read-back
//!
//! The probe runs a vendor unlock script, reads one or more ID registers and
//! compares the bytes against the panel's signature. It gives up after a
//! fixed number of attempts. A bus error or a short read is treated the
//! same as reading the wrong bytes.
//!
//! On a match the probe reports the panel's logical ID. That value is picked
//! by the panel model and is not necessarily the bytes that were read, a
//! panel answering `40 00 02` may well report `0x400002` or `0x8009`.
use display_interface::DisplayError;

use crate::config::PanelConfig;
use crate::interface::Transport;
use crate::sequence::{self, Sequence};

/// `read_id` result of a panel that could not be identified
pub const UNIDENTIFIED: u32 = 0;

/// Accepted values for one byte of an ID read-back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteMatch {
    /// Offset in the read buffer
    pub offset: usize,
    /// Any of these values matches, several for multi-revision panels
    pub accept: Vec<u8>,
}

/// Expected ID read-back
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    bytes: Vec<ByteMatch>,
}

impl Signature {
    /// Empty signature; an empty signature never matches
    pub fn new() -> Self {
        Signature { bytes: Vec::new() }
    }

    /// Every byte of `bytes` must match, starting at offset 0
    pub fn exact(bytes: &[u8]) -> Self {
        bytes
            .iter()
            .enumerate()
            .fold(Self::new(), |sig, (offset, b)| sig.byte(offset, *b))
    }

    /// Require `value` at `offset`
    pub fn byte(self, offset: usize, value: u8) -> Self {
        self.any_of(offset, &[value])
    }

    /// Accept any of `values` at `offset`
    pub fn any_of(mut self, offset: usize, values: &[u8]) -> Self {
        self.bytes.push(ByteMatch {
            offset,
            accept: values.to_vec(),
        });
        self
    }

    /// Compare a read buffer against the signature
    pub fn matches(&self, buf: &[u8]) -> bool {
        !self.bytes.is_empty()
            && self.bytes.iter().all(|m| {
                buf.get(m.offset)
                    .is_some_and(|b| m.accept.contains(b))
            })
    }
}

/// One register read of an ID probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRead {
    /// Register to read
    pub reg: u8,
    /// Bytes to read
    pub len: usize,
}

/// How a panel model is identified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdCheck {
    /// No read-back, the panel always reports this ID
    Fixed(u32),
    /// Read-back probe
    Probe(IdProbe),
}

/// Read-back identification recipe of one panel model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdProbe {
    /// Logical ID reported on a match
    pub id: u32,
    /// Script run before every read attempt
    pub unlock: Sequence,
    /// Registers read per attempt, their bytes are laid out back to back
    pub reads: Vec<IdRead>,
    /// Expected bytes
    pub signature: Signature,
    /// Turn EOTP off around the reads
    pub toggle_eotp: bool,
}

impl IdProbe {
    /// Probe reporting `id` when the read-back matches `signature`
    pub fn new(id: u32, signature: Signature) -> Self {
        IdProbe {
            id,
            unlock: Sequence::new(),
            reads: Vec::new(),
            signature,
            toggle_eotp: false,
        }
    }

    /// Script run before each attempt
    pub fn unlock(mut self, seq: Sequence) -> Self {
        self.unlock = seq;
        self
    }

    /// Add a register read
    pub fn read(mut self, reg: u8, len: usize) -> Self {
        self.reads.push(IdRead { reg, len });
        self
    }

    /// Disable EOTP for the duration of the probe
    pub fn toggle_eotp(mut self) -> Self {
        self.toggle_eotp = true;
        self
    }

    /// Total bytes read per attempt
    pub fn read_len(&self) -> usize {
        self.reads.iter().map(|r| r.len).sum()
    }
}

fn read_all(transport: &mut Transport, reads: &[IdRead], buf: &mut [u8]) -> bool {
    let mut rest = buf;
    for r in reads {
        let n = r.len.min(rest.len());
        let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(n);
        match transport.read_register(r.reg, chunk) {
            Ok(got) if got >= chunk.len() => {}
            Ok(got) => {
                log::warn!(
                    "short read of register 0x{:02X}: {} of {} bytes",
                    r.reg,
                    got,
                    chunk.len()
                );
                return false;
            }
            Err(e) => {
                log::warn!("read of register 0x{:02X} failed: {:?}", r.reg, e);
                return false;
            }
        }
        rest = tail;
    }
    true
}

/// Run `probe` against the panel on `transport`.
///
/// Returns the probe's logical ID on the first matching attempt, `None`
/// after `config.retries` attempts without a match.
pub fn read_id(transport: &mut Transport, probe: &IdProbe, config: &PanelConfig) -> Option<u32> {
    if let Err(e) = transport.set_cmd_mode() {
        log::warn!("could not switch to command mode: {:?}", e);
    }
    if probe.toggle_eotp {
        if let Err(e) = transport.eotp_set(false, false) {
            log::warn!("could not disable EOTP: {:?}", e);
        }
    }

    let mut buf = vec![0u8; probe.read_len()];
    let mut found = None;
    for attempt in 1..=config.retries {
        sequence::run(&probe.unlock, transport, config);
        buf.fill(0);
        if read_all(transport, &probe.reads, &mut buf) && probe.signature.matches(&buf) {
            log::info!(
                "panel 0x{:06X} identified on attempt {} ({:02X?})",
                probe.id,
                attempt,
                buf
            );
            found = Some(probe.id);
            break;
        }
        log::debug!(
            "id attempt {}/{} for 0x{:06X}: read {:02X?}",
            attempt,
            config.retries,
            probe.id,
            buf
        );
    }

    if probe.toggle_eotp {
        if let Err(e) = transport.eotp_set(true, true) {
            log::warn!("could not restore EOTP: {:?}", e);
        }
    }
    if found.is_none() {
        log::error!(
            "panel 0x{:06X} not identified after {} attempts",
            probe.id,
            config.retries
        );
    }
    found
}

/// Compose an ID from one byte of each of three registers: `r0 << 16 | r1 << 8 | r2`
pub fn compose_id(transport: &mut Transport, regs: [u8; 3]) -> Result<u32, DisplayError> {
    regs.iter().try_fold(0u32, |id, reg| {
        let mut byte = [0u8; 1];
        if transport.read_register(*reg, &mut byte)? == 0 {
            log::warn!("register 0x{:02X} returned no data", reg);
            return Err(DisplayError::BusWriteError);
        }
        Ok((id << 8) | u32::from(byte[0]))
    })
}

/// A register byte that did not read back as expected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    /// Register read
    pub reg: u8,
    /// Offset within the read-back
    pub offset: usize,
    /// Expected byte
    pub expected: u8,
    /// Byte read, `None` if the read failed or stopped short of it
    pub found: Option<u8>,
}

/// Read back every `(register, expected bytes)` row and report differences
pub fn verify_registers(
    transport: &mut Transport,
    table: &[(u8, &[u8])],
) -> Result<(), Vec<Mismatch>> {
    let mut mismatches = Vec::new();
    for (reg, expected) in table {
        let mut buf = vec![0u8; expected.len()];
        let received = transport.read_register(*reg, &mut buf).unwrap_or(0);
        for (offset, (want, got)) in expected.iter().zip(buf.iter()).enumerate() {
            let found = (offset < received).then_some(*got);
            if found != Some(*want) {
                log::warn!(
                    "[{:02X}h] byte {}: expected 0x{:02X}, read {:02X?}",
                    reg,
                    offset,
                    want,
                    found
                );
                mismatches.push(Mismatch {
                    reg: *reg,
                    offset,
                    expected: *want,
                    found,
                });
            }
        }
    }
    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(mismatches)
    }
}
