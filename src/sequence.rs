//! Panel command scripts and the interpreter that plays them
//!
//! A [`Sequence`] is an ordered list of bus writes and delays. Panel models
//! build theirs once when they are registered and never change them.
//! [`run`] walks a sequence start to end against a [`Transport`].
use thiserror::Error;

use crate::config::PanelConfig;
use crate::interface::Transport;
use crate::tag::{self, Opcode, TagFormat};

/// One step of a panel script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Write `payload` to the bus; the first byte is the register/command
    Send {
        /// Forced MIPI data type, `None` uses the panel's write mode
        data_type: Option<u8>,
        /// Command byte followed by its parameters
        payload: Vec<u8>,
    },
    /// Block for `ms` milliseconds
    Sleep {
        /// Delay in milliseconds
        ms: u32,
    },
}

/// Legacy table rows that cannot be turned into instructions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// A `SEND` declares more bytes than the payload buffer holds
    #[error("step {index}: SEND of {len} bytes exceeds the {capacity}-byte payload buffer")]
    PayloadOverflow {
        /// Row in the table
        index: usize,
        /// Declared length
        len: usize,
        /// Available bytes
        capacity: usize,
    },
}

/// Ordered panel script
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    steps: Vec<Instruction>,
}

impl Sequence {
    /// Empty script
    pub fn new() -> Self {
        Sequence { steps: Vec::new() }
    }

    /// Append a write using the panel's default packet type
    pub fn send(mut self, payload: &[u8]) -> Self {
        self.steps.push(Instruction::Send {
            data_type: None,
            payload: payload.to_vec(),
        });
        self
    }

    /// Append a write forced to a MIPI data type
    pub fn send_typed(mut self, data_type: u8, payload: &[u8]) -> Self {
        self.steps.push(Instruction::Send {
            data_type: Some(data_type),
            payload: payload.to_vec(),
        });
        self
    }

    /// Append a delay
    pub fn sleep(mut self, ms: u32) -> Self {
        self.steps.push(Instruction::Sleep { ms });
        self
    }

    /// Decode a legacy `(tag, payload buffer)` table.
    ///
    /// `capacity` is the size of the payload buffer each row was declared
    /// with. A `SEND` longer than the capacity or than the bytes actually
    /// supplied is rejected instead of being read past. Rows with an unknown
    /// opcode are dropped.
    pub fn from_tagged(
        table: &[(u32, &[u8])],
        format: TagFormat,
        capacity: usize,
    ) -> Result<Self, SequenceError> {
        let mut steps = Vec::with_capacity(table.len());
        for (index, (raw, buf)) in table.iter().enumerate() {
            let (opcode, value) = tag::decode(*raw);
            match opcode {
                Opcode::Send => {
                    let (data_type, len) = match format {
                        TagFormat::Typed => tag::decode_typed(*raw).unwrap_or((None, value)),
                        TagFormat::Plain => (None, value),
                    };
                    let len = len as usize;
                    if len > capacity || len > buf.len() {
                        return Err(SequenceError::PayloadOverflow {
                            index,
                            len,
                            capacity: capacity.min(buf.len()),
                        });
                    }
                    steps.push(Instruction::Send {
                        data_type,
                        payload: buf.get(..len).unwrap_or_default().to_vec(),
                    });
                }
                Opcode::Sleep => steps.push(Instruction::Sleep { ms: value }),
                Opcode::Unknown(op) => {
                    log::debug!("step {}: skipping unknown opcode 0x{:02X}", index, op);
                }
            }
        }
        Ok(Sequence { steps })
    }

    /// Encode back into legacy tags, one `(tag, payload)` row per step.
    ///
    /// Typed steps need [`TagFormat::Typed`]; in that layout every length is
    /// limited to 16 bits.
    pub fn to_tagged(&self, format: TagFormat) -> Result<Vec<(u32, Vec<u8>)>, tag::TagError> {
        self.steps
            .iter()
            .map(|step| match step {
                Instruction::Send { data_type, payload } => {
                    let len = payload.len() as u32;
                    let raw = match (format, data_type) {
                        (TagFormat::Typed, dt) => tag::encode_send_typed(dt.unwrap_or(0), len)?,
                        (TagFormat::Plain, Some(dt)) => {
                            return Err(tag::TagError::DataTypeInPlainTag(*dt))
                        }
                        (TagFormat::Plain, None) => tag::encode_send(len)?,
                    };
                    Ok((raw, payload.clone()))
                }
                Instruction::Sleep { ms } => Ok((tag::encode_sleep(*ms)?, Vec::new())),
            })
            .collect()
    }

    /// Steps in order
    pub fn steps(&self) -> &[Instruction] {
        &self.steps
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if there are no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Longest `SEND` payload in the script
    pub fn max_payload(&self) -> usize {
        self.steps
            .iter()
            .filter_map(|step| match step {
                Instruction::Send { payload, .. } => Some(payload.len()),
                Instruction::Sleep { .. } => None,
            })
            .max()
            .unwrap_or(0)
    }
}

/// Play `seq` on `transport`.
///
/// Every `SEND` is one transport write, followed by the panel's
/// inter-command delay when it has one. Every `SLEEP` is one blocking
/// delay. Bus errors are logged and the script carries on, the display
/// driver finds out through the ESD check.
pub fn run(seq: &Sequence, transport: &mut Transport, config: &PanelConfig) {
    for (index, step) in seq.steps.iter().enumerate() {
        match step {
            Instruction::Send { data_type, payload } => {
                if let Err(e) = transport.write(*data_type, payload, config.write_mode) {
                    log::warn!(
                        "step {}: write of {} bytes (cmd 0x{:02X}) failed: {:?}",
                        index,
                        payload.len(),
                        payload.first().copied().unwrap_or_default(),
                        e
                    );
                }
                if config.inter_cmd_delay_us > 0 {
                    transport.delay_us(config.inter_cmd_delay_us);
                }
            }
            Instruction::Sleep { ms } => transport.sleep_ms(*ms),
        }
    }
}
