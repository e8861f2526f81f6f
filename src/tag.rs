//! 32-bit tagged instruction headers
//!
//! The legacy panel tables store every step as a `u32` tag followed by a
//! payload buffer. The top byte holds the opcode bits, the low 24 bits the
//! payload length (`SEND`) or a delay in milliseconds (`SLEEP`).
//!
//! Some tables use a typed layout on top of that: bits 16..23 of a `SEND`
//! tag carry the MIPI data type used for a forced write and only bits 0..15
//! are the length. Which layout a table uses is stated by the table, see
//! [`TagFormat`].
use thiserror::Error;

/// Opcode bit for a bus write
pub const SEND: u8 = 1 << 0;
/// Opcode bit for a delay
pub const SLEEP: u8 = 1 << 1;

/// Position of the opcode byte
pub const TAG_SHIFT: u32 = 24;
/// Mask of the length / delay field
pub const TAG_MASK: u32 = (1 << TAG_SHIFT) - 1;

const TYPE_SHIFT: u32 = 16;
const TYPED_LEN_MASK: u32 = (1 << TYPE_SHIFT) - 1;

/// Decoded opcode of a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// Write the following payload to the bus
    Send,
    /// Block for the encoded number of milliseconds
    Sleep,
    /// Neither opcode bit set, the interpreter skips these
    Unknown(u8),
}

/// Layout of the low 24 bits of a `SEND` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagFormat {
    /// 24-bit length
    #[default]
    Plain,
    /// Data type in bits 16..23, 16-bit length
    Typed,
}

/// Values that cannot be represented in a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TagError {
    /// Length or delay does not fit the field
    #[error("value {value} does not fit in a {bits}-bit tag field")]
    FieldOverflow {
        /// Rejected value
        value: u32,
        /// Width of the field
        bits: u8,
    },

    /// A forced data type cannot be expressed in the plain layout
    #[error("data type 0x{0:02X} needs the typed tag layout")]
    DataTypeInPlainTag(u8),
}

fn check_field(value: u32, mask: u32, bits: u8) -> Result<u32, TagError> {
    if value & !mask != 0 {
        return Err(TagError::FieldOverflow { value, bits });
    }
    Ok(value)
}

/// Tag for a write of `len` payload bytes
pub fn encode_send(len: u32) -> Result<u32, TagError> {
    let len = check_field(len, TAG_MASK, 24)?;
    Ok((u32::from(SEND) << TAG_SHIFT) | len)
}

/// Tag for a write of `len` bytes forced with an explicit MIPI data type
pub fn encode_send_typed(data_type: u8, len: u32) -> Result<u32, TagError> {
    let len = check_field(len, TYPED_LEN_MASK, 16)?;
    Ok((u32::from(SEND) << TAG_SHIFT) | (u32::from(data_type) << TYPE_SHIFT) | len)
}

/// Tag for a delay of `ms` milliseconds
pub fn encode_sleep(ms: u32) -> Result<u32, TagError> {
    let ms = check_field(ms, TAG_MASK, 24)?;
    Ok((u32::from(SLEEP) << TAG_SHIFT) | ms)
}

/// Split a tag into opcode and its 24-bit value.
///
/// `SEND` is checked first, a tag with both bits set is a write.
pub fn decode(tag: u32) -> (Opcode, u32) {
    let op = (tag >> TAG_SHIFT) as u8;
    let value = tag & TAG_MASK;
    let opcode = if op & SEND != 0 {
        Opcode::Send
    } else if op & SLEEP != 0 {
        Opcode::Sleep
    } else {
        Opcode::Unknown(op)
    };
    (opcode, value)
}

/// Split a typed `SEND` tag into data type and length.
///
/// A zero data-type byte means the table did not request a forced write.
/// Returns `None` for tags that are not `SEND`.
pub fn decode_typed(tag: u32) -> Option<(Option<u8>, u32)> {
    match decode(tag) {
        (Opcode::Send, value) => {
            let data_type = (value >> TYPE_SHIFT) as u8;
            let len = value & TYPED_LEN_MASK;
            Some(((data_type != 0).then_some(data_type), len))
        }
        _ => None,
    }
}
