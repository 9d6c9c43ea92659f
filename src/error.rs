//! Error types for the point-to-point link simulator.
//!
//! Only recoverable conditions live here. Contract violations (wrong
//! transmitter state, a channel without a peer for `remote()`, unmapped
//! protocol numbers on the device path) panic instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Buffer shorter than the header being decoded.
    #[error("header too short: need {required} bytes, got {actual}")]
    HeaderTooShort { required: usize, actual: usize },

    /// Auxiliary header does not start with `0xFE 0xEF`.
    #[error("bad header magic: expected {expected:02x?}, got {actual:02x?}")]
    BadMagic { expected: [u8; 2], actual: [u8; 2] },

    /// No mapping for a protocol number or wire tag.
    #[error("protocol {0:#06x} is not mapped")]
    UnexpectedProtocol(u16),

    /// Payload larger than the codec's fixed working buffer.
    #[error("input of {len} bytes exceeds codec limit of {max} bytes")]
    InputTooLarge { len: usize, max: usize },

    /// Caller-supplied output buffer cannot hold the result.
    #[error("output buffer too small: need {required} bytes, have {capacity}")]
    OutputBufferTooSmall { required: usize, capacity: usize },

    /// Compressed payload failed to decode.
    #[error("corrupt compressed payload: {0}")]
    CorruptPayload(&'static str),

    #[error("invalid data rate: {0:?}")]
    InvalidDataRate(String),

    #[error("invalid MAC-48 address: {0:?}")]
    InvalidAddress(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
