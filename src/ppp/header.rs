//! 主帧头：2 字节协议标签（大端）。
//!
//! ```text
//! ┌──────────────┬─────────────────────┐
//! │ Protocol tag │ payload ...         │
//! │ 2 bytes BE   │                     │
//! └──────────────┴─────────────────────┘
//! ```

use crate::error::{Error, Result};
use crate::net::Header;

pub const PPP_HEADER_SIZE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PppHeader {
    pub protocol: u16,
}

impl PppHeader {
    pub fn new(protocol: u16) -> Self {
        Self { protocol }
    }

    pub fn encode(&self) -> [u8; PPP_HEADER_SIZE] {
        self.protocol.to_be_bytes()
    }

    /// 解码协议标签，返回 (header, 消耗的字节数)。剩余 payload 不受影响。
    pub fn decode(buf: &[u8]) -> Result<(Self, usize)> {
        if buf.len() < PPP_HEADER_SIZE {
            return Err(Error::HeaderTooShort {
                required: PPP_HEADER_SIZE,
                actual: buf.len(),
            });
        }
        let protocol = u16::from_be_bytes([buf[0], buf[1]]);
        Ok((Self { protocol }, PPP_HEADER_SIZE))
    }
}

impl Header for PppHeader {
    fn serialized_size(&self) -> usize {
        PPP_HEADER_SIZE
    }

    fn serialize_into(&self, buf: &mut [u8]) {
        buf[..PPP_HEADER_SIZE].copy_from_slice(&self.encode());
    }

    fn deserialize(buf: &[u8]) -> Result<(Self, usize)> {
        Self::decode(buf)
    }
}
