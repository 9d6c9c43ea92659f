//! 辅助消息头（6 字节）
//!
//! ```text
//! ┌──────┬──────┬───────────────┐
//! │ 0xFE │ 0xEF │ data (u32 BE) │
//! └──────┴──────┴───────────────┘
//! ```
//!
//! 不在主帧路径上；流量源用它给每个数据报打上序号。

use crate::error::{Error, Result};
use crate::net::Header;

pub const COMP_HEADER_MAGIC: [u8; 2] = [0xFE, 0xEF];
pub const COMP_HEADER_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompHeader {
    pub data: u32,
}

impl CompHeader {
    pub fn new(data: u32) -> Self {
        Self { data }
    }

    pub fn encode(&self) -> [u8; COMP_HEADER_SIZE] {
        let mut buf = [0u8; COMP_HEADER_SIZE];
        buf[..2].copy_from_slice(&COMP_HEADER_MAGIC);
        buf[2..].copy_from_slice(&self.data.to_be_bytes());
        buf
    }

    /// 魔数不符时立即失败，不再读取后续字节。
    pub fn decode(buf: &[u8]) -> Result<(Self, usize)> {
        if buf.len() < COMP_HEADER_MAGIC.len() {
            return Err(Error::HeaderTooShort {
                required: COMP_HEADER_SIZE,
                actual: buf.len(),
            });
        }
        let magic = [buf[0], buf[1]];
        if magic != COMP_HEADER_MAGIC {
            return Err(Error::BadMagic {
                expected: COMP_HEADER_MAGIC,
                actual: magic,
            });
        }
        if buf.len() < COMP_HEADER_SIZE {
            return Err(Error::HeaderTooShort {
                required: COMP_HEADER_SIZE,
                actual: buf.len(),
            });
        }
        let data = u32::from_be_bytes([buf[2], buf[3], buf[4], buf[5]]);
        Ok((Self { data }, COMP_HEADER_SIZE))
    }

    /// 调用方已保证 `buf` 以该头开始；魔数不符或长度不足视为契约破坏，直接 panic。
    pub fn deserialize_strict(buf: &[u8]) -> Self {
        match Self::decode(buf) {
            Ok((h, _)) => h,
            Err(e) => panic!("malformed CompHeader: {e}"),
        }
    }
}

impl Header for CompHeader {
    fn serialized_size(&self) -> usize {
        COMP_HEADER_SIZE
    }

    fn serialize_into(&self, buf: &mut [u8]) {
        buf[..COMP_HEADER_SIZE].copy_from_slice(&self.encode());
    }

    fn deserialize(buf: &[u8]) -> Result<(Self, usize)> {
        Self::decode(buf)
    }
}
