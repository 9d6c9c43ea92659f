//! MAC-48 地址

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Mac48Address(pub [u8; 6]);

impl Mac48Address {
    pub const BROADCAST: Mac48Address = Mac48Address([0xff; 6]);
    /// IPv4 组播前缀 01:00:5e:00:00:00
    pub const MULTICAST_V4: Mac48Address = Mac48Address([0x01, 0x00, 0x5e, 0, 0, 0]);
    /// IPv6 组播前缀 33:33:00:00:00:00
    pub const MULTICAST_V6: Mac48Address = Mac48Address([0x33, 0x33, 0, 0, 0, 0]);

    /// 由 48 位计数器生成地址（用于顺序分配）
    pub fn from_index(n: u64) -> Self {
        let b = n.to_be_bytes();
        Mac48Address([b[2], b[3], b[4], b[5], b[6], b[7]])
    }

    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    pub fn is_group(&self) -> bool {
        self.0[0] & 0x01 != 0
    }
}

impl fmt::Display for Mac48Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

impl FromStr for Mac48Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = [0u8; 6];
        let mut parts = s.split(':');
        for slot in out.iter_mut() {
            let part = parts
                .next()
                .filter(|p| p.len() == 2)
                .ok_or_else(|| Error::InvalidAddress(s.to_string()))?;
            *slot = u8::from_str_radix(part, 16).map_err(|_| Error::InvalidAddress(s.to_string()))?;
        }
        if parts.next().is_some() {
            return Err(Error::InvalidAddress(s.to_string()));
        }
        Ok(Mac48Address(out))
    }
}

impl TryFrom<String> for Mac48Address {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Mac48Address> for String {
    fn from(a: Mac48Address) -> String {
        a.to_string()
    }
}
