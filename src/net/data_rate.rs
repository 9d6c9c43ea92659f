//! 链路速率与传输时延计算

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::sim::SimTime;

/// 链路速率（bit/s）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DataRate(pub u64);

impl DataRate {
    pub fn from_bps(bps: u64) -> Self {
        Self(bps)
    }

    pub fn from_mbps(mbps: u64) -> Self {
        Self(mbps.saturating_mul(1_000_000))
    }

    pub fn bps(&self) -> u64 {
        self.0
    }

    /// 计算传输指定字节数所需的时间
    pub fn tx_time(&self, bytes: usize) -> SimTime {
        // ceil(bytes*8 / bps) 秒 -> 纳秒
        if self.0 == 0 {
            return SimTime(u64::MAX / 4);
        }
        let bits = (bytes as u128).saturating_mul(8);
        let nanos = (bits.saturating_mul(1_000_000_000u128) + (self.0 as u128 - 1)) / self.0 as u128;
        SimTime(nanos.min(u64::MAX as u128) as u64)
    }
}

impl Default for DataRate {
    /// 默认 32768b/s
    fn default() -> Self {
        Self(32_768)
    }
}

impl fmt::Display for DataRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bps", self.0)
    }
}

impl FromStr for DataRate {
    type Err = Error;

    /// 接受 `32768b/s`、`8Mbps`、`1.5Gbps`、`100kb/s` 等写法。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || Error::InvalidDataRate(s.to_string());
        let t = s.trim();
        let split = t
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(t.len());
        let (num, unit) = t.split_at(split);
        let value: f64 = num.parse().map_err(|_| bad())?;
        let mult: f64 = match unit.trim() {
            "" | "b/s" | "bps" => 1.0,
            "kb/s" | "kbps" | "Kbps" | "Kb/s" => 1e3,
            "Mb/s" | "Mbps" => 1e6,
            "Gb/s" | "Gbps" => 1e9,
            _ => return Err(bad()),
        };
        let bps = value * mult;
        if !bps.is_finite() || bps < 0.0 || bps > u64::MAX as f64 {
            return Err(bad());
        }
        Ok(Self(bps.round() as u64))
    }
}

impl TryFrom<String> for DataRate {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DataRate> for String {
    fn from(r: DataRate) -> String {
        r.to_string()
    }
}
