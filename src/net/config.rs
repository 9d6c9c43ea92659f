//! 设备 / 信道配置（属性风格，仿真开始前一次性设置）

use serde::{Deserialize, Serialize};

use super::address::Mac48Address;
use super::data_rate::DataRate;
use super::error_model::ErrorModelSpec;
use crate::sim::SimTime;

pub const DEFAULT_MTU: u16 = 1500;
pub const DEFAULT_QUEUE_MAX_PACKETS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub mtu: u16,
    /// 缺省时由 `Network` 顺序分配
    pub address: Option<Mac48Address>,
    pub data_rate: DataRate,
    pub interframe_gap_ns: u64,
    pub queue_max_packets: usize,
    pub compression_enabled: bool,
    pub error_model: Option<ErrorModelSpec>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            mtu: DEFAULT_MTU,
            address: None,
            data_rate: DataRate::default(),
            interframe_gap_ns: 0,
            queue_max_packets: DEFAULT_QUEUE_MAX_PACKETS,
            compression_enabled: false,
            error_model: None,
        }
    }
}

impl DeviceConfig {
    pub fn interframe_gap(&self) -> SimTime {
        SimTime(self.interframe_gap_ns)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub delay_ns: u64,
}

/// 一条点对点链路：两端设备 + 信道
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub a: DeviceConfig,
    pub b: DeviceConfig,
    pub channel: ChannelConfig,
}

impl LinkConfig {
    /// 两端相同配置
    pub fn symmetric(device: DeviceConfig, channel: ChannelConfig) -> Self {
        Self {
            a: device.clone(),
            b: device,
            channel,
        }
    }
}
