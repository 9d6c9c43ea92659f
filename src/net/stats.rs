//! 统计信息
//!
//! 定义设备级统计数据结构。

use serde::Serialize;

/// 设备统计信息
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceStats {
    pub tx_frames: u64,
    pub tx_bytes: u64,
    pub tx_drops: u64,
    pub rx_frames: u64,
    pub rx_bytes: u64,
    pub rx_drops: u64,
}

impl DeviceStats {
    pub fn merge(&mut self, other: &DeviceStats) {
        self.tx_frames += other.tx_frames;
        self.tx_bytes += other.tx_bytes;
        self.tx_drops += other.tx_drops;
        self.rx_frames += other.rx_frames;
        self.rx_bytes += other.rx_bytes;
        self.rx_drops += other.rx_drops;
    }
}
