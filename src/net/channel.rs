//! 点对点信道
//!
//! 最多连接两个设备，负责把一端发出的帧在传输+传播时延后交给另一端。

use super::deliver_frame::DeliverFrame;
use super::id::{ChannelId, DeviceId};
use super::packet::Packet;
use crate::sim::{SimTime, Simulator};
use tracing::{debug, trace};

/// 点对点信道
#[derive(Debug)]
pub struct PointToPointChannel {
    pub id: ChannelId,
    /// 单向传播时延
    pub delay: SimTime,
    devices: Vec<DeviceId>,
}

impl PointToPointChannel {
    pub fn new(id: ChannelId, delay: SimTime) -> Self {
        Self {
            id,
            delay,
            devices: Vec::with_capacity(2),
        }
    }

    /// 挂接一个设备
    ///
    /// # Panics
    /// 挂接第三个设备时。
    pub fn attach(&mut self, device: DeviceId) {
        assert!(
            self.devices.len() < 2,
            "point-to-point channel {:?} already has two devices",
            self.id
        );
        self.devices.push(device);
        debug!(channel = ?self.id, device = ?device, n = self.devices.len(), "设备挂接到信道");
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn device_at(&self, i: usize) -> DeviceId {
        self.devices[i]
    }

    /// 对端设备（若已挂接）
    pub fn peer_of(&self, device: DeviceId) -> Option<DeviceId> {
        if self.devices.len() != 2 {
            return None;
        }
        self.devices.iter().copied().find(|&d| d != device)
    }

    /// `src` 开始发送 `frame`，持续 `tx_time`。
    ///
    /// 没有对端时拒绝（返回 false）；否则在 `now + tx_time + delay` 交付给对端。
    pub fn transmit_start(
        &mut self,
        frame: Packet,
        src: DeviceId,
        tx_time: SimTime,
        sim: &mut Simulator,
    ) -> bool {
        let Some(peer) = self.peer_of(src) else {
            debug!(channel = ?self.id, src = ?src, uid = frame.uid, "信道无对端，拒绝发送");
            return false;
        };
        let arrive = sim.now().saturating_add(tx_time).saturating_add(self.delay);
        trace!(
            channel = ?self.id,
            uid = frame.uid,
            tx_time = ?tx_time,
            delay = ?self.delay,
            arrive = ?arrive,
            "调度帧到达事件"
        );
        sim.schedule(arrive, DeliverFrame { to: peer, frame });
        true
    }
}
