//! 网络：设备与信道的容器
//!
//! 设备按 `DeviceId` 存放；处理某个设备的事件时先把它从 Vec 中取出，
//! 这样设备代码可以同时拿到 `&mut self` 与 `&mut Network`（访问信道或其它设备）。

use std::sync::{Arc, Mutex};

use super::address::Mac48Address;
use super::config::{ChannelConfig, DeviceConfig, LinkConfig};
use super::device::{NetDevice, PromiscReceiveCallback, ReceiveCallback};
use super::channel::PointToPointChannel;
use super::id::{ChannelId, DeviceId};
use super::p2p_device::PointToPointNetDevice;
use super::packet::Packet;
use super::stats::DeviceStats;
use crate::sim::{SimTime, Simulator};
use crate::viz::VizLogger;
use tracing::{debug, info, trace};

/// 网络拓扑
#[derive(Default)]
pub struct Network {
    devices: Vec<Option<PointToPointNetDevice>>,
    channels: Vec<PointToPointChannel>,
    next_uid: u64,
    next_mac: u64,
    pub(super) viz: Option<Arc<Mutex<VizLogger>>>,
}

impl Network {
    /// 添加设备；配置中没有地址时按顺序分配 00:00:00:00:00:01, ...
    pub fn add_device(&mut self, cfg: &DeviceConfig) -> DeviceId {
        let id = DeviceId(self.devices.len());
        let address = cfg.address.unwrap_or_else(|| {
            self.next_mac += 1;
            Mac48Address::from_index(self.next_mac)
        });
        let mut dev = PointToPointNetDevice::new(id, address, cfg);
        dev.set_if_index(id.0 as u32);
        if let Some(v) = &self.viz {
            Self::hook_viz(&mut dev, v.clone());
        }
        debug!(device = ?id, address = %address, data_rate = %cfg.data_rate, "添加设备");
        self.devices.push(Some(dev));
        id
    }

    pub fn add_channel(&mut self, cfg: &ChannelConfig) -> ChannelId {
        let id = ChannelId(self.channels.len());
        self.channels.push(PointToPointChannel::new(id, SimTime(cfg.delay_ns)));
        id
    }

    /// 把设备挂到信道上；设备链路立即 up。
    pub fn attach(&mut self, device: DeviceId, channel: ChannelId) {
        self.channels[channel.0].attach(device);
        self.device_mut(device).attach(channel);
    }

    /// 创建两端设备与信道并挂接
    pub fn connect(&mut self, link: &LinkConfig) -> (DeviceId, DeviceId, ChannelId) {
        let a = self.add_device(&link.a);
        let b = self.add_device(&link.b);
        let ch = self.add_channel(&link.channel);
        self.attach(a, ch);
        self.attach(b, ch);
        info!(a = ?a, b = ?b, channel = ?ch, "建立点对点链路");
        (a, b, ch)
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// # Panics
    /// 设备不存在或正被取出处理时。
    pub fn device(&self, id: DeviceId) -> &PointToPointNetDevice {
        self.devices
            .get(id.0)
            .and_then(Option::as_ref)
            .unwrap_or_else(|| panic!("device {:?} does not exist or is in use", id))
    }

    pub fn device_mut(&mut self, id: DeviceId) -> &mut PointToPointNetDevice {
        self.devices
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .unwrap_or_else(|| panic!("device {:?} does not exist or is in use", id))
    }

    pub fn channel(&self, id: ChannelId) -> &PointToPointChannel {
        &self.channels[id.0]
    }

    pub fn channel_mut(&mut self, id: ChannelId) -> &mut PointToPointChannel {
        &mut self.channels[id.0]
    }

    pub(super) fn channels(&self) -> &[PointToPointChannel] {
        &self.channels
    }

    /// 可直接访问的设备（不含正在处理中的那个）
    pub fn devices(&self) -> impl Iterator<Item = &PointToPointNetDevice> {
        self.devices.iter().flatten()
    }

    /// 分配一个新的包 uid
    pub fn make_packet(&mut self, bytes: Vec<u8>) -> Packet {
        let uid = self.next_uid;
        self.next_uid = self.next_uid.wrapping_add(1);
        Packet::new(uid, bytes)
    }

    /// 暂时把设备取出来，避免 &mut self 与 &mut device 的重叠借用。
    pub fn with_device<R>(
        &mut self,
        id: DeviceId,
        f: impl FnOnce(&mut PointToPointNetDevice, &mut Network) -> R,
    ) -> R {
        let mut dev = self.devices[id.0]
            .take()
            .unwrap_or_else(|| panic!("device {:?} is already in use", id));
        trace!(device = ?id, "取出设备");
        let r = f(&mut dev, self);
        self.devices[id.0] = Some(dev);
        r
    }

    pub fn send(
        &mut self,
        device: DeviceId,
        packet: Packet,
        dest: Mac48Address,
        protocol: u16,
        sim: &mut Simulator,
    ) -> bool {
        self.with_device(device, |d, net| d.send(packet, dest, protocol, sim, net))
    }

    /// 信道交付帧
    pub fn receive(&mut self, device: DeviceId, frame: Packet, sim: &mut Simulator) {
        self.with_device(device, |d, net| d.receive(frame, sim, net));
    }

    pub(super) fn transmit_complete(&mut self, device: DeviceId, sim: &mut Simulator) {
        self.with_device(device, |d, net| d.transmit_complete(sim, net));
    }

    pub fn dispose_device(&mut self, device: DeviceId, sim: &mut Simulator) {
        self.device_mut(device).dispose(sim);
    }

    /// 对端地址
    pub fn remote(&self, device: DeviceId) -> Mac48Address {
        self.device(device).remote(self)
    }

    pub fn set_receive_callback(&mut self, device: DeviceId, cb: ReceiveCallback) {
        self.device_mut(device).set_receive_callback(cb);
    }

    pub fn set_promisc_receive_callback(&mut self, device: DeviceId, cb: PromiscReceiveCallback) {
        self.device_mut(device).set_promisc_receive_callback(cb);
    }

    /// 所有设备统计之和
    pub fn total_stats(&self) -> DeviceStats {
        let mut total = DeviceStats::default();
        for d in self.devices() {
            total.merge(&d.stats());
        }
        total
    }
}
