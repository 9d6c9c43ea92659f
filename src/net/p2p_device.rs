//! 点对点链路设备
//!
//! 设备状态：地址、MTU、链路状态、信道绑定、发送队列、发送状态机与
//! 上层回调。发送路径见 `transmit.rs`，接收流水线见 `receive.rs`。

use super::address::Mac48Address;
use super::config::DeviceConfig;
use super::data_rate::DataRate;
use super::device::{
    LinkChangeCallback, NetDevice, PromiscReceiveCallback, ReceiveCallback,
};
use super::error_model::ErrorModel;
use super::id::{ChannelId, DeviceId};
use super::network::Network;
use super::packet::Packet;
use super::stats::DeviceStats;
use super::trace::{TraceSink, TraceSinks, TraceSource};
use crate::ppp::ProtocolMap;
use crate::queue::{DropTailQueue, PacketQueue};
use crate::sim::{EventId, SimTime, Simulator};
use tracing::debug;

/// 发送状态机
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    /// 空闲，可以开始新的发送
    Ready,
    /// 正在发送一帧
    Busy,
}

/// 点对点链路设备
pub struct PointToPointNetDevice {
    pub(super) id: DeviceId,
    pub(super) if_index: u32,
    pub(super) address: Mac48Address,
    pub(super) mtu: u16,
    pub(super) link_up: bool,
    pub(super) channel: Option<ChannelId>,

    pub(super) data_rate: DataRate,
    pub(super) interframe_gap: SimTime,
    pub(super) compression_enabled: bool,
    pub(super) protocols: ProtocolMap,

    pub(super) queue: Box<dyn PacketQueue>,
    pub(super) tx_state: TxState,
    /// 正在发送的帧；`Busy` 时必为 Some
    pub(super) current: Option<Packet>,
    /// 待触发的发送完成事件；`Busy` 时必为 Some
    pub(super) tx_complete_event: Option<EventId>,

    pub(super) error_model: Option<Box<dyn ErrorModel>>,
    pub(super) traces: TraceSinks,
    pub(super) rx_callback: Option<ReceiveCallback>,
    pub(super) promisc_callback: Option<PromiscReceiveCallback>,
    pub(super) link_change_callbacks: Vec<LinkChangeCallback>,

    pub(super) stats: DeviceStats,
    pub(super) disposed: bool,
}

impl PointToPointNetDevice {
    pub fn new(id: DeviceId, address: Mac48Address, cfg: &DeviceConfig) -> Self {
        Self {
            id,
            if_index: 0,
            address,
            mtu: cfg.mtu,
            link_up: false,
            channel: None,
            data_rate: cfg.data_rate,
            interframe_gap: cfg.interframe_gap(),
            compression_enabled: cfg.compression_enabled,
            protocols: ProtocolMap::default(),
            queue: Box::new(DropTailQueue::new(cfg.queue_max_packets)),
            tx_state: TxState::Ready,
            current: None,
            tx_complete_event: None,
            error_model: cfg.error_model.as_ref().map(|spec| spec.build()),
            traces: TraceSinks::default(),
            rx_callback: None,
            promisc_callback: None,
            link_change_callbacks: Vec::new(),
            stats: DeviceStats::default(),
            disposed: false,
        }
    }

    pub fn set_data_rate(&mut self, rate: DataRate) {
        self.data_rate = rate;
    }

    pub fn data_rate(&self) -> DataRate {
        self.data_rate
    }

    pub fn set_interframe_gap(&mut self, gap: SimTime) {
        self.interframe_gap = gap;
    }

    pub fn interframe_gap(&self) -> SimTime {
        self.interframe_gap
    }

    pub fn set_compression_enabled(&mut self, enabled: bool) {
        self.compression_enabled = enabled;
    }

    pub fn compression_enabled(&self) -> bool {
        self.compression_enabled
    }

    pub fn set_queue(&mut self, queue: Box<dyn PacketQueue>) {
        self.queue = queue;
    }

    pub fn queue(&self) -> &dyn PacketQueue {
        self.queue.as_ref()
    }

    pub fn set_receive_error_model(&mut self, em: Box<dyn ErrorModel>) {
        self.error_model = Some(em);
    }

    pub fn set_protocol_map(&mut self, map: ProtocolMap) {
        self.protocols = map;
    }

    pub fn protocol_map(&self) -> &ProtocolMap {
        &self.protocols
    }

    pub fn tx_state(&self) -> TxState {
        self.tx_state
    }

    /// 正在发送的帧
    pub fn in_flight(&self) -> Option<&Packet> {
        self.current.as_ref()
    }

    pub fn pending_tx_complete(&self) -> Option<EventId> {
        self.tx_complete_event
    }

    pub fn stats(&self) -> DeviceStats {
        self.stats
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn trace_connect(&mut self, source: TraceSource, sink: TraceSink) {
        self.traces.connect(source, sink);
    }

    pub fn trace_connect_all(&mut self, sink: TraceSink) {
        self.traces.connect_all(sink);
    }

    pub(super) fn fire(&mut self, source: TraceSource, at: SimTime, packet: &Packet) {
        self.traces.fire(source, self.id, at, packet);
    }

    /// 绑定信道并立即标记链路 up（不建模双端握手）。
    pub(super) fn attach(&mut self, channel: ChannelId) {
        self.channel = Some(channel);
        self.notify_link_up();
    }

    fn notify_link_up(&mut self) {
        self.link_up = true;
        debug!(device = ?self.id, "链路 up");
        let id = self.id;
        for cb in self.link_change_callbacks.iter_mut() {
            cb(id);
        }
    }

    /// 对端设备地址
    ///
    /// # Panics
    /// 信道上不是恰好两个设备时。
    pub fn remote(&self, net: &Network) -> Mac48Address {
        let ch = self
            .channel
            .unwrap_or_else(|| panic!("device {:?} is not attached to a channel", self.id));
        let ch = net.channel(ch);
        assert_eq!(
            ch.device_count(),
            2,
            "remote() requires exactly two devices on channel {:?}",
            ch.id
        );
        (0..ch.device_count())
            .map(|i| ch.device_at(i))
            .find(|&d| d != self.id)
            .map(|d| net.device(d).address())
            .unwrap_or_else(|| panic!("device {:?} has no peer on channel {:?}", self.id, ch.id))
    }

    /// 拆除设备：取消待触发的发送完成事件并清空所有持有的引用。
    pub fn dispose(&mut self, sim: &mut Simulator) {
        if let Some(ev) = self.tx_complete_event.take() {
            sim.cancel(ev);
        }
        self.current = None;
        self.tx_state = TxState::Ready;
        self.queue.clear();
        self.channel = None;
        self.link_up = false;
        self.error_model = None;
        self.rx_callback = None;
        self.promisc_callback = None;
        self.link_change_callbacks.clear();
        self.traces.clear();
        self.disposed = true;
        debug!(device = ?self.id, "设备已拆除");
    }
}

impl std::fmt::Debug for PointToPointNetDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointToPointNetDevice")
            .field("id", &self.id)
            .field("address", &self.address)
            .field("link_up", &self.link_up)
            .field("channel", &self.channel)
            .field("tx_state", &self.tx_state)
            .field("queue_len", &self.queue.len())
            .field("compression_enabled", &self.compression_enabled)
            .finish()
    }
}

impl NetDevice for PointToPointNetDevice {
    fn id(&self) -> DeviceId {
        self.id
    }

    fn if_index(&self) -> u32 {
        self.if_index
    }

    fn set_if_index(&mut self, index: u32) {
        self.if_index = index;
    }

    fn channel(&self) -> Option<ChannelId> {
        self.channel
    }

    fn address(&self) -> Mac48Address {
        self.address
    }

    fn set_address(&mut self, address: Mac48Address) {
        self.address = address;
    }

    fn mtu(&self) -> u16 {
        self.mtu
    }

    fn set_mtu(&mut self, mtu: u16) -> bool {
        self.mtu = mtu;
        true
    }

    fn is_link_up(&self) -> bool {
        self.link_up
    }

    fn add_link_change_callback(&mut self, cb: LinkChangeCallback) {
        self.link_change_callbacks.push(cb);
    }

    fn is_point_to_point(&self) -> bool {
        true
    }

    fn needs_arp(&self) -> bool {
        false
    }

    fn supports_send_from(&self) -> bool {
        false
    }

    fn send(
        &mut self,
        packet: Packet,
        dest: Mac48Address,
        protocol: u16,
        sim: &mut Simulator,
        net: &mut Network,
    ) -> bool {
        self.send_frame(packet, dest, protocol, sim, net)
    }

    fn send_from(
        &mut self,
        _packet: Packet,
        _source: Mac48Address,
        _dest: Mac48Address,
        _protocol: u16,
        _sim: &mut Simulator,
        _net: &mut Network,
    ) -> bool {
        false
    }

    fn receive(&mut self, frame: Packet, sim: &mut Simulator, net: &mut Network) {
        self.receive_frame(frame, sim, net)
    }

    fn set_receive_callback(&mut self, cb: ReceiveCallback) {
        self.rx_callback = Some(cb);
    }

    fn set_promisc_receive_callback(&mut self, cb: PromiscReceiveCallback) {
        self.promisc_callback = Some(cb);
    }
}
