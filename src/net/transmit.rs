//! 发送路径：封装 → 入队 → 单帧在途的发送状态机
//!
//! 状态不变式：`Busy` ⇔ `current.is_some()` 且 `tx_complete_event` 待触发。

use super::address::Mac48Address;
use super::network::Network;
use super::p2p_device::{PointToPointNetDevice, TxState};
use super::packet::Packet;
use super::trace::TraceSource;
use super::transmit_complete::TransmitComplete;
use crate::compress;
use crate::ppp::PppHeader;
use crate::sim::Simulator;
use tracing::{debug, trace, warn};

impl PointToPointNetDevice {
    /// 上层发送入口
    ///
    /// 返回 false 表示帧在本地被丢弃（链路 down / 压缩失败 / 队列满）
    /// 或立即开始的发送被信道拒绝。
    #[tracing::instrument(skip(self, packet, sim, net), fields(device = ?self.id, uid = packet.uid))]
    pub(super) fn send_frame(
        &mut self,
        mut packet: Packet,
        dest: Mac48Address,
        protocol: u16,
        sim: &mut Simulator,
        net: &mut Network,
    ) -> bool {
        let now = sim.now();
        trace!(dest = %dest, size = packet.size(), "上层请求发送");

        if !self.link_up {
            debug!("链路 down，丢弃");
            self.fire(TraceSource::MacTxDrop, now, &packet);
            self.stats.tx_drops += 1;
            return false;
        }

        let wire = if self.compression_enabled {
            match compress::compress(packet.bytes()) {
                Ok(z) => {
                    trace!(raw = packet.size(), compressed = z.len(), "载荷已压缩");
                    packet.replace_bytes(z);
                }
                Err(e) => {
                    warn!(error = %e, "压缩失败，丢弃");
                    self.fire(TraceSource::MacTxDrop, now, &packet);
                    self.stats.tx_drops += 1;
                    return false;
                }
            }
            self.protocols.compressed_ether_to_wire(protocol)
        } else {
            self.protocols.ether_to_wire(protocol)
        };
        packet.add_header(&PppHeader::new(wire));

        self.fire(TraceSource::MacTx, now, &packet);

        if let Err(dropped) = self.queue.enqueue(packet) {
            debug!(queue_len = self.queue.len(), "队列已满，丢弃");
            self.fire(TraceSource::MacTxDrop, now, &dropped);
            self.stats.tx_drops += 1;
            return false;
        }

        if self.tx_state == TxState::Ready {
            if let Some(next) = self.queue.dequeue() {
                return self.start_next(next, sim, net);
            }
        }
        trace!(queue_len = self.queue.len(), "发送器忙，帧已排队");
        true
    }

    /// 出队后的抓包事件 + 开始发送
    fn start_next(&mut self, frame: Packet, sim: &mut Simulator, net: &mut Network) -> bool {
        let now = sim.now();
        self.fire(TraceSource::Sniffer, now, &frame);
        self.fire(TraceSource::PromiscSniffer, now, &frame);
        self.transmit_start(frame, sim, net)
    }

    /// 开始在信道上发送一帧
    ///
    /// 完成事件总会被调度，即使信道拒绝了这次发送。
    ///
    /// # Panics
    /// 发送器不处于 `Ready` 状态时。
    pub(super) fn transmit_start(&mut self, frame: Packet, sim: &mut Simulator, net: &mut Network) -> bool {
        assert_eq!(self.tx_state, TxState::Ready, "Must be READY to transmit");
        let ch = self
            .channel
            .unwrap_or_else(|| panic!("device {:?} transmitting without a channel", self.id));

        self.tx_state = TxState::Busy;
        let now = sim.now();
        self.fire(TraceSource::PhyTxBegin, now, &frame);

        let tx_time = self.data_rate.tx_time(frame.size());
        let complete_in = tx_time.saturating_add(self.interframe_gap);
        self.tx_complete_event = Some(sim.schedule_after(complete_in, TransmitComplete { device: self.id }));
        debug!(
            uid = frame.uid,
            size = frame.size(),
            tx_time = ?tx_time,
            complete_at = ?now.saturating_add(complete_in),
            "开始发送"
        );

        let accepted = net.channel_mut(ch).transmit_start(frame.clone(), self.id, tx_time, sim);
        if accepted {
            self.stats.tx_frames += 1;
            self.stats.tx_bytes += frame.size() as u64;
        } else {
            debug!(uid = frame.uid, "信道拒绝发送");
            self.fire(TraceSource::PhyTxDrop, now, &frame);
            self.stats.tx_drops += 1;
        }
        self.current = Some(frame);
        accepted
    }

    /// 发送完成（含帧间隔）：清空在途帧，若队列非空则立即开始下一帧。
    ///
    /// # Panics
    /// 发送器不处于 `Busy` 状态时（已拆除的设备除外）。
    pub(super) fn transmit_complete(&mut self, sim: &mut Simulator, net: &mut Network) {
        if self.disposed {
            trace!(device = ?self.id, "设备已拆除，忽略发送完成");
            return;
        }
        assert_eq!(self.tx_state, TxState::Busy, "Must be BUSY if transmitting");
        self.tx_state = TxState::Ready;
        self.tx_complete_event = None;

        let done = self
            .current
            .take()
            .unwrap_or_else(|| panic!("device {:?} is BUSY with no frame in flight", self.id));
        self.fire(TraceSource::PhyTxEnd, sim.now(), &done);
        trace!(device = ?self.id, uid = done.uid, "发送完成");

        if let Some(next) = self.queue.dequeue() {
            self.start_next(next, sim, net);
        }
    }
}
