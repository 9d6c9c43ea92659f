//! 接收流水线：差错检查 → 抓包事件 → 按协议标签解复用 → 剥头 → 上交

use super::device::{PacketType, PromiscRxPacket, RxPacket};
use super::network::Network;
use super::p2p_device::PointToPointNetDevice;
use super::packet::Packet;
use super::trace::TraceSource;
use crate::compress;
use crate::ppp::PppHeader;
use crate::sim::Simulator;
use tracing::{debug, trace, warn};

impl PointToPointNetDevice {
    #[tracing::instrument(skip(self, frame, sim, net), fields(device = ?self.id, uid = frame.uid))]
    pub(super) fn receive_frame(&mut self, frame: Packet, sim: &mut Simulator, net: &mut Network) {
        if self.disposed {
            trace!("设备已拆除，丢弃在途到达的帧");
            return;
        }
        let now = sim.now();

        if self.error_model.as_mut().is_some_and(|em| em.is_corrupt(&frame)) {
            debug!("差错模型判定帧损坏，丢弃");
            self.drop_rx(frame, sim);
            return;
        }

        self.fire(TraceSource::Sniffer, now, &frame);
        self.fire(TraceSource::PromiscSniffer, now, &frame);
        self.fire(TraceSource::PhyRxEnd, now, &frame);

        // 上交给 trace / 混杂回调的是剥头前的独立副本
        let original = frame.clone();
        let Some((packet, protocol)) = self.demux(frame) else {
            self.drop_rx(original, sim);
            return;
        };
        trace!(protocol, size = packet.size(), "解复用完成");

        let from = self.remote(net);
        if let Some(cb) = self.promisc_callback.as_mut() {
            self.traces.fire(TraceSource::MacPromiscRx, self.id, now, &original);
            cb(
                PromiscRxPacket {
                    device: self.id,
                    frame: original.clone(),
                    packet: packet.clone(),
                    protocol,
                    from,
                    to: self.address,
                    packet_type: PacketType::Host,
                },
                sim,
                net,
            );
        }

        self.fire(TraceSource::MacRx, now, &original);
        self.stats.rx_frames += 1;
        self.stats.rx_bytes += original.size() as u64;

        match self.rx_callback.as_mut() {
            Some(cb) => {
                cb(
                    RxPacket {
                        device: self.id,
                        packet,
                        protocol,
                        from,
                    },
                    sim,
                    net,
                );
            }
            None => debug!("未设置接收回调，丢弃上交的包"),
        }
    }

    /// 按协议标签剥头；压缩标签先解压载荷。返回 (去头后的包, 上层协议号)。
    ///
    /// 无法解帧（头部不足 / 本设备未启用压缩 / 解压失败）时返回 None。
    ///
    /// 压缩标签到达未启用压缩的设备时按 `PhyRxDrop` 丢弃，
    /// 不把仍是压缩字节的载荷当作明文 IPv4 上交。
    ///
    /// # Panics
    /// 明文标签无映射时（拓扑配置错误）。
    fn demux(&self, mut frame: Packet) -> Option<(Packet, u16)> {
        let tag = match frame.peek_header::<PppHeader>() {
            Ok(h) => h.protocol,
            Err(e) => {
                warn!(error = %e, "帧头无法解析");
                return None;
            }
        };

        if self.protocols.is_compressed_tag(tag) {
            if !self.compression_enabled {
                warn!(tag, "收到压缩帧但本设备未启用压缩");
                return None;
            }
            frame.remove_header::<PppHeader>().ok()?;
            match compress::decompress(frame.bytes()) {
                Ok(raw) => frame.replace_bytes(raw),
                Err(e) => {
                    warn!(error = %e, "解压失败");
                    return None;
                }
            }
            Some((frame, self.protocols.wire_to_compressed_ether(tag)))
        } else {
            frame.remove_header::<PppHeader>().ok()?;
            Some((frame, self.protocols.wire_to_ether(tag)))
        }
    }

    fn drop_rx(&mut self, frame: Packet, sim: &Simulator) {
        self.fire(TraceSource::PhyRxDrop, sim.now(), &frame);
        self.stats.rx_drops += 1;
    }
}
