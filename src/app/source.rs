//! 定时发包源
//!
//! 每个数据报以 `CompHeader { data: seq }` 开头，后面填充可压缩的文本，
//! 以 IPv4 协议号交给设备发送。

use std::sync::{Arc, Mutex};

use crate::net::{DeviceId, Mac48Address, NetWorld};
use crate::ppp::{COMP_HEADER_SIZE, CompHeader, ETHERTYPE_IPV4};
use crate::sim::{Event, SimTime, Simulator, World};
use tracing::{debug, trace};

const FILLER: &[u8] = b"p2psim ";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SourceStats {
    /// 设备接受的数据报
    pub sent: u64,
    /// 设备拒绝（本地丢弃或信道拒绝）的数据报
    pub rejected: u64,
}

/// 生成 `size` 字节的载荷（至少包含一个 `CompHeader`）
pub fn make_payload(seq: u32, size: usize) -> Vec<u8> {
    let size = size.max(COMP_HEADER_SIZE);
    let mut buf = Vec::with_capacity(size);
    buf.extend_from_slice(&CompHeader::new(seq).encode());
    buf.extend(FILLER.iter().copied().cycle().take(size - COMP_HEADER_SIZE));
    buf
}

/// 流量注入事件：每 `interval` 发送一个数据报，共 `remaining` 个。
#[derive(Debug)]
pub struct PacketSource {
    pub device: DeviceId,
    pub dest: Mac48Address,
    pub payload_bytes: usize,
    pub remaining: u64,
    pub interval: SimTime,
    pub next_seq: u32,
    pub stats: Arc<Mutex<SourceStats>>,
}

impl Event for PacketSource {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let mut me = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");

        if me.remaining == 0 {
            return;
        }

        let pkt = w.net.make_packet(make_payload(me.next_seq, me.payload_bytes));
        trace!(uid = pkt.uid, seq = me.next_seq, size = pkt.size(), "注入数据报");
        let ok = w.net.send(me.device, pkt, me.dest, ETHERTYPE_IPV4, sim);
        if let Ok(mut s) = me.stats.lock() {
            if ok {
                s.sent += 1;
            } else {
                s.rejected += 1;
            }
        }
        if !ok {
            debug!(device = ?me.device, seq = me.next_seq, "数据报被设备拒绝");
        }

        me.remaining -= 1;
        me.next_seq = me.next_seq.wrapping_add(1);
        if me.remaining > 0 {
            sim.schedule_after(me.interval, PacketSource { ..me });
        }
    }
}
