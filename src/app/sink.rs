//! 接收端：校验 `CompHeader` 并统计

use std::sync::{Arc, Mutex};

use crate::net::{DeviceId, Network, RxPacket};
use crate::ppp::CompHeader;
use crate::sim::Simulator;
use tracing::{debug, warn};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SinkStats {
    pub received: u64,
    pub bytes: u64,
    /// 开头不是 `0xFE 0xEF` 的数据报
    pub bad_magic: u64,
    /// 按到达顺序记录的序号
    pub seqs: Vec<u32>,
}

/// 在 `device` 上安装接收回调，返回共享的统计。
pub fn install_sink(net: &mut Network, device: DeviceId) -> Arc<Mutex<SinkStats>> {
    let stats = Arc::new(Mutex::new(SinkStats::default()));
    let shared = stats.clone();
    net.set_receive_callback(
        device,
        Box::new(move |rx: RxPacket, _sim: &mut Simulator, _net: &mut Network| {
            let Ok(mut s) = shared.lock() else {
                return false;
            };
            s.received += 1;
            s.bytes += rx.packet.size() as u64;
            match rx.packet.peek_header::<CompHeader>() {
                Ok(h) => {
                    debug!(device = ?rx.device, uid = rx.packet.uid, seq = h.data, "数据报到达");
                    s.seqs.push(h.data);
                    true
                }
                Err(e) => {
                    warn!(device = ?rx.device, uid = rx.packet.uid, error = %e, "数据报头校验失败");
                    s.bad_magic += 1;
                    false
                }
            }
        }),
    );
    stats
}
