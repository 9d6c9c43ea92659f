//! 中间节点转发：从一个设备收到的包原样从另一个设备发出

use crate::net::{DeviceId, Network, RxPacket};
use crate::sim::Simulator;
use tracing::trace;

/// `from` 收到的包转发到 `to` 的对端。
///
/// # Panics
/// `from == to` 时（设备处理期间无法再次取出自身）。
pub fn install_relay(net: &mut Network, from: DeviceId, to: DeviceId) {
    assert_ne!(from, to, "relay needs two distinct devices");
    net.set_receive_callback(
        from,
        Box::new(move |rx: RxPacket, sim: &mut Simulator, net: &mut Network| {
            let dest = net.remote(to);
            trace!(from = ?from, to = ?to, uid = rx.packet.uid, "转发");
            net.send(to, rx.packet, dest, rx.protocol, sim)
        }),
    );
}
