//! 帧交付事件
//!
//! 信道在帧完整到达时调度，驱动接收端设备的接收流水线。

use super::id::DeviceId;
use super::net_world::NetWorld;
use super::packet::Packet;
use crate::sim::{Event, Simulator, World};
use tracing::trace;

/// 事件：把一个帧交给某个设备接收。
#[derive(Debug)]
pub struct DeliverFrame {
    pub to: DeviceId,
    pub frame: Packet,
}

impl Event for DeliverFrame {
    #[tracing::instrument(skip(self, sim, world), fields(uid = self.frame.uid, to = ?self.to))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let DeliverFrame { to, frame } = *self;
        trace!(size = frame.size(), now = ?sim.now(), "帧到达设备");

        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");
        w.net.receive(to, frame, sim);
    }
}
