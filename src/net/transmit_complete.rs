//! 发送完成事件（用于驱动队列出队）

use super::id::DeviceId;
use super::net_world::NetWorld;
use crate::sim::{Event, Simulator, World};

/// 事件：设备完成一次帧发送（含帧间隔）后触发，尝试发送队列中的下一帧。
#[derive(Debug)]
pub struct TransmitComplete {
    pub device: DeviceId,
}

impl Event for TransmitComplete {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let TransmitComplete { device } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");
        w.net.transmit_complete(device, sim);
    }
}
