//! 链路仿真的 World
//!
//! 事件通过 `as_any_mut` 向下转型拿到这里的 `Network`。

use super::network::Network;
use crate::sim::World;
use std::any::Any;

/// 链路层仿真世界：只持有设备与信道的容器。
#[derive(Default)]
pub struct NetWorld {
    pub net: Network,
}

impl NetWorld {
    pub fn new() -> Self {
        Self::default()
    }
}

impl World for NetWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
