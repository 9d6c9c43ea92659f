use super::simulator::Simulator;
use std::any::Any;

/// 事件执行时可见的可变状态。
///
/// 事件拿到的是 `&mut dyn World`，需要具体类型时经 `as_any_mut` 向下转型。
/// `on_tick` 在每个事件执行后调用一次，被取消的事件不会触发。
pub trait World: Any {
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn on_tick(&mut self, _sim: &mut Simulator) {}
}
