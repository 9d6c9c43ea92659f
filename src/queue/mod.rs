//! 发送队列（Queue disciplines）
//!
//! 目前提供 DropTail（尾丢弃）队列，按包数限制容量。

use crate::net::Packet;

mod drop_tail;

pub use drop_tail::DropTailQueue;

/// 帧队列抽象
pub trait PacketQueue: std::fmt::Debug {
    /// 入队：成功返回 Ok；若被丢弃则返回 Err(pkt)
    fn enqueue(&mut self, pkt: Packet) -> Result<(), Packet>;
    /// 出队：按队列策略返回下一个帧
    fn dequeue(&mut self) -> Option<Packet>;

    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn bytes(&self) -> u64;
    fn capacity_packets(&self) -> usize;
    /// 丢弃所有排队的帧
    fn clear(&mut self);
}
