//! DropTail（尾丢弃）队列
//!
//! 排队帧数达到上限后新帧直接被拒绝；出队严格 FIFO。

use std::collections::VecDeque;

use crate::net::Packet;

use super::PacketQueue;

#[derive(Debug, Default)]
pub struct DropTailQueue {
    limit: usize,
    frames: VecDeque<Packet>,
    queued_bytes: u64,
    /// 因队满被拒绝的帧数（clear 不计入）
    rejected: u64,
}

impl DropTailQueue {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    pub fn front(&self) -> Option<&Packet> {
        self.frames.front()
    }
}

impl PacketQueue for DropTailQueue {
    fn enqueue(&mut self, pkt: Packet) -> Result<(), Packet> {
        if self.frames.len() >= self.limit {
            self.rejected += 1;
            return Err(pkt);
        }
        self.queued_bytes += pkt.size() as u64;
        self.frames.push_back(pkt);
        Ok(())
    }

    fn dequeue(&mut self) -> Option<Packet> {
        self.frames.pop_front().inspect(|pkt| {
            self.queued_bytes -= pkt.size() as u64;
        })
    }

    fn len(&self) -> usize {
        self.frames.len()
    }

    fn bytes(&self) -> u64 {
        self.queued_bytes
    }

    fn capacity_packets(&self) -> usize {
        self.limit
    }

    fn clear(&mut self) {
        self.frames.clear();
        self.queued_bytes = 0;
    }
}
