//! 仿真器
//!
//! 定义事件驱动仿真器，维护当前时间与事件队列。

use super::event::{Event, EventId};
use super::time::SimTime;
use super::world::World;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use tracing::{debug, info, trace};

/// 队列中的事件：按 (时间, 序列号) 排序，同一时刻先调度先执行。
struct ScheduledEvent {
    at: SimTime,
    seq: u64,
    ev: Box<dyn Event>,
}

// BinaryHeap 是 max-heap，比较方向取反
impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at
            .cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        (self.at, self.seq) == (other.at, other.seq)
    }
}

impl Eq for ScheduledEvent {}

/// 事件驱动仿真器：维护当前时间与事件队列。
#[derive(Default)]
pub struct Simulator {
    now: SimTime,
    next_seq: u64,
    q: BinaryHeap<ScheduledEvent>,
    /// 尚未执行且未被取消的事件序列号（取消采用惰性删除）
    live: HashSet<u64>,
}

impl Simulator {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 调度事件在指定时间执行
    #[tracing::instrument(skip(self, ev), fields(event_type = std::any::type_name::<E>(), schedule_at = ?at))]
    pub fn schedule<E: Event>(&mut self, at: SimTime, ev: E) -> EventId {
        assert!(at >= self.now, "cannot schedule into the past: {:?} < {:?}", at, self.now);
        let seq = self.next_seq;
        trace!(now = ?self.now, seq, "调度事件");

        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(ScheduledEvent {
            at,
            seq,
            ev: Box::new(ev),
        });
        self.live.insert(seq);

        debug!(queue_size = self.q.len(), "事件已加入队列");
        EventId(seq)
    }

    /// 在当前时间之后 `delay` 执行事件
    pub fn schedule_after<E: Event>(&mut self, delay: SimTime, ev: E) -> EventId {
        let at = self.now.saturating_add(delay);
        self.schedule(at, ev)
    }

    /// 取消尚未执行的事件；返回是否真的取消了某个事件。
    pub fn cancel(&mut self, id: EventId) -> bool {
        let removed = self.live.remove(&id.0);
        if removed {
            debug!(seq = id.0, "事件已取消");
        }
        removed
    }

    /// 事件是否仍在等待执行
    pub fn is_pending(&self, id: EventId) -> bool {
        self.live.contains(&id.0)
    }

    /// 等待执行的事件数（不含已取消的）
    pub fn pending_events(&self) -> usize {
        self.live.len()
    }

    /// 弹出下一个有效事件（跳过已取消的）
    fn pop_live(&mut self, until: Option<SimTime>) -> Option<ScheduledEvent> {
        loop {
            let top = self.q.peek()?;
            if until.is_some_and(|u| top.at > u) {
                return None;
            }
            let item = self.q.pop()?;
            if self.live.remove(&item.seq) {
                return Some(item);
            }
            trace!(seq = item.seq, "跳过已取消事件");
        }
    }

    /// 运行直到事件队列为空或到达 `until`。
    pub fn run_until(&mut self, until: SimTime, world: &mut dyn World) {
        while let Some(item) = self.pop_live(Some(until)) {
            self.now = item.at;
            item.ev.execute(self, world);
            world.on_tick(self);
        }
        self.now = self.now.max(until);
    }

    /// 运行所有事件直到队列为空。
    #[tracing::instrument(skip(self, world))]
    pub fn run(&mut self, world: &mut dyn World) {
        info!("▶️  开始运行仿真");
        debug!(now = ?self.now, queue_size = self.q.len(), "初始状态");

        let mut event_count = 0;
        while let Some(item) = self.pop_live(None) {
            event_count += 1;
            self.now = item.at;

            debug!(
                event_num = event_count,
                now = ?self.now,
                seq = item.seq,
                remaining_queue = self.q.len(),
                "执行事件"
            );

            item.ev.execute(self, world);
            world.on_tick(self);
        }

        info!(
            total_events = event_count,
            final_time = ?self.now,
            "✅ 仿真完成"
        );
    }
}
