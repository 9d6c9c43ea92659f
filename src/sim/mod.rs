//! 离散事件调度
//!
//! 纳秒时间、可取消的事件句柄和按 (时间, 插入序号) 排序的调度器。

mod event;
mod simulator;
mod time;
mod world;

pub use event::{Event, EventId};
pub use simulator::Simulator;
pub use time::SimTime;
pub use world::World;
