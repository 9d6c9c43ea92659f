//! 可视化事件记录（用于离线回放 / 分析）
//!
//! 设计目标：
//! - **结构化**：用 JSON 事件而不是解析文本日志
//! - **轻量**：只订阅设备 trace 源，不改变仿真行为

mod types;

pub use types::{VizChannelInfo, VizDeviceInfo, VizEvent, VizEventKind, VizLogger};
