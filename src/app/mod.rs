//! 简单的上层应用：定时发包源、接收端统计、设备间转发

mod relay;
mod sink;
mod source;

pub use relay::install_relay;
pub use sink::{SinkStats, install_sink};
pub use source::{PacketSource, SourceStats, make_payload};
