//! 点对点链路仿真模块
//!
//! 此模块包含设备、信道、trace 源、差错模型和网络容器。

// 子模块声明
mod address;
mod channel;
mod config;
mod data_rate;
mod deliver_frame;
mod device;
mod error_model;
mod id;
mod net_world;
mod network;
mod network_viz;
mod p2p_device;
mod packet;
mod receive;
mod stats;
mod trace;
mod transmit;
mod transmit_complete;

// 重新导出公共接口
pub use address::Mac48Address;
pub use channel::PointToPointChannel;
pub use config::{ChannelConfig, DEFAULT_MTU, DEFAULT_QUEUE_MAX_PACKETS, DeviceConfig, LinkConfig};
pub use data_rate::DataRate;
pub use deliver_frame::DeliverFrame;
pub use device::{
    LinkChangeCallback, NetDevice, PacketType, PromiscReceiveCallback, PromiscRxPacket,
    ReceiveCallback, RxPacket,
};
pub use error_model::{ErrorModel, ErrorModelSpec, ListErrorModel, PeriodicErrorModel};
pub use id::{ChannelId, DeviceId};
pub use net_world::NetWorld;
pub use network::Network;
pub use p2p_device::{PointToPointNetDevice, TxState};
pub use packet::{Header, Packet};
pub use stats::DeviceStats;
pub use trace::{TraceRecord, TraceSink, TraceSinks, TraceSource};
pub use transmit_complete::TransmitComplete;
