//! PPP 风格的帧格式
//!
//! - `PppHeader`：每一帧前面的 2 字节协议标签
//! - `CompHeader`：独立的 6 字节辅助头（魔数 `0xFE 0xEF` + u32）
//! - `ProtocolMap`：上层协议号与线上标签之间的双向映射

mod comp_header;
mod header;
mod protocol;

pub use comp_header::{COMP_HEADER_MAGIC, COMP_HEADER_SIZE, CompHeader};
pub use header::{PPP_HEADER_SIZE, PppHeader};
pub use protocol::{
    ETHERTYPE_IPV4, ETHERTYPE_IPV6, PPP_COMPRESSED_IPV4, PPP_IPV4, PPP_IPV6, ProtocolMap,
};
