//! 数据包类型
//!
//! 数据包持有自己的序列化字节；`Clone` 是独立的深拷贝，
//! 修改一份不会影响已交给 trace/回调的另一份。

use crate::error::Result;

/// 可以加到包头部或从头部剥离的协议头
pub trait Header: Sized {
    fn serialized_size(&self) -> usize;
    /// `buf.len() >= serialized_size()`
    fn serialize_into(&self, buf: &mut [u8]);
    /// 返回 (header, 消耗的字节数)
    fn deserialize(buf: &[u8]) -> Result<(Self, usize)>;
}

/// 网络数据包
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub uid: u64,
    bytes: Vec<u8>,
}

impl Packet {
    pub fn new(uid: u64, bytes: Vec<u8>) -> Self {
        Self { uid, bytes }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// 整体替换内容（例如压缩/解压后），uid 保持不变
    pub fn replace_bytes(&mut self, bytes: Vec<u8>) {
        self.bytes = bytes;
    }

    pub fn add_header<H: Header>(&mut self, h: &H) {
        let mut head = vec![0u8; h.serialized_size()];
        h.serialize_into(&mut head);
        self.bytes.splice(0..0, head);
    }

    /// 读取头部但不消耗
    pub fn peek_header<H: Header>(&self) -> Result<H> {
        H::deserialize(&self.bytes).map(|(h, _)| h)
    }

    /// 失败时包内容保持不变
    pub fn remove_header<H: Header>(&mut self) -> Result<H> {
        let (h, n) = H::deserialize(&self.bytes)?;
        self.bytes.drain(..n);
        Ok(h)
    }
}
