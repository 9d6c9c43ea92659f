//! 设备 trace 源
//!
//! 每个设备持有自己的观察者列表；事件同步、按注册顺序依次回调，
//! sink 只拿到帧的只读引用，没有返回值。

use serde::{Deserialize, Serialize};

use super::id::DeviceId;
use super::packet::Packet;
use crate::sim::SimTime;

/// Trace 源（设备顶部 MAC 层 / 底部 PHY 层 / 抓包）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceSource {
    /// 帧已封装，交给设备准备发送
    MacTx,
    /// 发送前被丢弃（链路未就绪 / 队列溢出 / 压缩失败）
    MacTxDrop,
    /// 混杂模式上交
    MacPromiscRx,
    /// 非混杂上交
    MacRx,
    /// 开始在信道上发送
    PhyTxBegin,
    /// 发送完成
    PhyTxEnd,
    /// 信道拒绝发送
    PhyTxDrop,
    /// 完整接收
    PhyRxEnd,
    /// 接收时被丢弃（差错模型 / 无法解帧）
    PhyRxDrop,
    Sniffer,
    PromiscSniffer,
}

impl TraceSource {
    pub const ALL: [TraceSource; 11] = [
        TraceSource::MacTx,
        TraceSource::MacTxDrop,
        TraceSource::MacPromiscRx,
        TraceSource::MacRx,
        TraceSource::PhyTxBegin,
        TraceSource::PhyTxEnd,
        TraceSource::PhyTxDrop,
        TraceSource::PhyRxEnd,
        TraceSource::PhyRxDrop,
        TraceSource::Sniffer,
        TraceSource::PromiscSniffer,
    ];

    pub fn is_drop(&self) -> bool {
        matches!(
            self,
            TraceSource::MacTxDrop | TraceSource::PhyTxDrop | TraceSource::PhyRxDrop
        )
    }
}

/// 一次 trace 事件
#[derive(Debug)]
pub struct TraceRecord<'a> {
    pub source: TraceSource,
    pub device: DeviceId,
    pub at: SimTime,
    pub packet: &'a Packet,
}

pub type TraceSink = Box<dyn FnMut(&TraceRecord<'_>)>;

/// 观察者列表
#[derive(Default)]
pub struct TraceSinks {
    sinks: Vec<(Option<TraceSource>, TraceSink)>,
}

impl TraceSinks {
    /// 订阅单个 trace 源
    pub fn connect(&mut self, source: TraceSource, sink: TraceSink) {
        self.sinks.push((Some(source), sink));
    }

    /// 订阅全部 trace 源
    pub fn connect_all(&mut self, sink: TraceSink) {
        self.sinks.push((None, sink));
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn clear(&mut self) {
        self.sinks.clear();
    }

    pub(crate) fn fire(&mut self, source: TraceSource, device: DeviceId, at: SimTime, packet: &Packet) {
        let rec = TraceRecord {
            source,
            device,
            at,
            packet,
        };
        for (filter, sink) in self.sinks.iter_mut() {
            if filter.is_none_or(|f| f == source) {
                sink(&rec);
            }
        }
    }
}

impl std::fmt::Debug for TraceSinks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceSinks")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
