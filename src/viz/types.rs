use serde::{Deserialize, Serialize};

use crate::net::TraceSource;

/// 可视化事件类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VizEventKind {
    /// 仿真/拓扑元信息（作为 t=0 的第一条事件）
    Meta {
        devices: Vec<VizDeviceInfo>,
        channels: Vec<VizChannelInfo>,
    },
    /// 设备 trace 源触发
    Trace { source: TraceSource },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizDeviceInfo {
    pub id: usize,
    pub address: String,
    /// 发送速率（bps）
    pub data_rate_bps: u64,
    pub mtu: u16,
    pub compression_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizChannelInfo {
    pub id: usize,
    pub devices: Vec<usize>,
    /// 单向传播时延（ns）
    pub delay_ns: u64,
}

/// 一个可回放的事件（JSON）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizEvent {
    /// 仿真时间（纳秒，和 `SimTime.0` 同口径）
    pub t_ns: u64,
    pub device: Option<usize>,
    pub uid: Option<u64>,
    /// 帧长（含 PPP 头）
    pub bytes: Option<usize>,
    #[serde(flatten)]
    pub kind: VizEventKind,
}

/// 一个简单的事件收集器（存内存，仿真结束写 JSON 文件）
#[derive(Debug, Default)]
pub struct VizLogger {
    pub events: Vec<VizEvent>,
}

impl VizLogger {
    pub fn push(&mut self, ev: VizEvent) {
        self.events.push(ev);
    }

    /// 某个 trace 源的事件数
    pub fn count(&self, source: TraceSource) -> usize {
        self.events
            .iter()
            .filter(|e| e.kind == VizEventKind::Trace { source })
            .count()
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(&self.events)?)
    }
}
