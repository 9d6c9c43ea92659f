//! 链式拓扑构建
//!
//! n0 - n1 - n2 - ... ，每段一条点对点链路；中间节点把左侧设备收到的包
//! 从右侧设备转发出去，最右侧设备上挂接收端。

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::app::{PacketSource, SinkStats, SourceStats, install_relay, install_sink};
use crate::compress::MAX_INPUT;
use crate::error::{Error, Result};
use crate::net::{ChannelConfig, ChannelId, DataRate, DeviceConfig, DeviceId, LinkConfig, NetWorld};
use crate::ppp::COMP_HEADER_SIZE;
use crate::sim::{SimTime, Simulator};
use tracing::info;

/// 链式场景：链路列表 + 流量参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSpec {
    /// 从源到目的依次排列
    pub links: Vec<LinkConfig>,
    pub packets: u64,
    pub interval_ns: u64,
    /// 每个数据报的载荷字节数（含 6 字节 `CompHeader`）
    pub packet_size: usize,
    pub start_ns: u64,
}

impl Default for ScenarioSpec {
    fn default() -> Self {
        Self::three_hop(DataRate::from_mbps(1), false)
    }
}

impl ScenarioSpec {
    /// 四节点三段链路，两侧 8Mbps，中间一段为 "压缩链路"
    pub fn three_hop(capacity: DataRate, compression_enabled: bool) -> Self {
        let edge = DeviceConfig {
            data_rate: DataRate::from_mbps(8),
            ..DeviceConfig::default()
        };
        let middle = DeviceConfig {
            data_rate: capacity,
            compression_enabled,
            ..DeviceConfig::default()
        };
        Self {
            links: vec![
                LinkConfig::symmetric(edge.clone(), ChannelConfig::default()),
                LinkConfig::symmetric(middle, ChannelConfig::default()),
                LinkConfig::symmetric(edge, ChannelConfig::default()),
            ],
            packets: 10,
            interval_ns: SimTime::from_millis(1).as_nanos(),
            packet_size: 1100,
            start_ns: 0,
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let spec: Self = serde_json::from_str(&raw)?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<()> {
        if self.links.is_empty() {
            return Err(Error::Config("scenario needs at least one link".into()));
        }
        if self.packet_size < COMP_HEADER_SIZE || self.packet_size > MAX_INPUT {
            return Err(Error::Config(format!(
                "packet_size must be within {}..={} bytes, got {}",
                COMP_HEADER_SIZE, MAX_INPUT, self.packet_size
            )));
        }
        Ok(())
    }
}

/// 构建好的链
#[derive(Debug)]
pub struct Chain {
    /// 最左侧发送设备
    pub src: DeviceId,
    /// 最右侧接收设备
    pub dst: DeviceId,
    pub links: Vec<(DeviceId, DeviceId, ChannelId)>,
    pub sink: Arc<Mutex<SinkStats>>,
}

/// 构建链式拓扑并安装转发与接收端
pub fn build_chain(world: &mut NetWorld, spec: &ScenarioSpec) -> Result<Chain> {
    spec.validate()?;
    let links = spec
        .links
        .iter()
        .map(|l| world.net.connect(l))
        .collect::<Vec<_>>();

    for pair in links.windows(2) {
        let (_, left_rx, _) = pair[0];
        let (right_tx, _, _) = pair[1];
        install_relay(&mut world.net, left_rx, right_tx);
    }

    let (src, _, _) = links[0];
    let (_, dst, _) = links[links.len() - 1];
    let sink = install_sink(&mut world.net, dst);
    info!(hops = links.len(), src = ?src, dst = ?dst, "链式拓扑已构建");
    Ok(Chain {
        src,
        dst,
        links,
        sink,
    })
}

impl Chain {
    /// 在源设备上调度定时发包
    pub fn schedule_traffic(
        &self,
        world: &NetWorld,
        sim: &mut Simulator,
        spec: &ScenarioSpec,
    ) -> Arc<Mutex<SourceStats>> {
        let stats = Arc::new(Mutex::new(SourceStats::default()));
        sim.schedule(
            SimTime(spec.start_ns),
            PacketSource {
                device: self.src,
                dest: world.net.remote(self.src),
                payload_bytes: spec.packet_size,
                remaining: spec.packets,
                interval: SimTime(spec.interval_ns),
                next_seq: 0,
                stats: stats.clone(),
            },
        );
        stats
    }
}
