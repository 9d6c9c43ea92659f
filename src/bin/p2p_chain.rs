//! 链式点对点链路仿真
//!
//! n0 -8Mbps- n1 -capacity- n2 -8Mbps- n3，中间一段可开启载荷压缩；
//! n0 按固定间隔向 n3 发送数据报。

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use p2psim::net::{DataRate, NetWorld};
use p2psim::sim::{SimTime, Simulator};
use p2psim::topo::{ScenarioSpec, build_chain};

#[derive(Debug, Parser)]
#[command(name = "p2p_chain", about = "点对点链路仿真：四节点链，中间为压缩链路")]
struct Args {
    /// 中间链路速率（Mbps）
    #[arg(long, default_value_t = 1)]
    capacity_mbps: u64,
    /// 中间链路两端启用载荷压缩
    #[arg(long)]
    compression_enabled: bool,
    #[arg(long, default_value_t = 10)]
    packets: u64,
    /// 两个数据报之间的间隔（毫秒）
    #[arg(long, default_value_t = 1)]
    interval_ms: u64,
    /// 数据报载荷字节数
    #[arg(long, default_value_t = 1100)]
    packet_size: usize,
    /// JSON 场景文件（覆盖上面所有参数）
    #[arg(long)]
    config: Option<PathBuf>,
    /// 输出可视化事件 JSON
    #[arg(long)]
    viz_json: Option<PathBuf>,
}

fn main() {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> p2psim::Result<()> {
    let spec = match &args.config {
        Some(path) => ScenarioSpec::from_json_file(path)?,
        None => {
            let mut spec =
                ScenarioSpec::three_hop(DataRate::from_mbps(args.capacity_mbps), args.compression_enabled);
            spec.packets = args.packets;
            spec.interval_ns = SimTime::from_millis(args.interval_ms).as_nanos();
            spec.packet_size = args.packet_size;
            spec
        }
    };

    let mut sim = Simulator::default();
    let mut world = NetWorld::new();

    let chain = build_chain(&mut world, &spec)?;
    let viz = args.viz_json.as_ref().map(|_| world.net.enable_viz());
    let source = chain.schedule_traffic(&world, &mut sim, &spec);

    sim.run(&mut world);

    let sent = source.lock().map(|s| s.sent).unwrap_or_default();
    let received = chain.sink.lock().map(|s| s.received).unwrap_or_default();
    let totals = world.net.total_stats();
    println!(
        "done @ {:?}, sent={}, received={}, tx_drops={}, rx_drops={}",
        sim.now(),
        sent,
        received,
        totals.tx_drops,
        totals.rx_drops
    );

    if let (Some(path), Some(viz)) = (&args.viz_json, viz) {
        let json = match viz.lock() {
            Ok(v) => v.to_json_pretty()?,
            Err(_) => return Err(p2psim::Error::Config("viz logger poisoned".into())),
        };
        fs::write(path, json)?;
        eprintln!("viz json written to {}", path.display());
    }
    Ok(())
}
