use crate::net::{DataRate, NetWorld, TraceSource};
use crate::sim::{SimTime, Simulator};
use crate::topo::{ScenarioSpec, build_chain};
use crate::viz::VizEventKind;

fn run(spec: &ScenarioSpec) -> (NetWorld, Simulator, crate::topo::Chain, u64) {
    let mut world = NetWorld::new();
    let mut sim = Simulator::default();
    let chain = build_chain(&mut world, spec).expect("build chain");
    let source = chain.schedule_traffic(&world, &mut sim, spec);
    sim.run(&mut world);
    let sent = source.lock().expect("source lock").sent;
    (world, sim, chain, sent)
}

#[test]
fn three_hop_chain_delivers_every_datagram_in_order() {
    let spec = ScenarioSpec::three_hop(DataRate::from_mbps(8), false);
    let (world, _sim, chain, sent) = run(&spec);

    assert_eq!(sent, 10);
    let sink = chain.sink.lock().expect("sink lock");
    assert_eq!(sink.received, 10);
    assert_eq!(sink.bad_magic, 0);
    assert_eq!(sink.seqs, (0..10).collect::<Vec<u32>>());
    assert_eq!(sink.bytes, 10 * 1100);
    assert_eq!(world.net.total_stats().tx_drops, 0);
    assert_eq!(chain.links.len(), 3);
}

#[test]
fn compression_link_is_transparent_end_to_end() {
    let spec = ScenarioSpec::three_hop(DataRate::from_mbps(1), true);
    let (world, _sim, chain, _) = run(&spec);

    let sink = chain.sink.lock().expect("sink lock");
    assert_eq!(sink.received, 10);
    assert_eq!(sink.bad_magic, 0);
    assert_eq!(sink.bytes, 10 * 1100);

    // 中间链路发送的字节数小于明文帧长
    let (mid_tx, _, _) = chain.links[1];
    let stats = world.net.device(mid_tx).stats();
    assert_eq!(stats.tx_frames, 10);
    assert!(stats.tx_bytes < 10 * 1102, "tx_bytes = {}", stats.tx_bytes);
}

#[test]
fn compression_shortens_the_slow_hop() {
    let plain = ScenarioSpec::three_hop(DataRate::from_mbps(1), false);
    let compressed = ScenarioSpec::three_hop(DataRate::from_mbps(1), true);
    let (_, sim_plain, _, _) = run(&plain);
    let (_, sim_comp, _, _) = run(&compressed);
    assert!(sim_comp.now() < sim_plain.now());
    assert!(sim_plain.now() > SimTime::from_millis(10));
}

#[test]
fn viz_records_meta_first_then_traces() {
    let spec = ScenarioSpec {
        packets: 2,
        ..ScenarioSpec::default()
    };
    let mut world = NetWorld::new();
    let mut sim = Simulator::default();
    let chain = build_chain(&mut world, &spec).expect("build chain");
    let viz = world.net.enable_viz();
    chain.schedule_traffic(&world, &mut sim, &spec);
    sim.run(&mut world);

    let v = viz.lock().expect("viz lock");
    match &v.events[0].kind {
        VizEventKind::Meta { devices, channels } => {
            assert_eq!(devices.len(), 6);
            assert_eq!(channels.len(), 3);
            assert_eq!(channels[1].devices, vec![2, 3]);
        }
        other => panic!("first event must be meta, got {other:?}"),
    }
    assert_eq!(v.count(TraceSource::MacRx), 2 * 3);
    assert_eq!(v.count(TraceSource::PhyTxBegin), 2 * 3);

    let json = v.to_json_pretty().expect("json");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("parse");
    assert_eq!(parsed[0]["kind"], "meta");
    assert_eq!(parsed[1]["kind"], "trace");
    assert_eq!(parsed[1]["source"], "mac_tx");
}
