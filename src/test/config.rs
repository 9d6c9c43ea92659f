use crate::Error;
use crate::net::{
    ChannelConfig, DEFAULT_MTU, DataRate, DeviceConfig, ErrorModel, ErrorModelSpec, LinkConfig,
    ListErrorModel, Mac48Address, Packet, PeriodicErrorModel,
};
use crate::sim::SimTime;
use crate::topo::ScenarioSpec;

#[test]
fn data_rate_parses_common_suffixes() {
    assert_eq!("8Mbps".parse::<DataRate>().expect("rate"), DataRate::from_mbps(8));
    assert_eq!("32768b/s".parse::<DataRate>().expect("rate"), DataRate(32_768));
    assert_eq!("1.5Gbps".parse::<DataRate>().expect("rate"), DataRate(1_500_000_000));
    assert_eq!("100kb/s".parse::<DataRate>().expect("rate"), DataRate(100_000));
    assert_eq!("64Kbps".parse::<DataRate>().expect("rate"), DataRate(64_000));
    assert_eq!("2Mb/s".parse::<DataRate>().expect("rate"), DataRate(2_000_000));
    assert!(matches!("fast".parse::<DataRate>(), Err(Error::InvalidDataRate(_))));
    assert!(matches!("8 furlongs".parse::<DataRate>(), Err(Error::InvalidDataRate(_))));
}

#[test]
fn data_rate_tx_time_rounds_up() {
    let r = DataRate::from_mbps(8);
    assert_eq!(r.tx_time(1000), SimTime::from_millis(1));
    assert_eq!(r.tx_time(0), SimTime::ZERO);
    assert_eq!(DataRate(3).tx_time(1), SimTime(2_666_666_667));
}

#[test]
fn mac_address_text_form() {
    let a: Mac48Address = "00:11:22:aa:bb:cc".parse().expect("mac");
    assert_eq!(a.0, [0x00, 0x11, 0x22, 0xaa, 0xbb, 0xcc]);
    assert_eq!(a.to_string(), "00:11:22:aa:bb:cc");
    assert_eq!(Mac48Address::from_index(258).to_string(), "00:00:00:00:01:02");
    assert!(Mac48Address::BROADCAST.is_broadcast());
    assert!(Mac48Address::MULTICAST_V4.is_group());
    assert!(!a.is_group());
    for bad in ["00:11:22:aa:bb", "00:11:22:aa:bb:cc:dd", "0:11:22:aa:bb:cc", "zz:11:22:aa:bb:cc"] {
        assert!(matches!(bad.parse::<Mac48Address>(), Err(Error::InvalidAddress(_))), "{bad}");
    }
}

#[test]
fn device_config_defaults_from_empty_json() {
    let cfg: DeviceConfig = serde_json::from_str("{}").expect("parse");
    assert_eq!(cfg, DeviceConfig::default());
    assert_eq!(cfg.mtu, DEFAULT_MTU);
    assert_eq!(cfg.data_rate, DataRate(32_768));
    assert_eq!(cfg.interframe_gap(), SimTime::ZERO);
    assert!(!cfg.compression_enabled);
    assert!(cfg.error_model.is_none());
}

#[test]
fn device_config_full_json() {
    let raw = r#"{
        "mtu": 1200,
        "address": "02:00:00:00:00:0a",
        "data_rate": "8Mbps",
        "interframe_gap_ns": 960,
        "queue_max_packets": 4,
        "compression_enabled": true,
        "error_model": { "kind": "periodic", "every": 3 }
    }"#;
    let cfg: DeviceConfig = serde_json::from_str(raw).expect("parse");
    assert_eq!(cfg.mtu, 1200);
    assert_eq!(cfg.address, Some(Mac48Address([2, 0, 0, 0, 0, 10])));
    assert_eq!(cfg.data_rate, DataRate::from_mbps(8));
    assert_eq!(cfg.interframe_gap(), SimTime(960));
    assert_eq!(cfg.queue_max_packets, 4);
    assert!(cfg.compression_enabled);
    assert_eq!(cfg.error_model, Some(ErrorModelSpec::Periodic { every: 3 }));

    let back: DeviceConfig =
        serde_json::from_str(&serde_json::to_string(&cfg).expect("ser")).expect("de");
    assert_eq!(back, cfg);
}

#[test]
fn bad_values_in_json_are_rejected() {
    assert!(serde_json::from_str::<DeviceConfig>(r#"{"data_rate":"lots"}"#).is_err());
    assert!(serde_json::from_str::<DeviceConfig>(r#"{"address":"nope"}"#).is_err());
    assert!(serde_json::from_str::<DeviceConfig>(r#"{"error_model":{"kind":"gaussian"}}"#).is_err());
}

#[test]
fn link_config_symmetric_copies_device() {
    let dev = DeviceConfig {
        compression_enabled: true,
        ..DeviceConfig::default()
    };
    let link = LinkConfig::symmetric(dev.clone(), ChannelConfig { delay_ns: 5 });
    assert_eq!(link.a, dev);
    assert_eq!(link.b, dev);
    assert_eq!(link.channel.delay_ns, 5);
}

#[test]
fn error_models_decide_per_frame() {
    let pkt = |uid| Packet::new(uid, vec![0; 4]);

    let mut list = ListErrorModel::new([2, 4]);
    assert!(!list.is_corrupt(&pkt(1)));
    assert!(list.is_corrupt(&pkt(2)));
    list.disable();
    assert!(!list.is_corrupt(&pkt(4)));
    list.enable();
    assert!(list.is_corrupt(&pkt(4)));

    let mut every_third = PeriodicErrorModel::new(3);
    let hits: Vec<bool> = (0..6).map(|i| every_third.is_corrupt(&pkt(i))).collect();
    assert_eq!(hits, vec![false, false, true, false, false, true]);
    // 禁用期间不计数，恢复后从原位置继续
    every_third.disable();
    assert!(!every_third.is_corrupt(&pkt(6)));
    assert!(!every_third.is_corrupt(&pkt(7)));
    every_third.enable();
    assert!(!every_third.is_corrupt(&pkt(8)));
    assert!(!every_third.is_corrupt(&pkt(9)));
    assert!(every_third.is_corrupt(&pkt(10)));

    let mut all = ErrorModelSpec::Periodic { every: 1 }.build();
    assert!(all.is_corrupt(&pkt(0)));
    assert!(all.is_corrupt(&pkt(1)));
}

#[test]
#[should_panic(expected = "period must be positive")]
fn periodic_error_model_rejects_zero() {
    PeriodicErrorModel::new(0);
}

#[test]
fn scenario_spec_defaults_and_validation() {
    let spec = ScenarioSpec::default();
    assert_eq!(spec.links.len(), 3);
    assert_eq!(spec.packets, 10);
    assert_eq!(spec.packet_size, 1100);
    assert_eq!(spec.interval_ns, 1_000_000);
    assert_eq!(spec.links[0].a.data_rate, DataRate::from_mbps(8));
    spec.validate().expect("default is valid");

    let parsed: ScenarioSpec = serde_json::from_str(r#"{"packets": 3}"#).expect("parse");
    assert_eq!(parsed.packets, 3);
    assert_eq!(parsed.links.len(), 3);

    let empty = ScenarioSpec {
        links: Vec::new(),
        ..ScenarioSpec::default()
    };
    assert!(matches!(empty.validate(), Err(Error::Config(_))));

    let tiny = ScenarioSpec {
        packet_size: 5,
        ..ScenarioSpec::default()
    };
    assert!(matches!(tiny.validate(), Err(Error::Config(_))));
}
