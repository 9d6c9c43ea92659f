use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "p2psim-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(dir: &PathBuf, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

/// 从 `done @ ..., sent=10, received=10, ...` 中取某个字段
fn summary_field(stdout: &str, key: &str) -> Option<u64> {
    let line = stdout.lines().find(|l| l.starts_with("done @"))?;
    line.split(", ")
        .find_map(|kv| kv.strip_prefix(&format!("{key}=")))
        .and_then(|v| v.trim().parse().ok())
}

/// 运行 p2p_chain 并要求退出码为 0，返回 stdout
fn run_ok(args: &[&str]) -> String {
    let output = run_chain(args);
    assert!(
        output.status.success(),
        "p2p_chain failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn run_chain(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_p2p_chain"))
        .args(args)
        .output()
        .expect("run p2p_chain")
}

#[test]
fn p2p_chain_defaults_deliver_all_packets() {
    let stdout = run_ok(&[]);
    assert_eq!(summary_field(&stdout, "sent"), Some(10));
    assert_eq!(summary_field(&stdout, "received"), Some(10));
    assert_eq!(summary_field(&stdout, "tx_drops"), Some(0));
    assert_eq!(summary_field(&stdout, "rx_drops"), Some(0));
}

#[test]
fn p2p_chain_with_compression_delivers_all_packets() {
    let stdout = run_ok(&[
        "--capacity-mbps",
        "2",
        "--compression-enabled",
        "--packets",
        "5",
        "--packet-size",
        "800",
    ]);
    assert_eq!(summary_field(&stdout, "sent"), Some(5));
    assert_eq!(summary_field(&stdout, "received"), Some(5));
}

#[test]
fn p2p_chain_writes_viz_json_with_meta_first() {
    let dir = unique_temp_dir("p2p-chain-viz");
    let out_json = dir.join("viz.json");

    run_ok(&["--packets", "2", "--viz-json", out_json.to_str().unwrap()]);

    let raw = fs::read_to_string(&out_json).expect("read viz.json");
    let v: Value = serde_json::from_str(&raw).expect("parse viz.json");
    let arr = v.as_array().expect("viz.json must be a JSON array");
    assert!(arr.len() > 1, "viz.json should contain meta and trace events");
    assert_eq!(
        arr[0].get("kind").and_then(|k| k.as_str()),
        Some("meta"),
        "expected first viz event to be meta"
    );
    let mac_rx = arr
        .iter()
        .filter(|e| e.get("source").and_then(|s| s.as_str()) == Some("mac_rx"))
        .count();
    assert_eq!(mac_rx, 2 * 3);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn p2p_chain_reads_scenario_file() {
    let dir = unique_temp_dir("p2p-chain-config");
    let config = write_file(
        &dir,
        "scenario.json",
        r#"
{
    "links": [
        {
            "a": { "data_rate": "8Mbps" },
            "b": { "data_rate": "8Mbps", "error_model": { "kind": "list", "uids": [1] } },
            "channel": { "delay_ns": 1000 }
        }
    ],
    "packets": 3,
    "interval_ns": 1000000,
    "packet_size": 200
}
        "#,
    );

    let stdout = run_ok(&["--config", config.to_str().unwrap()]);
    assert_eq!(summary_field(&stdout, "sent"), Some(3));
    assert_eq!(summary_field(&stdout, "received"), Some(2));
    assert_eq!(summary_field(&stdout, "rx_drops"), Some(1));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn p2p_chain_exits_nonzero_on_invalid_scenario() {
    let dir = unique_temp_dir("p2p-chain-invalid");
    let config = write_file(&dir, "scenario.json", r#"{ "links": [] }"#);

    let output = run_chain(&["--config", config.to_str().unwrap()]);
    assert!(
        !output.status.success(),
        "expected non-zero exit, got success"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("at least one link"),
        "stderr did not contain expected message: {stderr}"
    );

    let _ = fs::remove_dir_all(&dir);
}
