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
        "osi-sim-rs-{prefix}-{}-{nanos}",
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

fn run_osi_sim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_osi_sim"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run osi_sim")
}

fn layer_lines(stdout: &str) -> Vec<&str> {
    stdout
        .lines()
        .filter(|line| line.starts_with("layer="))
        .collect()
}

#[test]
fn osi_sim_prints_seven_layers_with_growth() {
    let output = run_osi_sim(&["--message", "Hi", "--protocol", "http"]);
    assert!(
        output.status.success(),
        "osi_sim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines = layer_lines(&stdout);
    assert_eq!(lines.len(), 7, "stdout={stdout}");
    assert!(lines[0].starts_with("layer=7 name=Application pdu=Data in_bytes=2 out_bytes=137"));
    assert!(lines[3].contains("pdu=Segment"));
    assert!(lines[3].ends_with("added=20"));
    assert!(lines[6].contains("out_bytes=199 added=0"));
    assert!(stdout.contains("  Dest Port: 80 [00 50]"));
}

#[test]
fn osi_sim_writes_encapsulation_json() {
    let dir = unique_temp_dir("encap-json");
    let out_json = dir.join("encap.json");

    let output = run_osi_sim(&[
        "--protocol",
        "https",
        "--json",
        out_json.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "osi_sim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let raw = fs::read_to_string(&out_json).expect("read encap.json");
    let v: Value = serde_json::from_str(&raw).expect("parse encap.json");
    let arr = v.as_array().expect("encap.json must be a JSON array");
    assert_eq!(arr.len(), 7);
    let numbers: Vec<u64> = arr
        .iter()
        .filter_map(|r| r.get("layer_number").and_then(|n| n.as_u64()))
        .collect();
    assert_eq!(numbers, vec![7, 6, 5, 4, 3, 2, 1]);
    for pair in arr.windows(2) {
        assert_eq!(pair[1]["input"]["hex"], pair[0]["output"]["hex"]);
    }
    assert_eq!(
        arr[1]["header_fields"][0]["hex"].as_str(),
        Some("17"),
        "TLS content type must lead layer 6"
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn osi_sim_walk_visits_handshake_then_every_layer() {
    let output = run_osi_sim(&["--connection", "handshake", "--walk"]);
    assert!(
        output.status.success(),
        "osi_sim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let walk: Vec<&str> = stdout
        .lines()
        .filter(|line| line.starts_with("walk "))
        .collect();
    assert_eq!(walk.len(), 3 + 7 + 7 + 1, "stdout={stdout}");
    assert_eq!(walk[0], "walk phase=handshake handshake_step=1 segment=SYN");
    assert_eq!(walk[2], "walk phase=handshake handshake_step=3 segment=ACK");
    assert_eq!(walk[3], "walk phase=sending step=1 layer=7 name=Application");
    assert_eq!(walk[9], "walk phase=sending step=7 layer=1 name=Physical");
    assert_eq!(walk[10], "walk phase=receiving step=1 layer=1 name=Physical");
    assert_eq!(walk[16], "walk phase=receiving step=7 layer=7 name=Application");
    assert_eq!(walk[17], "walk phase=complete step=8");
}

#[test]
fn osi_sim_writes_viz_json_with_start_first() {
    let dir = unique_temp_dir("viz");
    let out_json = dir.join("viz.json");

    let output = run_osi_sim(&["--viz-json", out_json.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "osi_sim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let raw = fs::read_to_string(&out_json).expect("read viz.json");
    let v: Value = serde_json::from_str(&raw).expect("parse viz.json");
    let arr = v.as_array().expect("viz.json must be a JSON array");
    assert_eq!(arr.len(), 1 + 7 + 7);
    assert_eq!(
        arr[0].get("kind").and_then(|k| k.as_str()),
        Some("start"),
        "expected first viz event to be start"
    );
    assert_eq!(
        arr.last().and_then(|e| e.get("phase")).and_then(|p| p.as_str()),
        Some("complete")
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn osi_sim_cli_flags_override_config_file() {
    let dir = unique_temp_dir("config");
    let config = write_file(
        &dir,
        "config.json",
        r#"
{
    "message": "from file",
    "protocol": "smtp",
    "dest_address": "10.1.2.3"
}
        "#,
    );

    let output = run_osi_sim(&[
        "--config",
        config.to_str().unwrap(),
        "--protocol",
        "ftp",
    ]);
    assert!(
        output.status.success(),
        "osi_sim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("  Dest Port: 21 [00 15]"), "stdout={stdout}");
    assert!(stdout.contains("  Dest IP: 10.1.2.3 [0a 01 02 03]"), "stdout={stdout}");
    assert!(stdout.contains("  Data: from file"), "stdout={stdout}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn osi_sim_rejects_unreadable_config() {
    let dir = unique_temp_dir("bad-config");
    let config = write_file(&dir, "config.json", r#"{ "medium": "smoke signals" }"#);

    let output = run_osi_sim(&["--config", config.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "stderr={stderr}");

    let missing = dir.join("missing.json");
    let output = run_osi_sim(&["--config", missing.to_str().unwrap()]);
    assert!(!output.status.success());

    let _ = fs::remove_dir_all(&dir);
}
