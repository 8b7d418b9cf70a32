#![cfg(feature = "cli")]

use std::process::{Command, Output};

fn strpack(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_strpack"))
        .env_remove("STRPACK_FORMAT")
        .env_remove("STRPACK_ENCODING")
        .env_remove("STRPACK_LOG_LEVEL")
        .args(["--log-level", "error"])
        .args(args)
        .output()
        .expect("strpack should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn pack_prints_hex_buffer() {
    let output = strpack(&["--format", "json", "pack", "zB", "\"abc\"", "247"]);
    let json = stdout_json(&output);
    assert_eq!(json["data"], "61626300f7");
    assert_eq!(json["size"], 5);
    assert_eq!(json["encoding"], "hex");
}

#[test]
fn pack_aligns_and_sign_extends() {
    let output = strpack(&[
        "--format",
        "json",
        "pack",
        ">!8 b Xh i4 i8 c1 Xi8",
        "-12",
        "100",
        "200",
        "\"x\"",
    ]);
    let json = stdout_json(&output);
    assert_eq!(
        json["data"],
        "f40000000000006400000000000000c87800000000000000"
    );
    assert_eq!(json["size"], 24);
}

#[test]
fn pack_raw_writes_bytes() {
    let output = strpack(&["--format", "raw", "pack", "<h", "513"]);
    assert!(output.status.success());
    assert_eq!(output.stdout, vec![0x01, 0x02]);
}

#[test]
fn pack_base64_encoding_from_env() {
    let output = Command::new(env!("CARGO_BIN_EXE_strpack"))
        .env("STRPACK_ENCODING", "base64")
        .args(["--format", "json", "pack", "zB", "\"abc\"", "247"])
        .output()
        .expect("strpack should run");
    let json = stdout_json(&output);
    assert_eq!(json["data"], "YWJjAPc=");
}

#[test]
fn unpack_reports_values_and_consumed() {
    let output = strpack(&["--format", "json", "unpack", "zB c2", "61626300f778797a"]);
    let json = stdout_json(&output);
    assert_eq!(json["consumed"], 7);
    let values = json["values"].as_array().expect("values array");
    assert_eq!(values.len(), 3);
    assert_eq!(values[0]["value"], "abc");
    assert_eq!(values[1]["value"], 247);
    assert_eq!(values[1]["option"], "B");
    assert_eq!(values[2]["hex"], "7879");
}

#[test]
fn unpack_honours_offset() {
    let output = strpack(&[
        "--format", "json", "unpack", "<h", "ff0102", "--offset", "1",
    ]);
    let json = stdout_json(&output);
    assert_eq!(json["values"][0]["value"], 513);
}

#[test]
fn unpack_short_input_is_data_invalid() {
    let output = strpack(&["--format", "json", "unpack", "<i4", "0102"]);
    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unpack failed"), "stderr: {stderr}");
}

#[test]
fn bad_hex_input_is_data_invalid() {
    let output = strpack(&["unpack", "b", "0g"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn malformed_spec_is_data_invalid() {
    let output = strpack(&["layout", "b q"]);
    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'q' at offset 2"), "stderr: {stderr}");
}

#[test]
fn missing_value_is_usage_error() {
    let output = strpack(&["pack", "b b", "1"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn layout_lists_directive_positions() {
    let output = strpack(&["--format", "json", "layout", ">!8 b Xh i4 i8"]);
    let json = stdout_json(&output);
    assert_eq!(json["size"], 16);
    let directives = json["directives"].as_array().expect("directives array");
    let positions: Vec<u64> = directives
        .iter()
        .map(|d| d["position"].as_u64().expect("position"))
        .collect();
    assert_eq!(positions, vec![0, 2, 4, 8]);
    assert_eq!(directives[1]["kind"], "padalign");
    assert_eq!(directives[3]["endian"], "big");
}

#[test]
fn encode_and_decode_base64() {
    let output = strpack(&["--format", "pretty", "-e", "base64", "encode", "abc"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "YWJj");

    let output = strpack(&["--format", "raw", "-e", "base64", "decode", "YWI="]);
    assert!(output.status.success());
    assert_eq!(output.stdout, b"ab");
}

#[test]
fn decode_reports_invalid_position() {
    let output = strpack(&["-e", "base64", "decode", "YW]j"]);
    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("position 2"), "stderr: {stderr}");
}

#[test]
fn version_prints_package_version() {
    let output = strpack(&["version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = format!("strpack {}", env!("CARGO_PKG_VERSION"));
    assert_eq!(stdout.trim(), expected);
}

#[test]
fn extended_version_reports_build_details() {
    let output = strpack(&["version", "--extended"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("name: strpack"));
    assert!(stdout.lines().any(|line| line.starts_with("profile: ")));
    assert!(stdout.contains("max_align: 8"));
}
