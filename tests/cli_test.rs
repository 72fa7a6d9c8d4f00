//! End-to-end tests of the `protomap` binary

mod common;

use assert_cmd::prelude::*;
use common::{Project, WEBSOCKET_CLIENT_PY};
use serde_json::Value;
use std::fs;
use std::process::{Command, Output};

/// Binary command isolated from the caller's environment and config files
fn protomap(project: &Project) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_protomap"));
    cmd.current_dir(project.path())
        .env_remove("PROTOMAP_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn list_shows_every_protocol() {
    let project = Project::new();
    let output = protomap(&project).arg("list").output().unwrap();
    output.clone().assert().success();

    let text = stdout(&output);
    assert!(text.contains("Known Protocols:"));
    for name in ["WebSocket", "Socket.IO", "HTTP/REST", "gRPC", "GraphQL", "MQTT"] {
        assert!(text.contains(name), "missing {name} in:\n{text}");
    }
}

#[test]
fn list_filters_by_category() {
    let project = Project::new();
    let output = protomap(&project)
        .args(["list", "-c", "rpc", "-f", "json"])
        .output()
        .unwrap();
    output.clone().assert().success();

    let json: Value = serde_json::from_str(&stdout(&output)).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["key"], "grpc");
}

#[test]
fn compare_unknown_name_still_succeeds() {
    let project = Project::new();
    let output = protomap(&project)
        .args(["compare", "websocket", "unknown_proto_xyz", "-f", "json"])
        .output()
        .unwrap();
    output.clone().assert().success();

    let json: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["websocket"]["complexity"], 3);
    assert_eq!(
        json["unknown_proto_xyz"]["error"],
        "Protocol not found in database"
    );
}

#[test]
fn migrate_rest_to_grpc_is_hard() {
    let project = Project::new();
    let output = protomap(&project)
        .args(["migrate", "http_rest", "grpc", "-f", "json"])
        .output()
        .unwrap();
    output.clone().assert().success();

    let json: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["difficulty"], "HARD");
    assert_eq!(json["from"], "HTTP/REST");
    assert_eq!(json["steps"].as_array().unwrap().len(), 8);
}

#[test]
fn analyze_missing_path_fails() {
    let project = Project::new();
    let output = protomap(&project)
        .args(["analyze", "does/not/exist"])
        .output()
        .unwrap();
    output.clone().assert().failure().code(1);
    assert!(stderr(&output).contains("[X] Error"));
}

#[test]
fn analyze_writes_report_file() {
    let project = Project::new().file("app/client.py", WEBSOCKET_CLIENT_PY);
    let output = protomap(&project)
        .args(["analyze", "app", "-f", "json", "-o", "report.json"])
        .output()
        .unwrap();
    output.clone().assert().success();
    assert!(stdout(&output).contains("[OK] Report saved to:"));

    let report = fs::read_to_string(project.join("report.json")).unwrap();
    let json: Value = serde_json::from_str(&report).unwrap();
    assert_eq!(json["detected_protocols"][0]["key"], "websocket");
    assert!(json["recommendations"].as_array().unwrap().len() <= 5);
}

#[test]
fn analyze_markdown_to_stdout() {
    let project = Project::new().file("app/client.py", WEBSOCKET_CLIENT_PY);
    let output = protomap(&project)
        .args(["analyze", "app", "-f", "markdown", "-r", "realtime"])
        .output()
        .unwrap();
    output.clone().assert().success();
    assert!(stdout(&output).starts_with("# Protocol Analysis Report"));
}

#[test]
fn init_refuses_to_overwrite() {
    let project = Project::new();
    protomap(&project).arg("init").assert().success();
    assert!(project.join(".protomap.toml").exists());

    let output = protomap(&project).arg("init").output().unwrap();
    output.clone().assert().failure();
    assert!(stderr(&output).contains("already exists"));

    protomap(&project).args(["init", "--force"]).assert().success();
}

#[test]
fn config_default_format_applies() {
    let project = Project::new().file(
        "custom.toml",
        "[output]\ndefault_format = \"json\"\n",
    );
    let output = protomap(&project)
        .args(["--config", "custom.toml", "migrate", "websocket", "sse"])
        .output()
        .unwrap();
    output.clone().assert().success();

    let json: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["to"], "Server-Sent Events (SSE)");
}

#[test]
fn discovered_config_is_used() {
    let project = Project::new().file(".protomap.toml", "[output]\ndefault_format = \"json\"\n");
    let output = protomap(&project).arg("list").output().unwrap();
    output.clone().assert().success();
    assert!(serde_json::from_str::<Value>(&stdout(&output)).is_ok());
}

#[test]
fn invalid_config_file_is_an_error() {
    let project = Project::new().file("bad.toml", "[output]\ndefault_format = \"yaml\"\n");
    let output = protomap(&project)
        .args(["--config", "bad.toml", "list"])
        .output()
        .unwrap();
    output.clone().assert().failure();
    assert!(stderr(&output).contains("[X] Error"));
}
