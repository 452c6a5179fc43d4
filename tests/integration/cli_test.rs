//! End-to-end tests of the `orange` binary in one-shot mode.

use super::common::{exec_body, missing_config, refused_url, TestServer};
use serde_json::{json, Value};
use tokio::process::Command;

/// Runs the binary with the given arguments, returning (exit code, stdout, stderr).
async fn run_orange(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_orange"))
        .args(args)
        .arg("--config")
        .arg(missing_config())
        .env_remove("ORANGE_SERVER_URL")
        .env("RUST_LOG", "off")
        .output()
        .await
        .expect("Failed to execute command");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}

#[tokio::test]
async fn test_execute_prints_table() {
    let server = TestServer::canned(
        200,
        exec_body(
            0.5,
            json!([{ "headers": ["id", "name"], "data": [[1, "alice"], [2, null]] }]),
        ),
    )
    .await;
    let url = server.url();

    let (code, stdout, _) = run_orange(&["-s", &url, "-e", "select id, name from users"]).await;

    assert_eq!(code, 0);
    assert!(stdout.contains("id | name"));
    assert!(stdout.contains("2  | NULL"));
    assert!(stdout.contains("1 statement, 0 failed, time 0.5"));
    assert_eq!(
        server.requests()[0].json(),
        json!({ "sql": "select id, name from users" })
    );
}

#[tokio::test]
async fn test_statement_errors_do_not_fail_the_run() {
    let server = TestServer::canned(
        200,
        exec_body(
            5.0,
            json!([{ "error": "syntax error" }, { "headers": ["x"], "data": [] }]),
        ),
    )
    .await;
    let url = server.url();

    let (code, stdout, _) = run_orange(&["-s", &url, "-e", "selec 1; select x from t"]).await;

    assert_eq!(code, 0);
    assert!(stdout.contains("Statement 1: ERROR syntax error"));
    assert!(stdout.contains("2 statements, 1 failed"));
}

#[tokio::test]
async fn test_json_output() {
    let server = TestServer::canned(200, r#"{"time": 12, "results": "[{\"headers\":[\"a\"],\"data\":[[1]]}]"}"#).await;
    let url = server.url();

    let (code, stdout, _) = run_orange(&["-s", &url, "-o", "json", "-e", "select a"]).await;

    assert_eq!(code, 0);
    let value: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        value,
        json!({ "time": 12.0, "results": [{ "headers": ["a"], "data": [[1]] }] })
    );
}

#[tokio::test]
async fn test_invalid_response_exits_nonzero() {
    let server = TestServer::canned(200, r#"{"results": "[]"}"#).await;
    let url = server.url();

    let (code, stdout, stderr) = run_orange(&["-s", &url, "-e", "select 1"]).await;

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Invalid Response"));
}

#[tokio::test]
async fn test_unreachable_server_exits_nonzero() {
    let url = refused_url().await;

    let (code, _, stderr) = run_orange(&["-s", &url, "-e", "select 1"]).await;

    assert_eq!(code, 1);
    assert!(stderr.contains("Transport Error"));
}

#[tokio::test]
async fn test_execute_file() {
    let server = TestServer::canned(200, exec_body(1.0, json!([]))).await;
    let url = server.url();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.sql");
    std::fs::write(&path, "create table t (n int);\ninsert into t values (1);\n").unwrap();

    let (code, stdout, _) = run_orange(&["-s", &url, "-f", path.to_str().unwrap()]).await;

    assert_eq!(code, 0);
    assert!(stdout.contains("0 statements, 0 failed, time 1"));
    assert_eq!(
        server.requests()[0].json(),
        json!({ "sql": "create table t (n int);\ninsert into t values (1);\n" })
    );
}

#[tokio::test]
async fn test_missing_file_exits_nonzero() {
    let (code, _, stderr) = run_orange(&["-f", "/definitely/not/here.sql"]).await;

    assert_eq!(code, 1);
    assert!(stderr.contains("I/O Error"));
}
