//! Execution client tests against a local HTTP server.

use super::common::{echo_sql, exec_body, refused_url, silent_server, TestServer};
use futures::future::join_all;
use orange_console::config::ServerConfig;
use orange_console::exec::{ExecutionClient, ExecutionResult, StatementOutcome};
use pretty_assertions::assert_eq;
use serde_json::json;

fn client_for(url: &str) -> ExecutionClient {
    ExecutionClient::new(&ServerConfig::new(url)).unwrap()
}

#[tokio::test]
async fn test_one_request_with_verbatim_body() {
    let server = TestServer::canned(200, exec_body(1.0, json!([]))).await;
    let client = client_for(&server.url());
    let sql = "  SELECT 1;\n\tselect 'it''s' AS \"q\"; -- trailing  ";

    tokio_test::assert_ok!(client.execute(sql).await);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/api/exec");
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    assert_eq!(request.json(), json!({ "sql": sql }));
}

#[tokio::test]
async fn test_empty_sql_is_still_sent() {
    let server = TestServer::canned(200, exec_body(0.0, json!([]))).await;
    let client = client_for(&server.url());

    let response = client.execute("").await.unwrap();

    assert!(response.results.is_empty());
    assert_eq!(server.requests().len(), 1);
    assert_eq!(server.requests()[0].json(), json!({ "sql": "" }));
}

#[tokio::test]
async fn test_decodes_double_encoded_results() {
    let server = TestServer::canned(
        200,
        r#"{"time": 12, "results": "[{\"headers\":[\"a\"],\"data\":[[1]]}]"}"#,
    )
    .await;
    let client = client_for(&server.url());

    let response = client.execute("select a from t").await.unwrap();

    assert_eq!(response.time, 12.0);
    assert_eq!(
        response.results,
        vec![ExecutionResult::rows(
            vec!["a".to_string()],
            vec![vec![json!(1)]]
        )]
    );
}

#[tokio::test]
async fn test_partial_failure_keeps_sibling_results() {
    let server = TestServer::canned(
        200,
        r#"{"time": 5, "results": "[{\"error\":\"syntax error\"},{\"headers\":[\"x\"],\"data\":[]}]"}"#,
    )
    .await;
    let client = client_for(&server.url());

    let response = client.execute("selec 1; select x from t").await.unwrap();

    assert_eq!(response.time, 5.0);
    assert_eq!(response.results.len(), 2);
    assert_eq!(
        response.results[0].outcome(),
        StatementOutcome::Failed {
            message: "syntax error"
        }
    );
    assert_eq!(
        response.results[1].outcome(),
        StatementOutcome::Rows {
            headers: &["x".to_string()],
            data: &[]
        }
    );
}

#[tokio::test]
async fn test_empty_result_list_is_valid() {
    let server = TestServer::canned(200, r#"{"time": 7, "results": "[]"}"#).await;
    let client = client_for(&server.url());

    let response = client.execute("").await.unwrap();

    assert_eq!(response.time, 7.0);
    assert!(response.results.is_empty());
}

#[tokio::test]
async fn test_missing_time_is_invalid_shape() {
    let server = TestServer::canned(200, r#"{"results": "[]"}"#).await;
    let client = client_for(&server.url());

    let err = client.execute("select 1").await.unwrap_err();

    assert!(err.is_invalid_shape(), "unexpected error: {err:?}");
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_missing_results_is_invalid_shape() {
    let server = TestServer::canned(200, r#"{"time": 1}"#).await;
    let client = client_for(&server.url());

    let err = client.execute("select 1").await.unwrap_err();
    assert!(err.is_invalid_shape());
}

#[tokio::test]
async fn test_non_json_body_is_invalid_shape() {
    let server = TestServer::canned(200, "<html>hello</html>").await;
    let client = client_for(&server.url());

    let err = client.execute("select 1").await.unwrap_err();
    assert!(err.is_invalid_shape());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = client_for(&refused_url().await);

    let err = client.execute("select 1").await.unwrap_err();

    assert!(err.is_transport(), "unexpected error: {err:?}");
    assert!(!err.is_invalid_shape());
}

#[tokio::test]
async fn test_server_error_status_is_transport_error() {
    let server = TestServer::canned(500, r#"{"time": 1, "results": "[]"}"#).await;
    let client = client_for(&server.url());

    let err = client.execute("select 1").await.unwrap_err();

    assert!(err.is_transport(), "unexpected error: {err:?}");
    assert!(err.to_string().contains("500"));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let (url, _task) = silent_server().await;
    let client = ExecutionClient::new(&ServerConfig::new(url).with_timeout(1)).unwrap();

    let err = client.execute("select sleep(100)").await.unwrap_err();

    assert!(err.is_transport(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let server = TestServer::with_handler(echo_sql).await;
    let client = client_for(&server.url());

    let batches: Vec<String> = (0..8).map(|i| format!("select {i};")).collect();
    let responses = join_all(batches.iter().map(|sql| client.execute(sql))).await;

    for (sql, response) in batches.iter().zip(responses) {
        let response = response.unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].data, Some(vec![vec![json!(sql)]]));
    }
    assert_eq!(server.requests().len(), batches.len());
}
