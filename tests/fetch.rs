//! End-to-end tests of the Beszel client against a canned local HTTP server.

use std::sync::Arc;
use std::time::Duration;

use beszel_glance::{
    prepare_snapshot, BeszelClient, FetchError, StatusFetcher, WidgetConfig, WidgetState,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

const RECORDS: &str = r#"{
    "items": [
        {
            "id": "first", "name": "nas", "status": "up",
            "info": {"u": 5400, "cpu": 12.5, "mp": 45.2, "dp": 61, "b": 2048, "bb": 5120,
                     "dt": 48, "la": [0.1, 1.23456, 0]}
        },
        {
            "id": "second", "name": "nas", "status": "down",
            "info": {"u": 1, "cpu": 0, "mp": 0, "dp": 0, "b": 0, "bb": 0, "dt": 0, "la": [0, 0, 0]}
        }
    ],
    "page": 1, "perPage": 30, "totalItems": 2, "totalPages": 1
}"#;

const EMPTY: &str = r#"{"items": [], "page": 1, "perPage": 30, "totalItems": 0, "totalPages": 0}"#;

/// Serve one canned response and hand back the raw request head.
async fn serve_once(
    status_line: &'static str,
    body: &'static str,
) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let _ = tx.send(String::from_utf8_lossy(&request).into_owned());

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    (format!("http://{}", addr), rx)
}

fn config(base_url: String) -> WidgetConfig {
    WidgetConfig {
        base_url,
        api_token: "s3cret".to_string(),
        server_name: "nas".to_string(),
    }
}

#[tokio::test]
async fn test_fetch_selects_first_item_and_normalizes() {
    let (base_url, request) = serve_once("200 OK", RECORDS).await;
    let client = BeszelClient::builder().build().unwrap();

    let status = client.fetch(&config(base_url)).await.unwrap();
    assert_eq!(status.status, "up");
    assert_eq!(status.uptime, "1h 30m");
    assert_eq!(status.load, "0.10, 1.23, 0.00");
    assert_eq!(status.read_speed, "2.0K");
    assert_eq!(status.write_speed, "5.0K");
    assert_eq!(status.disk_usage, "61%");

    let request = request.await.unwrap();
    assert!(request.starts_with("GET /api/collections/systems/records?filter="));
    assert!(request.contains("name=%27nas%27") || request.contains("name='nas'"));
    assert!(request
        .lines()
        .any(|line| line.eq_ignore_ascii_case("authorization: Bearer s3cret")));
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let (base_url, _request) = serve_once("500 Internal Server Error", "{}").await;
    let client = BeszelClient::builder().build().unwrap();

    let err = client.fetch(&config(base_url)).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 500, .. }));
    assert_eq!(
        err.to_string(),
        "Failed to fetch server status: 500 Internal Server Error"
    );
}

#[tokio::test]
async fn test_unauthorized_is_reported() {
    let (base_url, _request) = serve_once("401 Unauthorized", "{}").await;
    let client = BeszelClient::builder().build().unwrap();

    let err = client.fetch(&config(base_url)).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_server_reason_phrase_is_kept() {
    let (base_url, _request) = serve_once("599 Upstream Gave Up", "{}").await;
    let client = BeszelClient::builder().build().unwrap();

    let err = client.fetch(&config(base_url)).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to fetch server status: 599 Upstream Gave Up"
    );
}

#[tokio::test]
async fn test_missing_reason_phrase_has_no_trailing_space() {
    let (base_url, _request) = serve_once("599 ", "{}").await;
    let client = BeszelClient::builder().build().unwrap();

    let err = client.fetch(&config(base_url)).await.unwrap_err();
    assert_eq!(err.status(), Some(599));
    assert_eq!(err.to_string(), "Failed to fetch server status: 599");
}

#[tokio::test]
async fn test_zero_items_is_not_found() {
    let (base_url, _request) = serve_once("200 OK", EMPTY).await;
    let client = BeszelClient::builder().build().unwrap();

    let err = client.fetch(&config(base_url)).await.unwrap_err();
    assert!(matches!(err, FetchError::NotFound { ref server_name } if server_name == "nas"));
    assert_eq!(err.to_string(), "No server found with name: nas");
}

#[tokio::test]
async fn test_bad_body_is_malformed() {
    let (base_url, _request) = serve_once("200 OK", r#"{"items": "nope"}"#).await;
    let client = BeszelClient::builder().build().unwrap();

    let err = client.fetch(&config(base_url)).await.unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)));
}

#[tokio::test]
async fn test_total_without_items_is_malformed() {
    let (base_url, _request) = serve_once(
        "200 OK",
        r#"{"items": [], "page": 1, "perPage": 30, "totalItems": 3, "totalPages": 1}"#,
    )
    .await;
    let client = BeszelClient::builder().build().unwrap();

    let err = client.fetch(&config(base_url)).await.unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)));
}

#[tokio::test]
async fn test_connection_refused_is_transport() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BeszelClient::builder().build().unwrap();
    let err = client
        .fetch(&config(format!("http://{}", addr)))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
    assert!(err.to_string().starts_with("Failed to fetch server status:"));
}

#[tokio::test]
async fn test_snapshot_error_state_carries_status_code() {
    let (base_url, _request) = serve_once("503 Service Unavailable", "").await;
    let client = Arc::new(BeszelClient::builder().build().unwrap());

    let snapshot =
        prepare_snapshot(Some(&config(base_url)), client, Duration::from_millis(500)).await;
    match snapshot.state() {
        WidgetState::Error(message) => assert!(message.contains("503")),
        other => panic!("expected error state, got {:?}", other),
    }
}

#[tokio::test]
async fn test_snapshot_not_found_is_never_ready() {
    let (base_url, _request) = serve_once("200 OK", EMPTY).await;
    let client = Arc::new(BeszelClient::builder().build().unwrap());

    let snapshot =
        prepare_snapshot(Some(&config(base_url)), client, Duration::from_millis(500)).await;
    assert!(snapshot.server_data().is_none());
    assert_eq!(
        snapshot.error_message(),
        Some("No server found with name: nas")
    );
}
