//! HTTP grading client against a throwaway local server

use essay_grader::grading::{GradingClient, GradingError, GradingResult, HttpGradingClient};
use essay_grader::{GraderConfig, SubmissionController};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::{Position, Url};

/// Accept one connection, answer it with `status` and `body`, return the raw request
async fn serve_once(status: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    let url = Url::parse(&format!("http://{}/grade-essay", addr)).unwrap();
    (url, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buffer);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if buffer.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buffer).into_owned()
}

const SAMPLE_BODY: &str = r#"{"grade": 8, "percentage": 85, "feedback": "Good structure", "grammar_errors": 2, "vocabulary_diversity": 0.62, "readability_score": 65.3}"#;

fn sample_result() -> GradingResult {
    GradingResult {
        grade: 8.0,
        percentage: 85.0,
        feedback: "Good structure".to_string(),
        grammar_errors: 2,
        vocabulary_diversity: 0.62,
        readability_score: 65.3,
    }
}

#[tokio::test]
async fn test_successful_grade() {
    let (url, server) = serve_once("200 OK", SAMPLE_BODY).await;
    let client = HttpGradingClient::new(url, Duration::from_secs(5)).unwrap();

    let result = client.grade("Hello world").await.unwrap();
    assert_eq!(result, sample_result());

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /grade-essay HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("content-type: application/json"));

    let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(json, serde_json::json!({ "essay_text": "Hello world" }));
}

#[tokio::test]
async fn test_server_error_body_is_reported() {
    let (url, server) = serve_once(
        "400 Bad Request",
        r#"{"error": "No valid essay text provided"}"#,
    )
    .await;
    let client = HttpGradingClient::new(url, Duration::from_secs(5)).unwrap();

    match client.grade("   ").await {
        Err(GradingError::Status { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "No valid essay text provided");
        }
        other => panic!("expected status error, got {:?}", other),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_internal_server_error() {
    let (url, server) = serve_once("500 Internal Server Error", r#"{"error": "boom"}"#).await;
    let client = HttpGradingClient::new(url, Duration::from_secs(5)).unwrap();

    let err = client.grade("An essay").await.unwrap_err();
    assert!(matches!(err, GradingError::Status { status: 500, .. }));
    server.await.unwrap();
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let (url, server) = serve_once("200 OK", "<html>not json</html>").await;
    let client = HttpGradingClient::new(url, Duration::from_secs(5)).unwrap();

    let err = client.grade("An essay").await.unwrap_err();
    assert!(matches!(err, GradingError::InvalidResponse { .. }));
    server.await.unwrap();
}

#[tokio::test]
async fn test_schema_mismatch_is_invalid_response() {
    let (url, server) = serve_once("200 OK", r#"{"grade": "eight"}"#).await;
    let client = HttpGradingClient::new(url, Duration::from_secs(5)).unwrap();

    let err = client.grade("An essay").await.unwrap_err();
    assert!(matches!(err, GradingError::InvalidResponse { .. }));
    server.await.unwrap();
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = Url::parse(&format!("http://{}/grade-essay", addr)).unwrap();
    let client = HttpGradingClient::new(url, Duration::from_secs(5)).unwrap();

    let err = client.grade("An essay").await.unwrap_err();
    assert!(
        matches!(err, GradingError::Unavailable { .. } | GradingError::Network { .. }),
        "unexpected error: {:?}",
        err
    );
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
        drop(socket);
    });

    let url = Url::parse(&format!("http://{}/grade-essay", addr)).unwrap();
    let client = HttpGradingClient::new(url, Duration::from_millis(200)).unwrap();

    let err = client.grade("An essay").await.unwrap_err();
    match err {
        GradingError::Timeout { timeout } => assert_eq!(timeout, Duration::from_millis(200)),
        other => panic!("expected timeout, got {:?}", other),
    }
    server.abort();
}

#[tokio::test]
async fn test_controller_over_http() {
    let (url, server) = serve_once("200 OK", SAMPLE_BODY).await;
    let config = GraderConfig {
        endpoint: url[..Position::BeforePath].to_string(),
        ..GraderConfig::default()
    };
    let client = HttpGradingClient::from_config(&config).unwrap();
    let controller = SubmissionController::new(Arc::new(client));

    controller.set_draft("Hello world");
    controller.submit().await;

    assert_eq!(controller.result(), Some(sample_result()));
    assert_eq!(controller.error(), None);
    server.await.unwrap();
}
