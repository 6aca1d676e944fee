//! Anthropic transport against a local one-shot HTTP server.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use ptplan_engine::anthropic::{status_cause, AnthropicProvider};
use ptplan_engine::credentials::{ApiKey, CredentialSource};
use ptplan_engine::error::{EngineError, TransportCause};
use ptplan_engine::extract::reply_text;
use ptplan_engine::provider::{CompletionRequest, ModelProvider};

/// Serve one request with the given status and body; returns the base URL
/// and a receiver for the raw request text.
fn serve_once(status: u16, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap();
            }
            head.push_str(&line);
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }
        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).unwrap();
        head.push_str(&String::from_utf8_lossy(&request_body));
        tx.send(head).unwrap();

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();
    });

    (format!("http://{addr}"), rx)
}

fn test_key() -> ApiKey {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "sk-test-0123456789abcdef").unwrap();
    CredentialSource::SecretFile {
        path: file.path().to_path_buf(),
    }
    .resolve()
    .unwrap()
}

fn request() -> CompletionRequest {
    CompletionRequest {
        model_id: "claude-test".to_string(),
        max_tokens: 1000,
        temperature: 0.0,
        system: "system text".to_string(),
        user: "user text".to_string(),
    }
}

#[tokio::test]
async fn successful_call_sends_headers_and_parses_segments() {
    let (base_url, rx) = serve_once(
        200,
        r#"{"id":"msg_1","type":"message","content":[{"type":"text","text":"{\"exercises\":[],\"notes\":\"\"}"}],"usage":{"input_tokens":11,"output_tokens":7}}"#,
    );
    let provider = AnthropicProvider::new(test_key(), Some(base_url), Duration::from_secs(5));

    let reply = provider.complete(&request()).await.unwrap();

    assert_eq!(reply.usage.unwrap().input_tokens, 11);
    assert_eq!(reply_text(reply).unwrap(), r#"{"exercises":[],"notes":""}"#);

    let sent = rx.recv().unwrap();
    let lower = sent.to_ascii_lowercase();
    assert!(lower.starts_with("post /v1/messages"));
    assert!(lower.contains("x-api-key: sk-test-0123456789abcdef"));
    assert!(lower.contains("anthropic-version: 2023-06-01"));
    assert!(sent.contains(r#""model":"claude-test""#));
    assert!(sent.contains(r#""temperature":0.0"#));
    assert!(sent.contains(r#""system":"system text""#));
    assert!(sent.contains(r#""messages":[{"role":"user","content":"user text"}]"#));
}

#[tokio::test]
async fn unauthorized_is_auth_transport_error() {
    let (base_url, _rx) = serve_once(
        401,
        r#"{"type":"error","error":{"type":"authentication_error"}}"#,
    );
    let provider = AnthropicProvider::new(test_key(), Some(base_url), Duration::from_secs(5));

    let err = provider.complete(&request()).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Transport {
            cause: TransportCause::Auth,
            ..
        }
    ));
}

#[tokio::test]
async fn body_without_content_is_unexpected_shape() {
    let (base_url, _rx) = serve_once(200, r#"{"id":"msg_1"}"#);
    let provider = AnthropicProvider::new(test_key(), Some(base_url), Duration::from_secs(5));

    let err = provider.complete(&request()).await.unwrap_err();
    assert!(matches!(err, EngineError::UnexpectedResponseShape(_)));
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let provider =
        AnthropicProvider::new(test_key(), Some(format!("http://{addr}")), Duration::from_secs(5));

    let err = provider.complete(&request()).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Transport {
            cause: TransportCause::Network,
            ..
        }
    ));
}

#[test]
fn status_codes_map_to_causes() {
    assert_eq!(status_cause(401), TransportCause::Auth);
    assert_eq!(status_cause(403), TransportCause::Auth);
    assert_eq!(status_cause(429), TransportCause::RateLimited);
    assert_eq!(status_cause(504), TransportCause::Timeout);
    assert_eq!(status_cause(500), TransportCause::Service);
    assert_eq!(status_cause(400), TransportCause::Service);
}
