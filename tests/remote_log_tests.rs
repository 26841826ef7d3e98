//! Remote log client tests against a throwaway local HTTP endpoint

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use linkpad::config::RemoteLogConfig;
use linkpad::errors::LinkpadError;
use linkpad::remote_log::{EventLogger, LogEvent, LogSink, RemoteLogClient};

struct CapturedRequest {
    request_line: String,
    headers: Vec<String>,
    body: String,
}

fn read_request(stream: &mut TcpStream) -> Option<CapturedRequest> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;

    let mut headers = Vec::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end().to_string();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().ok()?;
        }
        headers.push(line);
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).ok()?;
    Some(CapturedRequest {
        request_line: request_line.trim_end().to_string(),
        headers,
        body: String::from_utf8(body).ok()?,
    })
}

/// Accepts connections forever and answers every request with 200
fn spawn_collector() -> (String, Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/evaluation-service/logs", listener.local_addr().unwrap());
    let (tx, rx) = crossbeam_channel::unbounded();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            while let Some(request) = read_request(&mut stream) {
                let _ = stream.write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 2\r\n\r\n{}",
                );
                let _ = stream.flush();
                if tx.send(request).is_err() {
                    return;
                }
            }
        }
    });

    (endpoint, rx)
}

#[test]
fn test_event_is_posted_as_json() {
    let (endpoint, requests) = spawn_collector();
    let client = RemoteLogClient::with_endpoint(&endpoint, Duration::from_secs(2), None).unwrap();

    client.log_event(LogEvent::new("Backend", "INFO", "API", "New URL shortened: abc123"));

    let request = requests.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(request.request_line, "POST /evaluation-service/logs HTTP/1.1");
    assert!(
        request
            .headers
            .iter()
            .any(|h| h.to_ascii_lowercase().starts_with("content-type: application/json"))
    );

    let event: LogEvent = serde_json::from_str(&request.body).unwrap();
    assert_eq!(event.stack, "backend");
    assert_eq!(event.level, "info");
    assert_eq!(event.package, "api");
    assert_eq!(event.message, "New URL shortened: abc123");

    assert!(client.close(Duration::from_secs(2)));
}

#[test]
fn test_bearer_token_is_sent() {
    let (endpoint, requests) = spawn_collector();
    let config = RemoteLogConfig {
        endpoint,
        auth_token: Some("secret-token".to_string()),
        ..Default::default()
    };
    let client = RemoteLogClient::new(&config).unwrap();

    client.log_event(LogEvent::new("backend", "warn", "state", "hello"));

    let request = requests.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(
        request
            .headers
            .iter()
            .any(|h| h == "authorization: Bearer secret-token"
                || h == "Authorization: Bearer secret-token")
    );
    client.close(Duration::from_secs(2));
}

#[test]
fn test_event_logger_forwards_through_client() {
    let (endpoint, requests) = spawn_collector();
    let client =
        Arc::new(RemoteLogClient::with_endpoint(&endpoint, Duration::from_secs(2), None).unwrap());
    let logger = EventLogger::new(client.clone(), "backend");

    logger.error("handler", "first");
    logger.info("utils", "second");

    let first = requests.recv_timeout(Duration::from_secs(5)).unwrap();
    let second = requests.recv_timeout(Duration::from_secs(5)).unwrap();
    let first: LogEvent = serde_json::from_str(&first.body).unwrap();
    let second: LogEvent = serde_json::from_str(&second.body).unwrap();

    assert_eq!((first.level.as_str(), first.message.as_str()), ("error", "first"));
    assert_eq!((second.package.as_str(), second.message.as_str()), ("utils", "second"));
    assert!(client.close(Duration::from_secs(2)));
}

#[test]
fn test_silent_endpoint_does_not_block_caller() {
    // accepts TCP connections at the OS level but never answers
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/logs", listener.local_addr().unwrap());
    let client =
        RemoteLogClient::with_endpoint(&endpoint, Duration::from_millis(200), None).unwrap();

    let started = Instant::now();
    for i in 0..10 {
        client.log_event(LogEvent::new("backend", "info", "api", format!("event {}", i)));
    }
    assert!(started.elapsed() < Duration::from_millis(100));

    drop(listener);
    // 关闭后仍可调用
    client.close(Duration::from_secs(10));
    client.log_event(LogEvent::new("backend", "info", "api", "after close"));
}

#[test]
fn test_unreachable_endpoint_is_swallowed() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RemoteLogClient::with_endpoint(
        &format!("http://{}/logs", addr),
        Duration::from_millis(500),
        None,
    )
    .unwrap();
    client.log_event(LogEvent::new("backend", "fatal", "api", "nobody listens"));
    assert!(client.close(Duration::from_secs(5)));
}

#[test]
fn test_invalid_endpoint_is_config_error() {
    let result = RemoteLogClient::with_endpoint("not a url", Duration::from_secs(1), None);
    assert!(matches!(result, Err(LinkpadError::Config(_))));
}

#[test]
fn test_close_is_idempotent() {
    let (endpoint, _requests) = spawn_collector();
    let client = RemoteLogClient::with_endpoint(&endpoint, Duration::from_secs(1), None).unwrap();
    assert!(client.close(Duration::from_secs(1)));
    assert!(client.close(Duration::from_secs(1)));
    assert_eq!(client.endpoint(), endpoint);
}
