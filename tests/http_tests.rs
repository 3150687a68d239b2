use chrono::Duration;
use checkdesk::api::ApiClient;
use checkdesk::core::scanner::CheckinBackend;
use checkdesk::errors::AppError;
use checkdesk::session::Session;
use predicates::str::contains;
use serde_json::{Value, json};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener as StdListener};
use std::thread;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

mod common;
use common::{TestHome, make_token};

/// Raw request as seen by the server: head (request line + headers) and body.
struct Captured {
    head: String,
    body: String,
}

impl Captured {
    fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    fn header(&self, name: &str) -> Option<String> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim().to_string())
        })
    }
}

fn split_request(raw: &[u8]) -> Option<(String, usize)> {
    let end = raw.windows(4).position(|w| w == b"\r\n\r\n")?;
    let head = String::from_utf8_lossy(&raw[..end]).to_string();
    let len = head
        .lines()
        .find_map(|l| {
            let (k, v) = l.split_once(':')?;
            k.trim()
                .eq_ignore_ascii_case("content-length")
                .then(|| v.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    Some((head, end + 4 + len))
}

fn http_response(status: &str, body: &Value) -> String {
    let body = body.to_string();
    format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Serve exactly one request with `response`, handing back what was received.
async fn serve_once(response: String) -> (SocketAddr, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        let (head, total) = loop {
            let n = stream.read(&mut buf).await.unwrap();
            assert!(n > 0, "connection closed before the request was complete");
            raw.extend_from_slice(&buf[..n]);
            if let Some((head, total)) = split_request(&raw)
                && raw.len() >= total
            {
                break (head, total);
            }
        };
        let body = String::from_utf8_lossy(&raw[head.len() + 4..total]).to_string();

        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
        Captured { head, body }
    });

    (addr, handle)
}

fn client_for(addr: SocketAddr, token: &str) -> ApiClient {
    let session = Session::from_token(token).unwrap();
    ApiClient::new(format!("http://{addr}/api"), std::time::Duration::from_secs(5))
        .unwrap()
        .with_session(&session)
}

#[tokio::test]
async fn test_check_in_posts_member_id_with_bearer_token() {
    let token = make_token("admin", Duration::hours(1));
    let (addr, server) = serve_once(http_response(
        "200 OK",
        &json!({
            "success": true,
            "data": { "attendance": { "checkIn": "2025-03-01T09:03:12.000Z" } }
        }),
    ))
    .await;

    let receipt = client_for(addr, &token).check_in("M1").await.unwrap();
    let seen = server.await.unwrap();

    assert_eq!(seen.request_line(), "POST /api/members/check-in HTTP/1.1");
    assert_eq!(seen.header("authorization"), Some(format!("Bearer {token}")));
    assert_eq!(
        serde_json::from_str::<Value>(&seen.body).unwrap(),
        json!({ "memberId": "M1" })
    );
    assert_eq!(
        receipt.check_in.map(|t| t.to_rfc3339()),
        Some("2025-03-01T09:03:12+00:00".to_string())
    );
}

#[tokio::test]
async fn test_check_out_conflict_keeps_server_message() {
    let token = make_token("admin", Duration::hours(1));
    let (addr, server) = serve_once(http_response(
        "409 Conflict",
        &json!({ "success": false, "message": "Member is not checked in" }),
    ))
    .await;

    let err = client_for(addr, &token).check_out("M1").await.unwrap_err();
    let seen = server.await.unwrap();

    assert_eq!(seen.request_line(), "POST /api/members/check-out HTTP/1.1");
    assert!(
        matches!(err, AppError::Api { status: 409, ref message } if message == "Member is not checked in")
    );
}

/// Answer every connection with 401 until the test process ends.
fn reject_all() -> SocketAddr {
    let listener = StdListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = http_response("401 Unauthorized", &json!({ "message": "Invalid token" }));

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(response.as_bytes());
        }
    });

    addr
}

#[test]
fn test_rejected_token_clears_session() {
    let home = TestHome::new();
    home.store_token(&make_token("admin", Duration::hours(1)));
    let addr = reject_all();

    home.cmd()
        .env("CHECKDESK_API_URL", format!("http://{addr}/api"))
        .args(["members", "list"])
        .assert()
        .failure()
        .stderr(contains("Session expired"));

    assert!(!home.token_file().exists());
}

#[test]
fn test_rejected_login_keeps_nothing() {
    let home = TestHome::new();
    let addr = reject_all();

    home.cmd()
        .env("CHECKDESK_API_URL", format!("http://{addr}/api"))
        .args(["login", "--email", "ada@example.com", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(contains("Invalid token"));

    assert!(!home.token_file().exists());
}
