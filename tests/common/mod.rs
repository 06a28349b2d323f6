//! Shared helpers for integration tests.

#![allow(dead_code)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use figma_tokens_mcp::config::FigmaConfig;
use figma_tokens_mcp::figma::FigmaClient;

/// Token the test clients authenticate with.
pub const TEST_TOKEN: &str = "figd-test-token";

/// Starts a loopback HTTP server that answers `count` requests with the same
/// canned response, then stops.
///
/// Returns the base URL and a handle yielding the raw request heads.
pub async fn stub_figma(
    count: usize,
    status: &'static str,
    body: String,
) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let mut requests = Vec::with_capacity(count);
        for _ in 0..count {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut head = Vec::new();
            let mut chunk = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&chunk[..n]);
            }
            requests.push(String::from_utf8_lossy(&head).into_owned());

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            // The client may hang up as soon as it has the status line.
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
        requests
    });

    (base_url, handle)
}

/// Builds an authenticated client against `base_url`.
pub fn client(base_url: &str) -> FigmaClient {
    let config = FigmaConfig {
        api_base_url: base_url.to_string(),
        timeout_secs: 5,
        ..FigmaConfig::default()
    };
    FigmaClient::new(&config, Some(TEST_TOKEN.to_string())).unwrap()
}

/// Returns the request line (`GET /path HTTP/1.1`) of a raw request head.
pub fn request_line(head: &str) -> &str {
    head.lines().next().unwrap_or_default()
}

/// Returns the value of a header in a raw request head, matched case-insensitively.
pub fn header<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines().skip(1).find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case(name)
            .then(|| value.trim())
    })
}
