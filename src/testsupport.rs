//! Shared test fixtures: temp dirs, SSE builders and a loopback HTTP server.
//!
//! The fake server speaks just enough HTTP/1.1 for reqwest: it reads one
//! request per connection, answers from a route table, and either closes the
//! connection or holds it open (for event streams that must not hit EOF).

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("agentdesk-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Build one SSE event block with `event:` and `data:` lines.
pub fn sse_event_block(event: &str, data: &str) -> String {
    format!("event: {event}\ndata: {data}\n\n")
}

/// Build one unnamed SSE block carrying a stream event JSON body.
pub fn stream_event_block(event_type: &str, message: Option<&str>) -> String {
    let data = match message {
        Some(message) => serde_json::json!({
            "eventType": event_type,
            "payload": { "message": message }
        }),
        None => serde_json::json!({ "eventType": event_type }),
    };
    format!("data: {data}\n\n")
}

/// One canned response keyed by method and path.
#[derive(Debug, Clone)]
pub struct FakeRoute {
    pub method: &'static str,
    pub path: String,
    pub status: u16,
    pub content_type: String,
    pub body: String,
    /// Keep the connection open after writing the body.
    pub hold_open: bool,
    /// Wait before answering.
    pub delay: Option<Duration>,
}

impl FakeRoute {
    pub fn json(method: &'static str, path: &str, status: u16, body: impl Into<String>) -> Self {
        Self {
            method,
            path: path.to_string(),
            status,
            content_type: "application/json".to_string(),
            body: body.into(),
            hold_open: false,
            delay: None,
        }
    }

    pub fn sse(path: &str, body: impl Into<String>) -> Self {
        Self {
            method: "GET",
            path: path.to_string(),
            status: 200,
            content_type: "text/event-stream".to_string(),
            body: body.into(),
            hold_open: false,
            delay: None,
        }
    }

    pub fn held_open(mut self) -> Self {
        self.hold_open = true;
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Loopback HTTP server answering from a fixed route table.
pub struct FakeHttpServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    accept_task: JoinHandle<()>,
}

impl FakeHttpServer {
    /// Serve `routes`; unmatched requests get a 404. A route with path `*`
    /// matches any request with its method (or any method when `*`).
    pub async fn start(routes: Vec<FakeRoute>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(routes);
        let log = Arc::clone(&requests);
        let accept_task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let log = Arc::clone(&log);
                tokio::spawn(async move {
                    serve_connection(stream, &routes, &log).await;
                });
            }
        });
        Self {
            addr,
            requests,
            accept_task,
        }
    }

    /// Answer every request with the same response.
    pub async fn respond(status: u16, content_type: &str, body: &str) -> Self {
        Self::start(vec![FakeRoute {
            method: "*",
            path: "*".to_string(),
            status,
            content_type: content_type.to_string(),
            body: body.to_string(),
            hold_open: false,
            delay: None,
        }])
        .await
    }

    /// Answer every GET with an event stream body, then close.
    pub async fn sse(body: String) -> Self {
        Self::start(vec![FakeRoute::sse("*", body)]).await
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Raw text (head and body) of every request received so far.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }
}

impl Drop for FakeHttpServer {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

async fn serve_connection(
    mut stream: TcpStream,
    routes: &[FakeRoute],
    log: &Mutex<Vec<String>>,
) {
    let Some(request) = read_request(&mut stream).await else {
        return;
    };
    log.lock().await.push(request.clone());

    let mut parts = request.split_whitespace();
    let method = parts.next().unwrap_or_default();
    let path = parts.next().unwrap_or_default();
    let route = routes.iter().find(|route| {
        (route.method == "*" || route.method == method) && (route.path == "*" || route.path == path)
    });

    let Some(route) = route else {
        let _ = stream
            .write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
            .await;
        return;
    };
    if let Some(delay) = route.delay {
        tokio::time::sleep(delay).await;
    }

    let head = if route.hold_open || route.content_type == "text/event-stream" {
        // Streams are delimited by connection close, not a length.
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nCache-Control: no-cache\r\nConnection: close\r\n\r\n",
            route.status,
            reason_phrase(route.status),
            route.content_type
        )
    } else {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            route.status,
            reason_phrase(route.status),
            route.content_type,
            route.body.len()
        )
    };
    if stream.write_all(head.as_bytes()).await.is_err() {
        return;
    }
    let _ = stream.write_all(route.body.as_bytes()).await;
    let _ = stream.flush().await;
    if route.hold_open {
        tokio::time::sleep(Duration::from_secs(30)).await;
    }
}

async fn read_request(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return (!buf.is_empty()).then(|| String::from_utf8_lossy(&buf).into_owned());
        }
        buf.extend_from_slice(&chunk[..n]);
        let Some(head_end) = find_subslice(&buf, b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..head_end]).to_ascii_lowercase();
        let content_length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= head_end + 4 + content_length {
            return Some(String::from_utf8_lossy(&buf).into_owned());
        }
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
        assert!(fixture.path().exists());
    }

    #[test]
    fn sse_helpers_emit_expected_wire_format() {
        let block = sse_event_block("message", r#"{"a":1}"#);
        assert!(block.starts_with("event: message\n"));
        assert!(block.ends_with("\n\n"));

        let block = stream_event_block("chunk_stream", Some("hi"));
        assert!(block.starts_with("data: {"));
        assert!(block.contains(r#""eventType":"chunk_stream""#));
    }

    #[tokio::test]
    async fn fake_server_routes_and_records_requests() {
        let server =
            FakeHttpServer::start(vec![FakeRoute::json("GET", "/ping", 200, r#"{"ok":true}"#)])
                .await;
        let body = reqwest::get(format!("{}/ping", server.base_url()))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, r#"{"ok":true}"#);

        let missing = reqwest::get(format!("{}/other", server.base_url()))
            .await
            .unwrap();
        assert_eq!(missing.status().as_u16(), 404);
        assert_eq!(server.requests().await.len(), 2);
    }
}
