//! Scripted local backend for integration tests.
//!
//! One std listener thread stands in for the directory service, the task
//! endpoint and the stream gateway. Each accepted connection is served on
//! its own thread so a held-open event stream never blocks other requests.

#![allow(dead_code)]

use agentdesk::config::{Config, EndpointsConfig};
use serde_json::json;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Convenience result alias for harness operations.
pub type HarnessResult<T> = Result<T, String>;

/// Canned answers for each backend surface.
#[derive(Debug, Clone)]
pub struct BackendScript {
    pub agents: (u16, String),
    pub execution: (u16, String),
    pub start: (u16, String),
    pub task: (u16, String),
    /// Raw SSE body written to every `/stream/{id}` request.
    pub stream_body: String,
    /// Keep stream connections open after the body (no EOF).
    pub hold_stream_open: bool,
}

impl Default for BackendScript {
    fn default() -> Self {
        Self {
            agents: (200, "[]".to_string()),
            execution: (
                200,
                json!({"currentlyRunning": [], "recentlyCompleted": []}).to_string(),
            ),
            start: (200, json!({"success": true, "message": "started"}).to_string()),
            task: (200, json!({"status": "accepted"}).to_string()),
            stream_body: String::new(),
            hold_stream_open: true,
        }
    }
}

/// One request as seen by the backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

pub struct MockBackend {
    address: String,
    shutdown: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl MockBackend {
    /// Start the backend on `127.0.0.1:*`.
    pub fn start(script: BackendScript) -> HarnessResult<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .map_err(|e| format!("failed binding mock backend: {e}"))?;
        listener
            .set_nonblocking(true)
            .map_err(|e| format!("failed setting nonblocking listener: {e}"))?;
        let addr = listener
            .local_addr()
            .map_err(|e| format!("failed getting mock backend addr: {e}"))?;

        let shutdown = Arc::new(AtomicBool::new(false));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let script = Arc::new(script);
        let shutdown_flag = Arc::clone(&shutdown);
        let log = Arc::clone(&requests);
        let thread = thread::spawn(move || {
            while !shutdown_flag.load(Ordering::Relaxed) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let script = Arc::clone(&script);
                        let log = Arc::clone(&log);
                        let stop = Arc::clone(&shutdown_flag);
                        thread::spawn(move || {
                            let _ = handle_connection(stream, &script, &log, &stop);
                        });
                    }
                    Err(_) => thread::sleep(Duration::from_millis(10)),
                }
            }
        });

        Ok(Self {
            address: format!("http://{addr}"),
            shutdown,
            requests,
            thread: Some(thread),
        })
    }

    pub fn base_url(&self) -> String {
        self.address.clone()
    }

    /// Config pointing every endpoint at this backend.
    pub fn config(&self) -> Config {
        Config {
            endpoints: EndpointsConfig {
                directory_url: self.base_url(),
                task_url: format!("{}/run_agent", self.base_url()),
                stream_url: self.base_url(),
            },
            ..Config::default()
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    pub fn requests_to(&self, method: &str, prefix: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path.starts_with(prefix))
            .collect()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(join) = self.thread.take() {
            let _ = join.join();
        }
    }
}

/// Build one SSE block carrying a stream event.
pub fn event(event_type: &str, message: &str) -> String {
    let data = json!({"eventType": event_type, "payload": {"message": message}});
    format!("event: message\ndata: {data}\n\n")
}

pub fn final_payload() -> String {
    format!("data: {}\n\n", json!({"eventType": "final_payload", "payload": {}}))
}

fn handle_connection(
    mut stream: TcpStream,
    script: &BackendScript,
    log: &Mutex<Vec<RecordedRequest>>,
    stop: &AtomicBool,
) -> HarnessResult<()> {
    let request = read_request(&mut stream)?;
    if let Ok(mut log) = log.lock() {
        log.push(request.clone());
    }

    match (request.method.as_str(), request.path.as_str()) {
        ("GET", "/available_agents") => write_json(&mut stream, &script.agents),
        ("GET", "/agent_execution_info") => write_json(&mut stream, &script.execution),
        ("POST", "/start_agent") => write_json(&mut stream, &script.start),
        ("POST", "/run_agent") => write_json(&mut stream, &script.task),
        ("GET", path) if path.starts_with("/stream/") => {
            write_stream(&mut stream, &script.stream_body)?;
            if script.hold_stream_open {
                // Hold until the client hangs up or the backend stops.
                let mut probe = [0u8; 64];
                let _ = stream.set_read_timeout(Some(Duration::from_millis(50)));
                while !stop.load(Ordering::Relaxed) {
                    match stream.read(&mut probe) {
                        Ok(0) => break,
                        Ok(_) => {}
                        Err(e)
                            if e.kind() == std::io::ErrorKind::WouldBlock
                                || e.kind() == std::io::ErrorKind::TimedOut => {}
                        Err(_) => break,
                    }
                }
            }
            let _ = stream.shutdown(Shutdown::Both);
            Ok(())
        }
        _ => write_json(&mut stream, &(404, "{}".to_string())),
    }
}

fn read_request(stream: &mut TcpStream) -> HarnessResult<RecordedRequest> {
    stream
        .set_nonblocking(false)
        .map_err(|e| format!("failed setting blocking mode: {e}"))?;
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .map_err(|e| format!("failed setting read timeout: {e}"))?;
    let mut buffer = Vec::<u8>::new();
    let mut temp = [0u8; 2048];
    let mut header_end: Option<usize> = None;
    let mut content_length = 0usize;

    loop {
        let n = stream
            .read(&mut temp)
            .map_err(|e| format!("failed reading request bytes: {e}"))?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&temp[..n]);
        if header_end.is_none() {
            if let Some(idx) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
                header_end = Some(idx);
                let headers = String::from_utf8_lossy(&buffer[..idx]).to_string();
                content_length = parse_content_length(&headers).unwrap_or(0);
            }
        }
        if let Some(idx) = header_end {
            if buffer.len().saturating_sub(idx + 4) >= content_length {
                break;
            }
        }
    }

    let idx = header_end.ok_or_else(|| "malformed HTTP request (missing header end)".to_string())?;
    let head = String::from_utf8_lossy(&buffer[..idx]).to_string();
    let mut parts = head.split_whitespace();
    Ok(RecordedRequest {
        method: parts.next().unwrap_or_default().to_string(),
        path: parts.next().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&buffer[idx + 4..]).to_string(),
    })
}

fn parse_content_length(headers: &str) -> Option<usize> {
    headers.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.eq_ignore_ascii_case("content-length") {
            value.trim().parse::<usize>().ok()
        } else {
            None
        }
    })
}

fn write_json(stream: &mut TcpStream, (status, body): &(u16, String)) -> HarnessResult<()> {
    let response = format!(
        "HTTP/1.1 {status} Scripted\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream
        .write_all(response.as_bytes())
        .map_err(|e| format!("failed writing response bytes: {e}"))
}

fn write_stream(stream: &mut TcpStream, body: &str) -> HarnessResult<()> {
    let head = "HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nCache-Control: no-cache\r\nConnection: close\r\n\r\n";
    stream
        .write_all(head.as_bytes())
        .and_then(|_| stream.write_all(body.as_bytes()))
        .and_then(|_| stream.flush())
        .map_err(|e| format!("failed writing stream bytes: {e}"))
}
