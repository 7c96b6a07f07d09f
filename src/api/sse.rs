//! Incremental server-sent-events decoder.
//!
//! Bytes arrive in arbitrary chunks from the network; the decoder buffers
//! partial lines and yields one `data` payload per completed event. Payload
//! lines are joined with `\n` and finalized when a blank line is seen.
//! Comment lines (`:`) and the `id`/`retry` fields are skipped. Only
//! unnamed events and events named `message` are yielded; any other
//! `event:` name is dropped with its block.

use tracing::debug;

/// Event name delivered to a plain message listener.
const DEFAULT_EVENT_NAME: &str = "message";

/// Stateful SSE line decoder.
#[derive(Debug, Default)]
pub struct SseDecoder {
    /// Bytes of the current, not yet terminated line.
    pending: Vec<u8>,
    /// `data` lines of the event being assembled.
    data_lines: Vec<String>,
    /// `event` field of the event being assembled, if any.
    event_name: Option<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one network chunk; returns payloads of every event it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut payloads = Vec::new();
        for &byte in chunk {
            if byte != b'\n' {
                self.pending.push(byte);
                continue;
            }
            // Decode whole lines only so multi-byte chars split across
            // chunks stay intact.
            let raw = std::mem::take(&mut self.pending);
            let line = String::from_utf8_lossy(&raw);
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if let Some(payload) = self.process_line(line) {
                payloads.push(payload);
            }
        }
        payloads
    }

    /// True when no partial line or event is buffered.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.data_lines.is_empty() && self.event_name.is_none()
    }

    fn process_line(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            return self.flush_event();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "data" => self.data_lines.push(value.to_string()),
            "event" => self.event_name = Some(value.to_string()),
            _ => {}
        }
        None
    }

    fn flush_event(&mut self) -> Option<String> {
        let name = self.event_name.take();
        if self.data_lines.is_empty() {
            return None;
        }
        let payload = self.data_lines.join("\n");
        self.data_lines.clear();
        match name.as_deref() {
            None | Some("") | Some(DEFAULT_EVENT_NAME) => {}
            Some(other) => {
                debug!(event = other, "skipping named event block");
                return None;
            }
        }
        (!payload.is_empty()).then_some(payload)
    }
}
