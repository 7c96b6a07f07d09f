//! Per-task event stream subscription.
//!
//! A [`Subscription`] owns a spawned reader task that connects to
//! `/stream/{taskId}`, decodes SSE frames and forwards each `data` payload
//! over a bounded channel. Dropping or closing the subscription aborts the
//! reader, so no connection outlives its handle.

use super::sse::SseDecoder;
use super::transport::join_url;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Buffered payloads between the reader task and the consumer.
const STREAM_CHANNEL_CAPACITY: usize = 256;

/// One item delivered by a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamSignal {
    /// Raw `data` payload of one event; not yet parsed.
    Data(String),
    /// Transport-level failure; the stream is unusable afterwards.
    Failed(String),
}

/// Handle for one open event stream.
#[derive(Debug)]
pub struct Subscription {
    task_id: String,
    rx: mpsc::Receiver<StreamSignal>,
    worker: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Wrap an existing signal channel, optionally owning the task feeding it.
    pub fn new(
        task_id: impl Into<String>,
        rx: mpsc::Receiver<StreamSignal>,
        worker: Option<JoinHandle<()>>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            rx,
            worker,
        }
    }

    /// Connect to `<stream_base>/stream/{task_id}` on a background task.
    ///
    /// Connection errors are reported through [`StreamSignal::Failed`] rather
    /// than returned, matching how a browser event source reports them.
    pub fn spawn(http: reqwest::Client, stream_base: &str, task_id: &str) -> Self {
        let url = join_url(stream_base, &format!("/stream/{task_id}"));
        let (tx, rx) = mpsc::channel(STREAM_CHANNEL_CAPACITY);
        info!(%url, "opening event stream");
        let worker = tokio::spawn(run_stream(http, url, tx));
        Self::new(task_id, rx, Some(worker))
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Wait for the next signal. A vanished producer reads as a failure.
    pub async fn recv(&mut self) -> StreamSignal {
        match self.rx.recv().await {
            Some(signal) => signal,
            None => StreamSignal::Failed("event stream ended".to_string()),
        }
    }

    /// Stop the reader and discard anything still buffered.
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.rx.close();
        if let Some(worker) = self.worker.take() {
            debug!(task_id = %self.task_id, "closing event stream");
            worker.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run_stream(http: reqwest::Client, url: String, tx: mpsc::Sender<StreamSignal>) {
    let failure = match read_stream(&http, &url, &tx).await {
        Ok(()) => return,
        Err(message) => message,
    };
    let _ = tx.send(StreamSignal::Failed(failure)).await;
}

/// Pump payloads until the consumer hangs up (`Ok`) or the transport fails.
async fn read_stream(
    http: &reqwest::Client,
    url: &str,
    tx: &mpsc::Sender<StreamSignal>,
) -> Result<(), String> {
    let mut response = http
        .get(url)
        .header(reqwest::header::ACCEPT, "text/event-stream")
        .header(reqwest::header::CACHE_CONTROL, "no-cache")
        .send()
        .await
        .map_err(|err| format!("http: {err}"))?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("stream rejected with status {}", status.as_u16()));
    }

    let mut decoder = SseDecoder::new();
    loop {
        let chunk = response
            .chunk()
            .await
            .map_err(|err| format!("http: {err}"))?;
        let Some(chunk) = chunk else {
            // The server never closes a healthy stream; EOF before the
            // terminal event is a transport error.
            if !decoder.is_idle() {
                debug!(%url, "stream ended inside an unterminated event");
                return Err("stream closed by server mid-event".to_string());
            }
            return Err("stream closed by server".to_string());
        };
        for payload in decoder.push(&chunk) {
            if tx.send(StreamSignal::Data(payload)).await.is_err() {
                return Ok(());
            }
        }
    }
}
