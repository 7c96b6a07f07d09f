//! Wire types shared by the directory client, task submission and the
//! event stream.
//!
//! The backend speaks camelCase JSON; every optional field tolerates being
//! absent so partial records from either directory endpoint still decode.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status reported by the directory service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Failed,
    /// Any status string this client does not know yet.
    #[serde(other)]
    Unknown,
}

impl AgentStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }
}

/// One agent record. Read-only to this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: AgentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

/// Running and recently completed executions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentExecutionInfo {
    #[serde(default)]
    pub currently_running: Vec<Agent>,
    #[serde(default)]
    pub recently_completed: Vec<Agent>,
}

/// Body of the task submission request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    pub task_id: String,
    pub message: String,
}

/// Body of `POST /start_agent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartAgentRequest {
    pub id: String,
}

/// Response of `POST /start_agent`, also used for its 400/500 bodies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StartAgentResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// One decoded server-pushed event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamEvent {
    pub event_type: String,
    #[serde(default)]
    pub payload: Option<EventPayload>,
}

impl StreamEvent {
    /// Parse the `data` block of one SSE event.
    pub fn parse(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    /// Payload message text, empty when absent.
    pub fn message(&self) -> &str {
        self.payload
            .as_ref()
            .and_then(|payload| payload.message.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub message: Option<String>,
}

/// Render a backend timestamp in the local timezone.
///
/// Offset-less timestamps are treated as UTC. Unparseable input is returned
/// unchanged.
pub fn format_local_time(raw: &str) -> String {
    format_time_in(raw, &Local)
}

pub(crate) fn format_time_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let trimmed = raw.trim();
    let utc = DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        });
    match utc {
        Some(dt) => dt
            .with_timezone(tz)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => trimmed.to_string(),
    }
}
