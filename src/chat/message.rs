//! Chat log entries.

use serde::Serialize;

/// Event type of the synthetic first message.
pub const EVENT_GREETING: &str = "greeting";
/// Incremental text that coalesces into one growing message.
pub const EVENT_CHUNK_STREAM: &str = "chunk_stream";
/// Terminal signal of a task's stream.
pub const EVENT_FINAL_PAYLOAD: &str = "final_payload";
pub const EVENT_RETRIEVE: &str = "retrieve";
pub const EVENT_REVIEW: &str = "review";

/// Who authored a message. Fixed for the message's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Human,
    Ai,
    System,
}

/// One entry of the ordered chat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// Only meaningful for `Role::Ai`: the bubble is live pipeline output.
    pub active: bool,
}

impl Message {
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
            event_type: None,
            active: false,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            event_type: None,
            active: false,
        }
    }

    /// The active greeting every session starts with.
    pub fn greeting(content: impl Into<String>) -> Self {
        Self::ai_event(EVENT_GREETING, content)
    }

    /// Active agent output tagged with its event type.
    pub fn ai_event(event_type: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Ai,
            content: content.into(),
            event_type: Some(event_type.into()),
            active: true,
        }
    }

    /// Untyped, inactive agent message (used for submission errors).
    pub fn ai_plain(content: impl Into<String>) -> Self {
        Self {
            role: Role::Ai,
            content: content.into(),
            event_type: None,
            active: false,
        }
    }

    pub fn event_type(&self) -> Option<&str> {
        self.event_type.as_deref()
    }

    pub fn is_chunk_stream(&self) -> bool {
        self.event_type() == Some(EVENT_CHUNK_STREAM)
    }

    /// Untyped, `chunk_stream` or `greeting`: rendered as regular agent text
    /// rather than an event bubble.
    pub fn is_default_styled(&self) -> bool {
        matches!(
            self.event_type(),
            None | Some(EVENT_CHUNK_STREAM) | Some(EVENT_GREETING)
        )
    }

    /// Presentation class of this message.
    pub fn bubble(&self) -> Bubble {
        match self.role {
            Role::System => Bubble::System,
            Role::Human => Bubble::Human,
            Role::Ai => match self.event_type() {
                None => Bubble::Plain,
                Some(EVENT_GREETING) => Bubble::Greeting,
                Some(EVENT_CHUNK_STREAM) => Bubble::Stream,
                Some(_) => Bubble::Event,
            },
        }
    }
}

/// How a message is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bubble {
    /// Muted one-line announcement.
    System,
    /// Right-aligned user text.
    Human,
    /// Untyped agent output in a filled bubble, markdown.
    Plain,
    /// Greeting text without a bubble, markdown.
    Greeting,
    /// Streamed answer text without a bubble, markdown.
    Stream,
    /// Custom pipeline event on a color derived from the event type, plain text.
    Event,
}

impl Bubble {
    pub fn renders_markdown(self) -> bool {
        matches!(self, Self::Plain | Self::Greeting | Self::Stream)
    }
}
