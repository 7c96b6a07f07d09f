//! Pure state machine for one chat session.
//!
//! Every input the session sees (user submissions, task submission results,
//! stream payloads, stream failures) is a [`ChatEvent`]. [`reduce`] folds an
//! event into [`ChatState`] and returns the side effects the controller must
//! run. Nothing here touches the network.

use super::message::{
    Message, Role, EVENT_CHUNK_STREAM, EVENT_FINAL_PAYLOAD, EVENT_RETRIEVE, EVENT_REVIEW,
};
use crate::types::{StreamEvent, TaskRequest};
use tracing::{debug, warn};

/// Mutable session state. Only [`reduce`] changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatState {
    messages: Vec<Message>,
    input: String,
    loading: bool,
    task_id: Option<String>,
    stream_open: bool,
    agent_name: String,
}

impl ChatState {
    /// Fresh session: one active greeting, empty input.
    pub fn new(agent_name: impl Into<String>, greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::greeting(greeting)],
            input: String::new(),
            loading: false,
            task_id: None,
            stream_open: false,
            agent_name: agent_name.into(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// A task submission is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// A subscription is open and its events are being folded in.
    pub fn is_streaming(&self) -> bool {
        self.stream_open
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    /// Whether a [`ChatEvent::Submit`] would be accepted right now.
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.input.trim().is_empty()
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            messages: self.messages.clone(),
            input: self.input.clone(),
            loading: self.loading,
            streaming: self.stream_open,
            task_id: self.task_id.clone(),
        }
    }

    /// Keep the newest active default-styled agent message, deactivate the rest.
    fn apply_deactivate_rule(&mut self) {
        let keep = self
            .messages
            .iter()
            .rposition(|m| m.role == Role::Ai && m.active && m.is_default_styled());
        for (index, message) in self.messages.iter_mut().enumerate() {
            if Some(index) != keep {
                message.active = false;
            }
        }
    }

    fn deactivate_all_ai(&mut self) {
        for message in self.messages.iter_mut().filter(|m| m.role == Role::Ai) {
            message.active = false;
        }
    }

    fn append_chunk(&mut self, fragment: &str) {
        match self.messages.last_mut() {
            Some(last) if last.role == Role::Ai && last.active && last.is_chunk_stream() => {
                last.content.push_str(fragment);
            }
            _ => self
                .messages
                .push(Message::ai_event(EVENT_CHUNK_STREAM, fragment)),
        }
    }
}

/// Immutable copy of [`ChatState`] handed to observers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSnapshot {
    pub messages: Vec<Message>,
    pub input: String,
    pub loading: bool,
    pub streaming: bool,
    pub task_id: Option<String>,
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Replace the pending input text.
    InputChanged(String),
    /// Submit the pending input under a freshly generated task id.
    Submit { task_id: String },
    /// The task endpoint accepted the submission.
    SubmitSucceeded,
    /// The task endpoint rejected the submission or was unreachable.
    SubmitFailed { error: String },
    /// Raw `data` payload from the open subscription.
    StreamData(String),
    /// The open subscription failed at the transport level.
    StreamFailed { error: String },
    /// The controller is shutting the open subscription down.
    StreamClosed,
}

/// Side effects requested by [`reduce`], run by the session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitTask(TaskRequest),
    OpenSubscription { task_id: String },
    CloseSubscription,
}

/// Fold one event into `state`.
pub fn reduce(state: &mut ChatState, event: ChatEvent) -> Vec<Effect> {
    match event {
        ChatEvent::InputChanged(text) => {
            state.input = text;
            vec![]
        }
        ChatEvent::Submit { task_id } => submit(state, task_id),
        ChatEvent::SubmitSucceeded => {
            state.loading = false;
            let Some(task_id) = state.task_id.clone() else {
                return vec![];
            };
            state.stream_open = true;
            vec![Effect::OpenSubscription { task_id }]
        }
        ChatEvent::SubmitFailed { error } => {
            state.loading = false;
            state.messages.push(Message::ai_plain(format!("Error: {error}")));
            vec![]
        }
        ChatEvent::StreamData(data) => stream_data(state, &data),
        ChatEvent::StreamFailed { error } => {
            if !state.stream_open {
                return vec![];
            }
            warn!(task_id = ?state.task_id, %error, "event stream failed");
            state.stream_open = false;
            vec![Effect::CloseSubscription]
        }
        ChatEvent::StreamClosed => {
            if !state.stream_open {
                return vec![];
            }
            state.stream_open = false;
            vec![Effect::CloseSubscription]
        }
    }
}

/// Value-in, value-out form of [`reduce`].
pub fn step(mut state: ChatState, event: ChatEvent) -> (ChatState, Vec<Effect>) {
    let effects = reduce(&mut state, event);
    (state, effects)
}

fn submit(state: &mut ChatState, task_id: String) -> Vec<Effect> {
    if !state.can_submit() {
        return vec![];
    }
    let mut effects = Vec::with_capacity(2);
    // One subscription per session: a still-open stream from the previous
    // task is dropped before the new one starts.
    if state.stream_open {
        state.stream_open = false;
        effects.push(Effect::CloseSubscription);
    }

    let message = std::mem::take(&mut state.input);
    state.deactivate_all_ai();
    state.messages.push(Message::human(message.clone()));
    state.messages.push(Message::system(format!(
        "{} has entered the chat",
        state.agent_name
    )));
    state.loading = true;
    state.task_id = Some(task_id.clone());
    effects.push(Effect::SubmitTask(TaskRequest { task_id, message }));
    effects
}

fn stream_data(state: &mut ChatState, data: &str) -> Vec<Effect> {
    if !state.stream_open {
        debug!("event after stream close ignored");
        return vec![];
    }
    let event = match StreamEvent::parse(data) {
        Ok(event) => event,
        Err(err) => {
            warn!(error = %err, "dropping malformed stream event");
            return vec![];
        }
    };
    debug!(event_type = %event.event_type, "stream event");

    match event.event_type.as_str() {
        EVENT_RETRIEVE | EVENT_REVIEW => {
            state.apply_deactivate_rule();
            state
                .messages
                .push(Message::ai_event(event.event_type.as_str(), event.message()));
            vec![]
        }
        EVENT_CHUNK_STREAM => {
            state.apply_deactivate_rule();
            state.append_chunk(event.message());
            vec![]
        }
        EVENT_FINAL_PAYLOAD => {
            state.stream_open = false;
            vec![Effect::CloseSubscription]
        }
        other => {
            debug!(event_type = other, "ignoring unhandled stream event");
            vec![]
        }
    }
}
