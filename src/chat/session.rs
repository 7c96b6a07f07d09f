//! Session controller: owns the chat state and runs reducer effects.

use super::reducer::{reduce, ChatEvent, ChatSnapshot, ChatState, Effect};
use crate::api::{StreamSignal, Subscription, TaskApi};
use crate::config::ChatConfig;
use crate::error::ApiError;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{info, warn};

/// One chat conversation against a task backend.
///
/// All mutation goes through `&mut self`; observers follow along through
/// [`ChatSession::watch`]. Dropping the session drops the open subscription,
/// which aborts its reader.
pub struct ChatSession<A: TaskApi> {
    api: A,
    state: ChatState,
    subscription: Option<Subscription>,
    idle_timeout: Option<Duration>,
    /// When the open subscription last delivered data (or was opened).
    last_event: Instant,
    snapshots: watch::Sender<ChatSnapshot>,
}

impl<A: TaskApi> ChatSession<A> {
    pub fn new(api: A, chat: &ChatConfig) -> Self {
        let state = ChatState::new(chat.agent_name.as_str(), chat.greeting.as_str());
        let (snapshots, _) = watch::channel(state.snapshot());
        Self {
            api,
            state,
            subscription: None,
            idle_timeout: chat.stream_idle_timeout_secs.map(Duration::from_secs),
            last_event: Instant::now(),
            snapshots,
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Observe every published snapshot.
    pub fn watch(&self) -> watch::Receiver<ChatSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn has_subscription(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.dispatch_sync(ChatEvent::InputChanged(text.into()));
    }

    /// Submit the pending input. Returns `false` when the submission was a
    /// no-op (blank input or a submission already in flight).
    pub async fn submit(&mut self) -> bool {
        if !self.state.can_submit() {
            return false;
        }
        let task_id = uuid::Uuid::new_v4().to_string();
        self.dispatch(ChatEvent::Submit { task_id }).await;
        true
    }

    /// Set the input to `text` and submit it.
    pub async fn send(&mut self, text: impl Into<String>) -> bool {
        self.set_input(text);
        self.submit().await
    }

    /// Wait for the next signal from the open subscription.
    ///
    /// Pends forever without a subscription, so it can sit in a `select!`
    /// next to user input. With an idle timeout configured, silence longer
    /// than the timeout is reported as a failure. The deadline counts from
    /// the last delivered event, so dropping and re-polling this future does
    /// not extend it.
    pub async fn next_signal(&mut self) -> StreamSignal {
        let Some(subscription) = self.subscription.as_mut() else {
            return std::future::pending().await;
        };
        let Some(limit) = self.idle_timeout else {
            return subscription.recv().await;
        };
        match tokio::time::timeout_at(self.last_event + limit, subscription.recv()).await {
            Ok(signal) => signal,
            Err(_) => StreamSignal::Failed(format!(
                "no events received for {}s",
                limit.as_secs()
            )),
        }
    }

    /// Fold one subscription signal into the session.
    pub fn handle_signal(&mut self, signal: StreamSignal) {
        let event = match signal {
            StreamSignal::Data(data) => {
                self.last_event = Instant::now();
                ChatEvent::StreamData(data)
            }
            StreamSignal::Failed(error) => ChatEvent::StreamFailed { error },
        };
        self.dispatch_sync(event);
    }

    /// Process stream signals until the subscription closes.
    pub async fn run_until_idle(&mut self) {
        while self.subscription.is_some() {
            let signal = self.next_signal().await;
            self.handle_signal(signal);
        }
    }

    /// Drop the open subscription, if any.
    pub fn close(&mut self) {
        if self.subscription.is_some() {
            self.dispatch_sync(ChatEvent::StreamClosed);
        }
    }

    /// Reduce `event` and run every effect it (transitively) produces.
    async fn dispatch(&mut self, event: ChatEvent) {
        let mut queue: VecDeque<Effect> = self.apply(event).into();
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::SubmitTask(request) => {
                    let follow_up = match self.api.submit_task(&request).await {
                        Ok(()) => {
                            info!(task_id = %request.task_id, "task submitted");
                            ChatEvent::SubmitSucceeded
                        }
                        Err(err) => {
                            warn!(task_id = %request.task_id, error = %err, "task submission failed");
                            ChatEvent::SubmitFailed {
                                error: submit_failure_text(&err),
                            }
                        }
                    };
                    queue.extend(self.apply(follow_up));
                }
                other => self.run_local_effect(other),
            }
        }
    }

    /// Dispatch for events whose effects never need the network.
    fn dispatch_sync(&mut self, event: ChatEvent) {
        for effect in self.apply(event) {
            self.run_local_effect(effect);
        }
    }

    fn run_local_effect(&mut self, effect: Effect) {
        match effect {
            Effect::OpenSubscription { task_id } => {
                self.last_event = Instant::now();
                self.subscription = Some(self.api.open_stream(&task_id));
            }
            Effect::CloseSubscription => {
                if let Some(subscription) = self.subscription.take() {
                    info!(task_id = subscription.task_id(), "event stream closed");
                    subscription.close();
                }
            }
            Effect::SubmitTask(request) => {
                warn!(task_id = %request.task_id, "submission requested outside an async dispatch");
            }
        }
    }

    fn apply(&mut self, event: ChatEvent) -> Vec<Effect> {
        let effects = reduce(&mut self.state, event);
        self.snapshots.send_replace(self.state.snapshot());
        effects
    }
}

/// Transcript wording for a rejected task submission.
fn submit_failure_text(err: &ApiError) -> String {
    match err {
        ApiError::Status { code, .. } => format!("Failed to run agent: {code}"),
        other => other.to_string(),
    }
}
