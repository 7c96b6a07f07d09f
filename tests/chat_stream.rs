//! End-to-end chat sessions against a scripted local backend.

mod backend;

use agentdesk::api::ApiClient;
use agentdesk::chat::{ChatSession, Role};
use backend::{event, final_payload, BackendScript, MockBackend};
use std::time::Duration;

fn session_for(server: &MockBackend) -> ChatSession<ApiClient> {
    let config = server.config();
    ChatSession::new(ApiClient::from_config(&config), &config.chat)
}

async fn drain(session: &mut ChatSession<ApiClient>) {
    tokio::time::timeout(Duration::from_secs(10), session.run_until_idle())
        .await
        .expect("stream should settle");
}

fn tail(session: &ChatSession<ApiClient>, skip: usize) -> Vec<(Role, Option<String>, bool, String)> {
    session
        .state()
        .messages()
        .iter()
        .skip(skip)
        .map(|m| {
            (
                m.role,
                m.event_type().map(str::to_string),
                m.active,
                m.content.clone(),
            )
        })
        .collect()
}

#[tokio::test]
async fn streamed_task_builds_the_transcript() {
    let stream_body = [
        event("retrieve", "Looking up Q3"),
        event("chunk_stream", "Revenue "),
        event("chunk_stream", "was $4M."),
        final_payload(),
    ]
    .concat();
    let server = MockBackend::start(BackendScript {
        stream_body,
        ..BackendScript::default()
    })
    .expect("backend");

    let mut session = session_for(&server);
    assert!(session.send("What was Q3 revenue?").await);
    assert!(session.has_subscription());
    drain(&mut session).await;

    assert!(!session.has_subscription());
    assert!(!session.state().is_loading());
    assert_eq!(
        tail(&session, 1),
        vec![
            (Role::Human, None, false, "What was Q3 revenue?".to_string()),
            (
                Role::System,
                None,
                false,
                "Data Intelligence Agent has entered the chat".to_string()
            ),
            (
                Role::Ai,
                Some("retrieve".to_string()),
                false,
                "Looking up Q3".to_string()
            ),
            (
                Role::Ai,
                Some("chunk_stream".to_string()),
                true,
                "Revenue was $4M.".to_string()
            ),
        ]
    );

    let submitted = server.requests_to("POST", "/run_agent");
    assert_eq!(submitted.len(), 1);
    let body: serde_json::Value = serde_json::from_str(&submitted[0].body).expect("json body");
    assert_eq!(body["message"], "What was Q3 revenue?");
    let task_id = body["taskId"].as_str().expect("task id").to_string();
    assert_eq!(session.state().task_id(), Some(task_id.as_str()));

    let streams = server.requests_to("GET", "/stream/");
    assert_eq!(streams.len(), 1);
    assert_eq!(streams[0].path, format!("/stream/{task_id}"));
}

#[tokio::test]
async fn rejected_submission_shows_an_error_and_opens_no_stream() {
    let server = MockBackend::start(BackendScript {
        task: (500, "backend down".to_string()),
        ..BackendScript::default()
    })
    .expect("backend");

    let mut session = session_for(&server);
    assert!(session.send("hello").await);

    assert!(!session.has_subscription());
    assert!(!session.state().is_loading());
    let last = session.state().messages().last().expect("message");
    assert_eq!(last.role, Role::Ai);
    assert_eq!(last.content, "Error: Failed to run agent: 500");
    assert!(server.requests_to("GET", "/stream/").is_empty());
}

#[tokio::test]
async fn stream_ending_early_closes_without_an_error_bubble() {
    let server = MockBackend::start(BackendScript {
        stream_body: event("review", "Checking the numbers"),
        hold_stream_open: false,
        ..BackendScript::default()
    })
    .expect("backend");

    let mut session = session_for(&server);
    assert!(session.send("hello").await);
    drain(&mut session).await;

    assert!(!session.has_subscription());
    let contents: Vec<_> = session
        .state()
        .messages()
        .iter()
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(contents.last(), Some(&"Checking the numbers"));
    assert!(!contents.iter().any(|c| c.starts_with("Error")));
}

#[tokio::test]
async fn malformed_and_unknown_events_are_skipped() {
    let stream_body = [
        "data: not json\n\n".to_string(),
        event("thinking", "ignored"),
        event("chunk_stream", "kept"),
        final_payload(),
    ]
    .concat();
    let server = MockBackend::start(BackendScript {
        stream_body,
        ..BackendScript::default()
    })
    .expect("backend");

    let mut session = session_for(&server);
    assert!(session.send("hello").await);
    drain(&mut session).await;

    let ai_events: Vec<_> = tail(&session, 1)
        .into_iter()
        .filter(|(role, ..)| *role == Role::Ai)
        .map(|(_, kind, _, content)| (kind, content))
        .collect();
    assert_eq!(
        ai_events,
        vec![(Some("chunk_stream".to_string()), "kept".to_string())]
    );
}

#[tokio::test]
async fn second_question_after_a_finished_task_opens_a_new_stream() {
    let server = MockBackend::start(BackendScript {
        stream_body: [event("chunk_stream", "answer"), final_payload()].concat(),
        ..BackendScript::default()
    })
    .expect("backend");

    let mut session = session_for(&server);
    assert!(session.send("first").await);
    drain(&mut session).await;
    assert!(session.send("second").await);
    drain(&mut session).await;

    let streams = server.requests_to("GET", "/stream/");
    assert_eq!(streams.len(), 2);
    assert_ne!(streams[0].path, streams[1].path);

    let active: Vec<_> = session
        .state()
        .messages()
        .iter()
        .filter(|m| m.active)
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(active, vec!["answer"]);
}

#[tokio::test]
async fn named_event_blocks_never_reach_the_transcript() {
    let named = event("retrieve", "hidden").replace("event: message", "event: retrieve");
    let stream_body = [named, event("retrieve", "shown"), final_payload()].concat();
    let server = MockBackend::start(BackendScript {
        stream_body,
        ..BackendScript::default()
    })
    .expect("backend");

    let mut session = session_for(&server);
    assert!(session.send("hello").await);
    drain(&mut session).await;

    let contents: Vec<_> = session
        .state()
        .messages()
        .iter()
        .map(|m| m.content.as_str())
        .collect();
    assert!(!contents.contains(&"hidden"), "got: {contents:?}");
    assert_eq!(contents.last(), Some(&"shown"));
}
