//! agentdesk: a terminal dashboard and chat client for an agent backend.
//!
//! The crate talks to three HTTP services: an agent directory (listing and
//! starting agents), a task endpoint (submitting chat messages as tasks) and
//! a stream gateway that pushes each task's progress as server-sent events.
//!
//! # Quick start
//!
//! ```no_run
//! use agentdesk::api::ApiClient;
//! use agentdesk::chat::ChatSession;
//! use agentdesk::config::load_config;
//!
//! # async fn example() {
//! let config = load_config(None).unwrap();
//! let mut session = ChatSession::new(ApiClient::from_config(&config), &config.chat);
//! session.send("What was last quarter's revenue?").await;
//! session.run_until_idle().await;
//! for message in session.state().messages() {
//!     println!("{:?}: {}", message.role, message.content);
//! }
//! # }
//! ```

pub mod api;
pub mod build_info;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod error;
#[cfg(test)]
pub mod testsupport;
pub mod tui;
pub mod types;
