//! HTTP client for the agent backend.
//!
//! The API layer is split into cohesive modules:
//! - `directory`: `/available_agents`, `/agent_execution_info`, `/start_agent`
//! - `tasks`: task submission
//! - `stream` + `sse`: the per-task server-push subscription
//! - `client`: shared HTTP clients and endpoint wiring

use crate::error::ApiError;
use crate::types::{Agent, AgentExecutionInfo, StartAgentResponse, TaskRequest};
use async_trait::async_trait;

mod client;
mod directory;
pub mod sse;
mod stream;
mod tasks;
mod transport;

pub use client::ApiClient;
pub use stream::{StreamSignal, Subscription};

/// Read side of the agent directory service.
///
/// Lets the dashboard be exercised against canned snapshots while the
/// production path uses [`ApiClient`].
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn list_available_agents(&self) -> Result<Vec<Agent>, ApiError>;
    async fn execution_info(&self) -> Result<AgentExecutionInfo, ApiError>;
    async fn start_agent(&self, agent_id: &str) -> Result<StartAgentResponse, ApiError>;
}

/// Task submission plus the per-task event stream used by chat sessions.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn submit_task(&self, request: &TaskRequest) -> Result<(), ApiError>;

    /// Open the event stream for `task_id`. Never fails up front; connection
    /// problems arrive as [`StreamSignal::Failed`].
    fn open_stream(&self, task_id: &str) -> Subscription;
}
