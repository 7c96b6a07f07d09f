//! Dashboard page state.
//!
//! The dashboard shows two directory snapshots fetched concurrently. Either
//! fetch failing turns the whole page into an error state; there is no
//! partial rendering and no automatic retry.

use crate::api::DirectoryApi;
use crate::types::{Agent, AgentExecutionInfo};
use tracing::{debug, warn};

/// Both directory snapshots, fetched together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySnapshot {
    pub available: Vec<Agent>,
    pub execution: AgentExecutionInfo,
}

impl DirectorySnapshot {
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    pub fn running_count(&self) -> usize {
        self.execution.currently_running.len()
    }

    pub fn completed_count(&self) -> usize {
        self.execution.recently_completed.len()
    }
}

/// The three mutually exclusive page states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardState {
    Loading,
    Loaded(DirectorySnapshot),
    Failed(String),
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Fetch both snapshots concurrently and fold the outcome into a page state.
pub async fn load_dashboard<D: DirectoryApi + ?Sized>(api: &D) -> DashboardState {
    match fetch_snapshot(api).await {
        Ok(snapshot) => {
            debug!(
                available = snapshot.available_count(),
                running = snapshot.running_count(),
                completed = snapshot.completed_count(),
                "dashboard loaded"
            );
            DashboardState::Loaded(snapshot)
        }
        Err(message) => {
            warn!(error = %message, "dashboard load failed");
            DashboardState::Failed(message)
        }
    }
}

async fn fetch_snapshot<D: DirectoryApi + ?Sized>(api: &D) -> Result<DirectorySnapshot, String> {
    let agents = async {
        api.list_available_agents()
            .await
            .map_err(|err| format!("failed to fetch agents: {err}"))
    };
    let execution = async {
        api.execution_info()
            .await
            .map_err(|err| format!("failed to fetch execution info: {err}"))
    };
    let (available, execution) = tokio::try_join!(agents, execution)?;
    Ok(DirectorySnapshot {
        available,
        execution,
    })
}
