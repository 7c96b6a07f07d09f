//! Concrete backend client.

use super::{directory, tasks, transport, DirectoryApi, Subscription, TaskApi};
use crate::config::{Config, EndpointsConfig, NetworkConfig};
use crate::error::ApiError;
use crate::types::{Agent, AgentExecutionInfo, StartAgentResponse, TaskRequest};
use async_trait::async_trait;
use std::time::Duration;

/// Client for the directory service, task endpoint and stream gateway.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    stream_http: reqwest::Client,
    endpoints: EndpointsConfig,
}

impl ApiClient {
    pub fn new(endpoints: &EndpointsConfig, network: &NetworkConfig) -> Self {
        Self {
            http: transport::build_http_client(Duration::from_secs(network.api_timeout_secs)),
            stream_http: transport::build_stream_client(Duration::from_secs(
                network.connect_timeout_secs,
            )),
            endpoints: endpoints.clone(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.endpoints, &config.network)
    }

    pub fn endpoints(&self) -> &EndpointsConfig {
        &self.endpoints
    }
}

#[async_trait]
impl DirectoryApi for ApiClient {
    async fn list_available_agents(&self) -> Result<Vec<Agent>, ApiError> {
        directory::list_available_agents(&self.http, &self.endpoints.directory_url).await
    }

    async fn execution_info(&self) -> Result<AgentExecutionInfo, ApiError> {
        directory::execution_info(&self.http, &self.endpoints.directory_url).await
    }

    async fn start_agent(&self, agent_id: &str) -> Result<StartAgentResponse, ApiError> {
        directory::start_agent(&self.http, &self.endpoints.directory_url, agent_id).await
    }
}

#[async_trait]
impl TaskApi for ApiClient {
    async fn submit_task(&self, request: &TaskRequest) -> Result<(), ApiError> {
        tasks::submit_task(&self.http, &self.endpoints.task_url, request).await
    }

    fn open_stream(&self, task_id: &str) -> Subscription {
        Subscription::spawn(self.stream_http.clone(), &self.endpoints.stream_url, task_id)
    }
}
