use super::{plan_request, CommandError, CommandOutcome};
use crate::api::Fetcher;
use serde_json::Value;
use std::sync::Arc;

/// Turns one submitted line into an outcome. Validation failures never reach
/// the fetcher; transport and decode failures collapse into one fixed message.
#[derive(Clone)]
pub struct CommandPipeline {
    origin: String,
    fetcher: Arc<dyn Fetcher>,
}

impl CommandPipeline {
    pub fn new(origin: impl Into<String>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            origin: origin.into(),
            fetcher,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub async fn execute(&self, command: &str) -> CommandOutcome {
        let outcome = match self.run(command).await {
            Ok(message) => CommandOutcome::success(message),
            Err(error) => CommandOutcome::from(error),
        };
        tracing::info!(command, success = outcome.success, "command resolved");
        outcome
    }

    async fn run(&self, command: &str) -> Result<String, CommandError> {
        let url = plan_request(command, &self.origin)?;

        let body = self.fetcher.get(&url).await.map_err(|error| {
            tracing::warn!(url = %url, error = %error, "fetch failed");
            CommandError::Transport
        })?;
        let value: Value = serde_json::from_slice(&body).map_err(|error| {
            tracing::warn!(url = %url, error = %error, "response was not JSON");
            CommandError::Transport
        })?;

        serde_json::to_string(&value).map_err(|_| CommandError::Transport)
    }
}
