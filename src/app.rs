use crate::api::profile::candidate_commands;
use crate::api::{Fetcher, HttpFetcher, ProfileFetcher};
use crate::commands::CommandPipeline;
use crate::config::Config;
use crate::runtime::{Runtime, ShellMode, UiUpdate};
use crate::state::Session;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Picks the backend for `config`. Offline mode serves the built-in profile.
pub fn build_fetcher(config: &Config) -> Result<Arc<dyn Fetcher>> {
    if config.offline {
        return Ok(Arc::new(ProfileFetcher::new(config.api_origin.clone())));
    }
    Ok(Arc::new(HttpFetcher::new(config.fetch_timeout)?))
}

pub fn build_runtime(config: Config) -> Result<Runtime> {
    let fetcher = build_fetcher(&config)?;
    let pipeline = CommandPipeline::new(config.api_origin.clone(), fetcher);
    let session = Session::new(candidate_commands(&config.api_origin));

    let (update_tx, update_rx) = mpsc::unbounded_channel::<UiUpdate>();
    let mode = ShellMode::new(
        session,
        pipeline,
        update_tx,
        config.settle_delay,
        config.browser,
    );
    tracing::info!(
        origin = %config.api_origin,
        offline = config.offline,
        "runtime ready"
    );
    Ok(Runtime::new(mode, update_rx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn offline_config() -> Config {
        Config {
            api_origin: "http://localhost:3000".to_string(),
            offline: true,
            fetch_timeout: None,
            settle_delay: Duration::ZERO,
            browser: "true".to_string(),
        }
    }

    #[test]
    fn test_build_runtime_seeds_initial_session() {
        let runtime = build_runtime(offline_config()).expect("runtime");
        let session = runtime.mode.session();
        assert_eq!(session.lines().len(), 1);
        assert_eq!(session.live_command(), "c");
        assert_eq!(session.candidates().len(), 4);
        assert_eq!(runtime.mode.origin(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_offline_fetcher_serves_profile() {
        let fetcher = build_fetcher(&offline_config()).expect("fetcher");
        let body = fetcher
            .get("http://localhost:3000/api/me")
            .await
            .expect("profile body");
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert!(value.get("links").is_some());
    }
}
