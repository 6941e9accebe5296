use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_PATH: &str = "/tmp/termfolio.log";
const DEBUG_PAYLOAD_ENV: &str = "TERMFOLIO_DEBUG_PAYLOAD";
const LOG_PATH_ENV: &str = "TERMFOLIO_LOG_PATH";
const LOG_FILTER_ENV: &str = "TERMFOLIO_LOG";

pub fn debug_payload_enabled() -> bool {
    std::env::var(DEBUG_PAYLOAD_ENV)
        .ok()
        .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

pub fn log_response_payload(url: &str, body: &[u8]) {
    if !debug_payload_enabled() {
        return;
    }
    tracing::debug!(
        url,
        bytes = body.len(),
        body = %String::from_utf8_lossy(body),
        "fetched response payload"
    );
}

/// Installs the global subscriber. The TUI owns stdout, so events go to a file
/// whenever stderr is attached to the same terminal.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false);

    let result = match resolve_log_path() {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {path}"))?;
            builder.with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    result.map_err(|error| anyhow::anyhow!("Failed to install log subscriber: {error}"))
}

fn resolve_log_path() -> Option<String> {
    std::env::var(LOG_PATH_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| {
            if std::io::stderr().is_terminal() {
                Some(DEFAULT_LOG_PATH.to_string())
            } else {
                None
            }
        })
}
