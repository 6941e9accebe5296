use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::util::{normalize_origin, parse_bool_flag};

const DEFAULT_API_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_SETTLE_MS: u64 = 500;
const MAX_SETTLE_MS: u64 = 5_000;
const MAX_FETCH_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_origin: String,
    pub offline: bool,
    pub fetch_timeout: Option<Duration>,
    pub settle_delay: Duration,
    pub browser: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let api_origin = resolve_api_origin();
        let offline = std::env::var("TERMFOLIO_OFFLINE")
            .ok()
            .and_then(parse_bool_flag)
            .unwrap_or(false);
        let fetch_timeout = match std::env::var("TERMFOLIO_FETCH_TIMEOUT_SECS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => bail!("Invalid TERMFOLIO_FETCH_TIMEOUT_SECS '{raw}': expected seconds"),
            },
            Err(_) => None,
        };
        let settle_ms = match std::env::var("TERMFOLIO_SETTLE_MS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => ms,
                Err(_) => bail!("Invalid TERMFOLIO_SETTLE_MS '{raw}': expected milliseconds"),
            },
            Err(_) => DEFAULT_SETTLE_MS,
        };
        let browser = std::env::var("TERMFOLIO_BROWSER")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default_browser().to_string());

        Ok(Self {
            api_origin,
            offline,
            fetch_timeout,
            settle_delay: Duration::from_millis(settle_ms),
            browser,
        })
    }

    pub fn validate(&self) -> Result<()> {
        let normalized = normalize_origin(&self.api_origin)?;
        if normalized != self.api_origin {
            bail!(
                "Invalid TERMFOLIO_API_ORIGIN '{}': use the normalized form '{}'",
                self.api_origin,
                normalized
            );
        }

        if let Some(timeout) = self.fetch_timeout {
            let secs = timeout.as_secs();
            if secs == 0 || secs > MAX_FETCH_TIMEOUT_SECS {
                bail!(
                    "Invalid fetch timeout {secs}s: expected 1..={MAX_FETCH_TIMEOUT_SECS} seconds"
                );
            }
        }

        let settle_ms = self.settle_delay.as_millis();
        if settle_ms > u128::from(MAX_SETTLE_MS) {
            bail!("Invalid settle delay {settle_ms}ms: expected 0..={MAX_SETTLE_MS} milliseconds");
        }

        if self.browser.trim().is_empty() {
            bail!("TERMFOLIO_BROWSER must not be empty");
        }

        Ok(())
    }
}

fn resolve_api_origin() -> String {
    let raw = std::env::var("TERMFOLIO_API_ORIGIN")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| {
            std::env::var("VERCEL_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|host| format!("https://{}", host.trim()))
        })
        .or_else(|| {
            std::env::var("API_HOST")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|host| format!("http://{}", host.trim()))
        })
        .unwrap_or_else(|| DEFAULT_API_ORIGIN.to_string());

    // Left as-is when malformed so validate() can report it.
    normalize_origin(&raw).unwrap_or(raw)
}

fn default_browser() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}
