use super::Fetcher;
use crate::logging::log_response_payload;
use anyhow::{anyhow, Result};
use bytes::Bytes;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::time::Duration;

#[derive(Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|error| anyhow!("failed to build HTTP client: {error}"))?;
        Ok(Self { http })
    }

    async fn fetch(&self, url: &str) -> Result<Bytes> {
        // Status is deliberately not checked: a 404 with a JSON body is still output.
        let response = self
            .http
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|error| map_request_error(error, url))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| map_request_error(error, url))?;

        tracing::debug!(url, status = status.as_u16(), bytes = body.len(), "GET complete");
        log_response_payload(url, &body);
        Ok(body)
    }
}

impl Fetcher for HttpFetcher {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Bytes>> {
        self.fetch(url).boxed()
    }
}

fn map_request_error(error: reqwest::Error, request_url: &str) -> anyhow::Error {
    if error.is_connect() {
        return anyhow!("cannot reach '{}': {}", request_url, error);
    }
    if error.is_timeout() {
        return anyhow!("request to '{}' timed out: {}", request_url, error);
    }
    if let Some(status) = error.status() {
        return anyhow!("'{}' returned HTTP {}: {}", request_url, status, error);
    }
    anyhow!("request to '{}' failed: {}", request_url, error)
}
