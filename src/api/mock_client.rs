use super::Fetcher;
use anyhow::Result;
use bytes::Bytes;
use futures::future::{self, BoxFuture};
use futures::FutureExt;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted fetcher: replies with queued bodies in order and records every URL.
#[derive(Clone, Default)]
pub struct MockFetcher {
    responses: Arc<Mutex<VecDeque<Result<Bytes, String>>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(self, body: impl Into<String>) -> Self {
        self.push(Ok(Bytes::from(body.into())));
        self
    }

    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(Err(message.into()));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn push(&self, response: Result<Bytes, String>) {
        if let Ok(mut guard) = self.responses.lock() {
            guard.push_back(response);
        }
    }

    fn next_response(&self, url: &str) -> Result<Bytes> {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(url.to_string());
        }
        let next = self
            .responses
            .lock()
            .ok()
            .and_then(|mut guard| guard.pop_front());
        match next {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Err(anyhow::anyhow!("MockFetcher: no more responses configured")),
        }
    }
}

impl Fetcher for MockFetcher {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Bytes>> {
        future::ready(self.next_response(url)).boxed()
    }
}
