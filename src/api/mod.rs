pub mod client;
pub mod mock_client;
pub mod profile;

use anyhow::Result;
use bytes::Bytes;
use futures::future::BoxFuture;

pub use client::HttpFetcher;
pub use mock_client::MockFetcher;
pub use profile::ProfileFetcher;

/// Read-only GET of a fully resolved URL, returning the raw response body.
///
/// Implementations never validate the URL against an origin; that is the
/// command pipeline's job and happens before a fetcher is ever called.
pub trait Fetcher: Send + Sync {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Bytes>>;
}
