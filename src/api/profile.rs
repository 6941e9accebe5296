use super::Fetcher;
use anyhow::{bail, Result};
use bytes::Bytes;
use futures::future::{self, BoxFuture};
use futures::FutureExt;
use serde_json::{json, Value};

pub const PROFILE_ROOT_ROUTE: &str = "/api/me";
const PROFILE_SECTIONS: [&str; 3] = ["bio", "experience", "contact"];
const NOT_FOUND_MESSAGE: &str = "Nothing is here! Did you mean `/api/me`?";

/// Full command strings offered for autocomplete, in suggestion order.
pub fn candidate_commands(origin: &str) -> Vec<String> {
    std::iter::once(PROFILE_ROOT_ROUTE.to_string())
        .chain(
            PROFILE_SECTIONS
                .iter()
                .map(|section| format!("{PROFILE_ROOT_ROUTE}/{section}")),
        )
        .map(|route| format!("curl {origin}{route}"))
        .collect()
}

fn links() -> Value {
    Value::Array(
        PROFILE_SECTIONS
            .iter()
            .map(|section| json!({ "path": format!("/me/{section}"), "method": "GET" }))
            .collect(),
    )
}

/// Document served for an `/api/...` path, or `None` for the not-found body.
pub fn profile_document(path: &str) -> Option<Value> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = path.trim_end_matches('/');
    let document = match path {
        "/api/me" => json!({
            "links": links(),
            "me": {
                "about": "Explore this API by following the `links`!",
                "help": "Click any /me/ link instead of typing it out.",
            },
        }),
        "/api/me/bio" => json!({
            "links": links(),
            "bio": {
                "homebase": "Brooklyn, NY",
                "education": "B.S. Computer Science, Columbia University",
                "likes": ["skiing", "travel", "mountains", "beer", "fried chicken", "ramen"],
                "dislikes": ["tomatoes"],
            },
        }),
        "/api/me/experience" => json!({
            "links": links(),
            "experience": [
                {
                    "company": "Foursquare",
                    "roles": ["Manager, Developer Products & Relations", "Developer Advocate"],
                    "start": "Jan 2013",
                    "end": "Apr 2016",
                },
                {
                    "company": "Dexter",
                    "roles": ["VP, Engineering & Strategy"],
                    "start": "Apr 2016",
                    "end": "Dec 2018",
                },
                {
                    "company": "Stripe",
                    "roles": ["Product Manager", "Integration Engineer"],
                    "start": "Feb 2019",
                    "end": "Feb 2023",
                },
            ],
        }),
        "/api/me/contact" => json!({
            "links": links(),
            "contact": {
                "email": "mailto:me@example.dev",
                "twitter": "https://twitter.com/octopi",
                "linkedin": "https://www.linkedin.com/in/octopi",
                "github": "https://github.com/octopi",
                "instagram": "https://instagram.com/octopeye",
            },
        }),
        _ => return None,
    };
    Some(document)
}

pub fn not_found_document() -> Value {
    json!({ "error": NOT_FOUND_MESSAGE, "links": links() })
}

/// Serves the profile documents in-process, standing in for the HTTP backend.
#[derive(Clone, Debug)]
pub struct ProfileFetcher {
    origin: String,
}

impl ProfileFetcher {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    fn respond(&self, url: &str) -> Result<Bytes> {
        let Some(path) = url.strip_prefix(&self.origin) else {
            bail!("cannot reach '{url}': offline profile only serves {}", self.origin);
        };
        if !path.is_empty() && !path.starts_with('/') {
            bail!("cannot reach '{url}': unknown host");
        }

        let document = profile_document(path).unwrap_or_else(not_found_document);
        tracing::debug!(url, "served offline profile document");
        Ok(Bytes::from(serde_json::to_vec(&document)?))
    }
}

impl Fetcher for ProfileFetcher {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Bytes>> {
        future::ready(self.respond(url)).boxed()
    }
}
