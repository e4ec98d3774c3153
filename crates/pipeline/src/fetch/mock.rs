//! In-memory fetcher for testing.

use super::Fetcher;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

enum Response {
    Body(String),
    Status(u16),
}

/// Serves canned pages by exact URL, and records every URL it was asked for.
///
/// Unknown URLs answer as a `404`, so a wrong template shows up as
/// [`ErrorKind::FetchFailed`] rather than as an empty page.
pub struct MockFetcher {
    name: String,
    responses: HashMap<String, Response>,
    requests: Mutex<Vec<String>>,
}
impl MockFetcher {
    pub fn with_pages(pages: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            name: "mock".to_string(),
            responses: pages.into_iter().map(|(url, body)| (url.into(), Response::Body(body.into()))).collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answers `url` with a bodiless `status` response.
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses.insert(url.into(), Response::Status(status));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// URLs requested so far, in call order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }
}
impl Default for MockFetcher {
    fn default() -> Self {
        let pages: [(&str, &str); 0] = [];
        Self::with_pages(pages)
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        self.requests.lock().await.push(url.to_string());
        match self.responses.get(url) {
            Some(Response::Body(body)) => Ok(body.clone()),
            Some(Response::Status(status)) => {
                exn::bail!(ErrorKind::FetchFailed { url: url.to_string(), status: Some(*status) })
            },
            None => exn::bail!(ErrorKind::FetchFailed { url: url.to_string(), status: Some(404) }),
        }
    }
}
