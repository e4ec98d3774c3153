//! HTTP fetcher backed by a pooled [`reqwest::Client`].

use super::Fetcher;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::ResultExt;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub struct HttpFetcher {
    client: reqwest::Client,
}
impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .or_raise(|| ErrorKind::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<String> {
        let failed = |status: Option<u16>| ErrorKind::FetchFailed { url: url.to_string(), status };
        let response = self.client.get(url).send().await.or_raise(|| failed(None))?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "non-success response");
            exn::bail!(failed(Some(status.as_u16())));
        }
        let body = response.text().await.or_raise(|| failed(Some(status.as_u16())))?;
        debug!(bytes = body.len(), "fetched page");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

    #[test]
    fn test_new_with_defaults() {
        assert!(HttpFetcher::new(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT).is_ok());
    }

    #[test]
    fn test_unusable_user_agent_is_a_client_error() {
        let err = HttpFetcher::new("bad\nagent", DEFAULT_TIMEOUT).err().unwrap();
        assert_eq!(*err, ErrorKind::Client);
        assert!(!err.is_retryable());
    }
}
