//! Page fetchers.
//!
//! The pipeline only needs "give me the body at this URL", so transport lives
//! behind the [`Fetcher`] trait. [`HttpFetcher`] is the real thing; tests and
//! offline callers swap in [`MockFetcher`].

#[cfg(feature = "http")]
mod http;
#[cfg(any(test, feature = "mock"))]
mod mock;

#[cfg(feature = "http")]
pub use self::http::HttpFetcher;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockFetcher;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("komik/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Retrieves raw HTML for a URL.
///
/// Implementations report transport failures, timeouts and non-2xx responses
/// as [`ErrorKind::FetchFailed`](crate::error::ErrorKind::FetchFailed), and
/// never retry.
///
/// # Examples
///
/// ```
/// use komik_pipeline::error::Result;
/// use komik_pipeline::fetch::Fetcher;
///
/// async fn body_size(fetcher: &dyn Fetcher, url: &str) -> Result<usize> {
///     Ok(fetcher.fetch(url).await?.len())
/// }
/// ```
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Human-readable name, for logs.
    fn name(&self) -> &str;

    async fn fetch(&self, url: &str) -> Result<String>;
}
