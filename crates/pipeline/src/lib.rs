//! Fetch a catalog page, parse it, and extract typed records.
//!
//! One [`Pipeline`] serves one [`SiteProfile`]: the profile's URL templates
//! say where each [`PageType`] lives, its selector schemas say where the
//! fields are, and a [`Fetcher`] brings the HTML in between.
//!
//! ```no_run
//! use komik_pipeline::{HttpFetcher, Pipeline, SiteProfile};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> komik_pipeline::error::Result<()> {
//! let fetcher = HttpFetcher::new("komik", std::time::Duration::from_secs(10))?;
//! let pipeline = Pipeline::new(SiteProfile::default(), Arc::new(fetcher))?;
//! for entry in pipeline.popular(1).await? {
//!     println!("{} ({})", entry.title, entry.path);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod fetch;
pub mod page;
mod pipeline;
pub mod profile;
mod route;

#[cfg(feature = "http")]
pub use crate::fetch::HttpFetcher;
pub use crate::fetch::Fetcher;
pub use crate::page::{ItemType, PageRequest, PageType, StatusFilter};
pub use crate::pipeline::{Extracted, Pipeline};
pub use crate::profile::{RouteTemplates, SiteProfile};
use std::sync::Arc;

pub type FetcherHandle = Arc<dyn Fetcher + Send + Sync>;
