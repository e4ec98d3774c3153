use crate::FetcherHandle;
use crate::error::{ErrorKind, Result};
use crate::page::{ItemType, PageRequest, PageType, StatusFilter};
use crate::profile::SiteProfile;
use crate::route::Router;
use exn::ResultExt;
use komik_extract::Extractor;
use komik_extract::models::{CategoryEntry, ItemDetail, ListingEntry, SubItemDetail};
use serde::Serialize;
use tracing::{debug, instrument, warn};

/// The records one page produced.
///
/// Serializes as the bare record (or sequence of records), without a tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Extracted {
    Listing(Vec<ListingEntry>),
    Item(ItemDetail),
    SubItem(SubItemDetail),
    Categories(Vec<CategoryEntry>),
}

/// Fetch, parse and extract for one [`SiteProfile`].
///
/// Invocations share nothing mutable, so one pipeline can serve any number of
/// concurrent requests through `&self`.
pub struct Pipeline {
    profile: SiteProfile,
    router: Router,
    fetcher: FetcherHandle,
}
impl Pipeline {
    /// Validates the profile's selector schemas and compiles its URL templates.
    pub fn new(profile: SiteProfile, fetcher: FetcherHandle) -> Result<Self> {
        profile.selectors.validate().or_raise(|| ErrorKind::Schema)?;
        let router = Router::compile(&profile.origin, &profile.routes)?;
        Ok(Self { profile, router, fetcher })
    }

    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    /// The URL a request resolves to, without fetching it.
    pub fn url(&self, request: &PageRequest) -> Result<String> {
        self.router.url(request)
    }

    /// Runs the whole pipeline for one request.
    ///
    /// The request is checked the same way the `PageRequest::from_*`
    /// constructors check raw input; a malformed one is rejected before
    /// anything is fetched.
    #[instrument(skip(self), fields(site = %self.profile.name, page_type = %request.page_type()))]
    pub async fn run(&self, request: &PageRequest) -> Result<Extracted> {
        let html = self.fetch(request).await?;
        self.extract(request.page_type(), &html)
    }

    /// Extracts the records of an already-fetched page.
    ///
    /// Detail pages without a title are [`ErrorKind::NotFound`]; every other
    /// missing field just takes its default.
    #[instrument(level = "debug", skip(self, html), fields(bytes = html.len()))]
    pub fn extract(&self, page_type: PageType, html: &str) -> Result<Extracted> {
        Ok(match page_type {
            PageType::ItemDetail => Extracted::Item(self.item_detail(html)?),
            PageType::SubItemDetail => Extracted::SubItem(self.sub_item_detail(html)?),
            PageType::CategoryIndex => Extracted::Categories(self.category_index(html)),
            PageType::PopularListing
            | PageType::Search
            | PageType::CategoryListing
            | PageType::TypeListing
            | PageType::StatusListing => Extracted::Listing(self.listing(html)),
        })
    }

    pub async fn popular(&self, page: u32) -> Result<Vec<ListingEntry>> {
        let html = self.fetch(&PageRequest::Popular { page }).await?;
        Ok(self.listing(&html))
    }

    /// `path` is relative to the origin, or an absolute URL on it.
    pub async fn item(&self, path: &str) -> Result<ItemDetail> {
        let html = self.fetch(&PageRequest::Item { path: path.to_string() }).await?;
        self.item_detail(&html)
    }

    pub async fn sub_item(&self, path: &str) -> Result<SubItemDetail> {
        let html = self.fetch(&PageRequest::SubItem { path: path.to_string() }).await?;
        self.sub_item_detail(&html)
    }

    pub async fn search(&self, query: &str, page: u32) -> Result<Vec<ListingEntry>> {
        let html = self.fetch(&PageRequest::Search { query: query.to_string(), page }).await?;
        Ok(self.listing(&html))
    }

    pub async fn category(&self, genre: &str, page: u32) -> Result<Vec<ListingEntry>> {
        let html = self.fetch(&PageRequest::Category { genre: genre.to_string(), page }).await?;
        Ok(self.listing(&html))
    }

    pub async fn categories(&self) -> Result<Vec<CategoryEntry>> {
        let html = self.fetch(&PageRequest::CategoryIndex).await?;
        Ok(self.category_index(&html))
    }

    pub async fn by_type(&self, kind: ItemType, page: u32) -> Result<Vec<ListingEntry>> {
        let html = self.fetch(&PageRequest::ByType { kind, page }).await?;
        Ok(self.listing(&html))
    }

    pub async fn by_status(&self, status: StatusFilter, page: u32) -> Result<Vec<ListingEntry>> {
        let html = self.fetch(&PageRequest::ByStatus { status, page }).await?;
        Ok(self.listing(&html))
    }

    async fn fetch(&self, request: &PageRequest) -> Result<String> {
        let url = self.router.url(request)?;
        debug!(%url, fetcher = self.fetcher.name(), "fetching page");
        self.fetcher.fetch(&url).await.inspect_err(|err| warn!(%url, error = %err, "fetch failed"))
    }

    // The parsed document isn't `Send`; it must never outlive one of these
    // synchronous calls.
    fn extractor(&self, html: &str) -> Extractor {
        Extractor::from_html(html).with_origin(self.router.origin())
    }

    fn item_detail(&self, html: &str) -> Result<ItemDetail> {
        let detail = self.extractor(html).item_detail(&self.profile.selectors);
        require_title(&detail.title, "comic")?;
        Ok(detail)
    }

    fn sub_item_detail(&self, html: &str) -> Result<SubItemDetail> {
        let detail = self.extractor(html).sub_item_detail(&self.profile.selectors);
        require_title(&detail.title, "chapter")?;
        Ok(detail)
    }

    fn category_index(&self, html: &str) -> Vec<CategoryEntry> {
        self.extractor(html).category_index(&self.profile.selectors)
    }

    fn listing(&self, html: &str) -> Vec<ListingEntry> {
        let entries = self.extractor(html).listing(&self.profile.selectors);
        debug!(entries = entries.len(), "extracted listing");
        entries
    }
}

fn require_title(title: &str, what: &'static str) -> Result<()> {
    if title.is_empty() {
        exn::bail!(ErrorKind::NotFound(what));
    }
    Ok(())
}
