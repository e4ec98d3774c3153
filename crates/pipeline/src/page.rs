//! Page types and the requests that target them.
//!
//! A [`PageRequest`] carries exactly the parameters its page type needs. The
//! `from_*` constructors accept raw router strings (as they'd arrive from a
//! path like `/types/manhwa/2`) and reject anything that can't become a URL.

use crate::error::{Error, ErrorKind, Result};
use derive_more::Display;
use exn::{OptionExt, ResultExt};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Every page shape the pipeline knows how to turn into records.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PageType {
    #[display("popularListing")]
    PopularListing,
    #[display("itemDetail")]
    ItemDetail,
    #[display("subItemDetail")]
    SubItemDetail,
    #[display("search")]
    Search,
    #[display("categoryListing")]
    CategoryListing,
    #[display("categoryIndex")]
    CategoryIndex,
    #[display("typeListing")]
    TypeListing,
    #[display("statusListing")]
    StatusListing,
}
impl PageType {
    pub const ALL: [PageType; 8] = [
        Self::PopularListing,
        Self::ItemDetail,
        Self::SubItemDetail,
        Self::Search,
        Self::CategoryListing,
        Self::CategoryIndex,
        Self::TypeListing,
        Self::StatusListing,
    ];

    /// Route pattern an API layer exposes this page type under.
    ///
    /// Status listings are served from two routes, one per [`StatusFilter`].
    pub fn routes(&self) -> &'static [&'static str] {
        match self {
            Self::PopularListing => &["/popular/:page"],
            Self::ItemDetail => &["/komik/:title"],
            Self::SubItemDetail => &["/chapter/:title"],
            Self::Search => &["/search/:query/:page?"],
            Self::CategoryListing => &["/genres/:genre/:page?"],
            Self::CategoryIndex => &["/genres"],
            Self::TypeListing => &["/types/:type/:page?"],
            Self::StatusListing => &["/ongoing/:page?", "/completed/:page?"],
        }
    }

    /// Pages whose record is a single detail rather than a sequence.
    pub fn is_detail(&self) -> bool {
        matches!(self, Self::ItemDetail | Self::SubItemDetail)
    }
}

/// Catalog content type accepted by type listings.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[display("manga")]
    Manga,
    #[display("manhua")]
    Manhua,
    #[display("manhwa")]
    Manhwa,
}
impl FromStr for ItemType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manga" => Ok(Self::Manga),
            "manhua" => Ok(Self::Manhua),
            "manhwa" => Ok(Self::Manhwa),
            _ => exn::bail!(ErrorKind::MalformedInput(format!(
                "type must be one of manga, manhua or manhwa, got {s:?}"
            ))),
        }
    }
}

/// Publication status accepted by status listings.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[display("ongoing")]
    Ongoing,
    #[display("completed")]
    Completed,
}
impl StatusFilter {
    /// The value the catalog's `status` query parameter expects.
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Ongoing => "Ongoing",
            Self::Completed => "Completed",
        }
    }
}
impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            _ => exn::bail!(ErrorKind::MalformedInput(format!("status must be ongoing or completed, got {s:?}"))),
        }
    }
}

/// A fully-validated target for one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    Popular { page: u32 },
    Item { path: String },
    SubItem { path: String },
    Search { query: String, page: u32 },
    Category { genre: String, page: u32 },
    CategoryIndex,
    ByType { kind: ItemType, page: u32 },
    ByStatus { status: StatusFilter, page: u32 },
}
impl PageRequest {
    pub fn page_type(&self) -> PageType {
        match self {
            Self::Popular { .. } => PageType::PopularListing,
            Self::Item { .. } => PageType::ItemDetail,
            Self::SubItem { .. } => PageType::SubItemDetail,
            Self::Search { .. } => PageType::Search,
            Self::Category { .. } => PageType::CategoryListing,
            Self::CategoryIndex => PageType::CategoryIndex,
            Self::ByType { .. } => PageType::TypeListing,
            Self::ByStatus { .. } => PageType::StatusListing,
        }
    }

    pub fn from_popular(page: Option<&str>) -> Result<Self> {
        Ok(Self::Popular { page: page_number(page)? })
    }

    /// `path` may be relative (`komik/x/`, `/komik/x/`) or an absolute URL on
    /// `origin`, which is reduced to its path.
    pub fn from_item(path: &str, origin: &str) -> Result<Self> {
        Ok(Self::Item { path: relative_path(path, origin)? })
    }

    pub fn from_sub_item(path: &str, origin: &str) -> Result<Self> {
        Ok(Self::SubItem { path: relative_path(path, origin)? })
    }

    pub fn from_search(query: &str, page: Option<&str>) -> Result<Self> {
        Ok(Self::Search { query: search_query(query)?, page: page_number(page)? })
    }

    pub fn from_category(genre: &str, page: Option<&str>) -> Result<Self> {
        Ok(Self::Category { genre: genre_slug(genre)?, page: page_number(page)? })
    }

    pub fn from_type(kind: &str, page: Option<&str>) -> Result<Self> {
        let kind = kind.parse::<ItemType>()?;
        Ok(Self::ByType { kind, page: page_number(page)? })
    }

    pub fn from_status(status: &str, page: Option<&str>) -> Result<Self> {
        let status = status.parse::<StatusFilter>()?;
        Ok(Self::ByStatus { status, page: page_number(page)? })
    }

    /// Applies the `from_*` checks to a request that may have been built
    /// directly from its public fields.
    pub(crate) fn normalized(&self, origin: &str) -> Result<Self> {
        Ok(match self {
            Self::Popular { page } => Self::Popular { page: checked_page(*page)? },
            Self::Item { path } => Self::Item { path: relative_path(path, origin)? },
            Self::SubItem { path } => Self::SubItem { path: relative_path(path, origin)? },
            Self::Search { query, page } => {
                Self::Search { query: search_query(query)?, page: checked_page(*page)? }
            },
            Self::Category { genre, page } => {
                Self::Category { genre: genre_slug(genre)?, page: checked_page(*page)? }
            },
            Self::CategoryIndex => Self::CategoryIndex,
            Self::ByType { kind, page } => Self::ByType { kind: *kind, page: checked_page(*page)? },
            Self::ByStatus { status, page } => Self::ByStatus { status: *status, page: checked_page(*page)? },
        })
    }
}

fn search_query(raw: &str) -> Result<String> {
    let query = raw.trim();
    if query.is_empty() {
        exn::bail!(ErrorKind::MalformedInput("search query is empty".to_string()));
    }
    Ok(query.to_string())
}

fn genre_slug(raw: &str) -> Result<String> {
    let genre = raw.trim().trim_matches('/');
    if genre.is_empty() || genre.contains('/') {
        exn::bail!(ErrorKind::MalformedInput(format!("invalid genre {genre:?}")));
    }
    Ok(genre.to_string())
}

/// Absent or blank pages default to the first; anything else must be a
/// positive integer.
pub(crate) fn page_number(raw: Option<&str>) -> Result<u32> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(1);
    };
    raw.parse::<u32>()
        .ok()
        .filter(|page| *page > 0)
        .ok_or_raise(|| ErrorKind::MalformedInput(format!("page must be a positive integer, got {raw:?}")))
}

/// Pages are 1-based.
pub(crate) fn checked_page(page: u32) -> Result<u32> {
    if page == 0 {
        exn::bail!(ErrorKind::MalformedInput("page must be a positive integer, got 0".to_string()));
    }
    Ok(page)
}

/// Reduces a caller-supplied path to one relative to `origin`, without the
/// leading slash, so templates can append it as `{{ origin }}/{{ path }}`.
pub(crate) fn relative_path(raw: &str, origin: &str) -> Result<String> {
    let raw = raw.trim();
    let path = match url::Url::parse(raw) {
        Ok(absolute) => {
            let expected = url::Url::parse(origin)
                .or_raise(|| ErrorKind::MalformedInput(format!("invalid origin {origin:?}")))?;
            if absolute.origin() != expected.origin() {
                exn::bail!(ErrorKind::MalformedInput(format!("{raw:?} is not on {origin}")));
            }
            match absolute.query() {
                Some(query) => format!("{}?{query}", absolute.path()),
                None => absolute.path().to_string(),
            }
        },
        Err(_) => raw.to_string(),
    };
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        exn::bail!(ErrorKind::MalformedInput("path is empty".to_string()));
    }
    Ok(path.to_string())
}
