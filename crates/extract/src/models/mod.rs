//! Domain records handed to the API layer.
//!
//! Each model is assembled from a [`Record`](crate::Record) whose field names
//! are listed in [`fields`]. A field the schema didn't produce simply takes
//! its default, so a site profile can omit fields its markup doesn't have.

mod category;
mod detail;
mod listing;
mod reader;

pub use self::category::CategoryEntry;
pub use self::detail::{ItemDetail, SubItemSummary};
pub use self::listing::ListingEntry;
pub use self::reader::SubItemDetail;

/// Record field names shared by schemas and models.
pub mod fields {
    pub const TITLE: &str = "title";
    pub const CHAPTER_LABEL: &str = "chapterLabel";
    pub const RATING: &str = "rating";
    pub const KIND: &str = "kind";
    pub const IMAGE_URL: &str = "imageUrl";
    pub const PATH: &str = "path";
    pub const NATIVE_TITLE: &str = "nativeTitle";
    pub const GENRES: &str = "genres";
    pub const RELEASE_DATE: &str = "releaseDate";
    pub const AUTHOR: &str = "author";
    pub const STATUS: &str = "status";
    pub const TOTAL_UNITS: &str = "totalUnits";
    pub const UPDATED_ON: &str = "updatedOn";
    pub const SYNOPSIS: &str = "synopsis";
    pub const SUB_ITEMS: &str = "subItems";
    pub const PUBLISHED_LABEL: &str = "publishedLabel";
    pub const NEXT_PATH: &str = "nextPath";
    pub const IMAGES: &str = "images";
    pub const NAME: &str = "name";
}
