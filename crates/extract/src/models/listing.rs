use super::fields;
use crate::extract::Record;

/// One summary card on a catalog, search, genre, type or status page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ListingEntry {
    pub title: String,
    /// Latest chapter as displayed, e.g. `"Chapter 120"`.
    pub chapter_label: String,
    /// Out of ten; `0.0` when the page shows no rating.
    pub rating: f64,
    /// Manga, manhua or manhwa, as displayed.
    pub kind: String,
    pub image_url: Option<String>,
    /// Site-relative link to the item detail page.
    pub path: String,
}
impl From<&Record> for ListingEntry {
    fn from(record: &Record) -> Self {
        Self {
            title: record.text(fields::TITLE),
            chapter_label: record.text(fields::CHAPTER_LABEL),
            rating: record.number(fields::RATING),
            kind: record.text(fields::KIND),
            image_url: record.optional(fields::IMAGE_URL),
            path: record.text(fields::PATH),
        }
    }
}
