use super::fields;
use crate::extract::Record;

/// Everything the item (series) page says about one item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ItemDetail {
    pub image_url: Option<String>,
    pub title: String,
    pub native_title: String,
    /// Genre tags in page order.
    pub genres: Vec<String>,
    pub release_date: String,
    pub author: String,
    /// Usually `"Ongoing"` or `"Completed"`, otherwise the raw text.
    pub status: String,
    pub kind: String,
    pub total_units: String,
    /// Machine-readable timestamp from the `datetime` attribute.
    pub updated_on: Option<String>,
    /// Out of ten; `0.0` when absent.
    pub rating: f64,
    pub synopsis: String,
    /// Chapter rows in page order (the source lists newest first).
    pub sub_items: Vec<SubItemSummary>,
}
impl ItemDetail {
    pub fn is_completed(&self) -> bool {
        self.status.eq_ignore_ascii_case("completed")
    }
}
impl From<&Record> for ItemDetail {
    fn from(record: &Record) -> Self {
        Self {
            image_url: record.optional(fields::IMAGE_URL),
            title: record.text(fields::TITLE),
            native_title: record.text(fields::NATIVE_TITLE),
            genres: record.list(fields::GENRES),
            release_date: record.text(fields::RELEASE_DATE),
            author: record.text(fields::AUTHOR),
            status: record.text(fields::STATUS),
            kind: record.text(fields::KIND),
            total_units: record.text(fields::TOTAL_UNITS),
            updated_on: record.optional(fields::UPDATED_ON),
            rating: record.number(fields::RATING),
            synopsis: record.text(fields::SYNOPSIS),
            sub_items: record.group(fields::SUB_ITEMS).iter().map(SubItemSummary::from).collect(),
        }
    }
}

/// One chapter row on an item page.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SubItemSummary {
    pub title: String,
    /// Site-relative link to the chapter's reading page.
    pub path: String,
    /// Relative publish time as displayed, e.g. `"2 days ago"`.
    pub published_label: String,
}
impl From<&Record> for SubItemSummary {
    fn from(record: &Record) -> Self {
        Self {
            title: record.text(fields::TITLE),
            path: record.text(fields::PATH),
            published_label: record.text(fields::PUBLISHED_LABEL),
        }
    }
}
