use super::fields;
use crate::extract::Record;

/// A chapter's reading page.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SubItemDetail {
    pub title: String,
    /// Site-relative link to the following chapter, if there is one.
    pub next_path: Option<String>,
    /// Page images in reading order.
    pub images: Vec<String>,
}
impl SubItemDetail {
    pub fn has_next(&self) -> bool {
        self.next_path.is_some()
    }
}
impl From<&Record> for SubItemDetail {
    fn from(record: &Record) -> Self {
        Self {
            title: record.text(fields::TITLE),
            next_path: record.optional(fields::NEXT_PATH),
            images: record.list(fields::IMAGES),
        }
    }
}
