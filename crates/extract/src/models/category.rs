use super::fields;
use crate::extract::Record;

/// A genre from the genre index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CategoryEntry {
    pub name: String,
    /// Site-relative link to the genre's listing.
    pub path: String,
}
impl From<&Record> for CategoryEntry {
    fn from(record: &Record) -> Self {
        Self {
            name: record.text(fields::NAME),
            path: record.text(fields::PATH),
        }
    }
}
