//! Site profiles: everything that differs between catalog mirrors.

use crate::page::PageType;
use komik_extract::DEFAULT_ORIGIN;
use komik_extract::schema::SelectorSet;
use serde::{Deserialize, Serialize};

/// One catalog site: where it lives, how its URLs are shaped, and where its
/// fields sit in the HTML.
///
/// Any field left out of a deserialized profile takes the komikcast default,
/// so a mirror usually only needs `name` and `origin`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteProfile {
    pub name: String,
    pub origin: String,
    pub routes: RouteTemplates,
    pub selectors: SelectorSet,
}
impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            name: "komikcast".to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            routes: RouteTemplates::default(),
            selectors: SelectorSet::default(),
        }
    }
}
impl SiteProfile {
    /// A mirror of the default site served from a different origin.
    pub fn mirror(name: impl Into<String>, origin: impl Into<String>) -> Self {
        Self { name: name.into(), origin: origin.into(), ..Self::default() }
    }
}

/// [upon] URL templates, one per [`PageType`].
///
/// Every template sees `origin`; listings add `page`, details add `path`, and
/// search, category, type and status listings add `query`, `genre`, `kind` and
/// `status` respectively. The `urlencode` formatter escapes a value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteTemplates {
    pub popular: String,
    pub item: String,
    pub sub_item: String,
    pub search: String,
    pub category: String,
    pub category_index: String,
    pub by_type: String,
    pub by_status: String,
}
impl Default for RouteTemplates {
    fn default() -> Self {
        Self {
            popular: "{{ origin }}/daftar-komik/page/{{ page }}/?status=&type=&orderby=popular".to_string(),
            item: "{{ origin }}/{{ path }}".to_string(),
            sub_item: "{{ origin }}/{{ path }}".to_string(),
            search: "{{ origin }}/page/{{ page }}/?s={{ query|urlencode }}".to_string(),
            category: "{{ origin }}/genres/{{ genre|urlencode }}/page/{{ page }}".to_string(),
            category_index: "{{ origin }}/".to_string(),
            by_type: "{{ origin }}/daftar-komik/page/{{ page }}/?status&type={{ kind }}&orderby=titleasc".to_string(),
            by_status: "{{ origin }}/daftar-komik/page/{{ page }}/?status={{ status }}&type&orderby=titleasc".to_string(),
        }
    }
}
impl RouteTemplates {
    pub fn source(&self, page_type: PageType) -> &str {
        match page_type {
            PageType::PopularListing => &self.popular,
            PageType::ItemDetail => &self.item,
            PageType::SubItemDetail => &self.sub_item,
            PageType::Search => &self.search,
            PageType::CategoryListing => &self.category,
            PageType::CategoryIndex => &self.category_index,
            PageType::TypeListing => &self.by_type,
            PageType::StatusListing => &self.by_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_profile_takes_defaults() {
        let profile: SiteProfile = serde_json::from_str(
            r#"{
                "name": "mirror",
                "origin": "https://mirror.test",
                "routes": { "search": "{{ origin }}/cari/{{ query|urlencode }}/{{ page }}" }
            }"#,
        )
        .unwrap();
        assert_eq!(profile.origin, "https://mirror.test");
        assert_eq!(profile.routes.search, "{{ origin }}/cari/{{ query|urlencode }}/{{ page }}");
        assert_eq!(profile.routes.popular, RouteTemplates::default().popular);
        assert_eq!(profile.selectors, SelectorSet::default());
    }

    #[test]
    fn test_mirror_keeps_default_schemas() {
        let mirror = SiteProfile::mirror("backup", "https://backup.test");
        assert_eq!(mirror.routes, SiteProfile::default().routes);
        assert_ne!(mirror.origin, SiteProfile::default().origin);
    }
}
