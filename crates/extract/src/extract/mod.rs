//! Schema-driven record extraction.

mod record;

use std::iter;

use tracing::instrument;

pub use self::record::{Record, Value};
use crate::document::{Document, Node};
use crate::models::{CategoryEntry, ItemDetail, ListingEntry, SubItemDetail};
use crate::normalize;
use crate::schema::{Cardinality, Extraction, FieldSpec, GroupSpec, Normalizer, PageSchema, SelectorSet};

/// A parsed document plus the origin used to relativize links.
///
/// Owns its document, so one fetched page can be read with several schemas
/// without parsing twice.
#[derive(Debug)]
pub struct Extractor {
    document: Document,
    origin: String,
}
impl Extractor {
    pub fn from_document(document: Document) -> Self {
        Self {
            document,
            origin: String::new(),
        }
    }

    pub fn from_html(html: &str) -> Self {
        Self::from_document(Document::parse(html))
    }

    /// Origin stripped by [`Normalizer::StripOrigin`].
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn one(&self, schema: &PageSchema) -> Record {
        extract_one(&self.document, schema, &self.origin)
    }

    pub fn list(&self, schema: &PageSchema) -> Vec<Record> {
        extract_list(&self.document, schema, &self.origin)
    }

    pub fn listing(&self, selectors: &SelectorSet) -> Vec<ListingEntry> {
        self.list(&selectors.listing).iter().map(ListingEntry::from).collect()
    }

    pub fn item_detail(&self, selectors: &SelectorSet) -> ItemDetail {
        ItemDetail::from(&self.one(&selectors.item_detail))
    }

    pub fn sub_item_detail(&self, selectors: &SelectorSet) -> SubItemDetail {
        SubItemDetail::from(&self.one(&selectors.sub_item_detail))
    }

    pub fn category_index(&self, selectors: &SelectorSet) -> Vec<CategoryEntry> {
        self.list(&selectors.category_index).iter().map(CategoryEntry::from).collect()
    }
}
impl From<Document> for Extractor {
    fn from(document: Document) -> Self {
        Self::from_document(document)
    }
}
impl From<&str> for Extractor {
    fn from(html: &str) -> Self {
        Self::from_html(html)
    }
}

/// Reads one record from the whole document.
///
/// Any `items` selector on the schema is ignored; see [`extract_list`].
#[instrument(level = "trace", skip_all, fields(fields = schema.fields.len()))]
pub fn extract_one(document: &Document, schema: &PageSchema, origin: &str) -> Record {
    read_record(document.root(), &schema.fields, &schema.groups, origin)
}

/// Reads one record per `items` match, in document order.
///
/// A schema without an `items` selector treats the whole document as the
/// single item.
#[instrument(level = "trace", skip_all, fields(fields = schema.fields.len()))]
pub fn extract_list(document: &Document, schema: &PageSchema, origin: &str) -> Vec<Record> {
    let Some(items) = &schema.items else {
        return vec![extract_one(document, schema, origin)];
    };
    let records: Vec<_> =
        document.select(items).map(|item| read_record(item, &schema.fields, &schema.groups, origin)).collect();
    tracing::trace!(items = %items, count = records.len(), "extracted list");
    records
}

fn read_record(scope: Node<'_>, fields: &[FieldSpec], groups: &[GroupSpec], origin: &str) -> Record {
    let mut record = Record::default();
    for field in fields {
        record.insert(field.name.as_str(), read_field(scope, field, origin));
    }
    for group in groups {
        let rows = scope.select(&group.items).map(|row| read_record(row, &group.fields, &[], origin)).collect();
        record.insert(group.name.as_str(), Value::Records(rows));
    }
    record
}

fn read_field(scope: Node<'_>, field: &FieldSpec, origin: &str) -> Value {
    let mut matches = candidates(scope, field).map(|node| field.extract.read(node));
    match field.cardinality {
        Cardinality::First => normalize_chain(&field.normalize, matches.next().flatten(), origin),
        Cardinality::All => Value::List(
            matches
                .map(|raw| normalize_chain(&field.normalize, raw, origin))
                .filter(|value| *value != Value::Missing)
                .collect(),
        ),
    }
}

/// Every node the field could be read from, in document order.
fn candidates<'a>(scope: Node<'a>, field: &'a FieldSpec) -> impl Iterator<Item = Node<'a>> {
    let scopes: Box<dyn Iterator<Item = Node<'a>> + 'a> = match &field.scope {
        Some(query) => Box::new(scope.select(query)),
        None => Box::new(iter::once(scope)),
    };
    scopes
        .flat_map(move |node| -> Box<dyn Iterator<Item = Node<'a>> + 'a> {
            match &field.selector {
                Some(query) => Box::new(node.select(query)),
                None => Box::new(iter::once(node)),
            }
        })
        .filter(move |node| field.contains.as_deref().is_none_or(|token| node.text().contains(token)))
}

fn normalize_chain(chain: &[Normalizer], raw: Option<String>, origin: &str) -> Value {
    let initial = raw.map(Value::Text).unwrap_or(Value::Missing);
    chain.iter().fold(initial, |value, normalizer| normalizer.apply(value, origin))
}

impl Extraction {
    fn read(&self, node: Node<'_>) -> Option<String> {
        match self {
            Extraction::Text => Some(node.text()),
            Extraction::Attribute(name) => node.attribute(name).map(str::to_string),
            Extraction::Style(property) => node.style_property(property),
        }
    }
}

impl Normalizer {
    fn apply(&self, value: Value, origin: &str) -> Value {
        match (self, value) {
            (Normalizer::Trim, Value::Text(text)) => Value::Text(normalize::trim(Some(&text))),
            (Normalizer::Trim, Value::Missing) => Value::Text(normalize::trim(None)),
            (Normalizer::StripLabel(label), Value::Text(text)) => Value::Text(normalize::strip_label(&text, label)),
            (Normalizer::PercentRating, Value::Text(text)) => {
                Value::Number(normalize::percent_width_to_rating(Some(&text)))
            },
            (Normalizer::PercentRating, Value::Missing) => Value::Number(normalize::percent_width_to_rating(None)),
            (Normalizer::Number, Value::Text(text)) => Value::Number(normalize::parse_number(Some(&text))),
            (Normalizer::Number, Value::Missing) => Value::Number(normalize::parse_number(None)),
            (Normalizer::UrlToPath, Value::Text(text)) => Value::Text(normalize::url_to_path(&text)),
            (Normalizer::StripOrigin, Value::Text(text)) => Value::Text(normalize::strip_origin(&text, origin)),
            (_, value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Query;

    const LISTING: &str = include_str!("../../fixtures/listing.html");
    const DETAIL: &str = include_str!("../../fixtures/detail.html");
    const DETAIL_WITHOUT_GENRES: &str = include_str!("../../fixtures/detail_without_genres.html");
    const CHAPTER: &str = include_str!("../../fixtures/chapter.html");
    const GENRES: &str = include_str!("../../fixtures/genres.html");
    const ORIGIN: &str = "https://komikcast.cz";

    fn extractor(html: &str) -> Extractor {
        Extractor::from_html(html).with_origin(ORIGIN)
    }

    #[test]
    fn test_listing_returns_one_entry_per_container_in_order() {
        let entries = extractor(LISTING).listing(&SelectorSet::default());
        let titles: Vec<_> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Solo Leveling", "Tower of God", "One Piece"]);
    }

    #[test]
    fn test_listing_entry_fields() {
        let entries = extractor(LISTING).listing(&SelectorSet::default());
        assert_eq!(
            entries[0],
            ListingEntry {
                title: "Solo Leveling".to_string(),
                chapter_label: "Chapter 200".to_string(),
                rating: 8.5,
                kind: "Manhwa".to_string(),
                image_url: Some("https://komikcast.cz/wp-content/uploads/solo.jpg".to_string()),
                path: "/komik/solo-leveling/".to_string(),
            }
        );
    }

    #[test]
    fn test_listing_missing_optional_fields_default() {
        let entries = extractor(LISTING).listing(&SelectorSet::default());
        // Third card has no rating bar, no image and a relative link.
        assert_eq!(entries[2].rating, 0.0);
        assert_eq!(entries[2].image_url, None);
        assert_eq!(entries[2].path, "/komik/one-piece/");
        // Second card's rating width is unreadable.
        assert_eq!(entries[1].rating, 0.0);
    }

    #[test]
    fn test_listing_without_containers_is_empty() {
        let entries = extractor("<html><body><p>Nothing here</p></body></html>").listing(&SelectorSet::default());
        assert!(entries.is_empty());
    }

    #[test]
    fn test_item_detail_fields() {
        let detail = extractor(DETAIL).item_detail(&SelectorSet::default());
        assert_eq!(detail.title, "Solo Leveling");
        assert_eq!(detail.native_title, "나 혼자만 레벨업");
        assert_eq!(detail.image_url.as_deref(), Some("https://komikcast.cz/wp-content/uploads/solo-cover.jpg"));
        assert_eq!(detail.genres, vec!["Action", "Adventure", "Fantasy"]);
        assert_eq!(detail.release_date, "2018");
        assert_eq!(detail.author, "Chugong");
        assert_eq!(detail.status, "Completed");
        assert!(detail.is_completed());
        assert_eq!(detail.kind, "Manhwa");
        assert_eq!(detail.total_units, "200");
        assert_eq!(detail.updated_on.as_deref(), Some("2024-03-01T10:00:00+07:00"));
        assert_eq!(detail.rating, 8.9);
        assert_eq!(detail.synopsis, "A weak hunter becomes the strongest.");
    }

    #[test]
    fn test_item_detail_sub_items_keep_order_and_relative_paths() {
        let detail = extractor(DETAIL).item_detail(&SelectorSet::default());
        let paths: Vec<_> = detail.sub_items.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/chapter/solo-leveling-chapter-200/",
                "/chapter/solo-leveling-chapter-199/",
                "/chapter/solo-leveling-chapter-198/",
            ]
        );
        assert_eq!(detail.sub_items[0].title, "Chapter 200");
        assert_eq!(detail.sub_items[0].published_label, "2 days ago");
    }

    #[test]
    fn test_item_detail_without_genres_is_empty_not_error() {
        let detail = extractor(DETAIL_WITHOUT_GENRES).item_detail(&SelectorSet::default());
        assert!(detail.genres.is_empty());
        assert!(detail.sub_items.is_empty());
        assert_eq!(detail.title, "Obscure Title");
        assert_eq!(detail.status, "Ongoing");
        assert_eq!(detail.total_units, "");
        assert_eq!(detail.rating, 0.0);
        assert_eq!(detail.updated_on, None);
    }

    #[test]
    fn test_item_detail_of_unrelated_page_is_all_defaults() {
        let detail = extractor("<p>404</p>").item_detail(&SelectorSet::default());
        assert_eq!(detail.title, "");
        assert_eq!(detail.image_url, None);
        assert!(detail.genres.is_empty());
    }

    #[test]
    fn test_sub_item_detail_preserves_image_order() {
        let chapter = extractor(CHAPTER).sub_item_detail(&SelectorSet::default());
        assert_eq!(chapter.title, "Solo Leveling Chapter 199");
        assert_eq!(chapter.next_path.as_deref(), Some("/chapter/solo-leveling-chapter-200/"));
        assert!(chapter.has_next());
        assert_eq!(chapter.images, vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn test_sub_item_detail_without_next_link() {
        let html = r#"<div class="chapter_headpost"><h1>Last</h1></div>
            <div class="chapter_body"><div class="main-reading-area"><img src="z.jpg"></div></div>"#;
        let chapter = extractor(html).sub_item_detail(&SelectorSet::default());
        assert_eq!(chapter.next_path, None);
        assert_eq!(chapter.images, vec!["z.jpg"]);
    }

    #[test]
    fn test_category_index_strips_origin() {
        let genres = extractor(GENRES).category_index(&SelectorSet::default());
        assert_eq!(
            genres,
            vec![
                CategoryEntry {
                    name: "Action".to_string(),
                    path: "/genres/action/".to_string()
                },
                CategoryEntry {
                    name: "Comedy".to_string(),
                    path: "/genres/comedy/".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_paths_on_other_hosts_become_relative() {
        let detail = extractor(
            r#"<h1 class="komik_info-content-body-title">X</h1>
            <ul id="chapter-wrapper">
                <li class="komik_info-chapters-item"><a class="chapter-link-item" href="http://komikcast.cz/chapter/a/">A</a></li>
                <li class="komik_info-chapters-item"><a class="chapter-link-item" href="https://www.komikcast.cz/chapter/b/">B</a></li>
                <li class="komik_info-chapters-item"><a class="chapter-link-item" href="//cdn.komikcast.cz/chapter/c/">C</a></li>
            </ul>"#,
        )
        .item_detail(&SelectorSet::default());
        let paths: Vec<_> = detail.sub_items.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(paths, vec!["/chapter/a/", "/chapter/b/", "/chapter/c/"]);

        let entries = extractor(
            r#"<div class="list-update_item"><a class="data-tooltip" href="//komikcast.cz/komik/x/"><h3 class="title">X</h3></a></div>"#,
        )
        .listing(&SelectorSet::default());
        assert_eq!(entries[0].path, "/komik/x/");

        let genres = extractor(
            r#"<div class="section"><ul class="genre"><li><a href="http://www.komikcast.cz/genres/drama/">Drama</a></li></ul></div>"#,
        )
        .category_index(&SelectorSet::default());
        assert_eq!(genres[0].path, "/genres/drama/");
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let selectors = SelectorSet::default();
        let first = extractor(DETAIL).one(&selectors.item_detail);
        let second = extractor(DETAIL).one(&selectors.item_detail);
        assert_eq!(first, second);
        assert_eq!(format!("{first:?}"), format!("{second:?}"));
        assert_eq!(extractor(LISTING).listing(&selectors), extractor(LISTING).listing(&selectors));
    }

    #[test]
    fn test_list_without_items_selector_reads_whole_document() {
        let title = Query::parse("h1").unwrap();
        let schema = PageSchema::single([FieldSpec::text("title", &title).normalize([Normalizer::Trim])]);
        let records = extract_list(&Document::parse("<h1> Hi </h1>"), &schema, "");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text("title"), "Hi");
    }

    #[test]
    fn test_normalizer_chain_applies_in_order() {
        let value = normalize_chain(
            &[Normalizer::StripLabel("Rating".to_string()), Normalizer::Number],
            Some(" Rating 7.5 ".to_string()),
            "",
        );
        assert_eq!(value, Value::Number(7.5));
        // Reversed order reads the number before the label is gone.
        let value = normalize_chain(
            &[Normalizer::Number, Normalizer::StripLabel("Rating".to_string())],
            Some("Rating 7.5".to_string()),
            "",
        );
        assert!(matches!(value, Value::Number(n) if n.is_nan()));
    }

    #[test]
    fn test_missing_attribute_survives_string_normalizers() {
        let value = normalize_chain(&[Normalizer::UrlToPath, Normalizer::StripOrigin], None, ORIGIN);
        assert_eq!(value, Value::Missing);
        assert_eq!(normalize_chain(&[Normalizer::Trim], None, ORIGIN), Value::Text(String::new()));
    }

    #[test]
    fn test_contains_filter_selects_labelled_span() {
        let info = Query::parse("span.info").unwrap();
        let schema = PageSchema::single([
            FieldSpec::text("status", &info).containing("Status").normalize([Normalizer::StripLabel("Status:".into())])
        ]);
        let html = r#"<span class="info">Author: X</span><span class="info">Status: Ongoing</span>"#;
        assert_eq!(extract_one(&Document::parse(html), &schema, "").text("status"), "Ongoing");
    }
}
