//! Selectors for the komikcast theme, the default [`SelectorSet`].

use super::{Extraction, FieldSpec, Normalizer, PageSchema, SelectorSet};
use crate::consts::query;
use crate::models::fields;

// Listing pages (catalog, search, genre, type, status).
query!(LIST_ITEM, "div.list-update_item");
query!(LIST_TITLE, "h3.title");
query!(LIST_CHAPTER, "div.chapter");
query!(LIST_RATING, "div.rating-bintang span");
query!(LIST_TYPE, "span.type");
query!(LIST_IMAGE, "img.ts-post-image");
query!(LIST_LINK, "a.data-tooltip");

// Item detail.
query!(DETAIL_IMAGE, "div.komik_info-content-thumbnail img");
query!(DETAIL_TITLE, "h1.komik_info-content-body-title");
query!(DETAIL_NATIVE, "span.komik_info-content-native");
query!(DETAIL_GENRE, "span.komik_info-content-genre a.genre-item");
query!(DETAIL_RELEASE, "span.komik_info-content-info-release");
query!(DETAIL_INFO, "span.komik_info-content-info");
query!(DETAIL_TYPE, "span.komik_info-content-info-type");
query!(DETAIL_UPDATED, "span.komik_info-content-update time");
query!(DETAIL_RATING, "div.data-rating strong");
query!(DETAIL_SYNOPSIS, "div.komik_info-description-sinopsis");
query!(CHAPTER_ROW, "ul#chapter-wrapper li.komik_info-chapters-item");
query!(CHAPTER_LINK, "a.chapter-link-item");
query!(CHAPTER_TIME, "div.chapter-link-time");

// Sub-item (chapter) detail.
query!(READER_TITLE, "div.chapter_headpost h1");
query!(READER_NEXT, "div.nextprev a[rel=\"next\"]");
query!(READER_AREA, "div.chapter_body div.main-reading-area");
query!(READER_IMAGE, "img");

// Genre index.
query!(GENRE_LINK, "div.section ul.genre li a");

fn trimmed(name: &str, selector: &crate::document::Query) -> FieldSpec {
    FieldSpec::text(name, selector).normalize([Normalizer::Trim])
}

fn labelled(name: &str, selector: &crate::document::Query, label: &str) -> FieldSpec {
    FieldSpec::text(name, selector).normalize([Normalizer::StripLabel(label.to_string())])
}

pub(super) fn selector_set() -> SelectorSet {
    SelectorSet {
        listing: PageSchema::list(
            &LIST_ITEM,
            [
                trimmed(fields::TITLE, &LIST_TITLE),
                trimmed(fields::CHAPTER_LABEL, &LIST_CHAPTER),
                FieldSpec::style(fields::RATING, &LIST_RATING, "width").normalize([Normalizer::PercentRating]),
                trimmed(fields::KIND, &LIST_TYPE),
                FieldSpec::attribute(fields::IMAGE_URL, &LIST_IMAGE, "src"),
                FieldSpec::attribute(fields::PATH, &LIST_LINK, "href").normalize([Normalizer::UrlToPath]),
            ],
        ),
        item_detail: PageSchema::single([
            FieldSpec::attribute(fields::IMAGE_URL, &DETAIL_IMAGE, "src"),
            trimmed(fields::TITLE, &DETAIL_TITLE),
            trimmed(fields::NATIVE_TITLE, &DETAIL_NATIVE),
            trimmed(fields::GENRES, &DETAIL_GENRE).all(),
            labelled(fields::RELEASE_DATE, &DETAIL_RELEASE, "Released:"),
            // The author block has no distinguishing class; it's the first info span.
            labelled(fields::AUTHOR, &DETAIL_INFO, "Author:"),
            labelled(fields::STATUS, &DETAIL_INFO, "Status:").containing("Status"),
            labelled(fields::KIND, &DETAIL_TYPE, "Type:"),
            labelled(fields::TOTAL_UNITS, &DETAIL_INFO, "Total Chapter:").containing("Total Chapter"),
            FieldSpec::attribute(fields::UPDATED_ON, &DETAIL_UPDATED, "datetime"),
            labelled(fields::RATING, &DETAIL_RATING, "Rating").normalize([Normalizer::Number]),
            trimmed(fields::SYNOPSIS, &DETAIL_SYNOPSIS),
        ])
        .with_group(
            fields::SUB_ITEMS,
            &CHAPTER_ROW,
            [
                trimmed(fields::TITLE, &CHAPTER_LINK),
                FieldSpec::attribute(fields::PATH, &CHAPTER_LINK, "href")
                    .normalize([Normalizer::StripOrigin, Normalizer::UrlToPath]),
                trimmed(fields::PUBLISHED_LABEL, &CHAPTER_TIME),
            ],
        ),
        sub_item_detail: PageSchema::single([
            trimmed(fields::TITLE, &READER_TITLE),
            FieldSpec::attribute(fields::NEXT_PATH, &READER_NEXT, "href").normalize([Normalizer::UrlToPath]),
            FieldSpec::attribute(fields::IMAGES, &READER_IMAGE, "src").within(&READER_AREA).all(),
        ]),
        category_index: PageSchema::list(
            &GENRE_LINK,
            [
                FieldSpec::itself(fields::NAME, Extraction::Text).normalize([Normalizer::Trim]),
                FieldSpec::itself(fields::PATH, Extraction::Attribute("href".to_string()))
                    .normalize([Normalizer::StripOrigin, Normalizer::UrlToPath]),
            ],
        ),
    }
}
