//! Declarative selector schemas.
//!
//! A schema says *where* each field of a record lives and *how* to read and
//! clean it, but carries no execution logic; [`crate::extract`] walks it.
//! Because every selector lives here, pointing the same extraction code at a
//! mirror with different markup is a matter of supplying a different
//! [`SelectorSet`], usually from configuration.

mod komikcast;

use std::collections::HashSet;

use crate::document::Query;
use crate::error::{ErrorKind, Result};

/// How a raw string is read off a matched element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Extraction {
    /// Concatenated descendant text.
    #[default]
    Text,
    /// The named attribute.
    Attribute(String),
    /// The named property of the inline `style` attribute.
    Style(String),
}

/// One step of a normalizer chain. See [`crate::normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Normalizer {
    Trim,
    StripLabel(String),
    /// CSS width percentage to a rating out of ten.
    PercentRating,
    /// Bare leading number, unscaled.
    Number,
    UrlToPath,
    /// Strips the site profile's origin.
    StripOrigin,
}

/// Whether a field keeps the first match or every match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Cardinality {
    #[default]
    First,
    All,
}

/// Where one field of a record lives and how to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct FieldSpec {
    pub name: String,
    /// Container elements to search within; every match is searched, in
    /// document order.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub scope: Option<Query>,
    /// The element holding the value. `None` reads the scope node itself.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub selector: Option<Query>,
    /// Keep only matches whose text contains this token.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub contains: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub extract: Extraction,
    #[cfg_attr(feature = "serde", serde(default))]
    pub normalize: Vec<Normalizer>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cardinality: Cardinality,
}
impl FieldSpec {
    /// Text of the first element matching `selector`.
    pub fn text(name: impl Into<String>, selector: &Query) -> Self {
        Self {
            name: name.into(),
            scope: None,
            selector: Some(selector.clone()),
            contains: None,
            extract: Extraction::Text,
            normalize: Vec::new(),
            cardinality: Cardinality::First,
        }
    }

    /// An attribute of the first element matching `selector`.
    pub fn attribute(name: impl Into<String>, selector: &Query, attribute: impl Into<String>) -> Self {
        Self {
            extract: Extraction::Attribute(attribute.into()),
            ..Self::text(name, selector)
        }
    }

    /// An inline style property of the first element matching `selector`.
    pub fn style(name: impl Into<String>, selector: &Query, property: impl Into<String>) -> Self {
        Self {
            extract: Extraction::Style(property.into()),
            ..Self::text(name, selector)
        }
    }

    /// Reads from the scope node itself rather than a descendant.
    pub fn itself(name: impl Into<String>, extract: Extraction) -> Self {
        Self {
            name: name.into(),
            scope: None,
            selector: None,
            contains: None,
            extract,
            normalize: Vec::new(),
            cardinality: Cardinality::First,
        }
    }

    pub fn within(mut self, scope: &Query) -> Self {
        self.scope = Some(scope.clone());
        self
    }

    pub fn containing(mut self, token: impl Into<String>) -> Self {
        self.contains = Some(token.into());
        self
    }

    pub fn normalize(mut self, chain: impl IntoIterator<Item = Normalizer>) -> Self {
        self.normalize.extend(chain);
        self
    }

    pub fn all(mut self) -> Self {
        self.cardinality = Cardinality::All;
        self
    }
}

/// A repeated nested record, e.g. the chapter rows of a detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct GroupSpec {
    pub name: String,
    pub items: Query,
    pub fields: Vec<FieldSpec>,
}

/// Everything needed to turn one page type into records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PageSchema {
    /// Repeated item containers on list-shaped pages.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub items: Option<Query>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fields: Vec<FieldSpec>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub groups: Vec<GroupSpec>,
}
impl PageSchema {
    /// A schema for a page describing one thing.
    pub fn single(fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        Self {
            items: None,
            fields: fields.into_iter().collect(),
            groups: Vec::new(),
        }
    }

    /// A schema for a page of repeated `items`, each read with `fields`.
    pub fn list(items: &Query, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        Self {
            items: Some(items.clone()),
            ..Self::single(fields)
        }
    }

    pub fn with_group(mut self, name: impl Into<String>, items: &Query, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.groups.push(GroupSpec {
            name: name.into(),
            items: items.clone(),
            fields: fields.into_iter().collect(),
        });
        self
    }

    pub fn is_list(&self) -> bool {
        self.items.is_some()
    }

    /// Rejects schemas that would silently overwrite one field with another.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let names = self.fields.iter().map(|f| f.name.as_str()).chain(self.groups.iter().map(|g| g.name.as_str()));
        for name in names {
            if name.is_empty() {
                exn::bail!(ErrorKind::InvalidSchema("field with an empty name".to_string()));
            }
            if !seen.insert(name) {
                exn::bail!(ErrorKind::InvalidSchema(format!("duplicate field '{name}'")));
            }
        }
        for group in &self.groups {
            PageSchema::single(group.fields.iter().cloned()).validate()?;
        }
        Ok(())
    }
}

/// The selector half of a site profile: one schema per page shape.
///
/// All listing-style pages (catalog, search, genre, type, status) share the
/// `listing` schema since the source renders them with the same markup.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectorSet {
    pub listing: PageSchema,
    pub item_detail: PageSchema,
    pub sub_item_detail: PageSchema,
    pub category_index: PageSchema,
}
impl SelectorSet {
    /// Checks every schema, and that the list-shaped ones have containers.
    pub fn validate(&self) -> Result<()> {
        for (name, schema, list) in [
            ("listing", &self.listing, true),
            ("item_detail", &self.item_detail, false),
            ("sub_item_detail", &self.sub_item_detail, false),
            ("category_index", &self.category_index, true),
        ] {
            schema.validate()?;
            if list && !schema.is_list() {
                exn::bail!(ErrorKind::InvalidSchema(format!("{name} schema needs an items selector")));
            }
        }
        Ok(())
    }
}
impl Default for SelectorSet {
    fn default() -> Self {
        komikcast::selector_set()
    }
}
