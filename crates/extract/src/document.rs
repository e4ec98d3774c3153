//! Thin adapter over [`scraper`] exposing just what record extraction needs.

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use exn::OptionExt;
use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, ErrorKind, Result};

/// A compiled CSS selector that remembers the text it was compiled from.
///
/// Compilation is the only fallible step of the whole extraction flow, so it
/// happens once, when a schema is built or deserialized, never mid-extraction.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Query {
    source: String,
    selector: Selector,
}
impl Query {
    pub fn parse(css: impl Into<String>) -> Result<Self> {
        let source = css.into();
        let selector = Selector::parse(&source).ok().ok_or_raise(|| ErrorKind::InvalidSelector(source.clone()))?;
        Ok(Self { source, selector })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}
impl FromStr for Query {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
impl TryFrom<String> for Query {
    type Error = ErrorKind;
    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(value).map_err(|err| (*err).clone())
    }
}
impl From<Query> for String {
    fn from(query: Query) -> Self {
        query.source
    }
}
impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}
impl Eq for Query {}
impl Debug for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_tuple("Query").field(&self.source).finish()
    }
}
impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.source)
    }
}

/// A parsed HTML document.
///
/// Parsing never fails; broken markup is repaired by the HTML5 tree builder
/// and, at worst, the result simply matches nothing.
pub struct Document {
    html: Html,
}
impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// The `<html>` element. Selecting from it is equivalent to selecting
    /// from the document.
    pub fn root(&self) -> Node<'_> {
        Node {
            element: self.html.root_element(),
        }
    }

    /// Lazily yields every element matching `query`, in document order.
    ///
    /// Call again to restart the sequence.
    pub fn select<'a>(&'a self, query: &'a Query) -> impl Iterator<Item = Node<'a>> {
        self.html.select(&query.selector).map(|element| Node { element })
    }
}
impl Debug for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}

/// A single element within a [`Document`].
#[derive(Clone, Copy, Debug)]
pub struct Node<'a> {
    element: ElementRef<'a>,
}
impl<'a> Node<'a> {
    /// Elements below this node matching `query`, in document order.
    pub fn select<'q>(&self, query: &'q Query) -> impl Iterator<Item = Node<'a>> + use<'a, 'q> {
        self.element.select(&query.selector).map(|element| Node { element })
    }

    /// Concatenated descendant text, untrimmed.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Reads one property from the inline `style` attribute.
    ///
    /// Property names compare case-insensitively and the last declaration
    /// wins, as it would in the browser.
    pub fn style_property(&self, name: &str) -> Option<String> {
        self.attribute("style")?
            .split(';')
            .filter_map(|declaration| declaration.split_once(':'))
            .filter(|(property, _)| property.trim().eq_ignore_ascii_case(name))
            .map(|(_, value)| value.trim().to_string())
            .last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"
        <div class="item" style="color: red; WIDTH: 70%; width: 85%">
            <a class="link" href="https://example.test/x/">  Hello <b>World</b> </a>
        </div>
        <div class="item"><a class="link">Second</a></div>
    "#;

    #[test]
    fn test_select_yields_document_order() {
        let document = Document::parse(HTML);
        let query = Query::parse("a.link").unwrap();
        let texts: Vec<_> = document.select(&query).map(|n| n.text().trim().to_string()).collect();
        assert_eq!(texts, vec!["Hello World", "Second"]);
        // Restartable
        assert_eq!(document.select(&query).count(), 2);
    }

    #[test]
    fn test_scoped_select_and_attributes() {
        let document = Document::parse(HTML);
        let items = Query::parse("div.item").unwrap();
        let link = Query::parse("a").unwrap();
        let nodes: Vec<_> = document.select(&items).collect();
        assert_eq!(nodes[0].select(&link).next().and_then(|n| n.attribute("href")), Some("https://example.test/x/"));
        assert_eq!(nodes[1].select(&link).next().and_then(|n| n.attribute("href")), None);
    }

    #[test]
    fn test_style_property_last_declaration_wins() {
        let document = Document::parse(HTML);
        let items = Query::parse("div.item").unwrap();
        let first = document.select(&items).next().unwrap();
        assert_eq!(first.style_property("width").as_deref(), Some("85%"));
        assert_eq!(first.style_property("color").as_deref(), Some("red"));
        assert_eq!(first.style_property("height"), None);
        let second = document.select(&items).nth(1).unwrap();
        assert_eq!(second.style_property("width"), None);
    }

    #[test]
    fn test_malformed_html_never_fails() {
        let document = Document::parse("<div><<p class='x'>unclosed <span");
        let query = Query::parse("table.nothing td").unwrap();
        assert_eq!(document.select(&query).count(), 0);
        assert_eq!(Document::parse("").select(&query).count(), 0);
    }

    #[test]
    fn test_invalid_selector_is_an_error() {
        let err = Query::parse("div[").unwrap_err();
        assert_eq!(&*err, &ErrorKind::InvalidSelector("div[".to_string()));
        assert!(Query::try_from("ul > li".to_string()).is_ok());
    }
}
