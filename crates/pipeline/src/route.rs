//! Page URL templating.
//!
//! Each [`PageType`] has an [upon] template in the site profile's
//! [`RouteTemplates`]. Templates see these variables:
//!
//! | Variable | Page types                         | Description                           |
//! |----------|------------------------------------|---------------------------------------|
//! | `origin` | all                                | Site origin, without a trailing slash |
//! | `page`   | listings                           | 1-based page number                   |
//! | `path`   | item and sub-item details          | Path relative to the origin           |
//! | `query`  | search                             | Search terms                          |
//! | `genre`  | category listing                   | Category slug                         |
//! | `kind`   | type listing                       | `manga`, `manhua` or `manhwa`         |
//! | `status` | status listing                     | `Ongoing` or `Completed`              |
//!
//! The `urlencode` formatter percent-encodes a value for use in a query string
//! or path segment.

use crate::error::{ErrorKind, Result};
use crate::page::{PageRequest, PageType};
use crate::profile::RouteTemplates;
use exn::{OptionExt, ResultExt};
use std::collections::HashMap;
use tracing::instrument;
use upon::{Engine, Template};

/// Every page type's template, compiled once per pipeline.
pub(crate) struct Router {
    engine: Engine<'static>,
    templates: HashMap<PageType, Template<'static>>,
    origin: String,
}
impl Router {
    /// Compiles every template up front so syntax errors surface at
    /// construction rather than on the first request of that type.
    pub(crate) fn compile(origin: &str, routes: &RouteTemplates) -> Result<Self> {
        let mut engine = Engine::new();
        addons::configure(&mut engine);
        let templates = PageType::ALL
            .into_iter()
            .map(|page_type| -> Result<_> {
                let template = engine
                    .compile(routes.source(page_type).to_string())
                    .or_raise(|| ErrorKind::Template(page_type.to_string()))?;
                Ok((page_type, template))
            })
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(Self { engine, templates, origin: origin.trim_end_matches('/').to_string() })
    }

    pub(crate) fn origin(&self) -> &str {
        &self.origin
    }

    /// Renders the request's template, after re-checking the request so one
    /// built by hand can't template a page 0 or a path on another host.
    #[instrument(level = "trace", skip(self), fields(page_type = %request.page_type()))]
    pub(crate) fn url(&self, request: &PageRequest) -> Result<String> {
        let request = request.normalized(&self.origin)?;
        let page_type = request.page_type();
        let template = self.templates.get(&page_type).ok_or_raise(|| ErrorKind::Template(page_type.to_string()))?;
        let url = template
            .render(&self.engine, self.parameters(&request))
            .to_string()
            .or_raise(|| ErrorKind::Template(page_type.to_string()))?;
        Ok(url.trim().to_string())
    }

    fn parameters(&self, request: &PageRequest) -> upon::Value {
        let origin = self.origin.as_str();
        match request {
            PageRequest::Popular { page } => upon::value! { origin: origin, page: u64::from(*page) },
            PageRequest::Item { path } | PageRequest::SubItem { path } => upon::value! { origin: origin, path: path },
            PageRequest::Search { query, page } => upon::value! {
                origin: origin,
                query: query,
                page: u64::from(*page),
            },
            PageRequest::Category { genre, page } => upon::value! {
                origin: origin,
                genre: genre,
                page: u64::from(*page),
            },
            PageRequest::CategoryIndex => upon::value! { origin: origin },
            PageRequest::ByType { kind, page } => upon::value! {
                origin: origin,
                kind: kind.to_string(),
                page: u64::from(*page),
            },
            PageRequest::ByStatus { status, page } => upon::value! {
                origin: origin,
                status: status.as_query(),
                page: u64::from(*page),
            },
        }
    }
}

/// Custom [`upon`] extensions for building URLs.
mod addons {
    use std::fmt::Write;
    use upon::{Engine, Value, fmt as upon_fmt};

    /// Percent-encodes strings with `application/x-www-form-urlencoded` rules.
    fn urlencode_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
        match value {
            Value::String(s) => write!(f, "{}", url::form_urlencoded::byte_serialize(s.as_bytes()).collect::<String>())?,
            v => upon_fmt::default(f, v)?,
        };
        Ok(())
    }

    pub(crate) fn configure(engine: &mut Engine<'_>) {
        engine.add_formatter("urlencode", urlencode_formatter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{ItemType, StatusFilter};
    use rstest::rstest;

    fn router() -> Router {
        Router::compile("https://komikcast.cz/", &RouteTemplates::default()).unwrap()
    }

    #[rstest]
    #[case(PageRequest::Popular { page: 1 }, "https://komikcast.cz/daftar-komik/page/1/?status=&type=&orderby=popular")]
    #[case(PageRequest::Item { path: "komik/solo-leveling/".into() }, "https://komikcast.cz/komik/solo-leveling/")]
    #[case(PageRequest::SubItem { path: "chapter/x-199/".into() }, "https://komikcast.cz/chapter/x-199/")]
    #[case(PageRequest::Search { query: "solo leveling & co".into(), page: 2 }, "https://komikcast.cz/page/2/?s=solo+leveling+%26+co")]
    #[case(PageRequest::Category { genre: "action".into(), page: 3 }, "https://komikcast.cz/genres/action/page/3")]
    #[case(PageRequest::CategoryIndex, "https://komikcast.cz/")]
    #[case(PageRequest::ByType { kind: ItemType::Manhwa, page: 1 }, "https://komikcast.cz/daftar-komik/page/1/?status&type=manhwa&orderby=titleasc")]
    #[case(PageRequest::ByStatus { status: StatusFilter::Completed, page: 4 }, "https://komikcast.cz/daftar-komik/page/4/?status=Completed&type&orderby=titleasc")]
    fn test_default_urls(#[case] request: PageRequest, #[case] expected: &str) {
        assert_eq!(router().url(&request).unwrap(), expected);
    }

    #[rstest]
    #[case(PageRequest::Item { path: "/komik/solo-leveling/".into() }, "https://komikcast.cz/komik/solo-leveling/")]
    #[case(PageRequest::SubItem { path: "https://komikcast.cz/chapter/x-199/".into() }, "https://komikcast.cz/chapter/x-199/")]
    #[case(PageRequest::Search { query: "  solo ".into(), page: 1 }, "https://komikcast.cz/page/1/?s=solo")]
    #[case(PageRequest::Category { genre: "/action/".into(), page: 1 }, "https://komikcast.cz/genres/action/page/1")]
    fn test_hand_built_requests_are_normalized(#[case] request: PageRequest, #[case] expected: &str) {
        assert_eq!(router().url(&request).unwrap(), expected);
    }

    #[rstest]
    #[case(PageRequest::Popular { page: 0 })]
    #[case(PageRequest::Item { path: "https://evil.test/komik/x/".into() })]
    #[case(PageRequest::Item { path: "".into() })]
    #[case(PageRequest::ByType { kind: ItemType::Manga, page: 0 })]
    fn test_malformed_requests_have_no_url(#[case] request: PageRequest) {
        let err = router().url(&request).unwrap_err();
        assert!(matches!(*err, ErrorKind::MalformedInput(_)), "unexpected {err:?}");
    }

    #[test]
    fn test_origin_is_normalized() {
        assert_eq!(router().origin(), "https://komikcast.cz");
    }

    #[test]
    fn test_invalid_template_fails_at_compile() {
        let routes = RouteTemplates { search: "{{ origin }/?s={{ query }}".to_string(), ..RouteTemplates::default() };
        let err = Router::compile("https://komikcast.cz", &routes).err().unwrap();
        assert_eq!(*err, ErrorKind::Template("search".to_string()));
    }

    #[test]
    fn test_unknown_variable_fails_at_render() {
        let routes = RouteTemplates { popular: "{{ origin }}/{{ nope }}".to_string(), ..RouteTemplates::default() };
        let router = Router::compile("https://komikcast.cz", &routes).unwrap();
        let err = router.url(&PageRequest::Popular { page: 1 }).unwrap_err();
        assert!(matches!(*err, ErrorKind::Template(_)));
    }
}
