use regex::Regex;
use std::sync::LazyLock;

macro_rules! query {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: std::sync::LazyLock<crate::document::Query> =
            std::sync::LazyLock::new(|| crate::document::Query::parse($css).unwrap());
    };
}
pub(crate) use query;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

/// The site most selector sets in this crate were written against.
pub const DEFAULT_ORIGIN: &str = "https://komikcast.cz";

// Leading numeric prefix, the way a browser's `parseFloat` reads "85%" or "8.50 / 10".
regex!(NUMBER_PREFIX_REGEX, r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?");
