//! Pure value normalizers.
//!
//! Every function here is total: odd input degrades to an empty string, the
//! input itself, or `NaN`, and never to an error.

use url::Url;

use crate::consts::NUMBER_PREFIX_REGEX;

/// Trims surrounding whitespace; absent input becomes an empty string.
pub fn trim(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

/// Removes the first occurrence of `label` (e.g. `"Status:"`) and trims.
///
/// ```rust
/// use komik_extract::normalize::strip_label;
/// assert_eq!(strip_label("  Status: Ongoing ", "Status:"), "Ongoing");
/// assert_eq!(strip_label(" Ongoing ", "Status:"), "Ongoing");
/// ```
pub fn strip_label(value: &str, label: &str) -> String {
    if label.is_empty() {
        return value.trim().to_string();
    }
    value.replacen(label, "", 1).trim().to_string()
}

/// Reads the leading number of a string, ignoring anything after it.
///
/// Returns `NaN` when there is no number to read.
pub fn parse_number(value: Option<&str>) -> f64 {
    value
        .map(str::trim_start)
        .and_then(|v| NUMBER_PREFIX_REGEX.find(v))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Converts a CSS width percentage (`"85%"`, or a bare `"85"`) into a
/// rating out of ten.
///
/// The 0 to 100 scale is the source site's convention and is not enforced;
/// out-of-range widths pass through scaled but unclamped. Unreadable input
/// yields `NaN`.
pub fn percent_width_to_rating(value: Option<&str>) -> f64 {
    parse_number(value) / 10.0
}

/// Keeps only the path of an absolute or protocol-relative (`//host/path`)
/// URL. Anything else (typically a path that is already relative) is
/// returned unchanged.
pub fn url_to_path(value: &str) -> String {
    let parsed = match value.strip_prefix("//") {
        Some(rest) => Url::parse(&format!("https://{rest}")),
        None => Url::parse(value),
    };
    match parsed {
        Ok(url) => url.path().to_string(),
        Err(_) => value.to_string(),
    }
}

/// Textually removes a leading `origin` from `value`.
///
/// A trailing slash on the origin is ignored so that `https://a.test/` and
/// `https://a.test` strip the same way, leaving the path's own leading slash.
pub fn strip_origin(value: &str, origin: &str) -> String {
    let origin = origin.trim_end_matches('/');
    if origin.is_empty() {
        return value.to_string();
    }
    value.strip_prefix(origin).unwrap_or(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("  hello  "), "hello")]
    #[case(Some("\n\tChapter 12\n"), "Chapter 12")]
    #[case(Some(""), "")]
    #[case(None, "")]
    fn test_trim(#[case] input: Option<&str>, #[case] expected: &str) {
        assert_eq!(trim(input), expected);
    }

    #[rstest]
    #[case("Status: Ongoing", "Status:", "Ongoing")]
    #[case("  Author:   Someone Else ", "Author:", "Someone Else")]
    #[case("Total Chapter: 120", "Total Chapter:", "120")]
    #[case("Rating 8.50", "Rating", "8.50")]
    #[case("Completed", "Status:", "Completed")]
    #[case("  padded  ", "", "padded")]
    fn test_strip_label(#[case] input: &str, #[case] label: &str, #[case] expected: &str) {
        assert_eq!(strip_label(input, label), expected);
    }

    #[rstest]
    #[case(Some("85%"), 8.5)]
    #[case(Some("100%"), 10.0)]
    #[case(Some("0%"), 0.0)]
    #[case(Some("72.5%"), 7.25)]
    #[case(Some("60"), 6.0)]
    #[case(Some(" 90% "), 9.0)]
    fn test_percent_width_to_rating(#[case] input: Option<&str>, #[case] expected: f64) {
        assert_eq!(percent_width_to_rating(input), expected);
    }

    #[rstest]
    #[case(Some(""))]
    #[case(Some("not-a-number"))]
    #[case(Some("%"))]
    #[case(None)]
    fn test_percent_width_to_rating_unreadable(#[case] input: Option<&str>) {
        assert!(percent_width_to_rating(input).is_nan());
    }

    #[test]
    fn test_percent_width_to_rating_is_not_clamped() {
        assert_eq!(percent_width_to_rating(Some("150%")), 15.0);
    }

    #[rstest]
    #[case(Some("8.50"), 8.5)]
    #[case(Some("7"), 7.0)]
    #[case(Some("9.1 / 10"), 9.1)]
    fn test_parse_number(#[case] input: Option<&str>, #[case] expected: f64) {
        assert_eq!(parse_number(input), expected);
    }

    #[rstest]
    #[case("https://example.test/daftar-komik/x-y-z/", "/daftar-komik/x-y-z/")]
    #[case("https://example.test/komik/a/?ref=home#top", "/komik/a/")]
    #[case("https://example.test", "/")]
    #[case("//komikcast.cz/komik/x/", "/komik/x/")]
    #[case("//cdn.example.test/chapter/a/?page=2", "/chapter/a/")]
    #[case("/already/relative", "/already/relative")]
    #[case("relative/without/slash", "relative/without/slash")]
    #[case("", "")]
    fn test_url_to_path(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(url_to_path(input), expected);
    }

    #[rstest]
    #[case("https://komikcast.cz/chapter/one/", "https://komikcast.cz", "/chapter/one/")]
    #[case("https://komikcast.cz/chapter/one/", "https://komikcast.cz/", "/chapter/one/")]
    #[case("https://mirror.test/chapter/one/", "https://komikcast.cz", "https://mirror.test/chapter/one/")]
    #[case("/chapter/one/", "https://komikcast.cz", "/chapter/one/")]
    #[case("/chapter/one/", "", "/chapter/one/")]
    fn test_strip_origin(#[case] input: &str, #[case] origin: &str, #[case] expected: &str) {
        assert_eq!(strip_origin(input, origin), expected);
    }
}
