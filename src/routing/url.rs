//! URL decomposition.
//!
//! # Responsibilities
//! - Parse a raw absolute URL into schema, host, path segments and query parameters
//! - Percent-decode path segments and query values (strict, UTF-8)
//! - Reject anything that is not `scheme://host/path?query`
//!
//! # Design Decisions
//! - Syntax is delegated to the `url` crate (scheme and special-scheme hosts come
//!   back lowercased, IDNA applied)
//! - Decoding is strict: a malformed `%xx` escape fails the whole URL
//! - Path segments and query values both read `+` as a space (form decoding)
//! - Query keys are taken verbatim; the first occurrence of a key wins
//! - The path comes from `Url::path()`, which has already resolved `.` and `..`
//!   segments (including their `%2E` forms), so `/%2E%2E/a` decomposes to `["a"]`

use std::collections::HashMap;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Reasons a raw string could not be decomposed into a [`ParsedUrl`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    /// The `url` crate rejected the input.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The URL has no authority host (e.g. `mailto:` or `file:///`).
    #[error("URL has no host")]
    MissingHost,

    /// A `%` was not followed by two hex digits.
    #[error("malformed percent-encoding in {0:?}")]
    InvalidPercentEncoding(String),

    /// Percent-decoded bytes are not valid UTF-8.
    #[error("percent-decoded value of {0:?} is not valid UTF-8")]
    InvalidUtf8(String),
}

/// A URL broken into the components the matcher works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    /// Lowercased scheme, e.g. `https`.
    pub schema: String,
    /// Host without port.
    pub host: String,
    /// Decoded, non-empty path segments.
    pub path_segments: Vec<String>,
    /// Query keys mapped to their decoded value; `None` when the pair had no `=`.
    pub query_parameters: HashMap<String, Option<String>>,
}

impl ParsedUrl {
    /// Look up a query key.
    ///
    /// The outer `Option` tells whether the key was present at all, the inner one
    /// whether it carried a value.
    pub fn query(&self, key: &str) -> Option<Option<&str>> {
        self.query_parameters.get(key).map(|v| v.as_deref())
    }
}

impl FromStr for ParsedUrl {
    type Err = ParseFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decompose(s)
    }
}

/// Decompose a raw URL string.
pub fn decompose(raw: &str) -> Result<ParsedUrl, ParseFailure> {
    let url = Url::parse(raw)?;

    if url.cannot_be_a_base() {
        return Err(ParseFailure::MissingHost);
    }
    let host = match url.host_str() {
        Some(h) if !h.is_empty() => h.to_owned(),
        _ => return Err(ParseFailure::MissingHost),
    };

    let path_segments = url
        .path()
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| percent_decode(s, true))
        .collect::<Result<Vec<_>, _>>()?;

    let mut query_parameters = HashMap::new();
    if let Some(query) = url.query() {
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key, Some(percent_decode(value, true)?)),
                None => (pair, None),
            };
            query_parameters.entry(key.to_owned()).or_insert(value);
        }
    }

    Ok(ParsedUrl {
        schema: url.scheme().to_owned(),
        host,
        path_segments,
        query_parameters,
    })
}

/// Strictly percent-decode `input` as UTF-8.
pub fn percent_decode(input: &str, plus_as_space: bool) -> Result<String, ParseFailure> {
    if !input.contains('%') && !(plus_as_space && input.contains('+')) {
        return Ok(input.to_owned());
    }

    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hi = bytes.get(i + 1).copied().and_then(hex_digit);
                let lo = bytes.get(i + 2).copied().and_then(hex_digit);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => {
                        decoded.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => return Err(ParseFailure::InvalidPercentEncoding(input.to_owned())),
                }
            }
            b'+' if plus_as_space => {
                decoded.push(b' ');
                i += 1;
            }
            b => {
                decoded.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8(decoded).map_err(|_| ParseFailure::InvalidUtf8(input.to_owned()))
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
pub fn percent_encode(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for b in input.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            encoded.push(char::from(b));
        } else {
            encoded.push('%');
            encoded.push(char::from(HEX[usize::from(b >> 4)]));
            encoded.push(char::from(HEX[usize::from(b & 0x0f)]));
        }
    }
    encoded
}

const HEX: &[u8; 16] = b"0123456789ABCDEF";

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_components() {
        let url = decompose("https://example.com/example3/123/details/John?tab=info").unwrap();
        assert_eq!(url.schema, "https");
        assert_eq!(url.host, "example.com");
        assert_eq!(url.path_segments, vec!["example3", "123", "details", "John"]);
        assert_eq!(url.query("tab"), Some(Some("info")));
        assert_eq!(url.query("missing"), None);
    }

    #[test]
    fn test_empty_segments_removed() {
        let a = decompose("https://example.com/a/b").unwrap();
        let b = decompose("https://example.com/a/b/").unwrap();
        let c = decompose("https://example.com//a//b").unwrap();
        assert_eq!(a.path_segments, vec!["a", "b"]);
        assert_eq!(a.path_segments, b.path_segments);
        assert_eq!(a.path_segments, c.path_segments);

        let root = decompose("https://example.com").unwrap();
        assert!(root.path_segments.is_empty());
    }

    #[test]
    fn test_path_segments_decoded() {
        let url = decompose("https://example.com/caf%C3%A9/a%2Fb/1+2/3%2B4").unwrap();
        assert_eq!(url.path_segments, vec!["café", "a/b", "1 2", "3+4"]);
    }

    #[test]
    fn test_dot_segments_resolved_by_parser() {
        let url = decompose("https://example.com/%2E%2E/example1").unwrap();
        assert_eq!(url.path_segments, vec!["example1"]);

        let url = decompose("https://example.com/a/./b/../c").unwrap();
        assert_eq!(url.path_segments, vec!["a", "c"]);
    }

    #[test]
    fn test_query_values_decoded_keys_verbatim() {
        let url = decompose("https://example.com/x?address=123%20Main%20St&q=a+b&my%20key=v").unwrap();
        assert_eq!(url.query("address"), Some(Some("123 Main St")));
        assert_eq!(url.query("q"), Some(Some("a b")));
        assert_eq!(url.query("my%20key"), Some(Some("v")));
    }

    #[test]
    fn test_query_key_without_value() {
        let url = decompose("https://example.com/x?flag&empty=&n=1").unwrap();
        assert_eq!(url.query("flag"), Some(None));
        assert_eq!(url.query("empty"), Some(Some("")));
        assert_eq!(url.query("n"), Some(Some("1")));
        assert_eq!(url.query_parameters.len(), 3);
    }

    #[test]
    fn test_query_split_on_first_equals() {
        let url = decompose("https://example.com/x?expr=a=b").unwrap();
        assert_eq!(url.query("expr"), Some(Some("a=b")));
    }

    #[test]
    fn test_duplicate_query_key_first_wins() {
        let url = decompose("https://example.com/x?a=1&b=2&a=3").unwrap();
        assert_eq!(url.query("a"), Some(Some("1")));
    }

    #[test]
    fn test_scheme_and_host_lowercased() {
        let url = decompose("HTTPS://Example.COM/Path").unwrap();
        assert_eq!(url.schema, "https");
        assert_eq!(url.host, "example.com");
        assert_eq!(url.path_segments, vec!["Path"]);
    }

    #[test]
    fn test_custom_scheme() {
        let url = decompose("example://example.com/example1").unwrap();
        assert_eq!(url.schema, "example");
        assert_eq!(url.host, "example.com");
        assert_eq!(url.path_segments, vec!["example1"]);
    }

    #[test]
    fn test_port_not_part_of_host() {
        let url = decompose("https://example.com:8443/a").unwrap();
        assert_eq!(url.host, "example.com");
    }

    #[test]
    fn test_parse_failures() {
        assert!(matches!(decompose("not a url"), Err(ParseFailure::InvalidUrl(_))));
        assert!(matches!(decompose("/relative/path"), Err(ParseFailure::InvalidUrl(_))));
        assert_eq!(decompose("mailto:someone@example.com"), Err(ParseFailure::MissingHost));
        assert_eq!(decompose("file:///etc/hosts"), Err(ParseFailure::MissingHost));
    }

    #[test]
    fn test_malformed_percent_encoding_fails() {
        assert!(matches!(
            decompose("https://example.com/a%zz"),
            Err(ParseFailure::InvalidPercentEncoding(_))
        ));
        assert!(matches!(
            decompose("https://example.com/a?x=%2"),
            Err(ParseFailure::InvalidPercentEncoding(_))
        ));
        assert!(matches!(
            decompose("https://example.com/%FF"),
            Err(ParseFailure::InvalidUtf8(_))
        ));
    }

    #[test]
    fn test_from_str() {
        let url: ParsedUrl = "https://example.com/a".parse().unwrap();
        assert_eq!(url.path_segments, vec!["a"]);
    }

    #[test]
    fn test_encode_then_decode() {
        for value in ["123 Main St", "a/b?c=d&e", "café", "plain-value_1.~", "100%"] {
            let encoded = percent_encode(value);
            assert_eq!(percent_decode(&encoded, false).unwrap(), value);
            assert_eq!(percent_decode(&encoded, true).unwrap(), value);
        }
        assert_eq!(percent_encode("a b"), "a%20b");
    }
}
