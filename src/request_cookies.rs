use std::collections::HashMap;

use crate::request::Iter;
use crate::Decoder;

#[derive(Default, Debug, Clone, PartialEq, Eq)]
/// The cookies attached to an HTTP request using the `Cookie` header.
///
/// It is a plain name → value mapping: if the same name appears more than once,
/// the last occurrence wins.
///
/// # Example
///
/// ```rust
/// use galletta::{Decoder, RequestCookies};
///
/// let cookies = RequestCookies::parse_header(
///     "foo=bar; withSpace=a%20space; foo=baz",
///     &Decoder::default(),
/// );
/// assert_eq!(cookies.get("foo"), Some("baz"));
/// assert_eq!(cookies.get("withSpace"), Some("a space"));
/// assert_eq!(cookies.len(), 2);
/// ```
pub struct RequestCookies {
    cookies: HashMap<String, String>,
}

impl RequestCookies {
    /// Creates a new, empty [`RequestCookies`] map.
    pub fn new() -> RequestCookies {
        Default::default()
    }

    /// Inserts a cookie into `self`, replacing any previous value with the same name.
    ///
    /// Returns the previous value, if there was one.
    pub fn insert<N, V>(&mut self, name: N, value: V) -> Option<String>
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.cookies.insert(name.into(), value.into())
    }

    /// Get the value of a cookie by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Returns `true` if there is a cookie named `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    /// The number of cookies.
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Returns `true` if there are no cookies.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Iterate over all `(name, value)` pairs, in arbitrary order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.cookies.iter(),
        }
    }

    /// Consumes `self`, returning the underlying map.
    pub fn into_map(self) -> HashMap<String, String> {
        self.cookies
    }

    /// Parse a `Cookie` header value into a [`RequestCookies`] map.
    ///
    /// Parsing never fails as a whole:
    ///
    /// - fragments without a `=` or with an empty name are skipped;
    /// - if `decoder` fails on a value, that cookie is skipped.
    ///
    /// A value wrapped in double quotes is unquoted before being decoded.
    pub fn parse_header(header: &str, decoder: &Decoder) -> RequestCookies {
        Self::parse_headers(std::iter::once(header), decoder)
    }

    /// Parse multiple `Cookie` header values into a [`RequestCookies`] map.
    pub fn parse_headers<I, S>(headers: I, decoder: &Decoder) -> RequestCookies
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cookies = RequestCookies::new();
        for header in headers {
            cookies.extend_from_header(header.as_ref(), decoder);
        }
        cookies
    }

    /// Parse a `Cookie` header value and add its cookies to `self`.
    pub fn extend_from_header(&mut self, header: &str, decoder: &Decoder) {
        for fragment in header.split(';') {
            if fragment.chars().all(char::is_whitespace) {
                continue;
            }

            let Some((name, value)) = fragment.split_once('=') else {
                tracing::trace!("Skipping a `Cookie` header fragment without a `=`");
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                tracing::trace!("Skipping a `Cookie` header fragment with an empty name");
                continue;
            }

            let value = unquote(value.trim());
            match decoder.decode(name, value) {
                Ok(value) => {
                    self.insert(name, value);
                }
                Err(e) => {
                    tracing::debug!(
                        cookie = e.name(),
                        error = %e.source,
                        "Skipping a cookie whose value could not be decoded"
                    );
                }
            }
        }
    }
}

/// Strips a pair of surrounding double quotes, if any.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
