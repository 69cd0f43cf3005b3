use crate::encoding::{encode, is_attribute_value, is_token};
use crate::{CookieAttributes, RemovalCookie};
use std::borrow::Cow;
use std::fmt::Write;
use time::format_description::FormatItem;
use time::macros::{datetime, format_description};
use time::{OffsetDateTime, UtcOffset};

/// Serialize a cookie into a `Set-Cookie` header value.
///
/// The value is percent-encoded. Attributes are emitted in a fixed order:
/// `Max-Age`, `Domain`, `Path`, `Expires`, `HttpOnly`, `Secure`, `SameSite`.
/// Attributes that are not set are omitted.
///
/// No `Path` is added on your behalf: use [`ResponseCookiesExt::set_cookie`] to get
/// the default `Path=/`.
///
/// # Example
///
/// ```rust
/// use galletta::{serialize, CookieAttributes};
/// use galletta::time::Duration;
///
/// let attributes = CookieAttributes::new()
///     .set_path("/")
///     .set_max_age(Duration::hours(1))
///     .set_http_only(true)
///     .set_secure(true);
/// assert_eq!(
///     serialize("b", "2", &attributes).unwrap(),
///     "b=2; Max-Age=3600; Path=/; HttpOnly; Secure"
/// );
///
/// // The name must be a valid token.
/// assert!(serialize("b c", "2", &attributes).is_err());
/// ```
///
/// [`ResponseCookiesExt::set_cookie`]: crate::ResponseCookiesExt::set_cookie
pub fn serialize(
    name: &str,
    value: &str,
    attributes: &CookieAttributes,
) -> Result<String, SerializeError> {
    ResponseCookie::new(name, value)
        .with_attributes(attributes.clone())
        .to_header_value()
}

/// A cookie to be sent to the client using the `Set-Cookie` header.
///
/// ```rust
/// use galletta::{CookieAttributes, ResponseCookie, SameSite};
///
/// let cookie = ResponseCookie::new("theme", "dark mode")
///     .with_attributes(CookieAttributes::new().set_same_site(SameSite::Strict));
/// assert_eq!(
///     cookie.to_header_value().unwrap(),
///     "theme=dark%20mode; SameSite=Strict"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseCookie<'c> {
    pub(crate) name: Cow<'c, str>,
    pub(crate) value: Cow<'c, str>,
    pub(crate) attributes: CookieAttributes,
}

impl<'c> ResponseCookie<'c> {
    /// Creates a new [`ResponseCookie`] with the given name and value, and no attributes.
    pub fn new<N, V>(name: N, value: V) -> Self
    where
        N: Into<Cow<'c, str>>,
        V: Into<Cow<'c, str>>,
    {
        ResponseCookie {
            name: name.into(),
            value: value.into(),
            attributes: CookieAttributes::default(),
        }
    }

    /// Replaces the attributes of `self`.
    pub fn with_attributes(mut self, attributes: CookieAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// The name of the cookie.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// The unencoded value of the cookie.
    #[inline]
    pub fn value(&self) -> &str {
        self.value.as_ref()
    }

    /// The attributes of the cookie.
    #[inline]
    pub fn attributes(&self) -> &CookieAttributes {
        &self.attributes
    }

    /// Make `self` a removal cookie. See [`RemovalCookie`].
    pub fn into_removal(self) -> RemovalCookie<'c> {
        RemovalCookie::new(self.name).with_attributes(self.attributes)
    }

    /// Formats `self` as a `Set-Cookie` header value.
    ///
    /// It fails if the name is not a valid token, or if the `Domain`/`Path`
    /// attributes contain characters that are not allowed in a header value
    /// (control characters or `;`).
    pub fn to_header_value(&self) -> Result<String, SerializeError> {
        if !is_token(self.name()) {
            return Err(SerializeError::InvalidName {
                name: self.name().to_string(),
            });
        }
        let attributes = &self.attributes;
        if let Some(domain) = attributes.domain.as_deref() {
            if !is_attribute_value(domain) {
                return Err(SerializeError::InvalidDomain {
                    domain: domain.to_string(),
                });
            }
        }
        if let Some(path) = attributes.path.as_deref() {
            if !is_attribute_value(path) {
                return Err(SerializeError::InvalidPath {
                    path: path.to_string(),
                });
            }
        }

        let mut header = format!("{}={}", self.name(), encode(self.value()));
        self.write_attributes(&mut header)
            .map_err(|_| SerializeError::InvalidExpires)?;
        Ok(header)
    }

    fn write_attributes(&self, out: &mut String) -> std::fmt::Result {
        let attributes = &self.attributes;

        if let Some(max_age) = attributes.max_age {
            write!(out, "; Max-Age={}", max_age.whole_seconds())?;
        }

        if let Some(domain) = attributes.domain.as_deref() {
            write!(out, "; Domain={}", domain)?;
        }

        if let Some(path) = attributes.path.as_deref() {
            write!(out, "; Path={}", path)?;
        }

        if let Some(expires) = attributes.expires {
            write!(out, "; Expires={}", http_date(expires)?)?;
        }

        if attributes.http_only {
            out.push_str("; HttpOnly");
        }

        if attributes.secure {
            out.push_str("; Secure");
        }

        if let Some(same_site) = attributes.same_site {
            write!(out, "; SameSite={}", same_site)?;
        }

        Ok(())
    }
}

/// Formats `time` as an IMF-fixdate (RFC 7231, section 7.1.1.1).
fn http_date(time: OffsetDateTime) -> Result<String, std::fmt::Error> {
    static MAX_DATETIME: OffsetDateTime = datetime!(9999-12-31 23:59:59.999_999 UTC);
    static FMT: &[FormatItem<'_>] = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year padding:none] [hour]:[minute]:[second] GMT"
    );

    // RFC 6265 requires dates not to exceed 9999 years.
    let time = std::cmp::min(time.to_offset(UtcOffset::UTC), MAX_DATETIME);
    time.format(&FMT).map_err(|_| std::fmt::Error)
}

impl<'a, N, V> From<(N, V)> for ResponseCookie<'a>
where
    N: Into<Cow<'a, str>>,
    V: Into<Cow<'a, str>>,
{
    fn from((name, value): (N, V)) -> Self {
        ResponseCookie::new(name, value)
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The error returned when a cookie cannot be serialized into a `Set-Cookie` header.
pub enum SerializeError {
    #[error("`{name}` is not a valid cookie name: it must be a non-empty token without whitespace, control characters or separators")]
    InvalidName { name: String },
    #[error("`{domain}` is not a valid value for the `Domain` attribute")]
    InvalidDomain { domain: String },
    #[error("`{path}` is not a valid value for the `Path` attribute")]
    InvalidPath { path: String },
    #[error("The `Expires` attribute could not be formatted as an HTTP date")]
    InvalidExpires,
    #[error(transparent)]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
}
