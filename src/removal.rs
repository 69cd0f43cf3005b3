use crate::errors::SerializeError;
use crate::{CookieAttributes, ResponseCookie};
use std::borrow::Cow;
use time::{Duration, OffsetDateTime};

/// A cookie that, when sent to the client, removes the cookie with the same
/// name, path and domain from the client's machine.
///
/// A removal cookie always has an empty value and an `Expires` attribute set
/// to one millisecond after the Unix epoch (`Thu, 01 Jan 1970 00:00:00 GMT`).
/// `Max-Age` is never emitted: any `max_age` or `expires` passed by the caller is
/// overridden, since legacy clients that ignore `Max-Age` still honor `Expires`.
/// All other attributes are kept as provided.
///
/// ```rust
/// use galletta::{CookieAttributes, RemovalCookie};
/// use galletta::time::Duration;
///
/// let removal = RemovalCookie::new("session").with_attributes(
///     CookieAttributes::new()
///         .set_path("/")
///         .set_max_age(Duration::hours(1))
///         .set_secure(true),
/// );
/// assert_eq!(
///     removal.to_header_value().unwrap(),
///     "session=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Secure"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalCookie<'c> {
    pub(crate) name: Cow<'c, str>,
    pub(crate) attributes: CookieAttributes,
}

impl<'c> RemovalCookie<'c> {
    /// Creates a new [`RemovalCookie`] with the given name and no extra attributes.
    pub fn new<N>(name: N) -> Self
    where
        N: Into<Cow<'c, str>>,
    {
        Self {
            name: name.into(),
            attributes: CookieAttributes::default(),
        }
    }

    /// Sets the attributes of the removal cookie.
    ///
    /// `max_age` and `expires` are ignored.
    pub fn with_attributes(mut self, attributes: CookieAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Returns the name of `self`.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Formats `self` as a `Set-Cookie` header value.
    pub fn to_header_value(&self) -> Result<String, SerializeError> {
        ResponseCookie::from(self.clone()).to_header_value()
    }
}

/// The expiry of every removal cookie.
pub(crate) fn removal_expiry() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH + Duration::milliseconds(1)
}

impl<'c> From<RemovalCookie<'c>> for ResponseCookie<'c> {
    fn from(value: RemovalCookie<'c>) -> Self {
        let attributes = value
            .attributes
            .set_max_age(None)
            // A date in the past to ensure the client removes the cookie.
            .set_expires(removal_expiry());
        ResponseCookie::new(value.name, "").with_attributes(attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::RemovalCookie;
    use crate::{CookieAttributes, ResponseCookie};
    use time::{Duration, OffsetDateTime};

    #[test]
    fn overrides_caller_expiry() {
        let attributes = CookieAttributes::new()
            .set_expires(OffsetDateTime::now_utc() + Duration::days(7))
            .set_max_age(Duration::hours(1))
            .set_http_only(true)
            .set_domain("example.com");
        let cookie: ResponseCookie = RemovalCookie::new("a")
            .with_attributes(attributes)
            .into();

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.attributes().max_age, None);
        assert_eq!(
            cookie.attributes().expires,
            Some(OffsetDateTime::UNIX_EPOCH + Duration::milliseconds(1))
        );
        assert_eq!(
            cookie.to_header_value().unwrap(),
            "a=; Domain=example.com; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly"
        );
    }

    #[test]
    fn no_path_unless_asked() {
        assert_eq!(
            RemovalCookie::new("a").to_header_value().unwrap(),
            "a=; Expires=Thu, 01 Jan 1970 00:00:00 GMT"
        );
    }
}
