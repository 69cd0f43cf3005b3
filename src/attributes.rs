use crate::SameSite;
use time::{Duration, OffsetDateTime};

/// The attributes attached to a cookie in a `Set-Cookie` header.
///
/// Every attribute is unset by default: no attribute is emitted unless you set it.
/// [`ResponseCookiesExt::set_cookie`] and [`ResponseCookiesExt::clear_cookie`]
/// fill in a default `Path` of `/` when [`CookieAttributes::path`] is `None`.
///
/// # Example
///
/// ```rust
/// use galletta::{CookieAttributes, SameSite};
/// use galletta::time::Duration;
///
/// let attributes = CookieAttributes::new()
///     .set_max_age(Duration::hours(1))
///     .set_http_only(true)
///     .set_same_site(SameSite::Lax);
/// assert_eq!(attributes.path, None);
/// assert_eq!(attributes.max_age, Some(Duration::seconds(3600)));
/// ```
///
/// [`ResponseCookiesExt::set_cookie`]: crate::ResponseCookiesExt::set_cookie
/// [`ResponseCookiesExt::clear_cookie`]: crate::ResponseCookiesExt::clear_cookie
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CookieAttributes {
    /// The `Path` attribute.
    pub path: Option<String>,
    /// The `Domain` attribute.
    pub domain: Option<String>,
    /// The `Expires` attribute.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub expires: Option<OffsetDateTime>,
    /// The `Max-Age` attribute. Emitted as a number of whole seconds.
    #[cfg_attr(feature = "serde", serde(with = "max_age_seconds"))]
    pub max_age: Option<Duration>,
    /// Emit the `HttpOnly` flag.
    pub http_only: bool,
    /// Emit the `Secure` flag.
    pub secure: bool,
    /// The `SameSite` attribute.
    pub same_site: Option<SameSite>,
}

impl CookieAttributes {
    /// Creates a set of attributes with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `Path` attribute.
    pub fn set_path<P: Into<String>>(mut self, path: P) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the `Domain` attribute.
    ///
    /// The domain is emitted verbatim: a leading `.` is kept.
    pub fn set_domain<D: Into<String>>(mut self, domain: D) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Sets the `Expires` attribute. `None` unsets it.
    pub fn set_expires<T: Into<Option<OffsetDateTime>>>(mut self, expires: T) -> Self {
        self.expires = expires.into();
        self
    }

    /// Sets the `Max-Age` attribute. `None` unsets it.
    ///
    /// ```rust
    /// use galletta::CookieAttributes;
    /// use galletta::time::Duration;
    ///
    /// let attributes = CookieAttributes::new().set_max_age(Duration::minutes(5));
    /// assert_eq!(attributes.max_age, Some(Duration::seconds(300)));
    ///
    /// let attributes = attributes.set_max_age(None);
    /// assert_eq!(attributes.max_age, None);
    /// ```
    pub fn set_max_age<D: Into<Option<Duration>>>(mut self, max_age: D) -> Self {
        self.max_age = max_age.into();
        self
    }

    /// Sets whether the `HttpOnly` flag is emitted.
    pub fn set_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Sets whether the `Secure` flag is emitted.
    pub fn set_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Sets the `SameSite` attribute. `None` unsets it.
    pub fn set_same_site<S: Into<Option<SameSite>>>(mut self, same_site: S) -> Self {
        self.same_site = same_site.into();
        self
    }

    /// Fills in a `Path` of `/` if no path was set.
    pub(crate) fn with_default_path(mut self) -> Self {
        if self.path.is_none() {
            self.path = Some("/".to_string());
        }
        self
    }
}

#[cfg(feature = "serde")]
mod max_age_seconds {
    use serde::{Deserialize, Deserializer};
    use time::Duration;

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<i64>::deserialize(deserializer)?.map(Duration::seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::CookieAttributes;

    #[test]
    fn default_path_does_not_override() {
        let attributes = CookieAttributes::new().with_default_path();
        assert_eq!(attributes.path.as_deref(), Some("/"));

        let attributes = CookieAttributes::new()
            .set_path("/admin")
            .with_default_path();
        assert_eq!(attributes.path.as_deref(), Some("/admin"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_from_config() {
        use crate::SameSite;
        use time::Duration;

        let attributes: CookieAttributes = serde_json::from_str(
            r#"{ "path": "/app", "max_age": 3600, "http_only": true, "same_site": "lax" }"#,
        )
        .unwrap();
        assert_eq!(
            attributes,
            CookieAttributes::new()
                .set_path("/app")
                .set_max_age(Duration::hours(1))
                .set_http_only(true)
                .set_same_site(SameSite::Lax)
        );
    }
}
