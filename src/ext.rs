use http::header::SET_COOKIE;
use http::{Extensions, HeaderMap, HeaderValue, Request, Response};

use crate::errors::{MissingSecretError, SerializeError};
use crate::{CookieAttributes, RemovalCookie, RequestCookies, ResponseCookie, Signer};

mod sealed {
    pub trait RequestLike {
        fn cookie_extensions(&self) -> &http::Extensions;
    }

    pub trait ResponseLike {
        fn cookie_headers_mut(&mut self) -> &mut http::HeaderMap;
    }
}

/// Access the cookies parsed by [`CookiePlugin::on_request`], and sign or verify
/// values with the plugin's secret.
///
/// Implemented for [`http::Request`] and [`http::request::Parts`].
///
/// [`CookiePlugin::on_request`]: crate::CookiePlugin::on_request
pub trait RequestCookiesExt: sealed::RequestLike {
    /// The cookies attached to this request.
    ///
    /// `None` if [`CookiePlugin::on_request`] hasn't run on this request.
    ///
    /// [`CookiePlugin::on_request`]: crate::CookiePlugin::on_request
    fn cookies(&self) -> Option<&RequestCookies> {
        self.cookie_extensions().get::<RequestCookies>()
    }

    /// The value of the cookie named `name`, if any.
    fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies()?.get(name)
    }

    /// Sign `value` with the plugin's secret.
    fn sign_cookie(&self, value: &str) -> Result<String, MissingSecretError> {
        signer(self.cookie_extensions()).map(|signer| signer.sign(value))
    }

    /// Verify a signed value with the plugin's secret(s).
    ///
    /// `Ok(None)` means that the signature is not valid: the value must not be trusted.
    fn unsign_cookie(&self, value: &str) -> Result<Option<String>, MissingSecretError> {
        signer(self.cookie_extensions()).map(|signer| signer.unsign(value))
    }
}

fn signer(extensions: &Extensions) -> Result<&Signer, MissingSecretError> {
    extensions.get::<Signer>().ok_or(MissingSecretError)
}

/// Add `Set-Cookie` headers to an HTTP response.
///
/// Each call **appends** a new `Set-Cookie` header: previously set cookies
/// are never overwritten.
///
/// Implemented for [`http::Response`], [`http::response::Parts`] and [`http::HeaderMap`].
///
/// Signing is not available on the response: a handler signs values with
/// [`RequestCookiesExt::sign_cookie`] (or [`CookiePlugin::sign_cookie`]) and
/// passes the result to [`ResponseCookiesExt::set_cookie`].
///
/// ```rust
/// use galletta::{CookieAttributes, ResponseCookiesExt};
/// use galletta::time::Duration;
/// use http::Response;
///
/// # fn main() -> Result<(), galletta::errors::SerializeError> {
/// let mut response = Response::new(());
/// response
///     .set_cookie("a", "1", None)?
///     .set_cookie(
///         "b",
///         "2",
///         CookieAttributes::new()
///             .set_max_age(Duration::hours(1))
///             .set_http_only(true)
///             .set_secure(true),
///     )?;
///
/// let headers: Vec<_> = response.headers().get_all("set-cookie").iter().collect();
/// assert_eq!(headers, [
///     "a=1; Path=/",
///     "b=2; Max-Age=3600; Path=/; HttpOnly; Secure",
/// ]);
/// # Ok(())
/// # }
/// ```
///
/// [`CookiePlugin::sign_cookie`]: crate::CookiePlugin::sign_cookie
pub trait ResponseCookiesExt: sealed::ResponseLike {
    /// Append a `Set-Cookie` header for the given cookie.
    ///
    /// `Path` defaults to `/` if `attributes` doesn't set one.
    /// If the cookie can't be serialized, no header is added.
    fn set_cookie<A>(&mut self, name: &str, value: &str, attributes: A) -> Result<&mut Self, SerializeError>
    where
        A: Into<Option<CookieAttributes>>,
    {
        let attributes = attributes.into().unwrap_or_default().with_default_path();
        let cookie = ResponseCookie::new(name, value).with_attributes(attributes);
        append(self.cookie_headers_mut(), cookie.to_header_value()?)?;
        Ok(self)
    }

    /// Append a `Set-Cookie` header that removes the cookie named `name`
    /// from the client.
    ///
    /// `Path` defaults to `/`. `max_age` and `expires` are ignored:
    /// see [`RemovalCookie`].
    fn clear_cookie<A>(&mut self, name: &str, attributes: A) -> Result<&mut Self, SerializeError>
    where
        A: Into<Option<CookieAttributes>>,
    {
        let attributes = attributes.into().unwrap_or_default().with_default_path();
        let cookie = RemovalCookie::new(name).with_attributes(attributes);
        append(self.cookie_headers_mut(), cookie.to_header_value()?)?;
        Ok(self)
    }
}

fn append(headers: &mut HeaderMap, header: String) -> Result<(), SerializeError> {
    let value = HeaderValue::try_from(header)?;
    headers.append(SET_COOKIE, value);
    Ok(())
}

impl<B> sealed::RequestLike for Request<B> {
    fn cookie_extensions(&self) -> &Extensions {
        self.extensions()
    }
}

impl sealed::RequestLike for http::request::Parts {
    fn cookie_extensions(&self) -> &Extensions {
        &self.extensions
    }
}

impl<B> RequestCookiesExt for Request<B> {}
impl RequestCookiesExt for http::request::Parts {}

impl<B> sealed::ResponseLike for Response<B> {
    fn cookie_headers_mut(&mut self) -> &mut HeaderMap {
        self.headers_mut()
    }
}

impl sealed::ResponseLike for http::response::Parts {
    fn cookie_headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

impl sealed::ResponseLike for HeaderMap {
    fn cookie_headers_mut(&mut self) -> &mut HeaderMap {
        self
    }
}

impl<B> ResponseCookiesExt for Response<B> {}
impl ResponseCookiesExt for http::response::Parts {}
impl ResponseCookiesExt for HeaderMap {}

#[cfg(test)]
mod tests {
    use http::header::SET_COOKIE;
    use http::{HeaderMap, Request, Response};
    use time::{Duration, OffsetDateTime};

    use crate::config::PluginConfig;
    use crate::{CookieAttributes, CookiePlugin, RequestCookiesExt, ResponseCookiesExt, Secret};

    fn set_cookies(headers: &HeaderMap) -> Vec<&str> {
        headers
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect()
    }

    #[test]
    fn set_cookie_defaults_the_path() {
        let mut res = Response::new(());
        res.set_cookie("foo", "bar", None).unwrap();
        assert_eq!(set_cookies(res.headers()), ["foo=bar; Path=/"]);
    }

    #[test]
    fn set_cookie_keeps_an_explicit_path() {
        let mut headers = HeaderMap::new();
        headers
            .set_cookie("foo", "bar", CookieAttributes::new().set_path("/admin"))
            .unwrap();
        assert_eq!(set_cookies(&headers), ["foo=bar; Path=/admin"]);
    }

    #[test]
    fn multiple_cookies_are_appended() {
        let mut res = Response::new(());
        res.headers_mut()
            .insert(SET_COOKIE, "existing=1".parse().unwrap());
        res.set_cookie("a", "1", None)
            .unwrap()
            .set_cookie(
                "b",
                "2",
                CookieAttributes::new()
                    .set_max_age(Duration::seconds(3600))
                    .set_http_only(true)
                    .set_secure(true),
            )
            .unwrap();
        assert_eq!(
            set_cookies(res.headers()),
            [
                "existing=1",
                "a=1; Path=/",
                "b=2; Max-Age=3600; Path=/; HttpOnly; Secure"
            ]
        );
    }

    #[test]
    fn clear_cookie_overrides_expiry() {
        let (mut parts, _) = Response::new(()).into_parts();
        parts
            .clear_cookie("foo", None)
            .unwrap()
            .clear_cookie(
                "a",
                CookieAttributes::new().set_expires(OffsetDateTime::now_utc()),
            )
            .unwrap()
            .clear_cookie(
                "b",
                CookieAttributes::new()
                    .set_max_age(Duration::seconds(3600))
                    .set_http_only(true)
                    .set_secure(true),
            )
            .unwrap();
        assert_eq!(
            set_cookies(&parts.headers),
            [
                "foo=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
                "a=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
                "b=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly; Secure",
            ]
        );
    }

    #[test]
    fn invalid_name_adds_no_header() {
        let mut res = Response::new(());
        assert!(res.set_cookie("bad name", "v", None).is_err());
        assert!(res.clear_cookie("bad;name", None).is_err());
        assert!(res.headers().get(SET_COOKIE).is_none());
    }

    #[test]
    fn request_side_helpers() {
        let plugin = CookiePlugin::new(
            PluginConfig::default().with_secret(Secret::new("tobiiscool").unwrap()),
        );
        let mut req = Request::builder()
            .header("cookie", "foo=bar")
            .body(())
            .unwrap();

        assert!(req.cookies().is_none());
        assert!(req.sign_cookie("hello").is_err());

        plugin.on_request(&mut req);
        assert_eq!(req.cookie("foo"), Some("bar"));
        assert_eq!(req.cookie("missing"), None);

        let signed = req.sign_cookie("hello").unwrap();
        assert_eq!(signed, "hello.DGDUkGlIkCzPz+C0B064FNgHdEjox7ch8tOBGslZ5QI");
        assert_eq!(req.unsign_cookie(&signed).unwrap().as_deref(), Some("hello"));
        assert_eq!(req.unsign_cookie("hello.forged").unwrap(), None);
    }
}
