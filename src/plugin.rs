use http::header::COOKIE;
use http::{Extensions, HeaderMap, Request};

use crate::config::PluginConfig;
use crate::{CookieLayer, Decoder, RequestCookies, Signer};

/// Parses request cookies and signs/verifies cookie values.
///
/// # Creating a `CookiePlugin`
///
/// A plugin is created from a [`PluginConfig`], once per application.
///
/// ```rust
/// use galletta::{CookiePlugin, Secret};
/// use galletta::config::PluginConfig;
///
/// let plugin = CookiePlugin::new(
///     PluginConfig::default().with_secret(Secret::new("tobiiscool").unwrap()),
/// );
/// ```
///
/// # Using a `CookiePlugin`
///
/// Call [`CookiePlugin::on_request`] before your handler runs (or wrap your
/// service with [`CookiePlugin::layer`]): it parses the `Cookie` header and stores
/// the result in the request extensions, together with the plugin's [`Signer`].
/// Your handler can then use [`RequestCookiesExt`] to read cookies and verify
/// signed values, and [`ResponseCookiesExt`] to set or clear cookies.
///
/// ```rust
/// use galletta::{CookiePlugin, RequestCookiesExt, ResponseCookiesExt, Secret};
/// use galletta::config::PluginConfig;
/// use http::{Request, Response};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let plugin = CookiePlugin::new(
///     PluginConfig::default().with_secret(Secret::new("tobiiscool").unwrap()),
/// );
///
/// let mut request = Request::builder()
///     .header("cookie", "foo=bar; withSpace=a%20space")
///     .body(())?;
/// plugin.on_request(&mut request);
/// assert_eq!(request.cookie("withSpace"), Some("a space"));
///
/// let signed = request.sign_cookie("hello")?;
/// let mut response = Response::new(());
/// response
///     .set_cookie("session", &signed, None)?
///     .clear_cookie("foo", None)?;
/// assert_eq!(response.headers().get_all("set-cookie").iter().count(), 2);
/// # Ok(())
/// # }
/// ```
///
/// `CookiePlugin` is cheap to clone.
///
/// [`RequestCookiesExt`]: crate::RequestCookiesExt
/// [`ResponseCookiesExt`]: crate::ResponseCookiesExt
#[derive(Debug, Clone)]
pub struct CookiePlugin {
    signer: Option<Signer>,
    decoder: Decoder,
}

impl From<PluginConfig> for CookiePlugin {
    fn from(config: PluginConfig) -> Self {
        let signer = config
            .secret
            .map(|secret| Signer::new(secret).with_fallbacks(config.fallback_secrets));
        CookiePlugin {
            signer,
            decoder: config.decoder,
        }
    }
}

impl Default for CookiePlugin {
    fn default() -> Self {
        PluginConfig::default().into()
    }
}

impl CookiePlugin {
    /// Creates a new plugin from its configuration.
    pub fn new(config: PluginConfig) -> Self {
        config.into()
    }

    /// The [`Signer`] built from the configured secrets, if any.
    pub fn signer(&self) -> Option<&Signer> {
        self.signer.as_ref()
    }

    /// The [`Decoder`] used to parse request cookies.
    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// Wrap a `tower` service so that [`CookiePlugin::on_request`] runs before it.
    pub fn layer(&self) -> CookieLayer {
        CookieLayer::new(self.clone())
    }

    /// Parse every `Cookie` header in `headers`.
    ///
    /// If there is no `Cookie` header, the result is empty and the decoder is
    /// never invoked. Fragments (the `;`-separated parts of a header) that are
    /// not valid UTF-8 are skipped; the other fragments on the same line are
    /// still parsed.
    pub fn parse_cookies(&self, headers: &HeaderMap) -> RequestCookies {
        let mut cookies = RequestCookies::new();
        for value in headers.get_all(COOKIE) {
            for fragment in value.as_bytes().split(|b| *b == b';') {
                match std::str::from_utf8(fragment) {
                    Ok(fragment) => cookies.extend_from_header(fragment, &self.decoder),
                    Err(_) => {
                        tracing::trace!("Skipping a `Cookie` header fragment that is not valid UTF-8");
                    }
                }
            }
        }
        cookies
    }

    /// Parse the request cookies and store them in the request extensions.
    ///
    /// It also stores the plugin's [`Signer`], if a secret was configured.
    /// Use [`RequestCookiesExt`] to access both.
    ///
    /// [`RequestCookiesExt`]: crate::RequestCookiesExt
    pub fn on_request<B>(&self, request: &mut Request<B>) {
        let cookies = self.parse_cookies(request.headers());
        self.install(cookies, request.extensions_mut());
    }

    /// Same as [`CookiePlugin::on_request`], for a request that has been split
    /// into its parts.
    pub fn on_request_parts(&self, parts: &mut http::request::Parts) {
        let cookies = self.parse_cookies(&parts.headers);
        self.install(cookies, &mut parts.extensions);
    }

    fn install(&self, cookies: RequestCookies, extensions: &mut Extensions) {
        tracing::trace!(n_cookies = cookies.len(), "Parsed request cookies");
        extensions.insert(cookies);
        if let Some(signer) = &self.signer {
            extensions.insert(signer.clone());
        }
    }

    /// Sign `value` with the configured secret.
    ///
    /// It fails if no secret was configured.
    pub fn sign_cookie(&self, value: &str) -> Result<String, MissingSecretError> {
        self.signer
            .as_ref()
            .map(|signer| signer.sign(value))
            .ok_or(MissingSecretError)
    }

    /// Verify a value produced by [`CookiePlugin::sign_cookie`].
    ///
    /// It returns `Ok(None)` if the signature is invalid and fails if no secret
    /// was configured.
    pub fn unsign_cookie(&self, value: &str) -> Result<Option<String>, MissingSecretError> {
        self.signer
            .as_ref()
            .map(|signer| signer.unsign(value))
            .ok_or(MissingSecretError)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("No secret was configured: cookie values cannot be signed or verified")]
/// The error returned when signing or verifying a cookie value without a
/// configured secret.
pub struct MissingSecretError;
