//! Configuration for a [`CookiePlugin`].
//!
//! Check out the [`PluginConfig`] struct for more information.
//!
//! [`CookiePlugin`]: crate::CookiePlugin
use crate::{Decoder, Secret};

/// `PluginConfig` is handed to the [`CookiePlugin`] once, when it is registered
/// with your application. It is never mutated afterwards.
///
/// ```rust
/// use galletta::{CookiePlugin, Secret};
/// use galletta::config::PluginConfig;
///
/// let config = PluginConfig::default()
///     // You'll use a secret loaded from *somewhere* in production, e.g.
///     // from an environment variable or a secret management service.
///     .with_secret(Secret::generate());
/// let plugin = CookiePlugin::new(config);
/// ```
///
/// With the `serde` feature (enabled by default), the secrets can be loaded
/// from your application configuration:
///
/// ```rust
/// # #[cfg(feature = "serde")] {
/// use galletta::config::PluginConfig;
///
/// let config: PluginConfig = serde_json::from_str(
///     r#"{ "secret": "tobiiscool", "fallback_secrets": ["luna"] }"#
/// ).unwrap();
/// assert!(config.secret.is_some());
/// assert_eq!(config.fallback_secrets.len(), 1);
/// # }
/// ```
///
/// [`CookiePlugin`]: crate::CookiePlugin
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PluginConfig {
    /// The secret used to sign and verify cookie values.
    ///
    /// If it is `None`, signing and verifying fail with a [`MissingSecretError`].
    ///
    /// [`MissingSecretError`]: crate::errors::MissingSecretError
    pub secret: Option<Secret>,
    /// Secrets that are still accepted when verifying signed values, but never
    /// used to sign new ones. Tried in order, after [`PluginConfig::secret`].
    ///
    /// They are ignored if no primary secret is set.
    pub fallback_secrets: Vec<Secret>,
    /// How cookie values are decoded when parsing the `Cookie` request header.
    ///
    /// By default, values are percent-decoded.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub decoder: Decoder,
}

impl PluginConfig {
    /// Sets the secret used to sign and verify cookie values.
    pub fn with_secret(mut self, secret: Secret) -> Self {
        self.secret = Some(secret);
        self
    }

    /// Adds a fallback secret, accepted when verifying signed values.
    pub fn with_fallback_secret(mut self, secret: Secret) -> Self {
        self.fallback_secrets.push(secret);
        self
    }

    /// Sets the decoder used when parsing the `Cookie` request header.
    pub fn with_decoder(mut self, decoder: Decoder) -> Self {
        self.decoder = decoder;
        self
    }
}
