//! Cookie handling for Rust servers built on the [`http`] crate.
//!
//! # Overview
//!
//! `galletta` takes care of the cookie plumbing of a web application:
//!
//! - Parsing the `Cookie` header of incoming requests, via [`RequestCookies`]
//! - Signing and verifying cookie values with HMAC-SHA256, via [`sign`], [`unsign`] and [`Signer`]
//! - Serializing `Set-Cookie` headers for outgoing responses, via [`serialize`] and [`ResponseCookiesExt`]
//!
//! A [`CookiePlugin`] wires everything together: register it once per
//! application, run [`CookiePlugin::on_request`] before your handlers (or wrap
//! your service with [`CookieLayer`]) and use the [`RequestCookiesExt`] and
//! [`ResponseCookiesExt`] extension traits inside your handlers.
//!
//! # Non-goals
//!
//! `galletta` doesn't manage sessions, store cookies or protect against CSRF.
//! It doesn't parse `Set-Cookie` headers on the client side.
//!
//! # Quickstart
//!
//! ```rust
//! use galletta::{CookieAttributes, CookiePlugin, RequestCookiesExt, ResponseCookiesExt, Secret};
//! use galletta::config::PluginConfig;
//! use http::{Request, Response};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Register the plugin once, when your application starts.
//! let plugin = CookiePlugin::new(
//!     PluginConfig::default().with_secret(Secret::new("tobiiscool").unwrap()),
//! );
//!
//! // For every incoming request, before your handler runs:
//! let mut request = Request::builder()
//!     .header("cookie", "foo=bar; withSpace=a%20space")
//!     .body(())?;
//! plugin.on_request(&mut request);
//!
//! // In your handler:
//! assert_eq!(request.cookie("foo"), Some("bar"));
//! assert_eq!(request.cookie("withSpace"), Some("a space"));
//!
//! let signed = request.sign_cookie("hello")?;
//! assert_eq!(signed, "hello.DGDUkGlIkCzPz+C0B064FNgHdEjox7ch8tOBGslZ5QI");
//! assert_eq!(request.unsign_cookie(&signed)?.as_deref(), Some("hello"));
//!
//! let mut response = Response::new(());
//! response
//!     .set_cookie("session", &signed, CookieAttributes::new().set_http_only(true))?
//!     .clear_cookie("foo", None)?;
//!
//! let headers: Vec<_> = response.headers().get_all("set-cookie").iter().collect();
//! assert_eq!(headers, [
//!     "session=hello.DGDUkGlIkCzPz%2BC0B064FNgHdEjox7ch8tOBGslZ5QI; Path=/; HttpOnly",
//!     "foo=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
//! ]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Credits
//!
//! `galletta`'s `Set-Cookie` formatting and signing scheme are modelled after the
//! [`cookie` crate](https://crates.io/crates/cookie).

pub mod config;
mod attributes;
mod crypto;
mod decoder;
mod encoding;
mod ext;
pub mod layer;
mod plugin;
mod removal;
mod request_cookies;
mod response_cookie;
mod same_site;

pub mod request;

pub use attributes::CookieAttributes;
pub use crypto::signing::{sign, unsign, Signer};
pub use crypto::Secret;
pub use decoder::Decoder;
pub use ext::{RequestCookiesExt, ResponseCookiesExt};
pub use layer::{CookieLayer, CookieService};
pub use plugin::CookiePlugin;
pub use removal::RemovalCookie;
pub use request_cookies::RequestCookies;
pub use response_cookie::{serialize, ResponseCookie};
pub use same_site::SameSite;
pub use time;

/// Errors that can occur when using `galletta`.
pub mod errors {
    pub use crate::crypto::EmptySecretError;
    pub use crate::decoder::DecodingError;
    pub use crate::plugin::MissingSecretError;
    pub use crate::response_cookie::SerializeError;
    pub use crate::same_site::UnknownSameSiteError;
}
