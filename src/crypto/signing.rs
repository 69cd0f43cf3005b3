use std::sync::Arc;

use base64::prelude::BASE64_STANDARD_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::Secret;

/// Sign `value` with `secret`.
///
/// The output has the form `<value>.<signature>`, where `<signature>` is the
/// HMAC-SHA256 of `value` keyed with `secret`, base64-encoded with the standard
/// alphabet and without padding.
///
/// # Example
///
/// ```rust
/// use galletta::{sign, Secret};
///
/// let secret = Secret::new("tobiiscool").unwrap();
/// assert_eq!(
///     sign("hello", &secret),
///     "hello.DGDUkGlIkCzPz+C0B064FNgHdEjox7ch8tOBGslZ5QI"
/// );
/// ```
pub fn sign(value: &str, secret: &Secret) -> String {
    let signature = signature(value, secret);
    let mut signed = String::with_capacity(value.len() + 1 + signature.len());
    signed.push_str(value);
    signed.push('.');
    signed.push_str(&signature);
    signed
}

/// Verify a value produced by [`sign`] and return the original value.
///
/// The signature is everything after the **last** `.`.
/// It returns `None` if there is no `.` in `signed` or if the signature doesn't
/// match, e.g. because the value was tampered with or signed with a different secret.
/// The signature comparison runs in constant time.
///
/// # Example
///
/// ```rust
/// use galletta::{sign, unsign, Secret};
///
/// let secret = Secret::new("tobiiscool").unwrap();
/// let signed = sign("hello", &secret);
/// assert_eq!(unsign(&signed, &secret).as_deref(), Some("hello"));
///
/// let other = Secret::new("luna").unwrap();
/// assert_eq!(unsign(&signed, &other), None);
/// ```
pub fn unsign(signed: &str, secret: &Secret) -> Option<String> {
    let (value, provided) = signed.rsplit_once('.')?;
    let expected = signature(value, secret);
    if expected.as_bytes().ct_eq(provided.as_bytes()).into() {
        Some(value.to_string())
    } else {
        None
    }
}

fn signature(value: &str, secret: &Secret) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("good key");
    mac.update(value.as_bytes());
    BASE64_STANDARD_NO_PAD.encode(mac.finalize().into_bytes())
}

/// Signs and verifies cookie values with a primary [`Secret`] and, optionally,
/// a list of fallback secrets.
///
/// Values are always signed with the primary secret.
/// When verifying, the primary secret is tried first, followed by each fallback
/// in order. This lets you rotate secrets without invalidating the cookies that
/// your clients already hold: move the old secret into the fallbacks, and drop it
/// once those cookies have expired.
///
/// `Signer` is cheap to clone.
///
/// # Example
///
/// ```rust
/// use galletta::{Secret, Signer};
///
/// let old = Signer::new(Secret::new("old secret").unwrap());
/// let signed = old.sign("value");
///
/// let rotated = Signer::new(Secret::new("new secret").unwrap())
///     .with_fallbacks([Secret::new("old secret").unwrap()]);
/// assert_eq!(rotated.unsign(&signed).as_deref(), Some("value"));
/// ```
#[derive(Debug, Clone)]
pub struct Signer {
    inner: Arc<SignerInner>,
}

#[derive(Debug)]
struct SignerInner {
    primary: Secret,
    fallbacks: Vec<Secret>,
}

impl Signer {
    /// Creates a [`Signer`] with no fallback secrets.
    pub fn new(primary: Secret) -> Self {
        Signer {
            inner: Arc::new(SignerInner {
                primary,
                fallbacks: vec![],
            }),
        }
    }

    /// Replaces the fallback secrets of `self`.
    pub fn with_fallbacks<I>(self, fallbacks: I) -> Self
    where
        I: IntoIterator<Item = Secret>,
    {
        Signer {
            inner: Arc::new(SignerInner {
                primary: self.inner.primary.clone(),
                fallbacks: fallbacks.into_iter().collect(),
            }),
        }
    }

    /// Sign `value` with the primary secret. See [`sign`].
    pub fn sign(&self, value: &str) -> String {
        sign(value, &self.inner.primary)
    }

    /// Verify `signed` against the primary secret and then every fallback.
    /// See [`unsign`].
    pub fn unsign(&self, signed: &str) -> Option<String> {
        let secrets = std::iter::once(&self.inner.primary).chain(self.inner.fallbacks.iter());
        for (i, secret) in secrets.enumerate() {
            if let Some(value) = unsign(signed, secret) {
                if i > 0 {
                    tracing::debug!(fallback = i - 1, "Cookie value verified with a fallback secret");
                }
                return Some(value);
            }
        }
        tracing::debug!("Cookie value failed signature verification");
        None
    }
}
