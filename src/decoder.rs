use std::borrow::Cow;
use std::sync::Arc;

use crate::encoding;

type DecodeFn = dyn Fn(&str) -> Result<String, anyhow::Error> + Send + Sync;

/// Determines how cookie values are decoded when parsing a `Cookie` header.
///
/// By default, values are percent-decoded.
/// A custom decoder **replaces** percent-decoding: it receives the raw value,
/// exactly as it appeared in the header (minus surrounding whitespace and quotes).
///
/// # Example
///
/// ```rust
/// use galletta::{Decoder, RequestCookies};
///
/// let upper = Decoder::custom(|raw: &str| Ok(raw.to_uppercase()));
/// let cookies = RequestCookies::parse_header("a=x%20y", &upper);
/// assert_eq!(cookies.get("a"), Some("X%20Y"));
///
/// let cookies = RequestCookies::parse_header("a=x%20y", &Decoder::default());
/// assert_eq!(cookies.get("a"), Some("x y"));
/// ```
#[derive(Clone, Default)]
pub enum Decoder {
    /// Percent-decode values.
    ///
    /// Values that don't decode to valid UTF-8 are kept as they are.
    #[default]
    Percent,
    /// Decode values using a custom function.
    Custom(Arc<DecodeFn>),
}

impl Decoder {
    /// Build a [`Decoder`] from a custom decoding function.
    ///
    /// If the function fails, the cookie it was decoding is dropped;
    /// the other cookies in the header are still parsed.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<String, anyhow::Error> + Send + Sync + 'static,
    {
        Decoder::Custom(Arc::new(f))
    }

    /// Decode the raw value of the cookie named `name`.
    pub fn decode<'v>(&self, name: &str, raw: &'v str) -> Result<Cow<'v, str>, DecodingError> {
        match self {
            Decoder::Percent => Ok(encoding::decode(raw)),
            Decoder::Custom(f) => f(raw).map(Cow::Owned).map_err(|e| DecodingError {
                name: name.to_string(),
                raw_value: raw.to_string(),
                source: e,
            }),
        }
    }
}

impl std::fmt::Debug for Decoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decoder::Percent => f.write_str("Percent"),
            Decoder::Custom(_) => f.debug_tuple("Custom").field(&"..").finish(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to decode the value of the `{name}` cookie: `{raw_value}`")]
/// A custom [`Decoder`] failed to decode a cookie value.
pub struct DecodingError {
    pub(crate) name: String,
    pub(crate) raw_value: String,
    #[source]
    pub(crate) source: anyhow::Error,
}

impl DecodingError {
    /// The name of the cookie whose value couldn't be decoded.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::Decoder;
    use anyhow::Context;
    use std::error::Error;

    #[test]
    fn custom_failures_carry_context() {
        let decoder = Decoder::custom(|raw: &str| {
            raw.parse::<u32>()
                .map(|n| (n * 2).to_string())
                .context("Expected a number")
        });

        assert_eq!(decoder.decode("n", "21").unwrap(), "42");

        let err = decoder.decode("n", "twenty").unwrap_err();
        assert_eq!(err.name(), "n");
        assert_eq!(
            err.to_string(),
            "Failed to decode the value of the `n` cookie: `twenty`"
        );
        assert_eq!(err.source().unwrap().to_string(), "Expected a number");
    }

    #[test]
    fn debug_hides_the_closure() {
        assert_eq!(format!("{:?}", Decoder::default()), "Percent");
        assert_eq!(
            format!("{:?}", Decoder::custom(|s: &str| Ok(s.to_string()))),
            "Custom(\"..\")"
        );
    }
}
