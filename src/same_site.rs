use std::fmt;
use std::str::FromStr;

/// The `SameSite` cookie attribute.
///
/// With `Strict` the browser never sends the cookie on cross-site requests.
/// With `Lax` it is only sent on top-level navigations using "safe" methods.
/// With `None` it is sent on every request; browsers ignore `SameSite=None`
/// cookies that are not also marked `Secure`, but `galletta` does not add the
/// `Secure` flag on your behalf.
///
/// ```rust
/// use galletta::SameSite;
///
/// let same_site: SameSite = "lax".parse().unwrap();
/// assert_eq!(same_site, SameSite::Lax);
/// assert_eq!(same_site.to_string(), "Lax");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum SameSite {
    /// The "Strict" `SameSite` attribute.
    #[cfg_attr(feature = "serde", serde(alias = "strict"))]
    Strict,
    /// The "Lax" `SameSite` attribute.
    #[cfg_attr(feature = "serde", serde(alias = "lax"))]
    Lax,
    /// The "None" `SameSite` attribute.
    #[cfg_attr(feature = "serde", serde(alias = "none"))]
    None,
}

impl SameSite {
    /// Returns the `SameSite` attribute as it appears in a `Set-Cookie` header.
    pub fn as_str(&self) -> &'static str {
        match *self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SameSite {
    type Err = UnknownSameSiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("strict") {
            Ok(SameSite::Strict)
        } else if s.eq_ignore_ascii_case("lax") {
            Ok(SameSite::Lax)
        } else if s.eq_ignore_ascii_case("none") {
            Ok(SameSite::None)
        } else {
            Err(UnknownSameSiteError {
                value: s.to_string(),
            })
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("`{value}` is not a valid `SameSite` value. Expected `Strict`, `Lax` or `None`")]
/// The error returned when parsing a [`SameSite`] value from a string fails.
pub struct UnknownSameSiteError {
    value: String,
}

#[cfg(test)]
mod tests {
    use super::SameSite;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Strict".parse::<SameSite>().unwrap(), SameSite::Strict);
        assert_eq!("LAX".parse::<SameSite>().unwrap(), SameSite::Lax);
        assert_eq!("none".parse::<SameSite>().unwrap(), SameSite::None);

        let err = "sometimes".parse::<SameSite>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "`sometimes` is not a valid `SameSite` value. Expected `Strict`, `Lax` or `None`"
        );
    }
}
