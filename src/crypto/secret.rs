use rand::RngCore;

const GENERATED_SECRET_LENGTH: usize = 64;

/// The shared secret used to sign and verify cookie values.
///
/// A secret can be any non-empty sequence of bytes. For security, it _should_ be
/// long and cryptographically random: use [`Secret::generate()`] or load one from
/// a secret management service.
#[allow(clippy::derived_hash_with_manual_eq)]
#[derive(Clone, Eq, Hash)]
pub struct Secret(Vec<u8>);

#[cfg(feature = "serde")]
mod deser {
    use crate::Secret;
    use serde::Deserializer;

    impl<'de> serde::Deserialize<'de> for Secret {
        fn deserialize<D>(deserializer: D) -> Result<Secret, D::Error>
        where
            D: Deserializer<'de>,
        {
            let secret = String::deserialize(deserializer)?;
            Secret::new(secret).map_err(serde::de::Error::custom)
        }
    }
}

impl PartialEq for Secret {
    fn eq(&self, other: &Self) -> bool {
        use subtle::ConstantTimeEq;

        self.0.ct_eq(&other.0).into()
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Secret").field(&"***").finish()
    }
}

impl Secret {
    /// Creates a new [`Secret`] from a string or raw bytes.
    ///
    /// It fails if `secret` is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use galletta::Secret;
    ///
    /// let secret = Secret::new("tobiiscool").unwrap();
    /// assert_eq!(secret.as_bytes(), b"tobiiscool");
    ///
    /// assert!(Secret::new("").is_err());
    /// ```
    pub fn new<S: Into<Vec<u8>>>(secret: S) -> Result<Secret, EmptySecretError> {
        let secret = secret.into();
        if secret.is_empty() {
            Err(EmptySecretError)
        } else {
            Ok(Secret(secret))
        }
    }

    /// Generates a secret from a secure, random source.
    ///
    /// # Panics
    ///
    /// Panics if randomness cannot be retrieved from the operating system. See
    /// [`Secret::try_generate()`] for a non-panicking version.
    pub fn generate() -> Secret {
        Self::try_generate().expect("failed to generate `Secret` from randomness")
    }

    /// Attempts to generate a secret from a secure, random source.
    /// Returns `None` if randomness cannot be retrieved from the operating system.
    pub fn try_generate() -> Option<Secret> {
        let mut rng = rand::thread_rng();
        let mut secret = vec![0; GENERATED_SECRET_LENGTH];
        rng.try_fill_bytes(&mut secret).ok()?;
        Some(Secret(secret))
    }

    /// Returns the raw bytes of the secret. Guaranteed to be non-empty.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

#[derive(Debug, thiserror::Error)]
#[error("a signing secret cannot be empty")]
/// The error returned by [`Secret::new()`] when the provided secret is empty.
pub struct EmptySecretError;

impl TryFrom<&str> for Secret {
    type Error = EmptySecretError;

    fn try_from(secret: &str) -> Result<Self, Self::Error> {
        Secret::new(secret)
    }
}

impl TryFrom<String> for Secret {
    type Error = EmptySecretError;

    fn try_from(secret: String) -> Result<Self, Self::Error> {
        Secret::new(secret)
    }
}

impl TryFrom<&[u8]> for Secret {
    type Error = EmptySecretError;

    fn try_from(secret: &[u8]) -> Result<Self, Self::Error> {
        Secret::new(secret)
    }
}

impl TryFrom<Vec<u8>> for Secret {
    type Error = EmptySecretError;

    fn try_from(secret: Vec<u8>) -> Result<Self, Self::Error> {
        Secret::new(secret)
    }
}
