mod secret;
pub(crate) mod signing;

pub use secret::{EmptySecretError, Secret};
