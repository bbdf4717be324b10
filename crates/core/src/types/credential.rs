//! Account credential type.
//!
//! The demo platform compares credentials in plain text (a stated
//! non-goal excludes real hashing), but the raw value is still kept
//! out of `Debug` output and logs via [`secrecy::SecretString`].

use secrecy::{ExposeSecret, SecretString};

/// Errors that can occur when parsing a [`Credential`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum CredentialError {
    /// The input string is empty.
    #[error("credential cannot be empty")]
    Empty,
}

/// An account credential (the demo's stand-in for a password).
///
/// Implements `Debug` via `SecretString`, so the inner value is
/// redacted. Comparison goes through [`Credential::matches`] rather
/// than `PartialEq` to keep the exposure point explicit and single.
#[derive(Debug, Clone)]
pub struct Credential(SecretString);

impl Credential {
    /// Parse a `Credential` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Empty`] if the input is empty.
    pub fn parse(s: &str) -> Result<Self, CredentialError> {
        if s.is_empty() {
            return Err(CredentialError::Empty);
        }
        Ok(Self(SecretString::from(s)))
    }

    /// Check whether a presented credential matches this one.
    #[must_use]
    pub fn matches(&self, presented: &str) -> bool {
        self.0.expose_secret() == presented
    }
}

impl std::str::FromStr for Credential {
    type Err = CredentialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Credential::parse(""), Err(CredentialError::Empty)));
    }

    #[test]
    fn test_matches() {
        let credential = Credential::parse("admin123").unwrap();
        assert!(credential.matches("admin123"));
        assert!(!credential.matches("admin124"));
        assert!(!credential.matches(""));
    }

    #[test]
    fn test_debug_redacts() {
        let credential = Credential::parse("hunter2").unwrap();
        let debug = format!("{credential:?}");
        assert!(!debug.contains("hunter2"));
    }
}
