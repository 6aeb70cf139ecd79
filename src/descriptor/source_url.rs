//! Source URL newtype for release archive locations.
//!
//! Validates that the value is an `http://` or `https://` URL with a
//! non-empty remainder. Resolution and redirect handling are left to
//! the transport layer.

use super::error::{DescriptorError, Result};
use serde::Deserialize;
use std::fmt;

/// URL schemes accepted for release archive downloads.
const SUPPORTED_SCHEMES: [&str; 2] = ["https://", "http://"];

/// A validated release archive URL.
///
/// # Examples
///
/// ```
/// use keg::descriptor::source_url::SourceUrl;
///
/// let url: SourceUrl =
///     "https://example.test/releases/download/v1.0.1/darwin-amd64-1.0.1.tar.gz"
///         .try_into()
///         .expect("valid URL");
/// assert!(url.as_str().starts_with("https://"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct SourceUrl(String);

impl SourceUrl {
    /// Return the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for SourceUrl {
    type Error = DescriptorError;

    fn try_from(value: &str) -> Result<Self> {
        validate_source_url(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for SourceUrl {
    type Error = DescriptorError;

    fn try_from(value: String) -> Result<Self> {
        validate_source_url(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for SourceUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate that `value` is an HTTP(S) URL with a non-empty remainder.
fn validate_source_url(value: &str) -> Result<()> {
    let invalid = |reason: &str| DescriptorError::InvalidSourceUrl {
        value: value.to_owned(),
        reason: reason.to_owned(),
    };
    let Some(rest) = SUPPORTED_SCHEMES
        .iter()
        .find_map(|scheme| value.strip_prefix(scheme))
    else {
        return Err(invalid("scheme must be http:// or https://"));
    };
    if rest.is_empty() {
        return Err(invalid("URL has no host or path after the scheme"));
    }
    Ok(())
}
