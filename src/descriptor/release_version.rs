//! Release version newtype for descriptor identity.
//!
//! Validates that the value is shaped like a semantic version: a
//! non-empty string with a leading digit, restricted to the characters
//! that appear in version numbers and pre-release or build suffixes.

use super::error::{DescriptorError, Result};
use serde::Deserialize;
use std::fmt;

/// A validated release version string.
///
/// A single descriptor binds exactly one digest to one version for one
/// install attempt; upstream release history occasionally re-publishes
/// a version label with different contents, and the replacement record
/// simply supersedes the old one here.
///
/// # Examples
///
/// ```
/// use keg::descriptor::release_version::ReleaseVersion;
///
/// let version: ReleaseVersion = "1.0.1".try_into().expect("valid version");
/// assert_eq!(version.as_str(), "1.0.1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    /// Return the version as a string slice.
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

impl TryFrom<&str> for ReleaseVersion {
    type Error = DescriptorError;

    fn try_from(value: &str) -> Result<Self> {
        validate_release_version(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for ReleaseVersion {
    type Error = DescriptorError;

    fn try_from(value: String) -> Result<Self> {
        validate_release_version(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for ReleaseVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate that `value` is shaped like a semantic version string.
fn validate_release_version(value: &str) -> Result<()> {
    let invalid = |reason: &str| DescriptorError::InvalidReleaseVersion {
        value: value.to_owned(),
        reason: reason.to_owned(),
    };
    if value.is_empty() {
        return Err(invalid("version must not be empty"));
    }
    if !value.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid("version must start with a digit"));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+'))
    {
        return Err(invalid(
            "only ASCII alphanumerics, '.', '-', and '+' are allowed",
        ));
    }
    Ok(())
}
