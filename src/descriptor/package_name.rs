//! Package name newtype for descriptor identity.
//!
//! Validates that the value is a non-empty ASCII identifier suitable for
//! use in archive scratch filenames and log lines.

use super::error::{DescriptorError, Result};
use serde::Deserialize;
use std::fmt;

/// A validated package name.
///
/// # Examples
///
/// ```
/// use keg::descriptor::package_name::PackageName;
///
/// let name: PackageName = "spotctl".try_into().expect("valid package name");
/// assert_eq!(name.as_str(), "spotctl");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct PackageName(String);

impl PackageName {
    /// Return the name as a string slice.
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

impl TryFrom<&str> for PackageName {
    type Error = DescriptorError;

    fn try_from(value: &str) -> Result<Self> {
        validate_package_name(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for PackageName {
    type Error = DescriptorError;

    fn try_from(value: String) -> Result<Self> {
        validate_package_name(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate that `value` is a well-formed package name.
fn validate_package_name(value: &str) -> Result<()> {
    let invalid = |reason: &str| DescriptorError::InvalidPackageName {
        value: value.to_owned(),
        reason: reason.to_owned(),
    };
    if value.is_empty() {
        return Err(invalid("name must not be empty"));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(invalid(
            "only ASCII alphanumerics, '-', and '_' are allowed",
        ));
    }
    if value.starts_with('-') {
        return Err(invalid("name must not start with '-'"));
    }
    Ok(())
}
