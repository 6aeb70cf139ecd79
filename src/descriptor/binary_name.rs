//! Binary name newtype for the executable to install.
//!
//! Validates that the value is a plain filename: joining it onto the
//! destination directory can never address a path outside it.

use super::error::{DescriptorError, Result};
use serde::Deserialize;
use std::fmt;

/// The name of the executable to locate in the archive and install.
///
/// # Examples
///
/// ```
/// use keg::descriptor::binary_name::BinaryName;
///
/// let binary: BinaryName = "spotctl".try_into().expect("valid binary name");
/// assert_eq!(binary.as_str(), "spotctl");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct BinaryName(String);

impl BinaryName {
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

impl TryFrom<&str> for BinaryName {
    type Error = DescriptorError;

    fn try_from(value: &str) -> Result<Self> {
        validate_binary_name(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for BinaryName {
    type Error = DescriptorError;

    fn try_from(value: String) -> Result<Self> {
        validate_binary_name(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for BinaryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BinaryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate that `value` is a plain filename with no path components.
fn validate_binary_name(value: &str) -> Result<()> {
    let invalid = |reason: &str| DescriptorError::InvalidBinaryName {
        value: value.to_owned(),
        reason: reason.to_owned(),
    };
    if value.is_empty() {
        return Err(invalid("name must not be empty"));
    }
    if value.contains('/') || value.contains('\\') {
        return Err(invalid("name must not contain path separators"));
    }
    if value == "." || value == ".." {
        return Err(invalid("name must not be a relative path component"));
    }
    Ok(())
}
