//! Expected digest newtype pairing an algorithm with its hex value.
//!
//! Descriptors record the digest the downloaded archive must match,
//! either as `sha256:<hex>` or as a bare hex string (implying SHA-256).
//! Other algorithm labels are rejected at parse time.

use super::error::{DescriptorError, Result};
use super::sha256_digest::Sha256Digest;
use serde::Deserialize;
use std::fmt;

/// The algorithm label accepted in prefixed digest strings.
const SHA256_PREFIX: &str = "sha256";

/// The digest a downloaded archive must match, with its algorithm.
///
/// # Examples
///
/// ```
/// use keg::descriptor::expected_digest::ExpectedDigest;
///
/// let prefixed = format!("sha256:{}", "a".repeat(64));
/// let digest: ExpectedDigest = prefixed.as_str().try_into().expect("valid digest");
/// assert_eq!(digest.sha256().as_str(), "a".repeat(64));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct ExpectedDigest {
    sha256: Sha256Digest,
}

impl ExpectedDigest {
    /// Return whether `actual` matches the expected digest exactly.
    #[must_use]
    pub fn matches(&self, actual: &Sha256Digest) -> bool {
        self.sha256 == *actual
    }

    /// Return the expected SHA-256 digest.
    #[must_use]
    pub fn sha256(&self) -> &Sha256Digest {
        &self.sha256
    }
}

impl From<Sha256Digest> for ExpectedDigest {
    fn from(sha256: Sha256Digest) -> Self {
        Self { sha256 }
    }
}

impl TryFrom<&str> for ExpectedDigest {
    type Error = DescriptorError;

    fn try_from(value: &str) -> Result<Self> {
        let hex = match value.split_once(':') {
            Some((algorithm, rest)) => {
                if algorithm != SHA256_PREFIX {
                    return Err(DescriptorError::UnsupportedDigestAlgorithm {
                        algorithm: algorithm.to_owned(),
                    });
                }
                rest
            }
            None => value,
        };
        Ok(Self {
            sha256: Sha256Digest::try_from(hex)?,
        })
    }
}

impl TryFrom<String> for ExpectedDigest {
    type Error = DescriptorError;

    fn try_from(value: String) -> Result<Self> {
        Self::try_from(value.as_str())
    }
}

impl fmt::Display for ExpectedDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SHA256_PREFIX}:{}", self.sha256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_hex() -> String {
        "a".repeat(64)
    }

    #[test]
    fn accepts_prefixed_digest() {
        let value = format!("sha256:{}", valid_hex());
        let digest = ExpectedDigest::try_from(value.as_str()).expect("valid digest");
        assert_eq!(digest.sha256().as_str(), valid_hex());
    }

    #[test]
    fn accepts_bare_hex_as_sha256() {
        let digest = ExpectedDigest::try_from(valid_hex().as_str()).expect("valid digest");
        assert_eq!(digest.sha256().as_str(), valid_hex());
    }

    #[test]
    fn rejects_other_algorithms() {
        let value = format!("md5:{}", valid_hex());
        let result = ExpectedDigest::try_from(value.as_str());
        assert!(matches!(
            result,
            Err(DescriptorError::UnsupportedDigestAlgorithm { .. })
        ));
    }

    #[test]
    fn rejects_malformed_hex_behind_prefix() {
        let result = ExpectedDigest::try_from("sha256:abc");
        assert!(matches!(
            result,
            Err(DescriptorError::InvalidSha256Digest { .. })
        ));
    }

    #[test]
    fn matches_compares_exact_hex() {
        let digest = ExpectedDigest::try_from(valid_hex().as_str()).expect("valid digest");
        let same = Sha256Digest::try_from(valid_hex().as_str()).expect("valid digest");
        let other = Sha256Digest::try_from("b".repeat(64).as_str()).expect("valid digest");
        assert!(digest.matches(&same));
        assert!(!digest.matches(&other));
    }

    #[test]
    fn display_includes_algorithm_prefix() {
        let digest = ExpectedDigest::try_from(valid_hex().as_str()).expect("valid digest");
        assert_eq!(format!("{digest}"), format!("sha256:{}", valid_hex()));
    }
}
