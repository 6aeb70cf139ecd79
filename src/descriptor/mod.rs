//! Validated package descriptor domain model.
//!
//! A descriptor is the declarative record an install attempt consumes:
//! package name, release version, archive URL, expected digest, and the
//! binary to place on the search path. It is constructed once from
//! static configuration, used for exactly one attempt, and discarded;
//! it owns no mutable state and is never mutated after construction.
//!
//! # Sub-modules
//!
//! - [`binary_name`] — Executable filename newtype (`BinaryName`).
//! - [`error`] — Semantic error types for validation failures.
//! - [`expected_digest`] — Algorithm-prefixed digest (`ExpectedDigest`).
//! - [`package_name`] — Package identifier newtype (`PackageName`).
//! - [`release_version`] — Version string newtype (`ReleaseVersion`).
//! - [`sha256_digest`] — SHA-256 digest newtype (`Sha256Digest`).
//! - [`source_url`] — Archive URL newtype (`SourceUrl`).

pub mod binary_name;
pub mod error;
pub mod expected_digest;
pub mod package_name;
pub mod release_version;
pub mod sha256_digest;
pub mod source_url;

use binary_name::BinaryName;
use expected_digest::ExpectedDigest;
use package_name::PackageName;
use release_version::ReleaseVersion;
use serde::Deserialize;
use source_url::SourceUrl;

/// The declarative record describing one installable release.
///
/// # Examples
///
/// ```
/// use keg::descriptor::{PackageDescriptor, parse_descriptor};
///
/// let json = concat!(
///     r#"{"name":"spotctl","version":"1.0.1","#,
///     r#""source_url":"https://example.test/v1.0.1/darwin-amd64-1.0.1.tar.gz","#,
///     r#""digest":"sha256:aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa","#,
///     r#""binary":"spotctl"}"#,
/// );
/// let descriptor: PackageDescriptor = parse_descriptor(json).expect("valid descriptor");
/// assert_eq!(descriptor.name().as_str(), "spotctl");
/// assert_eq!(descriptor.archive_filename(), "spotctl-1.0.1.tar.gz");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageDescriptor {
    name: PackageName,
    version: ReleaseVersion,
    source_url: SourceUrl,
    digest: ExpectedDigest,
    binary: BinaryName,
}

impl PackageDescriptor {
    /// Create a descriptor from validated components.
    #[must_use]
    pub fn new(
        name: PackageName,
        version: ReleaseVersion,
        source_url: SourceUrl,
        digest: ExpectedDigest,
        binary: BinaryName,
    ) -> Self {
        Self {
            name,
            version,
            source_url,
            digest,
            binary,
        }
    }

    /// Return the package name.
    #[must_use]
    pub fn name(&self) -> &PackageName {
        &self.name
    }

    /// Return the release version.
    #[must_use]
    pub fn version(&self) -> &ReleaseVersion {
        &self.version
    }

    /// Return the release archive URL.
    #[must_use]
    pub fn source_url(&self) -> &SourceUrl {
        &self.source_url
    }

    /// Return the digest the archive must match.
    #[must_use]
    pub fn digest(&self) -> &ExpectedDigest {
        &self.digest
    }

    /// Return the name of the executable to install.
    #[must_use]
    pub fn binary(&self) -> &BinaryName {
        &self.binary
    }

    /// Return the deterministic scratch filename for the archive.
    #[must_use]
    pub fn archive_filename(&self) -> String {
        format!("{}-{}.tar.gz", self.name, self.version)
    }
}

/// Errors arising from descriptor parsing.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorParseError {
    /// JSON deserialization or field validation failed.
    #[error("descriptor parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a JSON document into a validated [`PackageDescriptor`].
///
/// All newtype validation (URL scheme, digest shape, filename safety)
/// runs during deserialization. Invalid fields produce a
/// [`DescriptorParseError`].
///
/// # Errors
///
/// Returns an error if the JSON is malformed or any field fails
/// newtype validation.
pub fn parse_descriptor(json: &str) -> Result<PackageDescriptor, DescriptorParseError> {
    Ok(serde_json::from_str(json)?)
}
