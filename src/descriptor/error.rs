//! Error types for package descriptor validation.
//!
//! Each variant provides a descriptive message identifying the invalid
//! input and the constraint that was violated.

use thiserror::Error;

/// Errors arising from invalid descriptor field values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// A package name is empty or contains disallowed characters.
    #[error("invalid package name \"{value}\": {reason}")]
    InvalidPackageName {
        /// The rejected name string.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// A release version string is empty or malformed.
    #[error("invalid release version \"{value}\": {reason}")]
    InvalidReleaseVersion {
        /// The rejected version string.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// A source URL does not use a supported scheme or is incomplete.
    #[error("invalid source URL \"{value}\": {reason}")]
    InvalidSourceUrl {
        /// The rejected URL string.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// A SHA-256 digest is not a valid 64-character lowercase hex string.
    #[error("invalid SHA-256 digest: {reason}")]
    InvalidSha256Digest {
        /// Description of the validation failure.
        reason: String,
    },

    /// An expected digest names an algorithm other than SHA-256.
    #[error("unsupported digest algorithm \"{algorithm}\"; only sha256 is supported")]
    UnsupportedDigestAlgorithm {
        /// The rejected algorithm label.
        algorithm: String,
    },

    /// A binary name is empty or would escape the destination directory.
    #[error("invalid binary name \"{value}\": {reason}")]
    InvalidBinaryName {
        /// The rejected name string.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },
}

/// Result type alias using [`DescriptorError`].
pub type Result<T> = std::result::Result<T, DescriptorError>;
