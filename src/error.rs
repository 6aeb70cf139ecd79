//! Error types for the install pipeline.
//!
//! This module defines the semantic error taxonomy for a single install
//! attempt. Every variant is terminal for the call that produced it;
//! nothing is retried or silently recovered internally. Failures before
//! the final rename are guaranteed side-effect-free on the destination
//! directory.

use crate::descriptor::expected_digest::ExpectedDigest;
use crate::descriptor::sha256_digest::Sha256Digest;
use crate::download::FetchError;
use crate::extraction::ExtractError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur during an install attempt.
#[derive(Debug, Error)]
pub enum InstallError {
    /// Fetching the release archive failed.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The downloaded bytes do not match the descriptor's digest.
    #[error("digest mismatch for {url}: expected {expected}, got sha256:{actual}")]
    DigestMismatch {
        /// The URL whose content failed verification.
        url: String,
        /// The digest the descriptor promised.
        expected: ExpectedDigest,
        /// The digest computed over the downloaded bytes.
        actual: Sha256Digest,
    },

    /// Unpacking the release archive failed.
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    /// The archive does not contain the requested binary.
    #[error("binary \"{binary}\" not found in archive; archive contains: {contents}")]
    MissingBinary {
        /// The binary name the descriptor asked for.
        binary: String,
        /// Comma-separated list of files the archive did contain.
        contents: String,
    },

    /// The destination directory cannot be created or written to.
    #[error("destination directory {path} is not writable: {reason}")]
    DestinationNotWritable {
        /// Path to the non-writable directory.
        path: Utf8PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Writing or renaming the binary into the destination failed.
    #[error("failed to place {path}: {reason}")]
    Placement {
        /// The final path the binary was being published to.
        path: Utf8PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// A scratch-space I/O operation failed outside the classes above.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`InstallError`].
pub type Result<T> = std::result::Result<T, InstallError>;
