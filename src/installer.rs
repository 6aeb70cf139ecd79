//! Verified install pipeline orchestrator.
//!
//! Implements the fetch-verify-extract-publish pipeline for a single
//! package descriptor. The downloaded archive is verified against the
//! descriptor's digest before anything is unpacked, unpacking happens
//! in a scoped scratch directory, and nothing under the destination is
//! modified until the final atomic rename. Scratch state is cleaned up
//! on every exit path, success or failure.

use camino::{Utf8Path, Utf8PathBuf};
use std::path::{Path, PathBuf};

use crate::bin_dir::BinDir;
use crate::descriptor::PackageDescriptor;
use crate::descriptor::binary_name::BinaryName;
use crate::descriptor::sha256_digest::Sha256Digest;
use crate::download::{CancelToken, Downloader, HttpDownloader};
use crate::error::{InstallError, Result};
use crate::extraction::{ArchiveExtractor, GzipExtractor};

/// Orchestrates one install attempt with injected collaborators.
///
/// The production entry point [`install`] wires this up with real HTTP
/// and extraction implementations; tests inject stubs or mocks.
pub struct VerifiedInstaller<'a> {
    downloader: &'a dyn Downloader,
    extractor: &'a dyn ArchiveExtractor,
}

impl<'a> VerifiedInstaller<'a> {
    /// Create an installer from the given collaborators.
    #[must_use]
    pub fn new(downloader: &'a dyn Downloader, extractor: &'a dyn ArchiveExtractor) -> Self {
        Self {
            downloader,
            extractor,
        }
    }

    /// Install the descriptor's binary into `destination`.
    ///
    /// Returns the final installed path. No retries are performed; the
    /// caller decides whether a transient fetch failure warrants
    /// another attempt with a fresh call.
    ///
    /// # Errors
    ///
    /// Returns the first pipeline failure: fetch, digest mismatch,
    /// extraction, archive layout, or destination placement. Failures
    /// before placement leave `destination` untouched.
    pub fn install(
        &self,
        descriptor: &PackageDescriptor,
        destination: &Utf8Path,
        cancel: &CancelToken,
    ) -> Result<Utf8PathBuf> {
        log::debug!(
            "fetching {} {} from {}",
            descriptor.name(),
            descriptor.version(),
            descriptor.source_url()
        );
        let bytes = self.downloader.fetch(descriptor.source_url(), cancel)?;

        let actual = Sha256Digest::of_bytes(&bytes);
        if !descriptor.digest().matches(&actual) {
            return Err(InstallError::DigestMismatch {
                url: descriptor.source_url().as_str().to_owned(),
                expected: descriptor.digest().clone(),
                actual,
            });
        }

        let scratch = tempfile::tempdir()?;
        let archive_path = scratch.path().join(descriptor.archive_filename());
        std::fs::write(&archive_path, &bytes)?;
        let unpack_dir = scratch.path().join("unpacked");
        std::fs::create_dir_all(&unpack_dir)?;
        let contents = self.extractor.extract(&archive_path, &unpack_dir)?;

        let source = locate_binary(&unpack_dir, descriptor.binary())?.ok_or_else(|| {
            InstallError::MissingBinary {
                binary: descriptor.binary().as_str().to_owned(),
                contents: contents.join(", "),
            }
        })?;

        let bin_dir = BinDir::new(destination.to_owned());
        bin_dir.prepare()?;
        let installed = bin_dir.publish(&source, descriptor.binary())?;
        log::info!(
            "installed {} {} to {}",
            descriptor.name(),
            descriptor.version(),
            installed
        );
        Ok(installed)
    }
}

/// Install a descriptor's binary using production HTTP and extraction
/// implementations.
///
/// Convenience wrapper over [`VerifiedInstaller::install`] with a
/// default-timeout [`HttpDownloader`], a [`GzipExtractor`], and a fresh
/// cancellation token.
///
/// # Errors
///
/// Propagates any [`InstallError`] from the pipeline.
pub fn install(descriptor: &PackageDescriptor, destination: &Utf8Path) -> Result<Utf8PathBuf> {
    let downloader = HttpDownloader::new();
    VerifiedInstaller::new(&downloader, &GzipExtractor).install(
        descriptor,
        destination,
        &CancelToken::new(),
    )
}

/// Search the extracted tree for a regular file named `binary`.
///
/// Directories are descended depth-first; the first match wins.
fn locate_binary(root: &Path, binary: &BinaryName) -> std::io::Result<Option<PathBuf>> {
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            if let Some(found) = locate_binary(&entry.path(), binary)? {
                return Ok(Some(found));
            }
        } else if file_type.is_file() && entry.file_name().to_str() == Some(binary.as_str()) {
            return Ok(Some(entry.path()));
        }
    }
    Ok(None)
}
