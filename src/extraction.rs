//! Archive extraction for release tarballs.
//!
//! Extracts `.tar.gz` archives to a target directory with path
//! traversal protection, so a hostile archive cannot write outside the
//! scratch directory it is unpacked into.

use std::path::{Component, Path};

/// Trait for extracting release archives, enabling test mocking.
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveExtractor {
    /// Extract the archive at `archive_path` into `dest_dir`.
    ///
    /// Returns the list of regular files that were extracted.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::PathTraversal`] if any entry attempts to
    /// escape the destination directory.
    /// Returns [`ExtractError::EmptyArchive`] if no files are found.
    /// Returns [`ExtractError::Io`] on I/O or decompression failures.
    fn extract(&self, archive_path: &Path, dest_dir: &Path) -> Result<Vec<String>, ExtractError>;
}

/// Errors arising from archive extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// I/O or decompression error during extraction.
    #[error("extraction I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A path in the archive attempts to traverse outside the destination.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending path from the archive entry.
        path: String,
    },

    /// The archive contains no files.
    #[error("archive contains no files")]
    EmptyArchive,
}

/// Default extractor using the `flate2` and `tar` crates.
///
/// Validates each entry path before extraction to guard against
/// path traversal attacks (zip-slip).
pub struct GzipExtractor;

impl ArchiveExtractor for GzipExtractor {
    fn extract(&self, archive_path: &Path, dest_dir: &Path) -> Result<Vec<String>, ExtractError> {
        let file = std::fs::File::open(archive_path)?;
        let decoder = flate2::read::GzDecoder::new(file);
        let mut archive = tar::Archive::new(decoder);
        let mut extracted = Vec::new();

        for entry_result in archive.entries()? {
            let mut entry = entry_result?;
            let entry_path = entry.path()?.into_owned();

            validate_entry_path(&entry_path)?;

            let dest_path = dest_dir.join(&entry_path);
            if let Some(parent) = dest_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            entry.unpack(&dest_path)?;

            if entry.header().entry_type().is_file() {
                if let Some(name) = entry_path.file_name() {
                    extracted.push(name.to_string_lossy().into_owned());
                }
            }
        }

        if extracted.is_empty() {
            return Err(ExtractError::EmptyArchive);
        }

        Ok(extracted)
    }
}

/// Validate that a tar entry path does not escape the destination
/// directory via `..` components or absolute paths.
fn validate_entry_path(path: &Path) -> Result<(), ExtractError> {
    if path.is_absolute() {
        return Err(ExtractError::PathTraversal {
            path: path.display().to_string(),
        });
    }
    for component in path.components() {
        if matches!(component, Component::ParentDir) {
            return Err(ExtractError::PathTraversal {
                path: path.display().to_string(),
            });
        }
    }
    Ok(())
}
