//! Destination directory preparation and atomic binary publication.
//!
//! This module handles the final step of an install: placing the
//! extracted binary into the destination directory so that observers
//! never see a partially written file. The binary is written to a
//! temporary file in the same directory and renamed into place; the
//! rename is the only operation observable as "installed", and when two
//! installs race on the same name the last rename wins. Callers that
//! need stronger mutual exclusion must lock externally.

use crate::descriptor::binary_name::BinaryName;
use crate::error::{InstallError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Probe filename used to verify destination writability.
const WRITE_PROBE: &str = ".keg-write-probe";

/// Handles publication of an extracted binary into a destination
/// directory.
pub struct BinDir {
    root: Utf8PathBuf,
}

impl BinDir {
    /// Create a publisher for the given destination directory.
    #[must_use]
    pub fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    /// Return the destination directory root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Return the final path a binary will be installed at.
    #[must_use]
    pub fn binary_path(&self, binary: &BinaryName) -> Utf8PathBuf {
        self.root.join(binary.as_str())
    }

    /// Ensure the destination directory exists and is writable.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or is not
    /// writable.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(self.root.as_std_path()).map_err(|e| {
            InstallError::DestinationNotWritable {
                path: self.root.clone(),
                reason: e.to_string(),
            }
        })?;

        // Verify writability by attempting to create a probe file.
        let probe = self.root.join(WRITE_PROBE);
        match fs::write(probe.as_std_path(), b"probe") {
            Ok(()) => {
                let _ = fs::remove_file(probe.as_std_path());
                Ok(())
            }
            Err(e) => Err(InstallError::DestinationNotWritable {
                path: self.root.clone(),
                reason: e.to_string(),
            }),
        }
    }

    /// Atomically publish `source` into the destination as `binary`.
    ///
    /// The file is copied to a temporary path inside the destination
    /// directory, marked executable, and renamed over the final name.
    /// A crash mid-publish leaves at most an unreferenced temporary
    /// file, never a partial binary under the final name; the
    /// temporary is removed on every error path.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be written, the
    /// permission bits cannot be set, or the rename fails.
    pub fn publish(&self, source: &std::path::Path, binary: &BinaryName) -> Result<Utf8PathBuf> {
        let dest_path = self.binary_path(binary);
        let placement = |e: &dyn std::fmt::Display| InstallError::Placement {
            path: dest_path.clone(),
            reason: e.to_string(),
        };

        let mut temp = tempfile::NamedTempFile::new_in(self.root.as_std_path())
            .map_err(|e| placement(&e))?;
        let mut source_file = fs::File::open(source)?;
        std::io::copy(&mut source_file, temp.as_file_mut()).map_err(|e| placement(&e))?;
        set_executable(temp.as_file()).map_err(|e| placement(&e))?;
        temp.persist(dest_path.as_std_path())
            .map_err(|e| placement(&e.error))?;

        Ok(dest_path)
    }
}

/// Set executable permission bits on the published file.
#[cfg(unix)]
fn set_executable(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = file.metadata()?.permissions();
    permissions.set_mode(0o755);
    file.set_permissions(permissions)
}

/// Executable bits do not exist on this platform; nothing to do.
#[cfg(not(unix))]
fn set_executable(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn binary() -> BinaryName {
        BinaryName::try_from("spotctl").expect("valid binary name")
    }

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::try_from(path.to_path_buf()).expect("UTF-8 path")
    }

    #[test]
    fn prepare_creates_nested_destination() {
        let temp = tempfile::tempdir().expect("temp dir");
        let root = utf8(temp.path()).join("nested").join("bin");
        let bin_dir = BinDir::new(root.clone());
        bin_dir.prepare().expect("prepare");
        assert!(root.as_std_path().is_dir());
    }

    #[test]
    fn prepare_leaves_no_probe_file_behind() {
        let temp = tempfile::tempdir().expect("temp dir");
        let root = utf8(temp.path());
        BinDir::new(root.clone()).prepare().expect("prepare");
        let entries = fs::read_dir(root.as_std_path()).expect("read dir").count();
        assert_eq!(entries, 0);
    }

    #[test]
    fn publish_installs_the_source_bytes() {
        let temp = tempfile::tempdir().expect("temp dir");
        let source = temp.path().join("extracted");
        fs::write(&source, b"binary bytes").expect("write source");
        let root = utf8(temp.path()).join("bin");
        let bin_dir = BinDir::new(root);
        bin_dir.prepare().expect("prepare");

        let installed = bin_dir.publish(&source, &binary()).expect("publish");
        assert_eq!(installed.file_name(), Some("spotctl"));
        let bytes = fs::read(installed.as_std_path()).expect("read installed");
        assert_eq!(bytes, b"binary bytes");
    }

    #[test]
    fn publish_replaces_an_existing_binary() {
        let temp = tempfile::tempdir().expect("temp dir");
        let source = temp.path().join("extracted");
        let root = utf8(temp.path()).join("bin");
        let bin_dir = BinDir::new(root);
        bin_dir.prepare().expect("prepare");

        fs::write(&source, b"old bytes").expect("write source");
        bin_dir.publish(&source, &binary()).expect("first publish");
        fs::write(&source, b"new bytes").expect("rewrite source");
        let installed = bin_dir.publish(&source, &binary()).expect("second publish");

        let bytes = fs::read(installed.as_std_path()).expect("read installed");
        assert_eq!(bytes, b"new bytes");
    }

    #[test]
    fn publish_leaves_no_temporary_files() {
        let temp = tempfile::tempdir().expect("temp dir");
        let source = temp.path().join("extracted");
        fs::write(&source, b"binary bytes").expect("write source");
        let root = utf8(temp.path()).join("bin");
        let bin_dir = BinDir::new(root.clone());
        bin_dir.prepare().expect("prepare");
        bin_dir.publish(&source, &binary()).expect("publish");

        let entries = fs::read_dir(root.as_std_path()).expect("read dir").count();
        assert_eq!(entries, 1);
    }

    #[cfg(unix)]
    #[test]
    fn publish_marks_the_binary_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().expect("temp dir");
        let source = temp.path().join("extracted");
        fs::write(&source, b"binary bytes").expect("write source");
        let root = utf8(temp.path()).join("bin");
        let bin_dir = BinDir::new(root);
        bin_dir.prepare().expect("prepare");

        let installed = bin_dir.publish(&source, &binary()).expect("publish");
        let mode = fs::metadata(installed.as_std_path())
            .expect("metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o111, 0o111, "expected executable bits in {mode:o}");
    }
}
