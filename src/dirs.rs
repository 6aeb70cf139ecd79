//! Directory resolution abstraction for platform-specific paths.
//!
//! Wraps `directories-next` behind a small trait so tests can inject
//! fixed paths instead of the host layout.

use camino::Utf8PathBuf;

/// Provider of per-user base directories.
pub trait BaseDirs {
    /// Return the per-user executable directory, when the platform
    /// defines one (for example `~/.local/bin` on Linux).
    fn executable_dir(&self) -> Option<Utf8PathBuf>;
}

/// Production implementation backed by `directories-next`.
pub struct SystemBaseDirs;

impl BaseDirs for SystemBaseDirs {
    fn executable_dir(&self) -> Option<Utf8PathBuf> {
        directories_next::BaseDirs::new()
            .and_then(|dirs| dirs.executable_dir().map(std::path::Path::to_path_buf))
            .and_then(|path| Utf8PathBuf::try_from(path).ok())
    }
}

/// Return the default install directory for the current platform.
///
/// Resolves to the per-user executable directory where one exists;
/// callers are free to ignore it and pass any destination to the
/// installer. Returns `None` on platforms without a defined executable
/// directory.
#[must_use]
pub fn default_install_dir() -> Option<Utf8PathBuf> {
    SystemBaseDirs.executable_dir()
}
