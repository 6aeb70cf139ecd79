//! Archive fetching for release downloads.
//!
//! Provides a trait-based abstraction for fetching release archives
//! over HTTP, enabling dependency injection for testing. The whole
//! archive is buffered in memory so the digest can be computed over the
//! exact bytes that were received; a caller-supplied [`CancelToken`] is
//! checked between body reads so a cancelled fetch stops promptly and
//! discards its partial buffer.

use crate::descriptor::source_url::SourceUrl;
use std::io::Read;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Default network timeout for release archive downloads.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Size of the read buffer used while draining the response body.
const READ_CHUNK: usize = 8192;

/// A cloneable cancellation flag shared between a caller and a fetch.
///
/// Cancellation is cooperative: the downloader checks the token between
/// body reads and abandons the transfer once it is set. Cancelling a
/// token never affects an install that has already passed the fetch
/// step.
///
/// # Examples
///
/// ```
/// use keg::download::CancelToken;
///
/// let token = CancelToken::new();
/// let shared = token.clone();
/// assert!(!shared.is_cancelled());
/// token.cancel();
/// assert!(shared.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of any fetch sharing this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Return whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Errors arising from archive fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed or the server reported an error status.
    #[error("download failed for {url}: {reason}")]
    HttpError {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The release archive was not found (HTTP 404).
    #[error("release archive not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// The caller cancelled the fetch before the body completed.
    #[error("download cancelled for {url}")]
    Cancelled {
        /// The URL whose transfer was abandoned.
        url: String,
    },

    /// I/O error while draining the response body.
    #[error("I/O error reading download: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for fetching a release archive's bytes.
///
/// Abstraction allows tests to stub HTTP behaviour without network
/// access.
#[cfg_attr(test, mockall::automock)]
pub trait Downloader {
    /// Fetch the archive at `url`, buffering the whole body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server responds with
    /// a non-success status, the body cannot be read, or `cancel` is
    /// set before the body has been fully received.
    fn fetch(&self, url: &SourceUrl, cancel: &CancelToken) -> Result<Vec<u8>, FetchError>;
}

/// HTTP-based downloader using `ureq`.
pub struct HttpDownloader {
    agent: ureq::Agent,
}

impl HttpDownloader {
    /// Create a downloader with the default request timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(DOWNLOAD_TIMEOUT)
    }

    /// Create a downloader with a caller-supplied request timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader for HttpDownloader {
    fn fetch(&self, url: &SourceUrl, cancel: &CancelToken) -> Result<Vec<u8>, FetchError> {
        let response = self
            .agent
            .get(url.as_str())
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        let mut body = response.into_body();
        let mut reader = body.as_reader();
        let mut bytes = Vec::new();
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            if cancel.is_cancelled() {
                return Err(FetchError::Cancelled {
                    url: url.as_str().to_owned(),
                });
            }
            let read = reader.read(&mut chunk)?;
            if read == 0 {
                break;
            }
            bytes.extend_from_slice(&chunk[..read]);
        }
        Ok(bytes)
    }
}

/// Map a ureq error to a [`FetchError`].
fn map_ureq_error(url: &SourceUrl, err: &ureq::Error) -> FetchError {
    match err {
        ureq::Error::StatusCode(404) => FetchError::NotFound {
            url: url.as_str().to_owned(),
        },
        other => FetchError::HttpError {
            url: url.as_str().to_owned(),
            reason: other.to_string(),
        },
    }
}
