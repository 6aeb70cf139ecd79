//! Shared test utilities for the installer crate.
//!
//! Used by unit tests and the behavioural suite to build release
//! tarballs in memory without touching the network.

use flate2::Compression;
use flate2::write::GzEncoder;

/// Build a gzip-compressed tar archive holding the given entries.
///
/// Each entry is a `(path, contents)` pair; paths may contain `/` to
/// produce nested layouts. Entries are written as regular files with
/// mode `0755`.
///
/// # Panics
///
/// Panics if the in-memory archive cannot be assembled, which only
/// happens on allocation failure.
#[must_use]
pub fn gzip_tarball(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (path, contents) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(u64::try_from(contents.len()).expect("entry size fits in u64"));
        header.set_mode(0o755);
        builder
            .append_data(&mut header, path, *contents)
            .expect("append tar entry");
    }
    let encoder = builder.into_inner().expect("finish tar");
    encoder.finish().expect("finish gzip")
}
