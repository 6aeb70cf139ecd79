//! Keg verified release-binary installer.
//!
//! This crate provides the core functionality for installing a prebuilt
//! release binary from a declarative package descriptor: fetch the
//! release archive, verify its SHA-256 digest, extract it, and publish
//! the named binary into a destination directory atomically. On any
//! failure the destination is left untouched.
//!
//! The surrounding tooling (recipe repositories, CLI wiring, dependency
//! resolution across packages) is out of scope; callers supply a
//! [`descriptor::PackageDescriptor`] and a destination directory and
//! receive the installed path or a semantic error.
//!
//! # Modules
//!
//! - [`bin_dir`] - Destination preparation and atomic binary publication
//! - [`descriptor`] - Validated package descriptor domain model
//! - [`dirs`] - Base-directory resolution for the default install dir
//! - [`download`] - Archive fetching with timeout and cancellation
//! - [`error`] - Semantic error types for the install pipeline
//! - [`extraction`] - Gzip tarball extraction with traversal protection
//! - [`installer`] - The fetch-verify-extract-publish pipeline

pub mod bin_dir;
pub mod descriptor;
pub mod dirs;
pub mod download;
pub mod error;
pub mod extraction;
pub mod installer;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
