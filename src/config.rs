//! Packaging configuration: package identity, auxiliary files, and the
//! static release target matrix.
//!
//! These were process-wide constants in earlier CI scripts; they are explicit
//! values here so the archive and staging logic can be exercised with
//! alternate package names and file sets in tests.

use std::path::PathBuf;

use crate::platform;

/// Auxiliary files bundled into every release archive alongside the binary.
pub const DEFAULT_EXTRA_FILES: [&str; 3] = ["README.md", "LICENSE", "CHANGELOG.md"];

/// The target triples staged by `cargo freight stage`, in iteration order.
///
/// Plain configuration data: adding a target is additive, and the expected
/// binary file name for each triple is derived through the platform policy
/// rather than stored here.
pub const RELEASE_TARGETS: [&str; 3] = [
    "x86_64-apple-darwin",
    "x86_64-pc-windows-gnu",
    "x86_64-unknown-linux-gnu",
];

/// Identity and contents of the package being released.
#[derive(Clone, Debug)]
pub struct PackageConfig {
    package_name: String,
    extra_files: Vec<PathBuf>,
}

impl PackageConfig {
    /// Creates a config for `package_name` with the default auxiliary files.
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            extra_files: DEFAULT_EXTRA_FILES.iter().map(PathBuf::from).collect(),
        }
    }

    /// Replaces the auxiliary file list.
    pub fn with_extra_files(mut self, extra_files: Vec<PathBuf>) -> Self {
        self.extra_files = extra_files;
        self
    }

    /// The package name used in archive names and binary lookups.
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Auxiliary files to bundle, resolved relative to the working directory.
    pub fn extra_files(&self) -> &[PathBuf] {
        &self.extra_files
    }

    /// The binary file name this package produces for a target triple.
    pub fn binary_name_for(&self, triple: &str) -> String {
        platform::binary_file_name(&self.package_name, triple)
    }
}
