//! Release archive construction.
//!
//! Archives contain the release binary plus the configured auxiliary files,
//! every entry stored at the archive root under its own base file name (the
//! source directory layout is deliberately discarded). Format selection and
//! naming follow the platform policy: linux targets get
//! `<pkg>-<version>-<triple>.tar.gz`, everything else
//! `<pkg>-<version>-<triple>.zip`.
//!
//! Entries are validated before any archive bytes are written, so a missing
//! binary or auxiliary file never leaves a partial archive behind. A failure
//! mid-write does: callers must treat a failed build as unpublishable.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::config::PackageConfig;
use crate::error::{FreightError, Result};
use crate::platform::{self, ArchiveFormat};

/// A single archive entry: a source file stored under a flat name.
#[derive(Clone, Debug)]
pub struct ArchiveEntry {
    source: PathBuf,
    name: String,
}

impl ArchiveEntry {
    /// Creates an entry for `source`, stored under its base file name.
    ///
    /// # Errors
    ///
    /// Returns `MissingArtifact` if `source` does not exist.
    pub fn from_file(source: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();
        if !source.is_file() {
            return Err(FreightError::MissingArtifact { path: source });
        }
        let name = source
            .file_name()
            .ok_or_else(|| FreightError::MissingArtifact {
                path: source.clone(),
            })?
            .to_string_lossy()
            .into_owned();
        Ok(Self { source, name })
    }

    /// The name the entry is stored under inside the archive.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Builds the release archive for one (version, target) pair.
///
/// The archive lands at `out_dir/<pkg>-<version>-<triple>.<ext>` and
/// contains the binary followed by the configured auxiliary files.
///
/// # Errors
///
/// Returns `MissingArtifact` if the binary or any auxiliary file is absent,
/// or an I/O error if the archive cannot be written.
pub fn build_archive(
    binary_path: &Path,
    config: &PackageConfig,
    version: &str,
    triple: &str,
    out_dir: &Path,
) -> Result<PathBuf> {
    let format = platform::archive_format_for(triple);
    let archive_name = format!(
        "{pkg}-{version}-{triple}.{ext}",
        pkg = config.package_name(),
        ext = format.extension()
    );
    let archive_path = out_dir.join(archive_name);

    let entries = collect_entries(binary_path, config.extra_files())?;

    match format {
        ArchiveFormat::TarGz => create_tar_gz(&archive_path, &entries)?,
        ArchiveFormat::Zip => create_zip(&archive_path, &entries)?,
    }

    Ok(archive_path)
}

/// Validates the binary and auxiliary files and turns them into entries.
///
/// All paths are checked up front so nothing is written when any input is
/// missing.
pub fn collect_entries(binary_path: &Path, extra_files: &[PathBuf]) -> Result<Vec<ArchiveEntry>> {
    let mut entries = Vec::with_capacity(1 + extra_files.len());
    entries.push(ArchiveEntry::from_file(binary_path)?);
    for extra in extra_files {
        entries.push(ArchiveEntry::from_file(extra)?);
    }
    Ok(entries)
}

/// Writes `entries` into a zip archive at `archive_path`.
pub fn create_zip(archive_path: &Path, entries: &[ArchiveEntry]) -> Result<()> {
    let file = File::create(archive_path).map_err(|source| FreightError::IoError {
        path: archive_path.to_path_buf(),
        source,
    })?;

    let mut zip = ZipWriter::new(file);

    for entry in entries {
        // Record the source file's mode so executables stay executable
        // after extraction
        let mut options = SimpleFileOptions::default();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let metadata =
                std::fs::metadata(&entry.source).map_err(|source| FreightError::IoError {
                    path: entry.source.clone(),
                    source,
                })?;
            options = options.unix_permissions(metadata.permissions().mode());
        }

        zip.start_file(entry.name.as_str(), options)
            .map_err(|source| FreightError::ZipError {
                path: archive_path.to_path_buf(),
                source,
            })?;
        let mut source = File::open(&entry.source).map_err(|source| FreightError::IoError {
            path: entry.source.clone(),
            source,
        })?;
        io::copy(&mut source, &mut zip).map_err(|source| FreightError::IoError {
            path: archive_path.to_path_buf(),
            source,
        })?;
    }

    zip.finish().map_err(|source| FreightError::ZipError {
        path: archive_path.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// Writes `entries` into a gzip-compressed tar archive at `archive_path`.
pub fn create_tar_gz(archive_path: &Path, entries: &[ArchiveEntry]) -> Result<()> {
    let io_err = |source| FreightError::IoError {
        path: archive_path.to_path_buf(),
        source,
    };

    let file = File::create(archive_path).map_err(io_err)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut tar = tar::Builder::new(encoder);

    for entry in entries {
        tar.append_path_with_name(&entry.source, &entry.name)
            .map_err(io_err)?;
    }

    tar.into_inner().map_err(io_err)?.finish().map_err(io_err)?;

    Ok(())
}
