use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::FreightError;

const CHUNK_SIZE: usize = 8192;

/// Computes the SHA-256 digest of a file, streaming it in fixed-size chunks.
///
/// Returns the lower-case hex encoding of the digest. Large archives are
/// never read into memory whole.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn sha256_file(path: &Path) -> Result<String, FreightError> {
    let mut file = File::open(path).map_err(|source| FreightError::IoError {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let n = file
            .read(&mut buffer)
            .map_err(|source| FreightError::IoError {
                path: path.to_path_buf(),
                source,
            })?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Writes a `sha256sum`-format record for `file_path` into `out_dir`.
///
/// The record file is named `<file name>.sha256` and contains exactly
/// `<digest>  <file name>` (two spaces, no trailing newline), so
/// `sha256sum -c` accepts it from inside `out_dir`.
///
/// # Errors
///
/// Returns an error if the record file cannot be written.
pub fn write_hash_record(
    file_path: &Path,
    digest_hex: &str,
    out_dir: &Path,
) -> Result<PathBuf, FreightError> {
    let file_name = file_path
        .file_name()
        .ok_or_else(|| FreightError::MissingArtifact {
            path: file_path.to_path_buf(),
        })?
        .to_string_lossy();

    let record_path = out_dir.join(format!("{file_name}.sha256"));
    let record = format!("{digest_hex}  {file_name}");

    std::fs::write(&record_path, record).map_err(|source| FreightError::IoError {
        path: record_path.clone(),
        source,
    })?;

    Ok(record_path)
}
