use std::fmt;

/// Archive container format for a release artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// gzip-compressed tar, used for linux targets
    TarGz,
    /// zip, used for every other target
    Zip,
}

impl ArchiveFormat {
    /// File extension for this format, without a leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::TarGz => "tar.gz",
            ArchiveFormat::Zip => "zip",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Selects the archive format for a target triple.
///
/// Triples with an OS component of "linux" (e.g.
/// `x86_64-unknown-linux-gnu`) get a tarball; everything else gets a zip.
/// Total over all inputs and free of I/O, so the release naming convention
/// can be tested without touching the filesystem.
pub fn archive_format_for(triple: &str) -> ArchiveFormat {
    if triple.split('-').any(|component| component == "linux") {
        ArchiveFormat::TarGz
    } else {
        ArchiveFormat::Zip
    }
}

/// Returns the binary file name for a target triple.
///
/// Windows targets get an `.exe` suffix appended to the base name; all
/// other targets use the base name unchanged.
pub fn binary_file_name(base_name: &str, triple: &str) -> String {
    if triple.contains("windows") {
        format!("{base_name}.exe")
    } else {
        base_name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linux_targets_use_tar_gz() {
        assert_eq!(
            archive_format_for("x86_64-unknown-linux-gnu"),
            ArchiveFormat::TarGz
        );
        assert_eq!(
            archive_format_for("aarch64-unknown-linux-musl"),
            ArchiveFormat::TarGz
        );
    }

    #[test]
    fn test_non_linux_targets_use_zip() {
        assert_eq!(
            archive_format_for("x86_64-pc-windows-gnu"),
            ArchiveFormat::Zip
        );
        assert_eq!(
            archive_format_for("x86_64-pc-windows-msvc"),
            ArchiveFormat::Zip
        );
        assert_eq!(archive_format_for("x86_64-apple-darwin"), ArchiveFormat::Zip);
        assert_eq!(archive_format_for("aarch64-apple-darwin"), ArchiveFormat::Zip);
    }

    #[test]
    fn test_linux_is_matched_as_a_component() {
        // A vendor string merely containing "linux" must not trigger a tarball
        assert_eq!(archive_format_for("x86_64-linuxy-none"), ArchiveFormat::Zip);
    }

    #[test]
    fn test_windows_binaries_get_exe_suffix() {
        assert_eq!(
            binary_file_name("yamis", "x86_64-pc-windows-gnu"),
            "yamis.exe"
        );
        assert_eq!(
            binary_file_name("yamis", "x86_64-pc-windows-msvc"),
            "yamis.exe"
        );
    }

    #[test]
    fn test_other_binaries_keep_base_name() {
        assert_eq!(
            binary_file_name("yamis", "x86_64-unknown-linux-gnu"),
            "yamis"
        );
        assert_eq!(binary_file_name("yamis", "x86_64-apple-darwin"), "yamis");
    }

    #[test]
    fn test_extension() {
        assert_eq!(ArchiveFormat::TarGz.extension(), "tar.gz");
        assert_eq!(ArchiveFormat::Zip.extension(), "zip");
        assert_eq!(ArchiveFormat::Zip.to_string(), "zip");
    }
}
