use std::collections::BTreeSet;
use std::fs;
use std::fs::File;
use std::path::Path;

use assert_fs::TempDir;
use assert_fs::prelude::*;
use cargo_freight::cli::{Cli, Commands};
use cargo_freight::commands::{Package, execute_with_dir};
use cargo_freight::digest::sha256_file;
use cargo_freight::error::FreightError;
use predicates::prelude::*;

/// Creates the auxiliary files every archive bundles.
fn write_extra_files(temp_dir: &TempDir) {
    for name in ["README.md", "LICENSE", "CHANGELOG.md"] {
        temp_dir.child(name).write_str(name).unwrap();
    }
}

/// Places a pre-built binary where the stage command expects it.
fn write_staged_binary(temp_dir: &TempDir, version: &str, triple: &str, binary_name: &str) {
    temp_dir
        .child(format!(
            "target_releases/v{version}/{triple}/release/{binary_name}"
        ))
        .write_str(&format!("{triple} binary bytes"))
        .unwrap();
}

fn zip_entry_names(path: &Path) -> BTreeSet<String> {
    let file = File::open(path).unwrap();
    let archive = zip::ZipArchive::new(file).unwrap();
    archive.file_names().map(String::from).collect()
}

fn stage_cli(version: &str) -> Cli {
    Cli::builder()
        .quiet(true)
        .command(Commands::Stage {
            version: version.to_string(),
            package_name: "yamis".to_string(),
            binaries_root: "target_releases".into(),
            release_root: "releases".into(),
            extra_files: Vec::new(),
        })
        .build()
        .unwrap()
}

#[test]
fn test_stage_command_creates_versioned_release_tree() {
    let temp_dir = TempDir::new().unwrap();
    write_extra_files(&temp_dir);
    write_staged_binary(&temp_dir, "2.1.0", "x86_64-apple-darwin", "yamis");
    write_staged_binary(&temp_dir, "2.1.0", "x86_64-pc-windows-gnu", "yamis.exe");
    write_staged_binary(&temp_dir, "2.1.0", "x86_64-unknown-linux-gnu", "yamis");

    execute_with_dir(&stage_cli("2.1.0"), Some(temp_dir.path())).unwrap();

    let stage_dir = temp_dir.path().join("releases/v2.1.0");
    for triple in [
        "x86_64-apple-darwin",
        "x86_64-pc-windows-gnu",
        "x86_64-unknown-linux-gnu",
    ] {
        let zip_path = stage_dir.join(format!("{triple}-v2.1.0.zip"));
        assert!(zip_path.exists(), "missing {}", zip_path.display());
    }

    let expected: BTreeSet<String> = ["yamis", "README.md", "LICENSE", "CHANGELOG.md"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(
        zip_entry_names(&stage_dir.join("x86_64-apple-darwin-v2.1.0.zip")),
        expected
    );
}

#[test]
fn test_stage_command_is_idempotent_about_the_release_dir() {
    let temp_dir = TempDir::new().unwrap();
    write_extra_files(&temp_dir);
    write_staged_binary(&temp_dir, "2.1.0", "x86_64-apple-darwin", "yamis");
    write_staged_binary(&temp_dir, "2.1.0", "x86_64-pc-windows-gnu", "yamis.exe");
    write_staged_binary(&temp_dir, "2.1.0", "x86_64-unknown-linux-gnu", "yamis");

    // Pre-existing output tree is reused, not an error
    fs::create_dir_all(temp_dir.path().join("releases/v2.1.0")).unwrap();

    execute_with_dir(&stage_cli("2.1.0"), Some(temp_dir.path())).unwrap();
    // Re-running overwrites the zips in place
    execute_with_dir(&stage_cli("2.1.0"), Some(temp_dir.path())).unwrap();
}

#[test]
fn test_stage_command_names_the_missing_binary() {
    let temp_dir = TempDir::new().unwrap();
    write_extra_files(&temp_dir);
    write_staged_binary(&temp_dir, "2.1.0", "x86_64-apple-darwin", "yamis");

    let err = execute_with_dir(&stage_cli("2.1.0"), Some(temp_dir.path())).unwrap_err();

    let message = err.to_string();
    assert!(predicate::str::contains("x86_64-pc-windows-gnu").eval(&message));
    assert!(predicate::str::contains("yamis.exe").eval(&message));
    assert!(matches!(err, FreightError::MissingArtifact { .. }));
}

#[test]
fn test_package_hash_record_matches_archive_digest() {
    let temp_dir = TempDir::new().unwrap();
    write_extra_files(&temp_dir);
    temp_dir
        .child("target_build/x86_64-unknown-linux-gnu/release/yamis")
        .write_str("release binary bytes")
        .unwrap();

    let package = Package::builder()
        .target_dir("target_build")
        .triple("x86_64-unknown-linux-gnu")
        .version("2.1.0")
        .out_dir("dist")
        .package_name("yamis")
        .working_dir(temp_dir.path())
        .build()
        .unwrap();

    let archive = package.archive_built_binary().unwrap();

    let record_path = temp_dir
        .path()
        .join("dist/yamis-2.1.0-x86_64-unknown-linux-gnu.tar.gz.sha256");
    let record = fs::read_to_string(record_path).unwrap();
    let expected = format!(
        "{}  yamis-2.1.0-x86_64-unknown-linux-gnu.tar.gz",
        sha256_file(&archive).unwrap()
    );
    assert_eq!(record, expected);
}

#[test]
fn test_coverage_command_with_no_tests_is_a_hard_error() {
    // A crate with no test targets compiles fine but yields zero
    // executables; the pipeline must refuse to merge an empty report.
    let temp_dir = TempDir::new().unwrap();
    temp_dir
        .child("Cargo.toml")
        .write_str(
            "[package]\nname = \"empty\"\nversion = \"0.0.0\"\nedition = \"2021\"\n\n[lib]\ntest = false\ndoctest = false\n",
        )
        .unwrap();
    temp_dir.child("src/lib.rs").write_str("").unwrap();

    let cli = Cli::builder()
        .quiet(true)
        .command(Commands::Coverage {
            work_dir: "target_cov".into(),
            out_dir: "target_cov/cov".into(),
            exclude_pattern: "/.cargo,/usr/lib".into(),
        })
        .build()
        .unwrap();

    let err = execute_with_dir(&cli, Some(temp_dir.path())).unwrap_err();
    assert!(matches!(err, FreightError::NoTestBinaries));
    // The merge step never ran
    assert!(!temp_dir.path().join("target_cov/cov").exists());
}
