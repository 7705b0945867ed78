//! Test-binary discovery and kcov invocation plumbing.
//!
//! Discovery depends on a textual contract: `cargo test --no-run` prints a
//! `Executable ... (<path>)` line for every test binary it compiles, spread
//! across stdout and stderr. The caller concatenates both streams and hands
//! the combined text to [`parse_executable_markers`], which isolates the
//! matching rule so it can be hardened without touching the orchestration.
//! Interleaved or re-buffered output can in principle split a marker line;
//! that limitation is inherited from the contract, not worked around here.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use regex::Regex;

/// Matches a trimmed marker line and captures its last token.
fn marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(r"^Executable\b.*\s(\S+)$").expect("marker regex is valid")
    })
}

/// Extracts test-binary paths from the combined output of a test build.
///
/// A line counts as a marker when, after trimming, it starts with the
/// literal token `Executable`; the path is the last whitespace-separated
/// token with surrounding parentheses stripped. Paths are returned in the
/// order encountered.
pub fn parse_executable_markers(text: &str) -> Vec<PathBuf> {
    text.lines()
        .filter_map(|line| {
            marker_regex()
                .captures(line.trim())
                .map(|captures| PathBuf::from(captures[1].trim_matches(['(', ')'])))
        })
        .collect()
}

/// The compile-tests-without-running-them invocation.
pub fn test_build_command(work_dir: &Path) -> Command {
    let mut command = Command::new("cargo");
    command
        .arg("test")
        .arg("--no-run")
        .arg("--target-dir")
        .arg(work_dir);
    command
}

/// One kcov instrumentation run: a single binary into a dedicated directory.
pub fn kcov_instrument(binary: &Path, out_dir: &Path, exclude_pattern: &str) -> Command {
    let mut command = Command::new("kcov");
    command
        .arg("--verify")
        .arg(format!("--exclude-pattern={exclude_pattern}"))
        .arg(out_dir)
        .arg(binary);
    command
}

/// The fan-in merge of all per-binary output directories.
pub fn kcov_merge(merged_dir: &Path, inputs: &[PathBuf]) -> Command {
    let mut command = Command::new("kcov");
    command.arg("--merge").arg(merged_dir).args(inputs);
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_marker_line() {
        let text = "Executable unittests (target/debug/deps/foo-abc123)";
        assert_eq!(
            parse_executable_markers(text),
            [PathBuf::from("target/debug/deps/foo-abc123")]
        );
    }

    #[test]
    fn test_parses_indented_markers_in_order() {
        let text = "\
   Compiling yamis v1.2.0
    Finished test [unoptimized + debuginfo] target(s) in 12.05s
  Executable unittests src/lib.rs (target_cov/debug/deps/yamis-11aa22bb)
  Executable tests/test_cli.rs (target_cov/debug/deps/test_cli-33cc44dd)
";
        assert_eq!(
            parse_executable_markers(text),
            [
                PathBuf::from("target_cov/debug/deps/yamis-11aa22bb"),
                PathBuf::from("target_cov/debug/deps/test_cli-33cc44dd"),
            ]
        );
    }

    #[test]
    fn test_marker_must_start_the_line() {
        let text = "note: Executable somewhere (target/debug/deps/foo-abc123)";
        assert!(parse_executable_markers(text).is_empty());
    }

    #[test]
    fn test_no_markers_yields_empty() {
        let text = "   Compiling yamis v1.2.0\n    Finished test target(s)";
        assert!(parse_executable_markers(text).is_empty());
    }

    #[test]
    fn test_build_command_shape() {
        let command = test_build_command(Path::new("target_cov"));
        let args: Vec<_> = command.get_args().map(|a| a.to_string_lossy()).collect();
        assert_eq!(command.get_program(), "cargo");
        assert_eq!(args, ["test", "--no-run", "--target-dir", "target_cov"]);
    }

    #[test]
    fn test_kcov_instrument_shape() {
        let command = kcov_instrument(
            Path::new("target_cov/debug/deps/foo"),
            Path::new("target_cov/cov_0"),
            "/.cargo,/usr/lib",
        );
        let args: Vec<_> = command.get_args().map(|a| a.to_string_lossy()).collect();
        assert_eq!(command.get_program(), "kcov");
        assert_eq!(
            args,
            [
                "--verify",
                "--exclude-pattern=/.cargo,/usr/lib",
                "target_cov/cov_0",
                "target_cov/debug/deps/foo"
            ]
        );
    }

    #[test]
    fn test_kcov_merge_shape() {
        let inputs = vec![
            PathBuf::from("target_cov/cov_0"),
            PathBuf::from("target_cov/cov_1"),
        ];
        let command = kcov_merge(Path::new("target_cov/cov"), &inputs);
        let args: Vec<_> = command.get_args().map(|a| a.to_string_lossy()).collect();
        assert_eq!(
            args,
            ["--merge", "target_cov/cov", "target_cov/cov_0", "target_cov/cov_1"]
        );
    }
}
