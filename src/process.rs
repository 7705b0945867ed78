use std::process::{Command, Output};

use crate::error::{FreightError, Result};

/// Renders a command as the string used in error messages.
fn render(command: &Command) -> String {
    let mut rendered = command.get_program().to_string_lossy().into_owned();
    for arg in command.get_args() {
        rendered.push(' ');
        rendered.push_str(&arg.to_string_lossy());
    }
    rendered
}

/// Runs a command with inherited stdio and checks its exit status.
///
/// # Errors
///
/// Returns `CommandFailed` on a non-zero exit, or an I/O error if the
/// program could not be spawned. Never retried.
pub fn run_checked(command: &mut Command) -> Result<()> {
    let status = command
        .status()
        .map_err(|source| FreightError::IoError {
            path: command.get_program().into(),
            source,
        })?;

    if !status.success() {
        return Err(FreightError::CommandFailed {
            command: render(command),
            status,
        });
    }

    Ok(())
}

/// Runs a command capturing stdout and stderr, and checks its exit status.
///
/// Returns the combined output text, stdout first. cargo is documented to
/// put build-location markers on either stream, so neither alone is
/// complete. On failure the captured output is surfaced to stderr before
/// the error propagates, so the tool's own diagnostics are not swallowed.
///
/// # Errors
///
/// Returns `CommandFailed` on a non-zero exit, or an I/O error if the
/// program could not be spawned.
pub fn run_captured(command: &mut Command) -> Result<String> {
    let Output {
        status,
        stdout,
        stderr,
    } = command
        .output()
        .map_err(|source| FreightError::IoError {
            path: command.get_program().into(),
            source,
        })?;

    let mut combined = String::from_utf8_lossy(&stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&stderr));

    if !status.success() {
        eprint!("{combined}");
        return Err(FreightError::CommandFailed {
            command: render(command),
            status,
        });
    }

    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_args() {
        let mut command = Command::new("kcov");
        command.arg("--merge").arg("out");
        assert_eq!(render(&command), "kcov --merge out");
    }

    #[test]
    #[cfg(unix)]
    fn test_run_checked_failure() {
        let result = run_checked(Command::new("false").arg("--flag"));
        assert!(matches!(
            result,
            Err(FreightError::CommandFailed { ref command, .. }) if command == "false --flag"
        ));
    }

    #[test]
    #[cfg(unix)]
    fn test_run_checked_success() {
        run_checked(&mut Command::new("true")).unwrap();
    }

    #[test]
    #[cfg(unix)]
    fn test_run_captured_combines_streams() {
        let output = run_captured(Command::new("sh").args([
            "-c",
            "echo to-stdout; echo to-stderr 1>&2",
        ]))
        .unwrap();
        assert!(output.contains("to-stdout"));
        assert!(output.contains("to-stderr"));
    }

    #[test]
    fn test_run_missing_program() {
        let result = run_checked(&mut Command::new("cargo-freight-no-such-program"));
        assert!(matches!(result, Err(FreightError::IoError { .. })));
    }
}
