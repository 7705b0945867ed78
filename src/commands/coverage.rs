//! Coverage command: compile test binaries, run kcov on each, merge the
//! per-binary reports into one.

use std::path::PathBuf;

use super::resolve;
use crate::coverage::{kcov_instrument, kcov_merge, parse_executable_markers, test_build_command};
use crate::error::{FreightError, Result};
use crate::logging::Logger;
use crate::process::{run_captured, run_checked};

pub struct Coverage {
    work_dir: PathBuf,
    out_dir: PathBuf,
    exclude_pattern: String,
    working_dir: PathBuf,
    logger: Logger,
}

#[derive(Default)]
pub struct CoverageBuilder {
    work_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    exclude_pattern: Option<String>,
    working_dir: Option<PathBuf>,
    logger: Option<Logger>,
}

impl CoverageBuilder {
    pub fn work_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(path.into());
        self
    }

    pub fn out_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(path.into());
        self
    }

    pub fn exclude_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_pattern = Some(pattern.into());
        self
    }

    pub fn working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }

    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn build(self) -> Result<Coverage> {
        let working_dir = self.working_dir.ok_or_else(|| FreightError::ConfigError {
            message: "working_dir is required".to_string(),
        })?;

        let work_dir = resolve(
            &working_dir,
            &self.work_dir.unwrap_or_else(|| PathBuf::from("target_cov")),
        );
        let out_dir = resolve(
            &working_dir,
            &self
                .out_dir
                .unwrap_or_else(|| PathBuf::from("target_cov/cov")),
        );

        Ok(Coverage {
            work_dir,
            out_dir,
            exclude_pattern: self
                .exclude_pattern
                .unwrap_or_else(|| "/.cargo,/usr/lib".to_string()),
            working_dir,
            logger: self.logger.unwrap_or_else(|| Logger::new(0, false)),
        })
    }
}

impl Coverage {
    pub fn builder() -> CoverageBuilder {
        CoverageBuilder::default()
    }

    /// Runs the full pipeline: reset, discover, instrument each binary,
    /// merge.
    pub fn run(&self) -> Result<()> {
        self.reset_work_dir()?;

        let binaries = self.discover_test_binaries()?;

        self.logger.info("Running coverage...");
        let mut merge_inputs = Vec::with_capacity(binaries.len());
        for (i, binary) in binaries.iter().enumerate() {
            // One disjoint output directory per binary, joined by the merge
            let run_dir = PathBuf::from(format!("{}_{i}", self.out_dir.display()));
            run_checked(
                kcov_instrument(binary, &run_dir, &self.exclude_pattern)
                    .current_dir(&self.working_dir),
            )?;
            merge_inputs.push(run_dir);
        }

        run_checked(kcov_merge(&self.out_dir, &merge_inputs).current_dir(&self.working_dir))?;

        self.logger.info(format!(
            "Merged coverage report written to {}",
            self.out_dir.display()
        ));

        Ok(())
    }

    /// Removes any previous scratch directory so stale test binaries can
    /// never leak into a new report.
    fn reset_work_dir(&self) -> Result<()> {
        match std::fs::remove_dir_all(&self.work_dir) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(FreightError::IoError {
                path: self.work_dir.clone(),
                source,
            }),
        }
    }

    /// Compiles the test binaries and extracts their paths from the build
    /// output.
    ///
    /// Zero discovered binaries is fatal: merging nothing would produce an
    /// empty report that looks like a real one.
    fn discover_test_binaries(&self) -> Result<Vec<PathBuf>> {
        self.logger
            .info("Generating test binaries, this might take a while...");

        let output = run_captured(
            test_build_command(&self.work_dir).current_dir(&self.working_dir),
        )?;

        let binaries = parse_executable_markers(&output);

        if binaries.is_empty() {
            return Err(FreightError::NoTestBinaries);
        }

        self.logger.info(format!(
            "Target executables:\n - {}",
            binaries
                .iter()
                .map(|b| b.display().to_string())
                .collect::<Vec<_>>()
                .join("\n - ")
        ));

        Ok(binaries)
    }
}
