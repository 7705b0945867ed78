//! Package command: build one target in release mode, archive it, and write
//! its hash record.

use std::path::PathBuf;
use std::process::Command;

use super::resolve;
use crate::archive;
use crate::config::{DEFAULT_EXTRA_FILES, PackageConfig};
use crate::digest;
use crate::error::{FreightError, Result};
use crate::logging::Logger;
use crate::process::run_checked;

pub struct Package {
    target_dir: PathBuf,
    triple: String,
    version: String,
    out_dir: PathBuf,
    config: PackageConfig,
    working_dir: PathBuf,
    logger: Logger,
}

#[derive(Default)]
pub struct PackageBuilder {
    target_dir: Option<PathBuf>,
    triple: Option<String>,
    version: Option<String>,
    out_dir: Option<PathBuf>,
    package_name: Option<String>,
    extra_files: Vec<PathBuf>,
    working_dir: Option<PathBuf>,
    logger: Option<Logger>,
}

impl PackageBuilder {
    pub fn target_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.target_dir = Some(path.into());
        self
    }

    pub fn triple(mut self, triple: impl Into<String>) -> Self {
        self.triple = Some(triple.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn out_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(path.into());
        self
    }

    pub fn package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }

    /// Auxiliary files to bundle; an empty list means the defaults.
    pub fn extra_files(mut self, files: &[PathBuf]) -> Self {
        self.extra_files = files.to_vec();
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

    pub fn build(self) -> Result<Package> {
        let missing = |field: &str| FreightError::ConfigError {
            message: format!("{field} is required"),
        };

        let working_dir = self.working_dir.ok_or_else(|| missing("working_dir"))?;
        let extra_files = if self.extra_files.is_empty() {
            DEFAULT_EXTRA_FILES.iter().map(PathBuf::from).collect()
        } else {
            self.extra_files
        };
        let extra_files = extra_files
            .iter()
            .map(|file| resolve(&working_dir, file))
            .collect();

        let package_name = self.package_name.ok_or_else(|| missing("package_name"))?;

        Ok(Package {
            target_dir: resolve(
                &working_dir,
                &self.target_dir.ok_or_else(|| missing("target_dir"))?,
            ),
            triple: self.triple.ok_or_else(|| missing("triple"))?,
            version: self.version.ok_or_else(|| missing("version"))?,
            out_dir: resolve(
                &working_dir,
                &self.out_dir.ok_or_else(|| missing("out_dir"))?,
            ),
            config: PackageConfig::new(package_name).with_extra_files(extra_files),
            working_dir,
            logger: self.logger.unwrap_or_else(|| Logger::new(0, false)),
        })
    }
}

impl Package {
    pub fn builder() -> PackageBuilder {
        PackageBuilder::default()
    }

    /// Builds the target and packages the resulting binary.
    pub fn run(&self) -> Result<()> {
        self.run_build()?;
        let archive_path = self.archive_built_binary()?;
        self.logger
            .info(format!("Packaged {}", archive_path.display()));
        Ok(())
    }

    /// Invokes the external release build for the target.
    ///
    /// A non-zero exit is fatal for this target; cargo's own diagnostics go
    /// straight to the inherited stderr.
    fn run_build(&self) -> Result<()> {
        self.logger.info(format!(
            "Building {} for {} in release mode...",
            self.config.package_name(),
            self.triple
        ));

        run_checked(
            Command::new("cargo")
                .arg("build")
                .arg("--release")
                .arg("--target")
                .arg(&self.triple)
                .arg("--target-dir")
                .arg(&self.target_dir)
                .current_dir(&self.working_dir),
        )
    }

    /// Archives the already-built binary and writes its hash record.
    ///
    /// Expects the binary at the conventional
    /// `<target-dir>/<triple>/release/<bin-name>` path. Returns the archive
    /// path.
    pub fn archive_built_binary(&self) -> Result<PathBuf> {
        let binary_path = self.built_binary_path();
        self.logger
            .verbose(1, format!("Locating binary at {}", binary_path.display()));

        std::fs::create_dir_all(&self.out_dir).map_err(|source| FreightError::IoError {
            path: self.out_dir.clone(),
            source,
        })?;

        let archive_path = archive::build_archive(
            &binary_path,
            &self.config,
            &self.version,
            &self.triple,
            &self.out_dir,
        )?;

        let digest_hex = digest::sha256_file(&archive_path)?;
        digest::write_hash_record(&archive_path, &digest_hex, &self.out_dir)?;

        Ok(archive_path)
    }

    /// The conventional location of the release binary for this target.
    pub fn built_binary_path(&self) -> PathBuf {
        self.target_dir
            .join(&self.triple)
            .join("release")
            .join(self.config.binary_name_for(&self.triple))
    }
}
