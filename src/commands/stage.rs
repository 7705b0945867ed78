//! Stage command: zip pre-built binaries for the whole target matrix into a
//! version-scoped release tree.

use std::path::{Path, PathBuf};

use super::resolve;
use crate::archive;
use crate::config::{DEFAULT_EXTRA_FILES, PackageConfig, RELEASE_TARGETS};
use crate::error::{FreightError, Result};
use crate::logging::Logger;

pub struct Stage {
    version: String,
    config: PackageConfig,
    binaries_root: PathBuf,
    release_root: PathBuf,
    targets: Vec<String>,
    logger: Logger,
}

#[derive(Default)]
pub struct StageBuilder {
    version: Option<String>,
    package_name: Option<String>,
    binaries_root: Option<PathBuf>,
    release_root: Option<PathBuf>,
    extra_files: Vec<PathBuf>,
    targets: Vec<String>,
    working_dir: Option<PathBuf>,
    logger: Option<Logger>,
}

impl StageBuilder {
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }

    pub fn binaries_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.binaries_root = Some(path.into());
        self
    }

    pub fn release_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.release_root = Some(path.into());
        self
    }

    /// Auxiliary files to bundle; an empty list means the defaults.
    pub fn extra_files(mut self, files: &[PathBuf]) -> Self {
        self.extra_files = files.to_vec();
        self
    }

    /// Target triples to stage; an empty list means the release matrix.
    pub fn targets(mut self, targets: &[&str]) -> Self {
        self.targets = targets.iter().map(|t| t.to_string()).collect();
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

    pub fn build(self) -> Result<Stage> {
        let missing = |field: &str| FreightError::ConfigError {
            message: format!("{field} is required"),
        };

        let working_dir = self.working_dir.ok_or_else(|| missing("working_dir"))?;
        let extra_files: Vec<PathBuf> = if self.extra_files.is_empty() {
            DEFAULT_EXTRA_FILES.iter().map(PathBuf::from).collect()
        } else {
            self.extra_files
        };
        let extra_files = extra_files
            .iter()
            .map(|file| resolve(&working_dir, file))
            .collect();

        let targets = if self.targets.is_empty() {
            RELEASE_TARGETS.iter().map(|t| t.to_string()).collect()
        } else {
            self.targets
        };

        let package_name = self.package_name.ok_or_else(|| missing("package_name"))?;

        Ok(Stage {
            version: self.version.ok_or_else(|| missing("version"))?,
            config: PackageConfig::new(package_name).with_extra_files(extra_files),
            binaries_root: resolve(
                &working_dir,
                &self
                    .binaries_root
                    .unwrap_or_else(|| PathBuf::from("target_releases")),
            ),
            release_root: resolve(
                &working_dir,
                &self
                    .release_root
                    .unwrap_or_else(|| PathBuf::from("releases")),
            ),
            targets,
            logger: self.logger.unwrap_or_else(|| Logger::new(0, false)),
        })
    }
}

impl Stage {
    pub fn builder() -> StageBuilder {
        StageBuilder::default()
    }

    /// Stages every target in matrix order, failing fast on a missing
    /// binary.
    ///
    /// Binaries are assumed pre-built under
    /// `<binaries-root>/v<version>/<triple>/release/`; this command never
    /// builds. Each target produces one zip under
    /// `<release-root>/v<version>/`.
    pub fn run(&self) -> Result<()> {
        let stage_dir = self.release_root.join(format!("v{}", self.version));
        std::fs::create_dir_all(&stage_dir).map_err(|source| FreightError::IoError {
            path: stage_dir.clone(),
            source,
        })?;

        for triple in &self.targets {
            self.stage_target(triple, &stage_dir)?;
        }

        self.logger.info(format!(
            "Staged {} target(s) into {}",
            self.targets.len(),
            stage_dir.display()
        ));

        Ok(())
    }

    fn stage_target(&self, triple: &str, stage_dir: &Path) -> Result<()> {
        let binary_name = self.config.binary_name_for(triple);
        let binary_path = self
            .binaries_root
            .join(format!("v{}", self.version))
            .join(triple)
            .join("release")
            .join(&binary_name);

        let entries = archive::collect_entries(&binary_path, self.config.extra_files())?;

        let zip_name = format!("{triple}-v{}.zip", self.version);
        let zip_path = stage_dir.join(zip_name);
        archive::create_zip(&zip_path, &entries)?;

        self.logger
            .verbose(1, format!("Staged {triple} -> {}", zip_path.display()));

        Ok(())
    }
}
