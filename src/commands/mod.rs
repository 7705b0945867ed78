//! Implementation of cargo-freight subcommands.
//!
//! `mod.rs` serves as a thin dispatcher and re-export hub; command logic
//! lives in dedicated modules (`package`, `stage`, `coverage`).

use std::path::{Path, PathBuf};

use crate::cli::{Cli, Commands};
use crate::error::{FreightError, Result};
use crate::logging::Logger;

pub(crate) mod coverage;
pub(crate) mod package;
pub(crate) mod stage;

pub use coverage::{Coverage, CoverageBuilder};
pub use package::{Package, PackageBuilder};
pub use stage::{Stage, StageBuilder};


/// Execute commands based on the parsed CLI arguments.
pub fn execute(cli: &Cli) -> Result<()> {
    execute_with_dir(cli, None)
}

/// Execute commands with an explicit working directory.
///
/// Relative paths (scratch dirs, output trees, auxiliary files) resolve
/// against `working_dir`, which defaults to the process's current directory.
pub fn execute_with_dir(cli: &Cli, working_dir: Option<&Path>) -> Result<()> {
    let logger = Logger::new(cli.global_opts().verbose(), cli.global_opts().quiet());

    let current_dir = if let Some(dir) = working_dir {
        dir.to_path_buf()
    } else {
        std::env::current_dir().map_err(|source| FreightError::IoError {
            path: PathBuf::from("."),
            source,
        })?
    };

    match cli.command() {
        Commands::Package {
            target_dir,
            triple,
            version,
            out_dir,
            package_name,
            extra_files,
        } => Package::builder()
            .target_dir(target_dir)
            .triple(triple)
            .version(version)
            .out_dir(out_dir)
            .package_name(package_name)
            .extra_files(extra_files)
            .working_dir(&current_dir)
            .logger(logger)
            .build()?
            .run(),
        Commands::Stage {
            version,
            package_name,
            binaries_root,
            release_root,
            extra_files,
        } => Stage::builder()
            .version(version)
            .package_name(package_name)
            .binaries_root(binaries_root)
            .release_root(release_root)
            .extra_files(extra_files)
            .working_dir(&current_dir)
            .logger(logger)
            .build()?
            .run(),
        Commands::Coverage {
            work_dir,
            out_dir,
            exclude_pattern,
        } => Coverage::builder()
            .work_dir(work_dir)
            .out_dir(out_dir)
            .exclude_pattern(exclude_pattern)
            .working_dir(&current_dir)
            .logger(logger)
            .build()?
            .run(),
    }
}

/// Resolves `path` against `base` unless it is already absolute.
pub(crate) fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
