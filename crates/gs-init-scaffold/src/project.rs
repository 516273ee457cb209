//! Scaffold pipeline: clone, substitute, move into place, generate

use crate::config::ScaffoldConfig;
use crate::error::{Error, Result};
use crate::git::clone_template;
use crate::naming::ProjectNames;
use crate::process::{ensure_available, run_command};
use crate::substitute::{SubstitutionReport, Substitutions};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tokio::process::Command;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Outcome of a successful scaffold run
#[derive(Debug, Clone)]
pub struct ScaffoldOutcome {
    pub names: ProjectNames,
    /// Final project directory
    pub project_dir: Utf8PathBuf,
    pub report: SubstitutionReport,
    /// Whether the generator command ran
    pub generated: bool,
}

/// Runs the scaffold pipeline for one module
#[derive(Debug, Clone)]
pub struct Scaffolder {
    config: ScaffoldConfig,
    base_dir: Utf8PathBuf,
}

impl Scaffolder {
    /// Create a scaffolder that places projects under the current directory
    pub fn new(config: ScaffoldConfig) -> Self {
        Self {
            config,
            base_dir: Utf8PathBuf::from("."),
        }
    }

    /// Place projects under `base_dir` instead of the current directory
    pub fn with_base_dir(mut self, base_dir: impl Into<Utf8PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    /// Derive names for `module` and check the project directory is free
    pub fn prepare(&self, module: &str) -> Result<(ProjectNames, Utf8PathBuf)> {
        let names = ProjectNames::from_module(module)?;
        let project_dir = self.base_dir.join(&names.project_name);
        ensure_absent(&project_dir)?;
        Ok((names, project_dir))
    }

    /// Scaffold a project for `module`.
    ///
    /// # Errors
    /// The first failing step aborts the run:
    /// - Invalid module or existing project directory
    /// - git missing or clone failure
    /// - Substitution I/O failure
    /// - Moving the project into place
    /// - Generator missing or failing
    pub async fn run(&self, module: &str) -> Result<ScaffoldOutcome> {
        let (names, project_dir) = self.prepare(module)?;
        let substitutions = Substitutions::new(&self.config, &names)?;
        debug!(
            "Project name: {}, package name: {}",
            names.project_name, names.pkg_name
        );

        let checkout = clone_template(&self.config).await?;

        let report = substitutions.apply(checkout.path())?;
        info!("Replaced placeholders: {}", report);

        move_dir(checkout.path(), &project_dir)?;
        drop(checkout);
        info!("Created project directory {}", project_dir);

        let generated = self.run_generator(&project_dir).await?;

        Ok(ScaffoldOutcome {
            names,
            project_dir,
            report,
            generated,
        })
    }

    /// Run the configured generator inside `project_dir`
    pub async fn run_generator(&self, project_dir: &Utf8Path) -> Result<bool> {
        let Some(generator) = &self.config.generator else {
            debug!("Generator disabled");
            return Ok(false);
        };

        ensure_available(&generator.program)?;

        let mut cmd = Command::new(&generator.program);
        cmd.args(&generator.args).current_dir(project_dir);
        run_command(cmd, self.config.drain_grace).await?;

        info!("Run `{}` completed successfully", generator.display());
        Ok(true)
    }
}

/// Fail if `path` already exists or cannot be inspected
pub fn ensure_absent(path: &Utf8Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(_) => Err(Error::project_exists(path.as_str())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::stat_failed(path.as_str(), e)),
    }
}

/// Move a directory tree from `from` to `to`.
///
/// Uses a rename; when `from` lives on another filesystem the tree is
/// copied and the source removed instead.
pub fn move_dir(from: &Utf8Path, to: &Utf8Path) -> Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::CrossesDevices => {
            warn!("{} is on another filesystem, copying to {}", from, to);
            copy_dir_all(from, to)?;
            fs::remove_dir_all(from)
                .map_err(|e| Error::fs("Remove directory", from.as_str(), e))
        }
        Err(e) => Err(Error::fs(
            "Rename directory",
            format!("{} to {}", from, to),
            e,
        )),
    }
}

/// Recursively copy a directory, keeping file permissions
fn copy_dir_all(from: &Utf8Path, to: &Utf8Path) -> Result<()> {
    for entry in WalkDir::new(from).follow_links(false) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(from)
            .map_err(|_| Error::invalid_path(entry.path().display().to_string()))?;
        let target = to.as_std_path().join(rel);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| Error::fs("Create directory", target.display().to_string(), e))?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target)
                .map_err(|e| Error::fs("Copy file", target.display().to_string(), e))?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            debug!("Skipping {}", entry.path().display());
        }
    }
    Ok(())
}

/// Recreate the link at `target`, pointing where `link` points
#[cfg(unix)]
fn copy_symlink(link: &std::path::Path, target: &std::path::Path) -> Result<()> {
    let dest = fs::read_link(link)
        .map_err(|e| Error::fs("Read symlink", link.display().to_string(), e))?;
    std::os::unix::fs::symlink(&dest, target)
        .map_err(|e| Error::fs("Create symlink", target.display().to_string(), e))
}

#[cfg(not(unix))]
fn copy_symlink(link: &std::path::Path, _target: &std::path::Path) -> Result<()> {
    Err(Error::fs(
        "Copy symlink",
        link.display().to_string(),
        std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "symlinks cannot be copied on this platform",
        ),
    ))
}
