//! Placeholder substitution over a template tree
//!
//! Two tokens are replaced in every file's contents: the module token with
//! the module path and the name token with the PascalCase package name.
//! The name token is also replaced in file and directory names.
//!
//! Contents are handled as raw bytes so binary files pass through untouched
//! unless they contain a token. A renamed file is written under its new name
//! before the original is removed; the pass is sequential, not transactional.

use crate::config::ScaffoldConfig;
use crate::error::{Error, Result};
use crate::naming::ProjectNames;
use camino::Utf8Path;
use regex::bytes::{NoExpand, Regex};
use std::borrow::Cow;
use std::fmt;
use std::fs;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Counters collected during a substitution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstitutionReport {
    /// Regular files visited
    pub files: usize,
    /// Files whose contents changed
    pub rewritten: usize,
    /// Files and directories renamed
    pub renamed: usize,
}

impl fmt::Display for SubstitutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files visited, {} rewritten, {} renamed",
            self.files, self.rewritten, self.renamed
        )
    }
}

/// Token replacements applied to a template tree
#[derive(Debug, Clone)]
pub struct Substitutions {
    module_re: Regex,
    module: String,
    name_token: String,
    name_re: Regex,
    pkg_name: String,
}

impl Substitutions {
    /// Build substitutions from the configured tokens and derived names
    ///
    /// # Errors
    /// Returns error if either token is empty.
    pub fn new(config: &ScaffoldConfig, names: &ProjectNames) -> Result<Self> {
        if config.module_token.is_empty() || config.name_token.is_empty() {
            return Err(Error::invalid_config("placeholder tokens must not be empty"));
        }

        Ok(Self {
            module_re: Regex::new(&regex::escape(&config.module_token))?,
            module: names.module.clone(),
            name_token: config.name_token.clone(),
            name_re: Regex::new(&regex::escape(&config.name_token))?,
            pkg_name: names.pkg_name.clone(),
        })
    }

    /// Replace both tokens in `bytes`; `None` when nothing matched
    pub fn replace_contents(&self, bytes: &[u8]) -> Option<Vec<u8>> {
        let once = self
            .module_re
            .replace_all(bytes, NoExpand(self.module.as_bytes()));
        let twice = self
            .name_re
            .replace_all(&once, NoExpand(self.pkg_name.as_bytes()));

        let changed = matches!(once, Cow::Owned(_)) || matches!(twice, Cow::Owned(_));
        if changed {
            Some(twice.into_owned())
        } else {
            None
        }
    }

    /// Replace the name token in a single path component; `None` when absent
    pub fn replace_name(&self, name: &str) -> Option<String> {
        if name.contains(&self.name_token) {
            Some(name.replace(&self.name_token, &self.pkg_name))
        } else {
            None
        }
    }

    /// Walk `root` and apply the substitutions to every file below it.
    ///
    /// Entries are listed up front and visited contents-first, so a
    /// directory is renamed only after everything inside it is done. `root`
    /// itself is never renamed and symlinks are not followed.
    pub fn apply(&self, root: &Utf8Path) -> Result<SubstitutionReport> {
        let entries = WalkDir::new(root)
            .contents_first(true)
            .follow_links(false)
            .min_depth(1)
            .into_iter()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut report = SubstitutionReport::default();
        for entry in entries {
            let path = Utf8Path::from_path(entry.path())
                .ok_or_else(|| Error::invalid_path(entry.path().display().to_string()))?;
            let file_type = entry.file_type();

            if file_type.is_file() {
                self.rewrite_file(path, &mut report)?;
            } else if file_type.is_dir() {
                self.rename_dir(path, &mut report)?;
            } else {
                debug!("Skipping {}", path);
            }
        }

        Ok(report)
    }

    fn rewrite_file(&self, path: &Utf8Path, report: &mut SubstitutionReport) -> Result<()> {
        report.files += 1;

        let bytes = fs::read(path).map_err(|e| Error::fs("Read file", path.as_str(), e))?;
        let contents = self.replace_contents(&bytes);
        let new_name = path.file_name().and_then(|name| self.replace_name(name));

        match (contents, new_name) {
            (None, None) => {}
            (Some(contents), None) => {
                fs::write(path, contents)
                    .map_err(|e| Error::fs("Write file", path.as_str(), e))?;
                report.rewritten += 1;
            }
            (contents, Some(new_name)) => {
                let target = path.with_file_name(&new_name);
                if target.exists() {
                    warn!("Overwriting {} with renamed {}", target, path);
                }

                let data = contents.as_deref().unwrap_or(&bytes);
                fs::write(&target, data)
                    .map_err(|e| Error::fs("Write file", target.as_str(), e))?;

                let permissions = fs::metadata(path)
                    .map_err(|e| Error::fs("Stat file", path.as_str(), e))?
                    .permissions();
                fs::set_permissions(&target, permissions)
                    .map_err(|e| Error::fs("Set permissions on", target.as_str(), e))?;

                fs::remove_file(path).map_err(|e| Error::fs("Remove file", path.as_str(), e))?;

                debug!("Renamed {} -> {}", path, target);
                if contents.is_some() {
                    report.rewritten += 1;
                }
                report.renamed += 1;
            }
        }

        Ok(())
    }

    fn rename_dir(&self, path: &Utf8Path, report: &mut SubstitutionReport) -> Result<()> {
        let Some(new_name) = path.file_name().and_then(|name| self.replace_name(name)) else {
            return Ok(());
        };

        let target = path.with_file_name(&new_name);
        fs::rename(path, &target)
            .map_err(|e| Error::fs("Rename directory", path.as_str(), e))?;

        debug!("Renamed {} -> {}", path, target);
        report.renamed += 1;
        Ok(())
    }
}
