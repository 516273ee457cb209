//! Project naming: project directory and package identifier derived from a module path

use crate::error::{Error, Result};

/// Names derived from a module path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectNames {
    /// Full module path, e.g. `github.com/acme/order_service`
    pub module: String,
    /// Last path segment, used as the project directory name
    pub project_name: String,
    /// PascalCase form of the project name
    pub pkg_name: String,
}

impl ProjectNames {
    /// Derive names from a module path
    ///
    /// # Errors
    /// Returns [`Error::InvalidModule`] when the last `/`-separated segment is empty.
    pub fn from_module(module: &str) -> Result<Self> {
        let project_name = module.rsplit('/').next().unwrap_or_default();
        if project_name.is_empty() {
            return Err(Error::invalid_module(module));
        }

        Ok(Self {
            module: module.to_string(),
            project_name: project_name.to_string(),
            pkg_name: to_pascal(project_name),
        })
    }
}

/// Convert a snake_case string to PascalCase.
///
/// Empty segments are dropped and only an ASCII lowercase leading letter is
/// uppercased; everything else is kept as is.
pub fn to_pascal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for part in s.split('_').filter(|p| !p.is_empty()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
