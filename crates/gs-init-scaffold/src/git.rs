//! Template acquisition: shallow clone into a temporary directory

use crate::config::ScaffoldConfig;
use crate::error::{Error, Result};
use crate::process::{ensure_available, run_command};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, info};

/// A template cloned into a temporary directory.
///
/// The temporary directory is removed when the checkout is dropped, so a run
/// that fails before the project is moved into place leaves nothing behind.
#[derive(Debug)]
pub struct TemplateCheckout {
    _temp: TempDir,
    root: Utf8PathBuf,
}

impl TemplateCheckout {
    /// Directory holding the cloned template files
    pub fn path(&self) -> &Utf8Path {
        &self.root
    }
}

/// Clone the configured template repository at `config.branch` and strip
/// its `.git` directory.
///
/// # Errors
/// Returns error if:
/// - The template URL is not a repository URL
/// - git is not installed
/// - The clone fails
/// - The `.git` directory cannot be removed
pub async fn clone_template(config: &ScaffoldConfig) -> Result<TemplateCheckout> {
    if !is_valid_repo_url(&config.template_url) {
        return Err(Error::invalid_repo_url(&config.template_url));
    }
    let repo_name = extract_repo_name(&config.template_url)?;

    ensure_available("git")?;

    let temp_root = config
        .temp_root
        .clone()
        .unwrap_or_else(std::env::temp_dir);
    let temp = tempfile::Builder::new()
        .prefix("gs-init-")
        .tempdir_in(&temp_root)
        .map_err(|e| {
            Error::fs(
                "Create temp directory in",
                temp_root.display().to_string(),
                e,
            )
        })?;
    let temp_path = Utf8PathBuf::try_from(temp.path().to_path_buf())
        .map_err(|e| Error::invalid_path(e.into_path_buf().display().to_string()))?;
    info!("Temp directory: {}", temp_path);

    let mut cmd = Command::new("git");
    cmd.arg("clone")
        .arg("--depth")
        .arg(config.depth.to_string())
        .arg("--branch")
        .arg(&config.branch)
        .arg("--single-branch")
        .arg("--progress")
        .arg(&config.template_url)
        .current_dir(&temp_path);

    run_command(cmd, config.drain_grace)
        .await
        .map_err(|e| Error::clone_failed(e.to_string()))?;
    info!("Git clone completed successfully");

    let root = temp_path.join(&repo_name);
    if !root.is_dir() {
        return Err(Error::clone_failed(format!(
            "expected cloned template at {}",
            root
        )));
    }

    strip_git_metadata(&root)?;

    Ok(TemplateCheckout { _temp: temp, root })
}

/// Remove the `.git` directory so the project is detached from the template history
pub fn strip_git_metadata(root: &Utf8Path) -> Result<()> {
    let git_dir = root.join(".git");
    match std::fs::remove_dir_all(&git_dir) {
        Ok(()) => {
            debug!("Removed {}", git_dir);
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::fs("Remove .git directory", git_dir.as_str(), e)),
    }
}

/// Validate if a string is a valid repository URL
fn is_valid_repo_url(url: &str) -> bool {
    ["https://", "http://", "git@", "ssh://", "file://"]
        .iter()
        .any(|prefix| url.starts_with(prefix))
}

/// Extract repository name from URL
///
/// # Examples
/// - https://github.com/go-spring/skeleton.git -> skeleton
/// - git@github.com:go-spring/skeleton.git -> skeleton
fn extract_repo_name(url: &str) -> Result<String> {
    let trimmed = url.trim_end_matches('/');
    let name = trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or_default()
        .trim_end_matches(".git");

    if name.is_empty() {
        return Err(Error::invalid_repo_url(url));
    }

    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_repo_url() {
        assert!(is_valid_repo_url("https://github.com/go-spring/skeleton.git"));
        assert!(is_valid_repo_url("git@github.com:go-spring/skeleton.git"));
        assert!(is_valid_repo_url("http://example.com/repo.git"));
        assert!(is_valid_repo_url("file:///srv/git/skeleton.git"));
        assert!(is_valid_repo_url("ssh://git@example.com/skeleton.git"));
        assert!(!is_valid_repo_url("invalid-url"));
        assert!(!is_valid_repo_url(""));
    }

    #[test]
    fn test_extract_repo_name() {
        assert_eq!(
            extract_repo_name("https://github.com/go-spring/skeleton.git").unwrap(),
            "skeleton"
        );
        assert_eq!(
            extract_repo_name("git@github.com:go-spring/skeleton.git").unwrap(),
            "skeleton"
        );
        assert_eq!(
            extract_repo_name("git@github.com:skeleton.git").unwrap(),
            "skeleton"
        );
        assert_eq!(
            extract_repo_name("https://github.com/go-spring/skeleton/").unwrap(),
            "skeleton"
        );
        assert!(extract_repo_name("https://github.com/.git").is_err());
    }

    #[test]
    fn test_strip_git_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        std::fs::create_dir_all(root.join(".git/objects")).unwrap();
        std::fs::write(root.join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
        std::fs::write(root.join("go.mod"), "module GS_PROJECT_MODULE\n").unwrap();

        strip_git_metadata(&root).unwrap();

        assert!(!root.join(".git").exists());
        assert!(root.join("go.mod").exists());

        // Nothing to remove is fine
        strip_git_metadata(&root).unwrap();
    }

    #[tokio::test]
    async fn test_clone_rejects_invalid_url() {
        let config = ScaffoldConfig::default().with_template_url("not-a-repo");
        let err = clone_template(&config).await.unwrap_err();
        assert!(matches!(err, Error::InvalidRepoUrl { .. }));
    }
}
