//! Error types for gs-init-scaffold

use thiserror::Error;

/// Result type alias using gs-init-scaffold's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// Module path is empty or ends without a project segment
    #[error("Invalid module name: '{module}'. The last path segment must not be empty")]
    InvalidModule { module: String },

    /// Target project directory already exists
    #[error("Directory {path} already exists")]
    ProjectExists { path: String },

    /// Target project directory could not be inspected
    #[error("Stat directory {path} failed: {source}")]
    StatFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid scaffold configuration
    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },

    /// Invalid repository URL
    #[error("Invalid repository URL: {url}")]
    InvalidRepoUrl { url: String },

    /// Clone failed
    #[error("Git clone failed: {message}")]
    CloneFailed { message: String },

    /// Required executable missing from PATH
    #[error("Required command not found: {command}. Please ensure it is installed and in PATH")]
    CommandNotFound { command: String },

    /// Subprocess exited unsuccessfully
    #[error("Run `{command}` failed: {message}")]
    CommandFailed { command: String, message: String },

    /// Filesystem operation failed on a specific path
    #[error("{action} {path} failed: {source}")]
    Fs {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed
    #[error("Read directory failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// Invalid path
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    /// Regex error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Create an invalid module error
    pub fn invalid_module(module: impl Into<String>) -> Self {
        Self::InvalidModule {
            module: module.into(),
        }
    }

    /// Create a project exists error
    pub fn project_exists(path: impl Into<String>) -> Self {
        Self::ProjectExists { path: path.into() }
    }

    /// Create a stat failed error
    pub fn stat_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::StatFailed {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid repo URL error
    pub fn invalid_repo_url(url: impl Into<String>) -> Self {
        Self::InvalidRepoUrl { url: url.into() }
    }

    /// Create a clone failed error
    pub fn clone_failed(message: impl Into<String>) -> Self {
        Self::CloneFailed {
            message: message.into(),
        }
    }

    /// Create a command not found error
    pub fn command_not_found(command: impl Into<String>) -> Self {
        Self::CommandNotFound {
            command: command.into(),
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a filesystem error for `action` on `path`
    pub fn fs(action: &'static str, path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Fs {
            action,
            path: path.into(),
            source,
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_exists_message() {
        let err = Error::project_exists("my_app");
        assert_eq!(err.to_string(), "Directory my_app already exists");
    }

    #[test]
    fn test_fs_message_includes_action_and_path() {
        let err = Error::fs(
            "Remove file",
            "/tmp/x/a.go",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("Remove file /tmp/x/a.go failed"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_command_failed_message() {
        let err = Error::command_failed("gs gen", "exit status: 1");
        assert_eq!(err.to_string(), "Run `gs gen` failed: exit status: 1");
    }
}
