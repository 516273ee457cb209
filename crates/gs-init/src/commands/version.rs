//! `--version` handler

use crate::version::VersionInfo;
use anyhow::Result;
use clap::CommandFactory;

use crate::cli::Cli;

pub fn run(verbose: u8) -> Result<()> {
    for line in version_lines(&VersionInfo::current(), verbose) {
        println!("{}", line);
    }
    Ok(())
}

/// Lines printed for `--version`: the about line and the release tag.
/// Build details are only added with `-v`.
fn version_lines(info: &VersionInfo, verbose: u8) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(about) = Cli::command().get_about() {
        lines.push(about.to_string());
    }
    lines.push(info.tag());

    if verbose > 0 {
        if let Some(commit) = &info.commit {
            lines.push(format!("Commit: {}", commit));
        }
        if let Some(target) = &info.target {
            lines.push(format!("Target: {}", target));
        }
        if let Some(date) = &info.build_date {
            lines.push(format!("Build date: {}", date));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_info() -> VersionInfo {
        VersionInfo {
            version: "0.0.2".to_string(),
            commit: Some("abc1234".to_string()),
            build_date: Some("2026-01-01".to_string()),
            target: Some("x86_64-unknown-linux-gnu".to_string()),
        }
    }

    #[test]
    fn test_version_info_current_is_valid_semver() {
        let info = VersionInfo::current();
        let parsed = semver::Version::parse(&info.version);
        assert!(
            parsed.is_ok(),
            "version should be valid semver, got: {}",
            info.version
        );
    }

    #[test]
    fn test_version_info_display_starts_with_tag() {
        let info = VersionInfo::current();
        assert!(info.display().starts_with(&format!("v{}", info.version)));
        assert_eq!(format!("{}", info), info.display());
    }

    #[test]
    fn test_version_info_display_with_all_fields() {
        assert_eq!(
            full_info().display(),
            "v0.0.2 (abc1234) x86_64-unknown-linux-gnu"
        );
    }

    #[test]
    fn test_version_info_display_without_optional_fields() {
        let info = VersionInfo {
            version: "0.0.2".to_string(),
            commit: None,
            build_date: None,
            target: None,
        };
        assert_eq!(info.display(), "v0.0.2");
    }

    #[test]
    fn test_about_line() {
        let cmd = Cli::command();
        assert_eq!(
            cmd.get_about().map(|a| a.to_string()),
            Some("init go server project".to_string())
        );
    }

    #[test]
    fn test_version_lines_are_about_and_tag() {
        // Build metadata must not leak into the plain output.
        assert_eq!(
            version_lines(&full_info(), 0),
            vec!["init go server project".to_string(), "v0.0.2".to_string()]
        );
    }

    #[test]
    fn test_version_lines_verbose_adds_build_details() {
        let lines = version_lines(&full_info(), 1);
        assert_eq!(lines[0], "init go server project");
        assert_eq!(lines[1], "v0.0.2");
        assert_eq!(
            &lines[2..],
            &[
                "Commit: abc1234".to_string(),
                "Target: x86_64-unknown-linux-gnu".to_string(),
                "Build date: 2026-01-01".to_string(),
            ]
        );
    }

    #[test]
    fn test_run() {
        run(0).unwrap();
        run(1).unwrap();
    }
}
