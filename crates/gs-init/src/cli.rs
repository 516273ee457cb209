//! CLI argument parsing with clap

use clap::error::ErrorKind;
use clap::Parser;
use gs_init_scaffold::config::{DEFAULT_BRANCH, DEFAULT_TEMPLATE_URL};
use gs_init_scaffold::ScaffoldConfig;

use crate::logging::LogConfig;

/// gs-init - init go server project
#[derive(Parser, Debug)]
#[command(name = "gs-init")]
#[command(about = "init go server project", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// show version
    #[arg(long)]
    pub version: bool,

    /// module name, required
    #[arg(long, value_name = "MODULE")]
    pub module: Option<String>,

    /// git branch
    #[arg(long, value_name = "BRANCH", default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Template repository to clone
    #[arg(
        long,
        value_name = "URL",
        env = "GS_INIT_REPO",
        default_value = DEFAULT_TEMPLATE_URL
    )]
    pub repo: String,

    /// Skip running `gs gen` in the new project
    #[arg(long)]
    pub no_gen: bool,
}

impl Cli {
    /// Logging settings requested on the command line
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            verbose: self.verbose,
            quiet: self.quiet,
        }
    }

    /// Scaffold configuration requested on the command line
    pub fn scaffold_config(&self) -> ScaffoldConfig {
        let config = ScaffoldConfig::default()
            .with_branch(&self.branch)
            .with_template_url(&self.repo);

        if self.no_gen {
            config.without_generator()
        } else {
            config
        }
    }
}

/// Exit code for a failed parse.
///
/// `--help` is not a failure. Every usage error exits -1, same as any other
/// fatal error of this tool.
pub fn parse_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
        _ => -1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["gs-init", "--module", "github.com/acme/demo"]).unwrap();
        assert_eq!(cli.module.as_deref(), Some("github.com/acme/demo"));
        assert_eq!(cli.branch, "main");
        assert!(!cli.version);
        assert!(!cli.no_gen);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_version_without_module() {
        let cli = Cli::try_parse_from(["gs-init", "--version"]).unwrap();
        assert!(cli.version);
        assert!(cli.module.is_none());
    }

    #[test]
    fn test_branch_and_flags() {
        let cli = Cli::try_parse_from([
            "gs-init",
            "--module",
            "demo",
            "--branch",
            "develop",
            "--no-gen",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.branch, "develop");
        assert!(cli.no_gen);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_scaffold_config_from_flags() {
        let cli = Cli::try_parse_from([
            "gs-init",
            "--module",
            "demo",
            "--branch",
            "v1",
            "--repo",
            "file:///srv/skeleton.git",
            "--no-gen",
        ])
        .unwrap();
        let config = cli.scaffold_config();
        assert_eq!(config.branch, "v1");
        assert_eq!(config.template_url, "file:///srv/skeleton.git");
        assert!(config.generator.is_none());
    }

    #[test]
    fn test_scaffold_config_keeps_generator() {
        let cli = Cli::try_parse_from(["gs-init", "--module", "demo"]).unwrap();
        let config = cli.scaffold_config();
        assert_eq!(
            config.generator.map(|g| g.display()),
            Some("gs gen".to_string())
        );
    }

    #[test]
    fn test_log_config_from_flags() {
        let cli = Cli::try_parse_from(["gs-init", "-q", "--version"]).unwrap();
        let log = cli.log_config();
        assert!(log.quiet);
        assert_eq!(log.verbose, 0);
    }

    #[test]
    fn test_unknown_flag_exits_minus_one() {
        let err = Cli::try_parse_from(["gs-init", "--bogus"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert_eq!(parse_exit_code(&err), -1);
    }

    #[test]
    fn test_missing_flag_value_exits_minus_one() {
        let err = Cli::try_parse_from(["gs-init", "--module"]).unwrap_err();
        assert_eq!(parse_exit_code(&err), -1);
    }

    #[test]
    fn test_help_exits_zero() {
        let err = Cli::try_parse_from(["gs-init", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(parse_exit_code(&err), 0);
    }
}
