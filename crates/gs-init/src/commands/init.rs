//! Project initialization handler

use anyhow::{anyhow, Context, Result};
use gs_init_scaffold::Scaffolder;

use crate::cli::Cli;
use crate::output;

/// Scaffold a project for `--module`
pub async fn run(cli: &Cli) -> Result<()> {
    let module = cli
        .module
        .as_deref()
        .filter(|m| !m.is_empty())
        .ok_or_else(|| anyhow!("module name is required"))?;

    let scaffolder = Scaffolder::new(cli.scaffold_config());
    tracing::debug!(
        "Template {} at branch {}",
        scaffolder.config().template_url,
        scaffolder.config().branch
    );

    let outcome = scaffolder
        .run(module)
        .await
        .with_context(|| format!("Failed to initialize project for module {}", module))?;

    output::header("Project");
    output::success(&format!(
        "Project '{}' created successfully",
        outcome.names.project_name
    ));
    output::kv("Module", &outcome.names.module);
    output::kv("Package", &outcome.names.pkg_name);
    output::kv("Location", outcome.project_dir.as_str());
    if !outcome.generated {
        output::info("Code generation skipped, run `gs gen` inside the project when ready");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn test_module_required() {
        let cli = Cli::try_parse_from(["gs-init"]).unwrap();
        let err = run(&cli).await.unwrap_err();
        assert_eq!(err.to_string(), "module name is required");
    }

    #[tokio::test]
    async fn test_empty_module_rejected() {
        let cli = Cli::try_parse_from(["gs-init", "--module", ""]).unwrap();
        let err = run(&cli).await.unwrap_err();
        assert_eq!(err.to_string(), "module name is required");
    }

    #[tokio::test]
    async fn test_invalid_module_reports_context() {
        let cli =
            Cli::try_parse_from(["gs-init", "--module", "github.com/acme/", "--no-gen"]).unwrap();
        let err = run(&cli).await.unwrap_err();
        let chain = format!("{:#}", err);
        assert!(
            chain.starts_with("Failed to initialize project for module github.com/acme/"),
            "unexpected error: {}",
            chain
        );
        assert!(chain.contains("Invalid module name"));
    }
}
