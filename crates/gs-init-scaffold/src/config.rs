//! Scaffold configuration
//!
//! All the knobs the pipeline needs travel in one [`ScaffoldConfig`] value
//! that callers build and pass down explicitly.

use std::path::PathBuf;
use std::time::Duration;

/// Template repository cloned when no override is given
pub const DEFAULT_TEMPLATE_URL: &str = "https://github.com/go-spring/skeleton.git";

/// Default template branch
pub const DEFAULT_BRANCH: &str = "main";

/// Placeholder replaced by the full module path
pub const MODULE_TOKEN: &str = "GS_PROJECT_MODULE";

/// Placeholder replaced by the PascalCase package name
pub const NAME_TOKEN: &str = "GS_PROJECT_NAME";

/// Time allowed for the output reader to drain after a subprocess exits
pub const DEFAULT_DRAIN_GRACE: Duration = Duration::from_millis(100);

/// External command run inside the generated project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl GeneratorCommand {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Command line as shown in logs and errors, e.g. `gs gen`
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for GeneratorCommand {
    fn default() -> Self {
        Self::new("gs", &["gen"])
    }
}

/// Configuration for a scaffold run
#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    /// Template repository URL
    pub template_url: String,
    /// Template branch to clone
    pub branch: String,
    /// Clone depth
    pub depth: u32,
    /// Token replaced by the module path
    pub module_token: String,
    /// Token replaced by the package name, in contents and file names
    pub name_token: String,
    /// Generator to run after the project is in place; `None` skips it
    pub generator: Option<GeneratorCommand>,
    /// Grace period for draining subprocess output
    pub drain_grace: Duration,
    /// Parent of the temporary clone directory; `None` uses the system temp dir
    pub temp_root: Option<PathBuf>,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            template_url: DEFAULT_TEMPLATE_URL.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            depth: 1,
            module_token: MODULE_TOKEN.to_string(),
            name_token: NAME_TOKEN.to_string(),
            generator: Some(GeneratorCommand::default()),
            drain_grace: DEFAULT_DRAIN_GRACE,
            temp_root: None,
        }
    }
}

impl ScaffoldConfig {
    /// Set the template branch
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Set the template repository URL
    pub fn with_template_url(mut self, url: impl Into<String>) -> Self {
        self.template_url = url.into();
        self
    }

    /// Create the temporary clone directory under `root`
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    /// Skip the generator step
    pub fn without_generator(mut self) -> Self {
        self.generator = None;
        self
    }
}
