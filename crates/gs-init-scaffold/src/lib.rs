//! # gs-init-scaffold
//!
//! Scaffolding library behind the `gs-init` CLI:
//! - Project and package name derivation from a module path
//! - Shallow template clone into a temporary directory
//! - Placeholder substitution in file contents and names
//! - Subprocess execution with streamed output
//!
//! # Examples
//!
//! ```no_run
//! use gs_init_scaffold::{ScaffoldConfig, Scaffolder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScaffoldConfig::default().with_branch("main");
//! let outcome = Scaffolder::new(config)
//!     .run("github.com/acme/order_service")
//!     .await?;
//! println!("created {}", outcome.project_dir);
//! # Ok(())
//! # }
//! ```
//!
//! Deriving names is pure:
//!
//! ```
//! use gs_init_scaffold::naming::{to_pascal, ProjectNames};
//!
//! assert_eq!(to_pascal("hello_world"), "HelloWorld");
//! let names = ProjectNames::from_module("github.com/acme/order_service").unwrap();
//! assert_eq!(names.project_name, "order_service");
//! ```

pub mod config;
pub mod error;
pub mod git;
pub mod naming;
pub mod process;
pub mod project;
pub mod substitute;

pub use config::{GeneratorCommand, ScaffoldConfig};
pub use error::{Error, Result};
pub use naming::{to_pascal, ProjectNames};
pub use project::{ScaffoldOutcome, Scaffolder};
pub use substitute::{SubstitutionReport, Substitutions};
