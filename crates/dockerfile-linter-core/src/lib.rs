pub mod checks;
pub mod config;
pub mod error;
pub mod linter;
pub mod recipe;
pub mod report;

pub use checks::{check_base_image, check_non_root_user, check_optimized_run, CheckName};
pub use config::{LinterConfig, OutputFormat};
pub use error::LintError;
pub use linter::{lint, lint_file, LintOptions};
pub use recipe::parser::DockerfileParser;
pub use recipe::{Instruction, ParsedRecipe};
pub use report::{Finding, LintReport, ReportRow, Severity};
