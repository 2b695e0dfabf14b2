pub mod base_image;
pub mod non_root_user;
pub mod optimized_run;

pub use base_image::check_base_image;
pub use non_root_user::check_non_root_user;
pub use optimized_run::check_optimized_run;

use crate::recipe::ParsedRecipe;
use crate::report::Finding;

/// The fixed set of checks, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckName {
    BaseImage,
    NonRootUser,
    OptimizedRun,
}

impl CheckName {
    pub const ALL: [CheckName; 3] = [
        CheckName::BaseImage,
        CheckName::NonRootUser,
        CheckName::OptimizedRun,
    ];

    /// The name users pass to `--ignore`.
    pub fn label(&self) -> &'static str {
        match self {
            CheckName::BaseImage => "Base Image Check",
            CheckName::NonRootUser => "Non-Root User Check",
            CheckName::OptimizedRun => "Optimized RUN Check",
        }
    }

    /// Exact, case-sensitive lookup by label.
    pub fn from_label(label: &str) -> Option<CheckName> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    pub fn run(&self, recipe: &ParsedRecipe) -> Vec<Finding> {
        match self {
            CheckName::BaseImage => check_base_image(&recipe.base_image),
            CheckName::NonRootUser => check_non_root_user(&recipe.instructions),
            CheckName::OptimizedRun => check_optimized_run(&recipe.instructions),
        }
    }
}

impl std::fmt::Display for CheckName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
