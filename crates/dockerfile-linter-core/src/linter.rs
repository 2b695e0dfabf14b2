use crate::checks::CheckName;
use crate::error::LintError;
use crate::recipe::parser::DockerfileParser;
use crate::recipe::ParsedRecipe;
use crate::report::LintReport;
use std::path::Path;
use tracing::{debug, trace};

/// Options for a lint run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintOptions {
    /// Check labels to skip. Names that match no check are inert.
    pub ignore: Vec<String>,
}

impl LintOptions {
    pub fn new(ignore: Vec<String>) -> Self {
        let options = Self { ignore };
        options.log_unknown_names();
        options
    }

    pub fn is_ignored(&self, check: CheckName) -> bool {
        self.ignore.iter().any(|name| name == check.label())
    }

    fn log_unknown_names(&self) {
        for name in &self.ignore {
            if CheckName::from_label(name).is_some() {
                continue;
            }
            let closest = CheckName::ALL
                .into_iter()
                .map(|c| (c, strsim::damerau_levenshtein(name, c.label())))
                .filter(|(_, dist)| *dist <= 3)
                .min_by_key(|(_, dist)| *dist);
            match closest {
                Some((check, _)) => {
                    debug!(name = %name, "ignore name matches no check; did you mean '{}'?", check)
                }
                None => debug!(name = %name, "ignore name matches no check"),
            }
        }
    }
}

/// Run every check not named in the ignore list, concatenating findings in
/// the fixed check order.
pub fn lint(recipe: &ParsedRecipe, options: &LintOptions) -> LintReport {
    let mut issues = Vec::new();

    for check in CheckName::ALL {
        if options.is_ignored(check) {
            debug!(check = %check, "skipping ignored check");
            continue;
        }
        let findings = check.run(recipe);
        trace!(check = %check, findings = findings.len(), "check finished");
        issues.extend(findings);
    }

    LintReport::new(issues)
}

/// Parse a Dockerfile from disk and lint it. Nothing runs if parsing fails.
pub fn lint_file(path: &Path, options: &LintOptions) -> Result<LintReport, LintError> {
    let recipe = DockerfileParser::parse_file(path)?;
    Ok(lint(&recipe, options))
}
