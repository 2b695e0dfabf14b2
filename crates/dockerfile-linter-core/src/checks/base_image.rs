use crate::report::{Finding, Severity};

/// Flag `:latest` tags and full-size base images. Both rules are evaluated
/// independently, so a single image can trigger both.
pub fn check_base_image(base_image: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    if base_image.contains(":latest") {
        findings.push(Finding::new(
            "Avoid using 'latest' tag for base images.",
            Severity::Warn,
            "Specify a version like 'python:3.9-slim'.",
        ));
    }

    if !["slim", "alpine"].iter().any(|tag| base_image.contains(tag)) {
        findings.push(Finding::new(
            format!("Consider using a smaller base image instead of {}.", base_image),
            Severity::Info,
            "Use 'python:3.9-slim' or 'python:3.9-alpine'.",
        ));
    }

    findings
}
