use crate::error::LintError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".dockerfile-linter.toml";

/// How the report is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Configuration loaded from `.dockerfile-linter.toml`.
///
/// ```toml
/// output = "json"
/// ignore = ["Optimized RUN Check"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinterConfig {
    pub output: Option<OutputFormat>,
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl LinterConfig {
    /// Layer command-line values on top of the file: an explicit output
    /// wins, ignore lists are merged.
    pub fn merge_cli(mut self, output: Option<OutputFormat>, ignore: &[String]) -> Self {
        if output.is_some() {
            self.output = output;
        }
        for name in ignore {
            if !self.ignore.contains(name) {
                self.ignore.push(name.clone());
            }
        }
        self
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output.unwrap_or_default()
    }
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LinterConfig, LintError> {
    let content = std::fs::read_to_string(path).map_err(|e| LintError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    toml::from_str(&content).map_err(|e| LintError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Find a config file next to the Dockerfile (or inside it, when a
/// directory was given), then in `cwd`.
pub fn discover_config(dockerfile: &Path, cwd: &Path) -> Option<PathBuf> {
    let beside = if dockerfile.is_dir() {
        dockerfile
    } else {
        dockerfile
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(cwd)
    };

    [beside, cwd]
        .into_iter()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Resolve the effective file configuration: an explicit path must load,
/// a discovered one is used if present, otherwise defaults.
pub fn resolve_config(
    explicit: Option<&Path>,
    dockerfile: &Path,
    cwd: &Path,
) -> Result<LinterConfig, LintError> {
    match explicit {
        Some(path) => load_config(path),
        None => match discover_config(dockerfile, cwd) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using discovered config");
                load_config(&path)
            }
            None => Ok(LinterConfig::default()),
        },
    }
}
