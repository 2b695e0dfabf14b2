use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize, Serializer};

/// Severity level for findings. Advisory only; it never drives the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warn,
    Fail,
}

impl Severity {
    pub fn symbol(&self) -> &str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Fail => "FAIL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single reported issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, Severity, String)")]
pub struct Finding {
    pub message: String,
    pub severity: Severity,
    pub suggestion: String,
}

impl Finding {
    pub fn new(message: impl Into<String>, severity: Severity, suggestion: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
            suggestion: suggestion.into(),
        }
    }
}

impl From<(String, Severity, String)> for Finding {
    fn from((message, severity, suggestion): (String, Severity, String)) -> Self {
        Self {
            message,
            severity,
            suggestion,
        }
    }
}

// Serialized as `[message, severity, suggestion]`.
impl Serialize for Finding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.message)?;
        tuple.serialize_element(&self.severity)?;
        tuple.serialize_element(&self.suggestion)?;
        tuple.end()
    }
}

/// One row of the tabular report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub check: String,
    pub severity: String,
    pub suggestion: String,
}

/// All findings of one lint run, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintReport {
    pub issues: Vec<Finding>,
}

impl LintReport {
    pub fn new(issues: Vec<Finding>) -> Self {
        Self { issues }
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|f| f.severity == severity).count()
    }

    /// Rows for the tabular display. A clean report yields a single
    /// "All checks passed" row rather than an empty table.
    pub fn rows(&self) -> Vec<ReportRow> {
        if self.issues.is_empty() {
            return vec![ReportRow {
                check: "All checks passed".to_string(),
                severity: "OK".to_string(),
                suggestion: "Well done!".to_string(),
            }];
        }
        self.issues
            .iter()
            .map(|f| ReportRow {
                check: f.message.clone(),
                severity: f.severity.symbol().to_string(),
                suggestion: f.suggestion.clone(),
            })
            .collect()
    }

    /// `{"issues": [[message, severity, suggestion], ...]}`, pretty-printed.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
