use serde::{Deserialize, Serialize};

use crate::question::QuestionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// A structural issue found while validating a form definition.
///
/// Issues are reported as data for display to the form author; the engine
/// never aborts on malformed input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Stable machine-readable code (e.g., "DANGLING_SOURCE").
    pub code: String,
    /// Human-readable message describing the issue.
    pub message: String,
    /// Severity level.
    pub severity: IssueSeverity,
    /// The question the issue was found on, if any.
    pub question_id: Option<QuestionId>,
    /// The offending referenced id, if the issue is about a reference.
    pub reference: Option<QuestionId>,
}

/// Validation report for a single form definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// True when the definition is safe to publish: no error-level issues.
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// The error messages in report order, for callers that only display
    /// flat text.
    pub fn error_messages(&self) -> Vec<&str> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .map(|issue| issue.message.as_str())
            .collect()
    }
}
