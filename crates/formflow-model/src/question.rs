use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Sentinel option value that carries free text alongside the selection.
pub const OTHER_OPTION_VALUE: &str = "other";

/// Stable, immutable identifier of a question.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidQuestionId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The input control a question renders as. Choice-like kinds carry options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    SingleChoice,
    MultiChoice,
    FreeText,
    Numeric,
    Dropdown,
    Ranking,
}

impl QuestionKind {
    /// Returns true for kinds that require a non-empty option list.
    pub fn is_choice_like(&self) -> bool {
        matches!(
            self,
            QuestionKind::SingleChoice
                | QuestionKind::MultiChoice
                | QuestionKind::Dropdown
                | QuestionKind::Ranking
        )
    }

    /// Returns true for kinds whose answer is a list of values rather than a
    /// single scalar.
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, QuestionKind::MultiChoice | QuestionKind::Ranking)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::SingleChoice => "single-choice",
            QuestionKind::MultiChoice => "multi-choice",
            QuestionKind::FreeText => "free-text",
            QuestionKind::Numeric => "numeric",
            QuestionKind::Dropdown => "dropdown",
            QuestionKind::Ranking => "ranking",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    /// Parse a kind string. Accepts the kebab-case form used in snapshots,
    /// case-insensitively and with underscores tolerated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "single-choice" => Ok(QuestionKind::SingleChoice),
            "multi-choice" => Ok(QuestionKind::MultiChoice),
            "free-text" => Ok(QuestionKind::FreeText),
            "numeric" => Ok(QuestionKind::Numeric),
            "dropdown" => Ok(QuestionKind::Dropdown),
            "ranking" => Ok(QuestionKind::Ranking),
            _ => Err(format!("Unknown question kind: {}", s)),
        }
    }
}

/// One selectable option of a choice-like question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    /// Whether this is the sentinel "other" option that expects free text.
    pub fn is_other(&self) -> bool {
        self.value == OTHER_OPTION_VALUE
    }
}

/// The fixed, closed set of condition operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Includes,
    NotIncludes,
}

impl ConditionOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionOperator::Equals => "equals",
            ConditionOperator::NotEquals => "not_equals",
            ConditionOperator::Includes => "includes",
            ConditionOperator::NotIncludes => "not_includes",
        }
    }

    /// The operator with inverted polarity.
    pub fn negated(&self) -> ConditionOperator {
        match self {
            ConditionOperator::Equals => ConditionOperator::NotEquals,
            ConditionOperator::NotEquals => ConditionOperator::Equals,
            ConditionOperator::Includes => ConditionOperator::NotIncludes,
            ConditionOperator::NotIncludes => ConditionOperator::Includes,
        }
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConditionOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "equals" => Ok(ConditionOperator::Equals),
            "not_equals" => Ok(ConditionOperator::NotEquals),
            "includes" => Ok(ConditionOperator::Includes),
            "not_includes" => Ok(ConditionOperator::NotIncludes),
            _ => Err(format!("Unknown condition operator: {}", s)),
        }
    }
}

/// A visibility condition inspecting the answer of another question.
///
/// The source is not necessarily the owning question's `parent_id`; the two
/// may diverge and the engine must not conflate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub source_question_id: QuestionId,
    pub operator: ConditionOperator,
    pub expected_value: String,
}

/// A form question definition as handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    /// Structural/display parent; display-only for dependency purposes.
    #[serde(default)]
    pub parent_id: Option<QuestionId>,
    pub kind: QuestionKind,
    /// Required non-empty for choice-like kinds, empty otherwise.
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    /// Flat conjunction gating visibility; empty for root questions.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    pub active: bool,
    /// Display rank; never consulted by the engine.
    #[serde(default)]
    pub order: i32,
}

impl Question {
    /// A root question has no conditions and is always eligible for
    /// visibility, subject only to `active`.
    pub fn is_root(&self) -> bool {
        self.conditions.is_empty()
    }

    /// A dependent question carries at least one condition.
    pub fn is_dependent(&self) -> bool {
        !self.conditions.is_empty()
    }

    /// Ids of the questions this question's conditions inspect, deduplicated
    /// in first-seen order.
    pub fn source_ids(&self) -> Vec<&QuestionId> {
        let mut seen = Vec::new();
        for condition in &self.conditions {
            if !seen.contains(&&condition.source_question_id) {
                seen.push(&condition.source_question_id);
            }
        }
        seen
    }
}
