use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::question::QuestionId;

/// The value recorded for an answered question.
///
/// Scalar values come from single-valued controls; lists come from
/// multi-choice and ranking controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Number(f64),
    Many(Vec<String>),
}

impl AnswerValue {
    pub fn is_many(&self) -> bool {
        matches!(self, AnswerValue::Many(_))
    }

    /// True when the value carries no usable content: an empty selection
    /// list. Scalar values, including the empty string, count as present.
    pub fn is_empty_selection(&self) -> bool {
        matches!(self, AnswerValue::Many(values) if values.is_empty())
    }

    /// Canonical scalar rendering used for comparisons; `None` for lists.
    /// Integral numbers render without a fractional part so that `5.0`
    /// matches the expected value "5".
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            AnswerValue::Text(text) => Some(text.clone()),
            AnswerValue::Number(number) => Some(render_number(*number)),
            AnswerValue::Many(_) => None,
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Number(value)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(values: Vec<String>) -> Self {
        AnswerValue::Many(values)
    }
}

fn render_number(number: f64) -> String {
    if number.is_finite() && number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

/// One respondent answer to one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub value: AnswerValue,
    /// Free text attached when the selected value is the sentinel "other"
    /// option.
    #[serde(default)]
    pub other_text: Option<String>,
}

impl Answer {
    pub fn new(question_id: QuestionId, value: impl Into<AnswerValue>) -> Self {
        Self {
            question_id,
            value: value.into(),
            other_text: None,
        }
    }
}

/// Immutable snapshot of the answers supplied so far, keyed by question id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerSet {
    answers: BTreeMap<QuestionId, Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, answer: Answer) {
        self.answers.insert(answer.question_id.clone(), answer);
    }

    pub fn get(&self, question_id: &QuestionId) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    pub fn value(&self, question_id: &QuestionId) -> Option<&AnswerValue> {
        self.answers.get(question_id).map(|answer| &answer.value)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.answers.values()
    }
}

impl FromIterator<Answer> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = Answer>>(iter: I) -> Self {
        let mut set = Self::new();
        for answer in iter {
            set.insert(answer);
        }
        set
    }
}
