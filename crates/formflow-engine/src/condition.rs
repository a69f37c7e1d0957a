//! Evaluation of a single condition against a single answer value.

use formflow_model::{AnswerValue, Condition, ConditionOperator};

/// Evaluate one condition against the answer of its source question.
///
/// An absent answer evaluates to `false` for every operator, including the
/// negated ones: an unanswered prerequisite can never satisfy a condition.
pub fn evaluate(condition: &Condition, answer: Option<&AnswerValue>) -> bool {
    let Some(value) = answer else {
        return false;
    };
    match condition.operator {
        ConditionOperator::Equals => equals(value, &condition.expected_value),
        ConditionOperator::NotEquals => !equals(value, &condition.expected_value),
        ConditionOperator::Includes => includes(value, &condition.expected_value),
        ConditionOperator::NotIncludes => !includes(value, &condition.expected_value),
    }
}

/// Exact scalar comparison. Lists never satisfy equality.
fn equals(value: &AnswerValue, expected: &str) -> bool {
    match value.scalar_text() {
        Some(text) => text == expected,
        None => false,
    }
}

/// Membership for lists; case-insensitive substring match for scalars.
fn includes(value: &AnswerValue, expected: &str) -> bool {
    match value {
        AnswerValue::Many(values) => values.iter().any(|entry| entry == expected),
        _ => match value.scalar_text() {
            Some(text) => text.to_lowercase().contains(&expected.to_lowercase()),
            None => false,
        },
    }
}
