//! Static unreachability analysis for form authors.
//!
//! Answer-independent approximation: a question is flagged when no answer
//! combination can ever make it visible, either because a condition source
//! is missing, inactive, or itself unreachable, or because its conditions
//! contradict each other in a statically detectable way. Advisory tooling,
//! not a hard gate.

use std::collections::{BTreeMap, BTreeSet};

use formflow_model::{Condition, ConditionOperator, Question, QuestionId};

/// Active questions that can never become visible under the current rules.
pub fn find_unreachable(questions: &[Question]) -> BTreeSet<QuestionId> {
    let active: BTreeMap<&QuestionId, &Question> = questions
        .iter()
        .filter(|question| question.active)
        .map(|question| (&question.id, question))
        .collect();

    // Fixpoint mirroring the visibility resolver with every condition
    // assumed satisfiable: reachability propagates from the roots, so a
    // dependent of an unreachable source stays unreachable, and cycle
    // members never get seeded.
    let mut reachable: BTreeSet<&QuestionId> = active
        .values()
        .filter(|question| question.is_root())
        .map(|question| &question.id)
        .collect();
    loop {
        let mut grew = false;
        for question in active.values() {
            if reachable.contains(&question.id) {
                continue;
            }
            if has_contradiction(question, &active) {
                continue;
            }
            let sources_ok = question.source_ids().into_iter().all(|source_id| {
                active.contains_key(source_id) && reachable.contains(source_id)
            });
            if sources_ok {
                reachable.insert(&question.id);
                grew = true;
            }
        }
        if !grew {
            break;
        }
    }

    let unreachable: BTreeSet<QuestionId> = active
        .keys()
        .filter(|id| !reachable.contains(**id))
        .map(|id| (*id).clone())
        .collect();
    if !unreachable.is_empty() {
        tracing::debug!(count = unreachable.len(), "found unreachable questions");
    }
    unreachable
}

/// Statically detectable contradictions within one question's conjunction:
/// two `equals` with different expected values on the same single-valued
/// source, an `equals`/`not_equals` pair on the same value, or an
/// `includes`/`not_includes` pair on the same value.
fn has_contradiction(question: &Question, active: &BTreeMap<&QuestionId, &Question>) -> bool {
    let mut by_source: BTreeMap<&QuestionId, Vec<&Condition>> = BTreeMap::new();
    for condition in &question.conditions {
        by_source
            .entry(&condition.source_question_id)
            .or_default()
            .push(condition);
    }
    for (source_id, conditions) in by_source {
        let multi_valued = active
            .get(source_id)
            .is_some_and(|source| source.kind.is_multi_valued());
        for (index, first) in conditions.iter().enumerate() {
            for second in &conditions[index + 1..] {
                if contradicts(first, second, multi_valued) {
                    return true;
                }
            }
        }
    }
    false
}

fn contradicts(first: &Condition, second: &Condition, multi_valued: bool) -> bool {
    use ConditionOperator::{Equals, Includes, NotEquals, NotIncludes};
    match (first.operator, second.operator) {
        // A single-valued source cannot equal two different values at once.
        (Equals, Equals) => !multi_valued && first.expected_value != second.expected_value,
        (Equals, NotEquals) | (NotEquals, Equals) => {
            first.expected_value == second.expected_value
        }
        (Includes, NotIncludes) | (NotIncludes, Includes) => {
            first.expected_value == second.expected_value
        }
        _ => false,
    }
}
