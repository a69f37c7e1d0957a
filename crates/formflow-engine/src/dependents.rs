//! Transitive dependents of a question, consulted before deleting or
//! deactivating it.

use std::collections::BTreeMap;

use formflow_model::{Question, QuestionId};

use crate::graph::{Edges, reachable_from};

/// Every question that directly or transitively references `question_id`,
/// either as its parent or as a condition source.
///
/// Inactive questions are included: deleting a question orphans its inactive
/// dependents just the same. The closure reuses the cycle-safe traversal
/// shared with validation, so malformed or cyclic input cannot loop. Results
/// come back in definition order.
pub fn find_dependents(question_id: &QuestionId, questions: &[Question]) -> Vec<Question> {
    let mut edges: Edges = BTreeMap::new();
    for question in questions {
        if let Some(parent_id) = &question.parent_id {
            edges
                .entry(parent_id.clone())
                .or_default()
                .insert(question.id.clone());
        }
        for condition in &question.conditions {
            edges
                .entry(condition.source_question_id.clone())
                .or_default()
                .insert(question.id.clone());
        }
    }
    let closure = reachable_from(question_id, &edges);
    let dependents: Vec<Question> = questions
        .iter()
        .filter(|question| closure.contains(&question.id))
        .cloned()
        .collect();
    tracing::debug!(
        question = %question_id,
        dependents = dependents.len(),
        "computed dependent closure"
    );
    dependents
}
