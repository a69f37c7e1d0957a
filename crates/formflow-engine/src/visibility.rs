//! Answer-dependent visibility resolution.
//!
//! A fixpoint over the dependency graph: active root questions seed the
//! visible set, and a dependent question joins it once every one of its
//! conditions holds against the answers, trusting a source answer only after
//! the source itself is visible. Recomputed from scratch on every answer
//! change; each call is pure and idempotent.

use std::collections::{BTreeMap, BTreeSet};

use formflow_model::{AnswerSet, Question, QuestionId};
use serde::{Deserialize, Serialize};

use crate::condition::evaluate;
use crate::error::EngineError;

/// Outcome of one visibility resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Questions currently eligible to be shown.
    pub visible: BTreeSet<QuestionId>,
    /// The visible questions that carry a usable answer.
    pub completed: BTreeSet<QuestionId>,
}

/// Compute the visible and completed sets for a definition/answer snapshot.
///
/// The iteration bound is the number of active questions: a validated
/// acyclic graph converges within that many passes, so exhausting the bound
/// means an unvalidated cycle slipped through and is reported as
/// [`EngineError::Convergence`] rather than silently truncated.
pub fn resolve_visibility(
    questions: &[Question],
    answers: &AnswerSet,
) -> Result<Resolution, EngineError> {
    let active: BTreeMap<&QuestionId, &Question> = questions
        .iter()
        .filter(|question| question.active)
        .map(|question| (&question.id, question))
        .collect();

    let mut visible: BTreeSet<QuestionId> = active
        .values()
        .filter(|question| question.is_root())
        .map(|question| question.id.clone())
        .collect();

    let bound = active.len();
    let mut converged = false;
    let mut passes = 0;
    while passes <= bound {
        passes += 1;
        let mut grew = false;
        for question in active.values() {
            if question.is_root() || visible.contains(&question.id) {
                continue;
            }
            if all_conditions_hold(question, &visible, answers, &active) {
                visible.insert(question.id.clone());
                grew = true;
            }
        }
        if !grew {
            converged = true;
            break;
        }
    }
    if !converged {
        let unresolved: Vec<QuestionId> = active
            .keys()
            .filter(|id| !visible.contains(**id))
            .map(|id| (*id).clone())
            .collect();
        tracing::warn!(
            passes,
            unresolved = unresolved.len(),
            "visibility fixpoint exhausted its bound"
        );
        return Err(EngineError::Convergence { passes, unresolved });
    }
    tracing::debug!(passes, visible = visible.len(), "visibility resolved");

    let completed = visible
        .iter()
        .filter(|id| {
            answers
                .value(id)
                .is_some_and(|value| !value.is_empty_selection())
        })
        .cloned()
        .collect();

    Ok(Resolution { visible, completed })
}

/// All conditions must hold (flat conjunction). A source's answer is only
/// consulted once the source question is itself visible; a hidden question's
/// residual answer must not leak into visibility decisions.
fn all_conditions_hold(
    question: &Question,
    visible: &BTreeSet<QuestionId>,
    answers: &AnswerSet,
    active: &BTreeMap<&QuestionId, &Question>,
) -> bool {
    question.conditions.iter().all(|condition| {
        let source_id = &condition.source_question_id;
        let trusted = active.contains_key(source_id) && visible.contains(source_id);
        let answer = if trusted { answers.value(source_id) } else { None };
        evaluate(condition, answer)
    })
}
