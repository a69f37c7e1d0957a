//! Structural validation of a form definition.
//!
//! Purely structural: no answers are consulted. Problems are reported as
//! issue data for the form author, never raised as errors. Intended to run
//! after every edit to questions or conditions, not only before publishing.

use std::collections::BTreeMap;

use formflow_model::{
    IssueSeverity, Question, QuestionId, ValidationIssue, ValidationReport,
};

use crate::graph::DependencyGraph;

pub const CODE_DUPLICATE_ID: &str = "DUPLICATE_ID";
pub const CODE_DANGLING_PARENT: &str = "DANGLING_PARENT";
pub const CODE_INACTIVE_PARENT: &str = "INACTIVE_PARENT";
pub const CODE_DANGLING_SOURCE: &str = "DANGLING_SOURCE";
pub const CODE_INACTIVE_SOURCE: &str = "INACTIVE_SOURCE";
pub const CODE_CYCLE: &str = "CYCLE";
pub const CODE_CONDITION_WITHOUT_PARENT: &str = "CONDITION_WITHOUT_PARENT";
pub const CODE_MISSING_OPTIONS: &str = "MISSING_OPTIONS";

/// Validate the dependency structure of a question set.
///
/// Checks every `parent_id` and condition source for dangling or inactive
/// targets and runs cycle detection over the condition graph. Error-level
/// issues make the report invalid; warnings flag definition smells that do
/// not break resolution.
pub fn validate_structure(questions: &[Question]) -> ValidationReport {
    let mut issues = Vec::new();
    let by_id = index_questions(questions);

    check_duplicate_ids(questions, &mut issues);
    for question in questions {
        check_parent_reference(question, &by_id, &mut issues);
        check_condition_sources(question, &by_id, &mut issues);
        check_shape(question, &mut issues);
    }
    check_cycles(questions, &mut issues);

    let report = ValidationReport { issues };
    if report.has_errors() {
        tracing::debug!(
            errors = report.error_count(),
            warnings = report.warning_count(),
            "structure validation found problems"
        );
    }
    report
}

fn index_questions(questions: &[Question]) -> BTreeMap<&QuestionId, &Question> {
    questions
        .iter()
        .map(|question| (&question.id, question))
        .collect()
}

fn check_duplicate_ids(questions: &[Question], issues: &mut Vec<ValidationIssue>) {
    let mut seen: BTreeMap<&QuestionId, usize> = BTreeMap::new();
    for question in questions {
        *seen.entry(&question.id).or_default() += 1;
    }
    for (id, count) in seen {
        if count > 1 {
            issues.push(ValidationIssue {
                code: CODE_DUPLICATE_ID.to_string(),
                message: format!("question id {id} appears {count} times in the snapshot"),
                severity: IssueSeverity::Error,
                question_id: Some(id.clone()),
                reference: None,
            });
        }
    }
}

fn check_parent_reference(
    question: &Question,
    by_id: &BTreeMap<&QuestionId, &Question>,
    issues: &mut Vec<ValidationIssue>,
) {
    let Some(parent_id) = &question.parent_id else {
        return;
    };
    match by_id.get(parent_id) {
        None => issues.push(ValidationIssue {
            code: CODE_DANGLING_PARENT.to_string(),
            message: format!(
                "question {} references parent {parent_id}, which does not exist",
                question.id
            ),
            severity: IssueSeverity::Error,
            question_id: Some(question.id.clone()),
            reference: Some(parent_id.clone()),
        }),
        Some(parent) if !parent.active => issues.push(ValidationIssue {
            code: CODE_INACTIVE_PARENT.to_string(),
            message: format!(
                "question {} references parent {parent_id}, which is inactive",
                question.id
            ),
            severity: IssueSeverity::Error,
            question_id: Some(question.id.clone()),
            reference: Some(parent_id.clone()),
        }),
        Some(_) => {}
    }
}

fn check_condition_sources(
    question: &Question,
    by_id: &BTreeMap<&QuestionId, &Question>,
    issues: &mut Vec<ValidationIssue>,
) {
    for condition in &question.conditions {
        let source_id = &condition.source_question_id;
        match by_id.get(source_id) {
            None => issues.push(ValidationIssue {
                code: CODE_DANGLING_SOURCE.to_string(),
                message: format!(
                    "condition on question {} references source {source_id}, \
                     which does not exist",
                    question.id
                ),
                severity: IssueSeverity::Error,
                question_id: Some(question.id.clone()),
                reference: Some(source_id.clone()),
            }),
            Some(source) if !source.active => issues.push(ValidationIssue {
                code: CODE_INACTIVE_SOURCE.to_string(),
                message: format!(
                    "condition on question {} references source {source_id}, \
                     which is inactive",
                    question.id
                ),
                severity: IssueSeverity::Error,
                question_id: Some(question.id.clone()),
                reference: Some(source_id.clone()),
            }),
            Some(_) => {}
        }
    }
}

/// Definition-shape checks from the data model: conditions require a parent,
/// choice-like kinds require options. Warnings only.
fn check_shape(question: &Question, issues: &mut Vec<ValidationIssue>) {
    if question.is_dependent() && question.parent_id.is_none() {
        issues.push(ValidationIssue {
            code: CODE_CONDITION_WITHOUT_PARENT.to_string(),
            message: format!(
                "question {} has conditions but no parent to render under",
                question.id
            ),
            severity: IssueSeverity::Warning,
            question_id: Some(question.id.clone()),
            reference: None,
        });
    }
    if question.kind.is_choice_like() && question.options.is_empty() {
        issues.push(ValidationIssue {
            code: CODE_MISSING_OPTIONS.to_string(),
            message: format!(
                "{} question {} has no options",
                question.kind, question.id
            ),
            severity: IssueSeverity::Warning,
            question_id: Some(question.id.clone()),
            reference: None,
        });
    }
}

fn check_cycles(questions: &[Question], issues: &mut Vec<ValidationIssue>) {
    let graph = DependencyGraph::build(questions);
    for cycle in graph.cycles() {
        let ids = cycle
            .iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        for member in &cycle {
            issues.push(ValidationIssue {
                code: CODE_CYCLE.to_string(),
                message: format!("question {member} participates in a dependency cycle: {ids}"),
                severity: IssueSeverity::Error,
                question_id: Some(member.clone()),
                reference: None,
            });
        }
    }
}
