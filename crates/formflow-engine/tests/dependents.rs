//! Dependents query tests (delete/deactivate safety checks).

use formflow_engine::find_dependents;
use formflow_model::{Condition, ConditionOperator, Question, QuestionId, QuestionKind};

fn qid(value: &str) -> QuestionId {
    QuestionId::new(value).unwrap()
}

fn cond(source: &str) -> Condition {
    Condition {
        source_question_id: qid(source),
        operator: ConditionOperator::Equals,
        expected_value: "A".to_string(),
    }
}

fn question(
    id: &str,
    parent_id: Option<&str>,
    conditions: Vec<Condition>,
    active: bool,
) -> Question {
    Question {
        id: qid(id),
        parent_id: parent_id.map(qid),
        kind: QuestionKind::FreeText,
        options: vec![],
        conditions,
        active,
        order: 0,
    }
}

#[test]
fn direct_references_block_deletion() {
    let questions = vec![
        question("q1", None, vec![], true),
        question("q2", Some("q1"), vec![cond("q1")], true),
        question("q3", Some("q1"), vec![cond("q1")], true),
    ];
    let dependents = find_dependents(&qid("q1"), &questions);
    let ids: Vec<&str> = dependents.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["q2", "q3"]);
}

#[test]
fn closure_is_transitive() {
    let questions = vec![
        question("q1", None, vec![], true),
        question("q2", Some("q1"), vec![cond("q1")], true),
        question("q3", Some("q2"), vec![cond("q2")], true),
    ];
    let dependents = find_dependents(&qid("q1"), &questions);
    let ids: Vec<&str> = dependents.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["q2", "q3"]);
}

#[test]
fn parent_only_references_count() {
    // Display nesting alone orphans a child on deletion, even with no
    // condition edge.
    let questions = vec![
        question("q1", None, vec![], true),
        question("q2", Some("q1"), vec![], true),
    ];
    let dependents = find_dependents(&qid("q1"), &questions);
    assert_eq!(dependents.len(), 1);
    assert_eq!(dependents[0].id, qid("q2"));
}

#[test]
fn condition_source_differing_from_parent_counts() {
    let questions = vec![
        question("q1", None, vec![], true),
        question("q2", None, vec![], true),
        question("q3", Some("q2"), vec![cond("q1")], true),
    ];
    let dependents = find_dependents(&qid("q1"), &questions);
    assert_eq!(dependents.len(), 1);
    assert_eq!(dependents[0].id, qid("q3"));
}

#[test]
fn inactive_dependents_are_included() {
    let questions = vec![
        question("q1", None, vec![], true),
        question("q2", Some("q1"), vec![cond("q1")], false),
    ];
    let dependents = find_dependents(&qid("q1"), &questions);
    assert_eq!(dependents.len(), 1);
}

#[test]
fn unreferenced_question_has_no_dependents() {
    let questions = vec![
        question("q1", None, vec![], true),
        question("q2", None, vec![], true),
    ];
    assert!(find_dependents(&qid("q2"), &questions).is_empty());
}

#[test]
fn cyclic_input_terminates() {
    let questions = vec![
        question("q1", Some("q2"), vec![cond("q2")], true),
        question("q2", Some("q1"), vec![cond("q1")], true),
    ];
    let dependents = find_dependents(&qid("q1"), &questions);
    // q2 references q1 directly; q1 itself is not its own dependent.
    let ids: Vec<&str> = dependents.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["q2"]);
}
