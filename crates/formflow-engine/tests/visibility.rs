//! Visibility resolution tests, including the documented walkthrough
//! scenarios.

use std::collections::BTreeSet;

use formflow_engine::resolve_visibility;
use formflow_model::{
    Answer, AnswerSet, AnswerValue, ChoiceOption, Condition, ConditionOperator, Question,
    QuestionId, QuestionKind,
};

fn qid(value: &str) -> QuestionId {
    QuestionId::new(value).unwrap()
}

fn cond(source: &str, operator: ConditionOperator, expected: &str) -> Condition {
    Condition {
        source_question_id: qid(source),
        operator,
        expected_value: expected.to_string(),
    }
}

fn single_choice(id: &str, values: &[&str]) -> Question {
    Question {
        id: qid(id),
        parent_id: None,
        kind: QuestionKind::SingleChoice,
        options: values
            .iter()
            .map(|value| ChoiceOption {
                value: (*value).to_string(),
                label: (*value).to_string(),
            })
            .collect(),
        conditions: vec![],
        active: true,
        order: 0,
    }
}

fn dependent(id: &str, parent: &str, conditions: Vec<Condition>) -> Question {
    Question {
        id: qid(id),
        parent_id: Some(qid(parent)),
        kind: QuestionKind::FreeText,
        options: vec![],
        conditions,
        active: true,
        order: 0,
    }
}

fn answers(entries: &[(&str, AnswerValue)]) -> AnswerSet {
    entries
        .iter()
        .map(|(id, value)| Answer::new(qid(id), value.clone()))
        .collect()
}

fn ids(values: &[&str]) -> BTreeSet<QuestionId> {
    values.iter().map(|value| qid(value)).collect()
}

#[test]
fn root_question_is_visible_without_answers() {
    let questions = vec![
        single_choice("q1", &["A", "B"]),
        dependent("q2", "q1", vec![cond("q1", ConditionOperator::Equals, "A")]),
    ];
    let resolution = resolve_visibility(&questions, &AnswerSet::new()).unwrap();
    assert_eq!(resolution.visible, ids(&["q1"]));
    assert!(resolution.completed.is_empty());
}

#[test]
fn matching_answer_reveals_the_dependent() {
    let questions = vec![
        single_choice("q1", &["A", "B"]),
        dependent("q2", "q1", vec![cond("q1", ConditionOperator::Equals, "A")]),
    ];
    let set = answers(&[("q1", AnswerValue::Text("A".into()))]);
    let resolution = resolve_visibility(&questions, &set).unwrap();
    assert_eq!(resolution.visible, ids(&["q1", "q2"]));
    assert_eq!(resolution.completed, ids(&["q1"]));

    let set = answers(&[
        ("q1", AnswerValue::Text("A".into())),
        ("q2", AnswerValue::Text("x".into())),
    ]);
    let resolution = resolve_visibility(&questions, &set).unwrap();
    assert_eq!(resolution.completed, ids(&["q1", "q2"]));
}

#[test]
fn non_matching_answer_keeps_the_dependent_hidden() {
    let questions = vec![
        single_choice("q1", &["A", "B"]),
        dependent("q2", "q1", vec![cond("q1", ConditionOperator::Equals, "A")]),
    ];
    let set = answers(&[("q1", AnswerValue::Text("B".into()))]);
    let resolution = resolve_visibility(&questions, &set).unwrap();
    assert_eq!(resolution.visible, ids(&["q1"]));
}

#[test]
fn deactivated_source_hides_the_whole_branch() {
    let mut q1 = single_choice("q1", &["A", "B"]);
    q1.active = false;
    let questions = vec![
        q1,
        dependent("q2", "q1", vec![cond("q1", ConditionOperator::Equals, "A")]),
    ];
    // Even a residual answer for the inactive question must not leak in.
    let set = answers(&[("q1", AnswerValue::Text("A".into()))]);
    let resolution = resolve_visibility(&questions, &set).unwrap();
    assert!(resolution.visible.is_empty());
}

#[test]
fn hidden_source_answer_does_not_leak() {
    // q3 conditions on q2, which is itself gated behind q1. An answer for
    // q2 exists, but q2 is not visible, so q3 must stay hidden.
    let questions = vec![
        single_choice("q1", &["A", "B"]),
        dependent("q2", "q1", vec![cond("q1", ConditionOperator::Equals, "A")]),
        dependent("q3", "q2", vec![cond("q2", ConditionOperator::Equals, "x")]),
    ];
    let set = answers(&[
        ("q1", AnswerValue::Text("B".into())),
        ("q2", AnswerValue::Text("x".into())),
    ]);
    let resolution = resolve_visibility(&questions, &set).unwrap();
    assert_eq!(resolution.visible, ids(&["q1"]));
}

#[test]
fn chain_resolves_in_one_call() {
    let questions = vec![
        single_choice("q1", &["A", "B"]),
        dependent("q2", "q1", vec![cond("q1", ConditionOperator::Equals, "A")]),
        dependent("q3", "q2", vec![cond("q2", ConditionOperator::Equals, "x")]),
    ];
    let set = answers(&[
        ("q1", AnswerValue::Text("A".into())),
        ("q2", AnswerValue::Text("x".into())),
    ]);
    let resolution = resolve_visibility(&questions, &set).unwrap();
    assert_eq!(resolution.visible, ids(&["q1", "q2", "q3"]));
    assert_eq!(resolution.completed, ids(&["q1", "q2"]));
}

#[test]
fn conjunction_requires_every_condition() {
    let questions = vec![
        single_choice("q1", &["A", "B"]),
        single_choice("q2", &["X", "Y"]),
        dependent(
            "q3",
            "q1",
            vec![
                cond("q1", ConditionOperator::Equals, "A"),
                cond("q2", ConditionOperator::Equals, "X"),
            ],
        ),
    ];
    let set = answers(&[("q1", AnswerValue::Text("A".into()))]);
    let resolution = resolve_visibility(&questions, &set).unwrap();
    assert!(!resolution.visible.contains(&qid("q3")));

    let set = answers(&[
        ("q1", AnswerValue::Text("A".into())),
        ("q2", AnswerValue::Text("X".into())),
    ]);
    let resolution = resolve_visibility(&questions, &set).unwrap();
    assert!(resolution.visible.contains(&qid("q3")));
}

#[test]
fn empty_multi_choice_selection_does_not_complete() {
    let mut q1 = single_choice("q1", &["A", "B"]);
    q1.kind = QuestionKind::MultiChoice;
    let questions = vec![q1];
    let set = answers(&[("q1", AnswerValue::Many(vec![]))]);
    let resolution = resolve_visibility(&questions, &set).unwrap();
    assert_eq!(resolution.visible, ids(&["q1"]));
    assert!(resolution.completed.is_empty());

    let set = answers(&[("q1", AnswerValue::Many(vec!["A".to_string()]))]);
    let resolution = resolve_visibility(&questions, &set).unwrap();
    assert_eq!(resolution.completed, ids(&["q1"]));
}

#[test]
fn cycle_members_stay_hidden_but_resolution_converges() {
    // Both questions gate on each other; neither can ever be seeded, so the
    // fixpoint converges with an empty dependent set instead of spinning.
    let questions = vec![
        dependent("q1", "q2", vec![cond("q2", ConditionOperator::Equals, "A")]),
        dependent("q2", "q1", vec![cond("q1", ConditionOperator::Equals, "A")]),
        single_choice("q3", &["A"]),
    ];
    let set = answers(&[
        ("q1", AnswerValue::Text("A".into())),
        ("q2", AnswerValue::Text("A".into())),
    ]);
    let resolution = resolve_visibility(&questions, &set).unwrap();
    assert_eq!(resolution.visible, ids(&["q3"]));
}
