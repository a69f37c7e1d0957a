//! Tests for formflow-model types and their wire format.

use std::str::FromStr;

use formflow_model::{
    AnswerValue, ChoiceOption, Condition, ConditionOperator, Question, QuestionId, QuestionKind,
};

#[test]
fn question_kind_uses_kebab_case_on_the_wire() {
    let json = serde_json::to_string(&QuestionKind::SingleChoice).expect("serialize kind");
    assert_eq!(json, "\"single-choice\"");
    let round: QuestionKind = serde_json::from_str("\"multi-choice\"").expect("deserialize kind");
    assert_eq!(round, QuestionKind::MultiChoice);
}

#[test]
fn question_kind_parses_leniently() {
    assert_eq!(
        QuestionKind::from_str("Single_Choice").unwrap(),
        QuestionKind::SingleChoice
    );
    assert!(QuestionKind::from_str("essay").is_err());
}

#[test]
fn operator_uses_snake_case_on_the_wire() {
    let json = serde_json::to_string(&ConditionOperator::NotIncludes).expect("serialize operator");
    assert_eq!(json, "\"not_includes\"");
    let round: ConditionOperator = serde_json::from_str("\"equals\"").expect("deserialize");
    assert_eq!(round, ConditionOperator::Equals);
}

#[test]
fn operator_negation_is_an_involution() {
    for operator in [
        ConditionOperator::Equals,
        ConditionOperator::NotEquals,
        ConditionOperator::Includes,
        ConditionOperator::NotIncludes,
    ] {
        assert_eq!(operator.negated().negated(), operator);
    }
}

#[test]
fn question_round_trips_through_json() {
    let question = Question {
        id: QuestionId::new("q7").unwrap(),
        parent_id: Some(QuestionId::new("q1").unwrap()),
        kind: QuestionKind::Dropdown,
        options: vec![
            ChoiceOption {
                value: "yes".to_string(),
                label: "Yes".to_string(),
            },
            ChoiceOption {
                value: "other".to_string(),
                label: "Other".to_string(),
            },
        ],
        conditions: vec![Condition {
            source_question_id: QuestionId::new("q1").unwrap(),
            operator: ConditionOperator::Includes,
            expected_value: "maintenance".to_string(),
        }],
        active: true,
        order: 7,
    };
    let json = serde_json::to_string(&question).expect("serialize question");
    let round: Question = serde_json::from_str(&json).expect("deserialize question");
    assert_eq!(round, question);
    assert!(round.options[1].is_other());
    assert!(round.is_dependent());
}

#[test]
fn optional_question_fields_default() {
    let raw = r#"{"id": "q1", "kind": "numeric", "active": true}"#;
    let question: Question = serde_json::from_str(raw).expect("deserialize minimal question");
    assert!(question.parent_id.is_none());
    assert!(question.options.is_empty());
    assert!(question.is_root());
    assert_eq!(question.order, 0);
}

#[test]
fn answer_value_deserializes_untagged() {
    let text: AnswerValue = serde_json::from_str("\"A\"").expect("text");
    assert_eq!(text, AnswerValue::Text("A".to_string()));
    let number: AnswerValue = serde_json::from_str("3.5").expect("number");
    assert_eq!(number, AnswerValue::Number(3.5));
    let many: AnswerValue = serde_json::from_str("[\"a\",\"b\"]").expect("list");
    assert_eq!(
        many,
        AnswerValue::Many(vec!["a".to_string(), "b".to_string()])
    );
}
