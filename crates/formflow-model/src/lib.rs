pub mod answer;
pub mod error;
pub mod question;
pub mod report;

pub use answer::{Answer, AnswerSet, AnswerValue};
pub use error::{ModelError, Result};
pub use question::{
    ChoiceOption, Condition, ConditionOperator, OTHER_OPTION_VALUE, Question, QuestionId,
    QuestionKind,
};
pub use report::{IssueSeverity, ValidationIssue, ValidationReport};
