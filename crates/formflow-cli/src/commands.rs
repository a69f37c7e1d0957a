//! Command implementations: load snapshots, run the engine, shape results.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use formflow_engine::{
    Resolution, find_dependents, find_unreachable, resolve_visibility, validate_structure,
};
use formflow_model::{Answer, AnswerSet, Question, QuestionId, ValidationReport};

use crate::cli::{AnalyzeArgs, PreviewArgs, ValidateArgs};

/// A form definition snapshot as exported by the authoring layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSnapshot {
    #[serde(default)]
    pub form_id: Option<String>,
    pub questions: Vec<Question>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResult {
    pub unreachable: BTreeSet<QuestionId>,
    /// Present when `--dependents-of` was supplied.
    pub dependents: Option<DependentsResult>,
}

#[derive(Debug, Serialize)]
pub struct DependentsResult {
    pub question_id: QuestionId,
    pub dependents: Vec<Question>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResult {
    pub resolution: Resolution,
    pub active_count: usize,
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationReport> {
    let snapshot = load_snapshot(&args.form)?;
    let report = validate_structure(&snapshot.questions);
    info!(
        questions = snapshot.questions.len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validated form structure"
    );
    Ok(report)
}

pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalyzeResult> {
    let snapshot = load_snapshot(&args.form)?;
    let unreachable = find_unreachable(&snapshot.questions);
    let dependents = match &args.dependents_of {
        Some(raw) => {
            let question_id = QuestionId::new(raw.as_str())
                .map_err(|error| anyhow!("invalid --dependents-of value: {error}"))?;
            if !snapshot
                .questions
                .iter()
                .any(|question| question.id == question_id)
            {
                return Err(anyhow!(
                    "question {question_id} is not part of the snapshot"
                ));
            }
            Some(DependentsResult {
                dependents: find_dependents(&question_id, &snapshot.questions),
                question_id,
            })
        }
        None => None,
    };
    info!(
        unreachable = unreachable.len(),
        "analyzed form reachability"
    );
    Ok(AnalyzeResult {
        unreachable,
        dependents,
    })
}

pub fn run_preview(args: &PreviewArgs) -> Result<PreviewResult> {
    let snapshot = load_snapshot(&args.form)?;
    let answers = match &args.answers {
        Some(path) => load_answers(path)?,
        None => AnswerSet::new(),
    };
    let active_count = snapshot
        .questions
        .iter()
        .filter(|question| question.active)
        .count();
    let resolution = resolve_visibility(&snapshot.questions, &answers)
        .context("resolve visibility for preview")?;
    debug!(
        visible = resolution.visible.len(),
        completed = resolution.completed.len(),
        "preview resolved"
    );
    Ok(PreviewResult {
        resolution,
        active_count,
    })
}

fn load_snapshot(path: &Path) -> Result<FormSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read form snapshot {}", path.display()))?;
    let snapshot: FormSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("parse form snapshot {}", path.display()))?;
    Ok(snapshot)
}

fn load_answers(path: &Path) -> Result<AnswerSet> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read answers {}", path.display()))?;
    let answers: Vec<Answer> =
        serde_json::from_str(&raw).with_context(|| format!("parse answers {}", path.display()))?;
    Ok(answers.into_iter().collect())
}
