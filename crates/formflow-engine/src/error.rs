use formflow_model::QuestionId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The visibility fixpoint failed to converge within the bound derived
    /// from the graph size. This means validation was skipped or the
    /// snapshot is inconsistent with the one that was validated.
    #[error(
        "visibility resolution did not converge after {passes} passes ({} question(s) unresolved)",
        unresolved.len()
    )]
    Convergence {
        passes: usize,
        unresolved: Vec<QuestionId>,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
