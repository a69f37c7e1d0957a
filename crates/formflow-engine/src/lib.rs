//! Conditional question dependency and visibility engine.
//!
//! Pure functions over immutable definition/answer snapshots: no I/O, no
//! retained state, safe to run concurrently for different forms or answer
//! snapshots. The caller owns persistence, transport, and rendering.

pub mod condition;
pub mod dependents;
pub mod error;
pub mod graph;
pub mod unreachable;
pub mod validate;
pub mod visibility;

pub use condition::evaluate;
pub use dependents::find_dependents;
pub use error::EngineError;
pub use graph::{DanglingReference, DependencyGraph};
pub use unreachable::find_unreachable;
pub use validate::validate_structure;
pub use visibility::{Resolution, resolve_visibility};
