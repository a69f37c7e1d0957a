//! CLI library components for the formflow admin tooling.

pub mod logging;
