//! Core Module - Rule Orchestration & Risk Classification
//!
//! The analysis pipeline: which checks run for a page, how their settled
//! outcomes fold into one result, and the per-run session that owns the
//! fetched records.

pub mod engine;
pub mod risk_score;
pub mod rules;
pub mod session;

pub use engine::*;
pub use risk_score::*;
pub use rules::*;
pub use session::*;
