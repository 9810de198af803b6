//! Report rendering
//!
//! Everything here is pure over an `AnalysisSession` or `AnalysisResult`:
//! markup strings in, no I/O.

pub mod format;
pub mod pagination;
pub mod report;
pub mod stats;
pub mod table;

pub use format::*;
pub use pagination::*;
pub use report::*;
pub use stats::*;
pub use table::*;
