//! Utils Module - Helper Functions & Shared Utilities
//!
//! Constants, the bounded cache, markup escaping and the cached translator.

pub mod cache;
pub mod constants;
pub mod html;
pub mod translate;

pub use cache::*;
pub use constants::*;
pub use html::*;
pub use translate::*;
