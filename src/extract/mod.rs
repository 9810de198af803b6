//! Page-data extraction from supported trading sites

pub mod extractor;
pub mod schema;
pub mod sites;

pub use extractor::*;
pub use schema::*;
pub use sites::*;
