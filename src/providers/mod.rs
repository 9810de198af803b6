//! Providers Module - External Data Sources
//!
//! Risk API client and the credential stores it reads from.

pub mod credentials;
pub mod risk_api;

pub use credentials::*;
pub use risk_api::*;
