//! Pump Inspector Library
//!
//! Token page risk inspector for meme-token trading sites:
//! - Extracts symbol, contract, creator and bound Twitter from gmgn.ai and
//!   axiom.trade pages
//! - Checks creator and Twitter launch history plus Twitter profile edits
//!   against the PumpTools risk API, all calls concurrently
//! - Renders a risk report with per-table pagination

pub mod core;
pub mod extract;
pub mod models;
pub mod providers;
pub mod render;
pub mod utils;

pub use crate::core::{AnalysisSession, RuleEngine};
pub use extract::{extract_page_data, CapturedPage, PageSource};
pub use models::{AnalysisResult, ApiConfig, AppError, AppResult, CheckLevel, ErrorCode, PageData, RuleId};
pub use providers::{Credentials, CredentialStore, EnvCredentials, RiskApiClient, RiskSource};
pub use render::{render, render_contract_info, render_failure, Direction, ReportView};
