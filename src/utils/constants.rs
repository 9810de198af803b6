//! Constants Module - Single Source of Truth
//!
//! Every endpoint, threshold, page size and display string used across the
//! pipeline is defined here. No hardcoded values in other modules.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "PumpInspector";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for HTTP requests
pub const USER_AGENT: &str = concat!("PumpInspector/", env!("CARGO_PKG_VERSION"));

// ============================================
// RISK API
// ============================================

/// Default base URL of the PumpTools extension API
pub const DEFAULT_API_BASE_URL: &str = "https://pumptools.me/api/extension";

/// Twitter account token history
pub const ENDPOINT_TWITTER_TOKENS: &str = "/get_x_tokens_history";

/// Twitter account modification logs
pub const ENDPOINT_TWITTER_MODIFICATIONS: &str = "/get_x_modification_logs";

/// Creator token history (server returns the 10 most recent entries)
pub const ENDPOINT_CREATOR_TOKENS: &str = "/get_creator_info";

/// Server-side cap on creator history entries
pub const CREATOR_HISTORY_CAP: usize = 10;

/// Prefix applied to bare Twitter handles
pub const TWITTER_PROFILE_PREFIX: &str = "https://x.com/";

// Environment variables
pub const ENV_API_BASE_URL: &str = "PUMP_API_BASE_URL";
pub const ENV_API_TIMEOUT_SECS: &str = "PUMP_API_TIMEOUT_SECS";
pub const ENV_API_STRICT: &str = "PUMP_API_STRICT";
pub const ENV_WALLET_ADDRESS: &str = "PUMP_WALLET_ADDRESS";
pub const ENV_API_TOKEN: &str = "PUMP_API_TOKEN";

// ============================================
// RISK THRESHOLDS
// ============================================

/// Market cap above which a token counts as high-value
pub const HIGH_VALUE_MARKET_CAP: f64 = 10_000.0;

/// Market caps at or above this are shown in thousands
pub const MARKET_CAP_THOUSANDS: f64 = 1_000.0;

/// Currency symbol prefixed to every market cap
pub const CURRENCY_SYMBOL: &str = "$";

// ============================================
// PAGINATION
// ============================================

pub const TOKENS_PAGE_SIZE: usize = 5;
pub const CREATOR_PAGE_SIZE: usize = 5;
pub const MODIFICATIONS_PAGE_SIZE: usize = 3;

// ============================================
// PAGE DATA SENTINELS
// ============================================

/// Field could not be located on the page
pub const NOT_FOUND: &str = "not-found";

/// Field was located but could not be parsed
pub const PARSE_FAILED: &str = "parse-failed";

/// Twitter paths that are not account handles
pub const RESERVED_TWITTER_PATHS: [&str; 4] = ["search", "home", "explore", "notifications"];

// ============================================
// TRANSLATION
// ============================================

/// Maximum cached translations
pub const TRANSLATION_CACHE_SIZE: usize = 1000;

/// Maximum texts per translation batch
pub const TRANSLATION_BATCH_SIZE: usize = 20;

// ============================================
// CHAIN LINKS
// ============================================

/// Contract explorer link for a chain name, only for the two supported chains
pub fn contract_link_template(chain_name: &str) -> Option<&'static str> {
    match chain_name {
        "Solana" => Some("https://gmgn.ai/sol/token/"),
        "BNB Chain" => Some("https://gmgn.ai/bsc/token/"),
        _ => None,
    }
}

/// Display label for a Twitter modification type
pub fn modification_label(modify_type: &str) -> Option<&'static str> {
    match modify_type {
        "modify_description" => Some("Modified bio"),
        "delete_tweet" => Some("Deleted tweet"),
        "modify_name" => Some("Renamed"),
        "modify_profile" => Some("Changed avatar"),
        _ => None,
    }
}
