//! Type definitions for the analysis pipeline
//! Page data, remote records, check results and the analysis result

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::core::session::AnalysisSession;
use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::{
    CREATOR_PAGE_SIZE, MODIFICATIONS_PAGE_SIZE, NOT_FOUND, PARSE_FAILED, TOKENS_PAGE_SIZE,
};

// ============================================
// Page data
// ============================================

/// True when a field holds a real extracted value rather than a sentinel
pub fn is_extracted(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != NOT_FOUND && value != PARSE_FAILED
}

fn not_found() -> String {
    NOT_FOUND.to_string()
}

/// Contract address and chain as read from the page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRef {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub chain: Option<String>,
}

/// Token creator, only some sites expose it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorRef {
    pub chain: String,
    pub address: String,
}

/// Everything extracted from one page view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    /// Token symbol or sentinel
    #[serde(default = "not_found")]
    pub content: String,
    #[serde(default)]
    pub contract: Option<ContractRef>,
    #[serde(default)]
    pub creator: Option<CreatorRef>,
    /// Bound Twitter handle/URL or sentinel
    #[serde(default = "not_found")]
    pub twitter: String,
    #[serde(default)]
    pub page_url: String,
}

impl Default for PageData {
    fn default() -> Self {
        Self {
            content: not_found(),
            contract: None,
            creator: None,
            twitter: not_found(),
            page_url: String::new(),
        }
    }
}

impl PageData {
    /// Twitter value usable for the Twitter checks
    pub fn twitter_account(&self) -> Option<&str> {
        is_extracted(&self.twitter).then(|| self.twitter.trim())
    }

    /// `(chain, address)` when both are present
    pub fn contract_target(&self) -> Option<(&str, &str)> {
        let contract = self.contract.as_ref()?;
        let chain = contract.chain.as_deref().filter(|c| is_extracted(c))?;
        let address = contract.value.as_deref().filter(|v| is_extracted(v))?;
        Some((chain, address))
    }

    /// Lower-cased contract address used to highlight the current token
    pub fn contract_address_lower(&self) -> Option<String> {
        self.contract
            .as_ref()
            .and_then(|c| c.value.as_deref())
            .filter(|v| is_extracted(v))
            .map(|v| v.to_lowercase())
    }

    /// At least one field carries a real value
    pub fn has_any_valid_data(&self) -> bool {
        is_extracted(&self.content)
            || self.contract_address_lower().is_some()
            || self.creator.as_ref().is_some_and(|c| is_extracted(&c.address))
            || self.twitter_account().is_some()
    }
}

// ============================================
// Rules & categories
// ============================================

/// Identity of one risk check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleId {
    CheckTwitterTokens,
    CheckTwitterModifications,
    CheckCreatorTokens,
}

impl RuleId {
    pub const ALL: [RuleId; 3] = [
        RuleId::CheckTwitterTokens,
        RuleId::CheckTwitterModifications,
        RuleId::CheckCreatorTokens,
    ];

    /// Order in which sections appear in the report
    pub const DISPLAY_ORDER: [RuleId; 3] = [
        RuleId::CheckCreatorTokens,
        RuleId::CheckTwitterModifications,
        RuleId::CheckTwitterTokens,
    ];

    pub const TWITTER: [RuleId; 2] = [RuleId::CheckTwitterTokens, RuleId::CheckTwitterModifications];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::CheckTwitterTokens => "checkTwitterTokens",
            RuleId::CheckTwitterModifications => "checkTwitterModifications",
            RuleId::CheckCreatorTokens => "checkCreatorTokens",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            RuleId::CheckTwitterTokens => Category::Tokens,
            RuleId::CheckTwitterModifications => Category::Modifications,
            RuleId::CheckCreatorTokens => Category::Creator,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record category backing one report table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tokens,
    Modifications,
    Creator,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tokens => "tokens",
            Category::Modifications => "modifications",
            Category::Creator => "creator",
        }
    }

    pub fn page_size(&self) -> usize {
        match self {
            Category::Tokens => TOKENS_PAGE_SIZE,
            Category::Modifications => MODIFICATIONS_PAGE_SIZE,
            Category::Creator => CREATOR_PAGE_SIZE,
        }
    }

    pub fn rule(&self) -> RuleId {
        match self {
            Category::Tokens => RuleId::CheckTwitterTokens,
            Category::Modifications => RuleId::CheckTwitterModifications,
            Category::Creator => RuleId::CheckCreatorTokens,
        }
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "tokens" => Ok(Category::Tokens),
            "modifications" => Ok(Category::Modifications),
            "creator" => Ok(Category::Creator),
            other => Err(AppError::invalid_config(format!("Unknown category: {}", other))),
        }
    }
}

// ============================================
// Remote records
// ============================================

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body returned by every risk API endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<Value>,
}

impl RemoteResponse {
    /// `{data: []}`
    pub fn empty() -> Self {
        Self { data: Vec::new() }
    }
}

/// Display-only columns: missing or `null` reads as empty
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One token launch, from Twitter or creator history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub chain_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub token_symbol: String,
    pub token_address: String,
    /// Number or numeric string, anything else renders as `-`
    #[serde(default)]
    pub market_cap: Value,
}

/// One Twitter profile modification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModificationRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub modify_type: String,
    pub modification_log: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gmt_modify: String,
}

// ============================================
// Results
// ============================================

/// Outcome level of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckLevel {
    Info,
    Error,
}

impl CheckLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckLevel::Info => "info",
            CheckLevel::Error => "error",
        }
    }
}

/// Resolved check with its rendered section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub level: CheckLevel,
    pub message: String,
    /// Rendered report section (HTML)
    pub details: String,
}

/// One row of the result summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEntry {
    pub rule_id: RuleId,
    pub name: String,
    pub level: CheckLevel,
    pub message: String,
}

/// Result of one `analyze` run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub summary: Vec<SummaryEntry>,
    pub details: BTreeMap<RuleId, CheckResult>,
    /// Records fetched by this run, drives the summary card and pagination
    pub session: AnalysisSession,
}

impl AnalysisResult {
    pub fn new(session: AnalysisSession) -> Self {
        Self {
            summary: Vec::new(),
            details: BTreeMap::new(),
            session,
        }
    }

    /// Record a resolved check in both summary and details
    pub fn push(&mut self, rule_id: RuleId, result: CheckResult) {
        self.summary.push(SummaryEntry {
            rule_id,
            name: result.name.clone(),
            level: result.level,
            message: result.message.clone(),
        });
        self.details.insert(rule_id, result);
    }

    pub fn level_of(&self, rule_id: RuleId) -> Option<CheckLevel> {
        self.details.get(&rule_id).map(|r| r.level)
    }

    pub fn generation(&self) -> u64 {
        self.session.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_are_not_extracted() {
        assert!(!is_extracted(NOT_FOUND));
        assert!(!is_extracted(PARSE_FAILED));
        assert!(!is_extracted("not-found"));
        assert!(!is_extracted(" parse-failed "));
        assert!(!is_extracted("   "));
        assert!(is_extracted("https://x.com/pump"));
    }

    #[test]
    fn test_page_data_deserialize_with_sentinel_defaults() {
        let page: PageData = serde_json::from_str(
            r#"{"content":"PEPE","contract":{"value":"0xAbC","chain":"bsc"},"pageUrl":"https://gmgn.ai/bsc/token/0xAbC"}"#,
        )
        .unwrap();
        assert_eq!(page.twitter, NOT_FOUND);
        assert_eq!(page.twitter_account(), None);
        assert_eq!(page.contract_target(), Some(("bsc", "0xAbC")));
        assert_eq!(page.contract_address_lower().as_deref(), Some("0xabc"));
    }

    #[test]
    fn test_contract_target_requires_both_members() {
        let page = PageData {
            contract: Some(ContractRef {
                value: Some("So1111".into()),
                chain: None,
            }),
            ..PageData::default()
        };
        assert_eq!(page.contract_target(), None);
        assert!(page.has_any_valid_data());
        assert!(!PageData::default().has_any_valid_data());
    }

    #[test]
    fn test_remote_response_null_data() {
        let resp: RemoteResponse = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(resp.data.is_empty());
        let resp: RemoteResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(resp.data.is_empty());
    }

    #[test]
    fn test_record_display_columns_accept_null() {
        let token: TokenRecord = serde_json::from_value(serde_json::json!({
            "chain_name": null, "token_symbol": null, "token_address": "So1", "market_cap": null
        }))
        .unwrap();
        assert_eq!(token.token_symbol, "");
        assert_eq!(token.chain_name, "");

        let modification: ModificationRecord = serde_json::from_value(serde_json::json!({
            "modification_log": "a -> b", "gmt_modify": null
        }))
        .unwrap();
        assert_eq!(modification.modify_type, "");

        assert!(serde_json::from_value::<TokenRecord>(serde_json::json!({"token_address": null})).is_err());
        assert!(serde_json::from_value::<ModificationRecord>(serde_json::json!({"modify_type": "x"})).is_err());
    }

    #[test]
    fn test_rule_id_serializes_camel_case() {
        let json = serde_json::to_string(&RuleId::CheckCreatorTokens).unwrap();
        assert_eq!(json, "\"checkCreatorTokens\"");
        assert_eq!(RuleId::CheckTwitterModifications.category(), Category::Modifications);
    }

    #[test]
    fn test_category_page_sizes() {
        assert_eq!(Category::Tokens.page_size(), 5);
        assert_eq!(Category::Creator.page_size(), 5);
        assert_eq!(Category::Modifications.page_size(), 3);
        assert_eq!("creator".parse::<Category>().unwrap(), Category::Creator);
        assert!("wallets".parse::<Category>().is_err());
    }
}
