//! Cell formatters

use serde_json::Value;

use crate::core::risk_score::parse_market_cap;
use crate::utils::constants::{
    contract_link_template, modification_label, CURRENCY_SYMBOL, MARKET_CAP_THOUSANDS,
};
use crate::utils::html::escape_html;

/// `$10.50K`, `$500.00`, or `-` when the value is not numeric
pub fn format_market_cap(value: &Value) -> String {
    match parse_market_cap(value) {
        None => "-".to_string(),
        Some(cap) if cap >= MARKET_CAP_THOUSANDS => {
            format!("{}{:.2}K", CURRENCY_SYMBOL, cap / MARKET_CAP_THOUSANDS)
        }
        Some(cap) => format!("{}{:.2}", CURRENCY_SYMBOL, cap),
    }
}

/// Explorer link for Solana and BNB Chain, plain escaped text otherwise
pub fn contract_link(chain_name: &str, address: &str) -> String {
    let address = escape_html(address);
    match contract_link_template(chain_name) {
        Some(base) => format!(
            r#"<a href="{base}{address}" target="_blank" class="contract-link">{address}</a>"#
        ),
        None => address,
    }
}

/// Display label for a modification type, raw type when unknown
pub fn modification_type_label(modify_type: &str) -> String {
    modification_label(modify_type)
        .map(str::to_string)
        .unwrap_or_else(|| escape_html(modify_type))
}

/// Escaped modification log with line breaks kept
pub fn modification_log_html(log: &str) -> String {
    escape_html(log).replace('\n', "<br>")
}
