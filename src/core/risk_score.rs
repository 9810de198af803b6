//! Risk Classification Module
//!
//! Fixed, non-configurable classifiers for the report statistics:
//! - Token history: how many launched tokens ever passed the high-value mark
//! - Modification history: any suspicious edit is high risk
//!
//! Token rule, checked in order:
//! 1. `total > 0 && high_value == 0` → high risk (every launch died)
//! 2. `high_value == 1`              → medium risk
//! 3. `high_value > 1`               → low risk
//! 4. otherwise                      → neutral

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::types::TokenRecord;
use crate::utils::constants::HIGH_VALUE_MARKET_CAP;

lazy_static! {
    /// Leading decimal number, the way lenient float parsing reads it
    static ref LEADING_NUMBER: Regex =
        Regex::new(r"^\s*[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").expect("valid regex");
}

/// Risk class attached to a statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskStyle {
    HighRisk,
    MediumRisk,
    LowRisk,
    Neutral,
}

impl RiskStyle {
    /// CSS class used by the report, empty for neutral
    pub fn css_class(&self) -> &'static str {
        match self {
            RiskStyle::HighRisk => "high-risk",
            RiskStyle::MediumRisk => "medium-risk",
            RiskStyle::LowRisk => "low-risk",
            RiskStyle::Neutral => "",
        }
    }
}

pub fn token_risk(total_tokens: usize, high_value_tokens: usize) -> RiskStyle {
    if total_tokens > 0 && high_value_tokens == 0 {
        RiskStyle::HighRisk
    } else if high_value_tokens == 1 {
        RiskStyle::MediumRisk
    } else if high_value_tokens > 1 {
        RiskStyle::LowRisk
    } else {
        RiskStyle::Neutral
    }
}

pub fn modification_risk(total_modifications: usize) -> RiskStyle {
    if total_modifications > 0 {
        RiskStyle::HighRisk
    } else {
        RiskStyle::Neutral
    }
}

/// Market cap as a number: JSON numbers, or strings with a leading number
pub fn parse_market_cap(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => LEADING_NUMBER
            .find(s)
            .and_then(|m| m.as_str().trim().parse::<f64>().ok()),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

pub fn is_high_value(record: &TokenRecord) -> bool {
    parse_market_cap(&record.market_cap).is_some_and(|cap| cap > HIGH_VALUE_MARKET_CAP)
}

pub fn count_high_value(records: &[TokenRecord]) -> usize {
    records.iter().filter(|r| is_high_value(r)).count()
}
