//! Per-section statistics
//!
//! Pure over a record slice: the same records always give the same numbers
//! and the same markup.

use crate::core::risk_score::{count_high_value, modification_risk, token_risk, RiskStyle};
use crate::core::session::RecordSet;
use crate::models::types::{ModificationRecord, TokenRecord};
use crate::render::format::modification_type_label;
use crate::utils::html::escape_html;

#[derive(Debug, Clone, PartialEq)]
pub struct TokenStats {
    pub total: usize,
    pub high_value: usize,
    /// Count per chain, in first-appearance order
    pub chains: Vec<(String, usize)>,
    pub risk: RiskStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModificationStats {
    pub total: usize,
    /// Count per modification type, in first-appearance order
    pub types: Vec<(String, usize)>,
    pub risk: RiskStyle,
}

fn tally<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for key in keys {
        match counts.iter_mut().find(|(k, _)| k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key.to_string(), 1)),
        }
    }
    counts
}

pub fn token_stats(records: &[TokenRecord]) -> TokenStats {
    let total = records.len();
    let high_value = count_high_value(records);
    TokenStats {
        total,
        high_value,
        chains: tally(records.iter().map(|r| r.chain_name.as_str())),
        risk: token_risk(total, high_value),
    }
}

pub fn modification_stats(records: &[ModificationRecord]) -> ModificationStats {
    let total = records.len();
    ModificationStats {
        total,
        types: tally(records.iter().map(|r| r.modify_type.as_str())),
        risk: modification_risk(total),
    }
}

pub(crate) fn stat_item(label: &str, value: &str, class: &str) -> String {
    let class = if class.is_empty() {
        "stat-value".to_string()
    } else {
        format!("stat-value {}", class)
    };
    format!(
        r#"<div class="stat-item"><span class="stat-label">{}</span><span class="{}">{}</span></div>"#,
        label, class, value
    )
}

pub fn render_stats(records: RecordSet<'_>) -> String {
    let mut html = String::new();

    match records {
        RecordSet::Tokens(tokens) => {
            let stats = token_stats(tokens);
            html.push_str(&stat_item(
                "Tokens with market cap &gt; $10000:",
                &stats.high_value.to_string(),
                stats.risk.css_class(),
            ));
            html.push_str(&stat_item("Total launches:", &stats.total.to_string(), ""));
            for (chain, count) in &stats.chains {
                html.push_str(&stat_item(
                    &format!("{}:", escape_html(chain)),
                    &format!("{} tokens", count),
                    "",
                ));
            }
        }
        RecordSet::Modifications(modifications) => {
            let stats = modification_stats(modifications);
            html.push_str(&stat_item(
                "Total modifications:",
                &stats.total.to_string(),
                stats.risk.css_class(),
            ));
            for (kind, count) in &stats.types {
                html.push_str(&stat_item(
                    &format!("{}:", modification_type_label(kind)),
                    &format!("{} times", count),
                    "",
                ));
            }
        }
    }

    html
}
