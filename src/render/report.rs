//! Report markup
//!
//! Sections are built once per check by the engine and stored in
//! `CheckResult::details`; `render` stitches them together under the summary
//! card in display order.

use crate::core::risk_score::{count_high_value, modification_risk, token_risk};
use crate::core::rules::rule;
use crate::core::session::{AnalysisSession, RecordSet};
use crate::models::errors::AppError;
use crate::models::types::{is_extracted, AnalysisResult, Category, PageData, RuleId};
use crate::render::pagination::PaginationState;
use crate::render::stats::{render_stats, stat_item};
use crate::render::table::{render_pagination, render_rows, table_class, table_headers};
use crate::utils::constants::{CREATOR_HISTORY_CAP, TWITTER_PROFILE_PREFIX};
use crate::utils::html::escape_html;

fn section_title(category: Category) -> String {
    let name = rule(category.rule()).name;
    match category {
        Category::Creator => format!("{} (latest {} records at most)", name, CREATOR_HISTORY_CAP),
        _ => name.to_string(),
    }
}

/// Fixed panel for a category without records
pub fn render_empty_section(category: Category) -> String {
    format!(
        r#"<div class="section-card"><h3 class="section-title">{}</h3><div class="stats-grid no-data"><div class="stat-item"><span class="stat-value">No records found</span></div></div></div>"#,
        section_title(category)
    )
}

/// Statistics, first page of the table and pagination for one category
pub fn render_section(session: &AnalysisSession, category: Category) -> String {
    let records = session.records(category);
    if records.is_empty() {
        return render_empty_section(category);
    }

    let state = PaginationState::for_category(category, records.len());
    let table_style = match category {
        Category::Modifications => r#" style="table-layout: fixed; width: 100%;""#,
        _ => "",
    };

    format!(
        concat!(
            r#"<div class="section-card"><h3 class="section-title">{title}</h3>"#,
            r#"<div class="stats-grid warning-bg">{stats}</div>"#,
            r#"<div class="table-container" data-total-items="{total}" data-page-size="{size}" data-type="{cat}">"#,
            r#"<table class="{class}"{style}><thead><tr>{headers}</tr></thead><tbody>{rows}</tbody></table>"#,
            r#"{pagination}</div></div>"#,
        ),
        title = section_title(category),
        stats = render_stats(records),
        total = state.total_items,
        size = state.page_size,
        cat = category.as_str(),
        class = table_class(category),
        style = table_style,
        headers = table_headers(category),
        rows = render_rows(session, category, state.window()),
        pagination = render_pagination(category, &state),
    )
}

/// Error card, `message` is escaped
pub fn error_panel(message: &str) -> String {
    format!(
        r#"<div class="section-card error-section"><h3 class="section-title">Error</h3><div class="error-message">{}</div></div>"#,
        escape_html(message)
    )
}

/// Cross-section totals over every record of the session
pub fn summary_card(session: &AnalysisSession) -> String {
    let token_totals = |category| match session.records(category) {
        RecordSet::Tokens(tokens) => (tokens.len(), count_high_value(tokens)),
        RecordSet::Modifications(_) => (0, 0),
    };
    let (creator_total, creator_high) = token_totals(Category::Creator);
    let (twitter_total, twitter_high) = token_totals(Category::Tokens);
    let modifications = session.len(Category::Modifications);

    let items = [
        stat_item(
            &format!("Creator launches (latest {} at most):", CREATOR_HISTORY_CAP),
            &creator_total.to_string(),
            "",
        ),
        stat_item(
            "Creator tokens with market cap &gt; $10000:",
            &creator_high.to_string(),
            token_risk(creator_total, creator_high).css_class(),
        ),
        stat_item("Twitter launches:", &twitter_total.to_string(), ""),
        stat_item(
            "Twitter tokens with market cap &gt; $10000:",
            &twitter_high.to_string(),
            token_risk(twitter_total, twitter_high).css_class(),
        ),
        stat_item(
            "Twitter modifications:",
            &modifications.to_string(),
            modification_risk(modifications).css_class(),
        ),
    ];

    format!(
        r#"<div class="section-card summary-card"><h3 class="section-title">Risk summary</h3><div class="stats-grid warning-bg">{}</div></div>"#,
        items.concat()
    )
}

/// Full report: summary card, then each check's section in display order
pub fn render(result: &AnalysisResult) -> String {
    let mut html = String::from(r#"<div class="analysis-results">"#);
    html.push_str(&summary_card(&result.session));

    for rule_id in RuleId::DISPLAY_ORDER {
        if let Some(check) = result.details.get(&rule_id) {
            if !check.details.is_empty() {
                html.push_str(r#"<div class="detail-section">"#);
                html.push_str(&check.details);
                html.push_str("</div>");
            }
        }
    }

    html.push_str("</div>");
    html
}

fn info_row(label: &str, value: &str, monospace: bool) -> String {
    format!(
        r#"<div class="info-row"><div class="info-label">{}</div><div class="info-value{}">{}</div></div>"#,
        label,
        if monospace { " monospace" } else { "" },
        value
    )
}

fn twitter_value(page: &PageData) -> String {
    match page.twitter_account() {
        Some(url) if url.starts_with("https://") => format!(
            r#"<a href="{}" target="_blank" class="twitter-link">{}</a>"#,
            escape_html(url),
            escape_html(&url.replace(TWITTER_PROFILE_PREFIX, "@"))
        ),
        Some(handle) => escape_html(handle),
        None => "-".to_string(),
    }
}

/// Basic contract panel shown above the analysis
pub fn render_contract_info(page: &PageData) -> String {
    let or_dash = |value: Option<&str>| {
        value
            .filter(|v| is_extracted(v))
            .map(escape_html)
            .unwrap_or_else(|| "-".to_string())
    };
    let contract = page.contract.as_ref();

    let rows = [
        info_row("Symbol", &or_dash(Some(page.content.as_str())), false),
        info_row("Chain", &or_dash(contract.and_then(|c| c.chain.as_deref())), false),
        info_row("Contract", &or_dash(contract.and_then(|c| c.value.as_deref())), true),
        info_row("Creator", &or_dash(page.creator.as_ref().map(|c| c.address.as_str())), true),
        info_row("Twitter", &twitter_value(page), false),
    ];

    format!(
        r#"<div class="section-card contract-info"><h3 class="section-title">Contract info</h3><div class="info-grid">{}</div></div>"#,
        rows.concat()
    )
}

/// Placeholder shown while an analysis is in flight
pub fn render_loading() -> String {
    r#"<div class="section-card loading-section"><div class="loading-text"><div class="loading-spinner"></div><span>Analyzing contract, please wait...</span></div></div>"#.to_string()
}

/// Top-level failure, the membership notice when the error is fatal
pub fn render_failure(err: &AppError) -> String {
    let message = if err.is_fatal() {
        "Membership required: activate a membership to view risk data".to_string()
    } else {
        err.message.clone()
    };
    format!(r#"<div class="result-item error">❌ {}</div>"#, escape_html(&message))
}
