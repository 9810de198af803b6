//! Table bodies and pagination chrome

use std::ops::Range;

use crate::core::session::{AnalysisSession, RecordSet};
use crate::models::types::Category;
use crate::render::format::{
    contract_link, format_market_cap, modification_log_html, modification_type_label,
};
use crate::render::pagination::PaginationState;
use crate::utils::html::escape_html;

pub fn table_headers(category: Category) -> &'static str {
    match category {
        Category::Modifications => {
            r#"<th>Type</th><th>Change</th><th style="min-width: 150px">Time</th>"#
        }
        Category::Tokens | Category::Creator => {
            "<th>Chain</th><th>Symbol</th><th>Contract</th><th>Market cap</th>"
        }
    }
}

pub fn table_class(category: Category) -> &'static str {
    match category {
        Category::Modifications => "modifications-table",
        Category::Tokens | Category::Creator => "tokens-table",
    }
}

/// Rows for `window`, clipped to the records the session holds
pub fn render_rows(session: &AnalysisSession, category: Category, window: Range<usize>) -> String {
    let records = session.records(category);
    let end = window.end.min(records.len());
    let start = window.start.min(end);
    let mut rows = String::new();

    match records {
        RecordSet::Tokens(tokens) => {
            for token in &tokens[start..end] {
                let row_class = if session.is_current_contract(&token.token_address) {
                    r#" class="current-contract""#
                } else {
                    ""
                };
                rows.push_str(&format!(
                    r#"<tr{}><td>{}</td><td>{}</td><td class="monospace">{}</td><td>{}</td></tr>"#,
                    row_class,
                    escape_html(&token.chain_name),
                    escape_html(&token.token_symbol),
                    contract_link(&token.chain_name, &token.token_address),
                    format_market_cap(&token.market_cap),
                ));
            }
        }
        RecordSet::Modifications(modifications) => {
            for item in &modifications[start..end] {
                rows.push_str(&format!(
                    r#"<tr><td style="width: 15%">{}</td><td style="width: 65%; word-break: break-all; white-space: pre-wrap;" class="modification-content">{}</td><td style="width: 20%">{}</td></tr>"#,
                    modification_type_label(&item.modify_type),
                    modification_log_html(&item.modification_log),
                    escape_html(&item.gmt_modify),
                ));
            }
        }
    }

    rows
}

/// Prev/next buttons and the page indicator for `state`
pub fn render_pagination(category: Category, state: &PaginationState) -> String {
    let disabled = |off: bool| if off { " disabled" } else { "" };
    format!(
        r#"<div class="pagination"><button class="page-btn prev-btn" data-direction="prev" data-type="{cat}"{prev}>Previous</button><span class="page-info">Page <span class="current-page">{page}</span>/{total}</span><button class="page-btn next-btn" data-direction="next" data-type="{cat}"{next}>Next</button></div>"#,
        cat = category.as_str(),
        prev = disabled(state.prev_disabled()),
        next = disabled(state.next_disabled()),
        page = state.current_page,
        total = state.total_pages(),
    )
}
