//! Pagination state machine and the report view that owns it
//!
//! ```text
//!   page ∈ [1, total_pages]     total_pages = ceil(total_items / page_size)
//!
//!   prev: page - 1, disabled at page 1
//!   next: page + 1, disabled at total_pages
//! ```
//!
//! A transition re-renders only the table body of its category. No wraparound.

use serde::Serialize;
use std::collections::HashMap;
use std::ops::Range;
use std::str::FromStr;
use tracing::{debug, error, info, warn};

use crate::core::session::AnalysisSession;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{AnalysisResult, Category};
use crate::render::report::render;
use crate::render::table::render_rows;

/// Page-turn direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Prev,
    Next,
}

impl FromStr for Direction {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "prev" => Ok(Direction::Prev),
            "next" => Ok(Direction::Next),
            other => Err(AppError::invalid_config(format!("Unknown direction: {}", other))),
        }
    }
}

/// View state of one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
}

impl PaginationState {
    pub fn new(page_size: usize, total_items: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_items,
        }
    }

    pub fn for_category(category: Category, total_items: usize) -> Self {
        Self::new(category.page_size(), total_items)
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    pub fn prev_disabled(&self) -> bool {
        self.current_page <= 1
    }

    pub fn next_disabled(&self) -> bool {
        self.current_page >= self.total_pages()
    }

    /// Visible item range of the current page
    pub fn window(&self) -> Range<usize> {
        let start = (self.current_page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    /// State after a transition, `None` when that button is disabled
    pub fn turned(&self, direction: Direction) -> Option<Self> {
        let current_page = match direction {
            Direction::Prev if !self.prev_disabled() => self.current_page - 1,
            Direction::Next if !self.next_disabled() => self.current_page + 1,
            _ => return None,
        };
        Some(Self {
            current_page,
            ..*self
        })
    }
}

/// Re-rendered table body after a page turn
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageUpdate {
    pub category: Category,
    pub state: PaginationState,
    pub body_html: String,
}

/// Apply one transition against the session's records
pub fn page_turn(
    session: &AnalysisSession,
    category: Category,
    state: &PaginationState,
    direction: Direction,
) -> Option<PageUpdate> {
    let Some(next) = state.turned(direction) else {
        debug!("Page turn {:?} on {} ignored at page {}", direction, category.as_str(), state.current_page);
        return None;
    };

    let window = next.window();
    if window.start >= session.len(category) {
        error!(
            "❌ Page {} of {} out of range ({} records)",
            next.current_page,
            category.as_str(),
            session.len(category)
        );
        return None;
    }

    Some(PageUpdate {
        category,
        state: next,
        body_html: render_rows(session, category, window),
    })
}

/// The report currently on screen and its per-table pagination
#[derive(Debug, Default)]
pub struct ReportView {
    result: Option<AnalysisResult>,
    pages: HashMap<Category, PaginationState>,
}

impl ReportView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `result`; a result older than the one shown is dropped
    pub fn install(&mut self, result: AnalysisResult) -> bool {
        if let Some(current) = &self.result {
            if result.generation() < current.generation() {
                warn!(
                    "⏭️ Dropping stale analysis (generation {} < {})",
                    result.generation(),
                    current.generation()
                );
                return false;
            }
        }

        self.pages = [Category::Tokens, Category::Modifications, Category::Creator]
            .into_iter()
            .filter_map(|category| {
                let total = result.session.len(category);
                (total > 0).then(|| (category, PaginationState::for_category(category, total)))
            })
            .collect();

        info!("🖼️ Showing analysis generation {}", result.generation());
        self.result = Some(result);
        true
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn generation(&self) -> Option<u64> {
        self.result.as_ref().map(|r| r.generation())
    }

    pub fn state(&self, category: Category) -> Option<PaginationState> {
        self.pages.get(&category).copied()
    }

    /// Full report markup
    pub fn markup(&self) -> Option<String> {
        self.result.as_ref().map(render)
    }

    /// Handle a click on a prev/next button of `category`
    pub fn on_page_turn(&mut self, category: Category, direction: Direction) -> Option<PageUpdate> {
        let result = self.result.as_ref()?;
        let state = self.pages.get(&category)?;
        let update = page_turn(&result.session, category, state, direction)?;
        self.pages.insert(category, update.state);
        Some(update)
    }
}
