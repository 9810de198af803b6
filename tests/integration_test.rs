//! Integration tests for the analysis pipeline
//!
//! The remote API is replaced by a scripted `RiskSource`, so these cover
//! check planning, settle-all aggregation, rendering and pagination.

use async_trait::async_trait;
use pump_inspector::core::{MSG_NO_TWITTER, MSG_RULE_FAILED};
use pump_inspector::extract::{extract_page_data, CapturedPage, FieldId, SITE_SCHEMAS};
use pump_inspector::models::{Category, ContractRef, ErrorCode, RemoteResponse};
use pump_inspector::render::{Direction, ReportView};
use pump_inspector::{
    render, AnalysisResult, AppError, AppResult, CheckLevel, PageData, RiskSource, RuleEngine,
    RuleId,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Outcome a scripted endpoint returns
#[derive(Clone)]
enum Reply {
    Rows(Vec<Value>),
    Fail(ErrorCode),
    NeedVip,
}

impl Reply {
    fn resolve(&self) -> AppResult<RemoteResponse> {
        match self {
            Reply::Rows(rows) => Ok(RemoteResponse { data: rows.clone() }),
            Reply::Fail(code) => Err(AppError::new(*code, "connection reset")),
            Reply::NeedVip => Err(AppError::need_vip(403)),
        }
    }
}

struct ScriptedSource {
    tokens: Reply,
    modifications: Reply,
    creator: Reply,
    calls: AtomicUsize,
    delay: Duration,
}

impl ScriptedSource {
    fn new() -> Self {
        Self {
            tokens: Reply::Rows(Vec::new()),
            modifications: Reply::Rows(Vec::new()),
            creator: Reply::Rows(Vec::new()),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    async fn answer(&self, reply: &Reply) -> AppResult<RemoteResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        reply.resolve()
    }
}

#[async_trait]
impl RiskSource for ScriptedSource {
    async fn fetch_twitter_tokens(&self, _twitter: &str) -> AppResult<RemoteResponse> {
        self.answer(&self.tokens).await
    }

    async fn fetch_twitter_modifications(&self, _twitter: &str) -> AppResult<RemoteResponse> {
        self.answer(&self.modifications).await
    }

    async fn fetch_creator_tokens(&self, _chain: &str, _address: &str) -> AppResult<RemoteResponse> {
        self.answer(&self.creator).await
    }
}

fn token_rows(n: usize, chain: &str) -> Vec<Value> {
    (0..n)
        .map(|i| {
            json!({
                "chain_name": chain,
                "token_symbol": format!("TK{}", i),
                "token_address": format!("addr{}", i),
                "market_cap": (i as f64) * 5000.0,
            })
        })
        .collect()
}

fn page(twitter: &str, contract: Option<(&str, &str)>) -> PageData {
    PageData {
        content: "PEPE".into(),
        twitter: twitter.into(),
        contract: contract.map(|(chain, address)| ContractRef {
            value: Some(address.into()),
            chain: Some(chain.into()),
        }),
        page_url: "https://gmgn.ai/sol/token/So1".into(),
        ..PageData::default()
    }
}

async fn analyze(source: ScriptedSource, page: &PageData) -> AppResult<AnalysisResult> {
    RuleEngine::new(source).analyze(page).await
}

// ============================================
// Check planning
// ============================================

#[tokio::test]
async fn test_no_twitter_yields_three_entries() {
    let mut source = ScriptedSource::new();
    source.creator = Reply::Rows(token_rows(2, "Solana"));

    let result = analyze(source, &page("not-found", Some(("sol", "So1"))))
        .await
        .unwrap();

    assert_eq!(result.summary.len(), 3);
    assert_eq!(result.summary[0].rule_id, RuleId::CheckCreatorTokens);
    assert_eq!(result.summary[0].level, CheckLevel::Info);
    for entry in &result.summary[1..] {
        assert_eq!(entry.level, CheckLevel::Info);
        assert_eq!(entry.message, MSG_NO_TWITTER);
    }
    assert!(result.details[&RuleId::CheckTwitterTokens]
        .details
        .contains("No records found"));
}

#[tokio::test]
async fn test_contract_without_chain_skips_creator_check() {
    let engine = RuleEngine::new(ScriptedSource::new());
    let mut page = page("https://x.com/pepe", None);
    page.contract = Some(ContractRef {
        value: Some("So1".into()),
        chain: None,
    });

    let result = engine.analyze(&page).await.unwrap();
    assert_eq!(result.summary.len(), 2);
    assert!(!result.details.contains_key(&RuleId::CheckCreatorTokens));
    assert_eq!(engine.source().calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_nothing_applicable() {
    let engine = RuleEngine::new(ScriptedSource::new());
    let result = engine.analyze(&PageData::default()).await.unwrap();

    assert_eq!(engine.source().calls.load(Ordering::SeqCst), 0);
    assert_eq!(result.summary.len(), 2);
    assert!(result.summary.iter().all(|s| s.message == MSG_NO_TWITTER));
}

// ============================================
// Failure handling
// ============================================

#[tokio::test]
async fn test_need_vip_propagates_and_waits_for_all_calls() {
    let mut source = ScriptedSource::new();
    source.creator = Reply::NeedVip;
    source.tokens = Reply::Rows(token_rows(3, "Solana"));
    source.delay = Duration::from_millis(20);

    let engine = RuleEngine::new(source);
    let err = engine
        .analyze(&page("https://x.com/pepe", Some(("sol", "So1"))))
        .await
        .unwrap_err();

    assert!(err.is_fatal());
    assert_eq!(err.code, ErrorCode::ApiNeedVip);
    assert_eq!(engine.source().calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_recoverable_failure_marks_only_that_check() {
    let mut source = ScriptedSource::new();
    source.tokens = Reply::Fail(ErrorCode::ApiTransport);
    source.modifications = Reply::Rows(vec![json!({
        "modify_type": "delete_tweet",
        "modification_log": "gm",
        "gmt_modify": "2024-06-01 10:00:00"
    })]);

    let result = analyze(source, &page("https://x.com/pepe", Some(("sol", "So1"))))
        .await
        .unwrap();

    assert_eq!(result.summary.len(), 3);
    assert_eq!(result.level_of(RuleId::CheckTwitterTokens), Some(CheckLevel::Error));
    assert_eq!(result.level_of(RuleId::CheckTwitterModifications), Some(CheckLevel::Info));
    assert_eq!(result.level_of(RuleId::CheckCreatorTokens), Some(CheckLevel::Info));

    let failed = &result.details[&RuleId::CheckTwitterTokens];
    assert_eq!(failed.message, MSG_RULE_FAILED);
    assert!(failed.details.contains("API request failed"));
}

#[tokio::test]
async fn test_undecodable_payload_degrades_whole_report() {
    let mut source = ScriptedSource::new();
    source.modifications = Reply::Rows(vec![json!({"modify_type": 7})]);
    source.creator = Reply::Rows(token_rows(4, "Solana"));

    let result = analyze(source, &page("https://x.com/pepe", Some(("sol", "So1"))))
        .await
        .unwrap();

    assert_eq!(result.summary.len(), 3);
    assert!(result.summary.iter().all(|s| s.level == CheckLevel::Error));
    let panels: Vec<&str> = RuleId::ALL
        .iter()
        .map(|id| result.details[id].details.as_str())
        .collect();
    assert!(panels.iter().all(|p| *p == panels[0]));
    assert!(panels[0].contains("Evaluation failed"));
    assert_eq!(result.session.len(Category::Creator), 0);
}

// ============================================
// Rendering & pagination
// ============================================

#[tokio::test]
async fn test_twelve_tokens_paginate_in_three_pages() {
    let mut source = ScriptedSource::new();
    source.tokens = Reply::Rows(token_rows(12, "Solana"));

    let result = analyze(source, &page("https://x.com/pepe", Some(("sol", "ADDR11"))))
        .await
        .unwrap();

    let section = &result.details[&RuleId::CheckTwitterTokens].details;
    assert!(section.contains(r#"<span class="current-page">1</span>/3"#));
    assert!(section.contains(r#"data-direction="prev" data-type="tokens" disabled"#));

    let mut view = ReportView::new();
    assert!(view.install(result));

    let page2 = view.on_page_turn(Category::Tokens, Direction::Next).unwrap();
    assert_eq!(page2.state.current_page, 2);
    assert_eq!(page2.body_html.matches("<tr").count(), 5);
    assert!(page2.body_html.contains("TK5"));

    let page3 = view.on_page_turn(Category::Tokens, Direction::Next).unwrap();
    assert_eq!(page3.body_html.matches("<tr").count(), 2);
    assert!(page3.state.next_disabled());
    // addr11 is the contract being viewed
    assert!(page3.body_html.contains(r#"<tr class="current-contract">"#));

    assert!(view.on_page_turn(Category::Tokens, Direction::Next).is_none());
    assert_eq!(view.state(Category::Tokens).unwrap().current_page, 3);

    let back = view.on_page_turn(Category::Tokens, Direction::Prev).unwrap();
    assert_eq!(back.state.current_page, 2);
}

#[tokio::test]
async fn test_categories_paginate_independently() {
    let mut source = ScriptedSource::new();
    source.tokens = Reply::Rows(token_rows(6, "Solana"));
    source.creator = Reply::Rows(token_rows(7, "BNB Chain"));

    let result = analyze(source, &page("https://x.com/pepe", Some(("bsc", "0x1"))))
        .await
        .unwrap();
    let mut view = ReportView::new();
    view.install(result);

    view.on_page_turn(Category::Creator, Direction::Next).unwrap();
    assert_eq!(view.state(Category::Creator).unwrap().current_page, 2);
    assert_eq!(view.state(Category::Tokens).unwrap().current_page, 1);
    assert!(view.state(Category::Modifications).is_none());
    assert!(view.on_page_turn(Category::Modifications, Direction::Next).is_none());
}

#[tokio::test]
async fn test_report_order_and_summary_card() {
    let mut source = ScriptedSource::new();
    source.tokens = Reply::Rows(token_rows(3, "Solana"));
    source.creator = Reply::Rows(token_rows(1, "Solana"));

    let result = analyze(source, &page("https://x.com/pepe", Some(("sol", "So1"))))
        .await
        .unwrap();
    let html = render(&result);

    let creator = html.find("Creator token history").unwrap();
    let modifications = html.find("Twitter modification history").unwrap();
    let tokens = html.find("Twitter token history").unwrap();
    assert!(creator < modifications && modifications < tokens);
    assert!(html.contains("summary-card"));
    // market caps 0, 5000, 10000: none above the threshold
    assert!(html.contains(r#"<span class="stat-value high-risk">0</span>"#));
}

#[tokio::test]
async fn test_stale_result_is_rejected() {
    let engine = RuleEngine::new(ScriptedSource::new());
    let target = page("https://x.com/pepe", None);

    let older = engine.analyze(&target).await.unwrap();
    let newer = engine.analyze(&target).await.unwrap();
    let newer_generation = newer.generation();

    let mut view = ReportView::new();
    assert!(view.install(newer));
    assert!(!view.install(older));
    assert_eq!(view.generation(), Some(newer_generation));
    assert!(view.markup().is_some());
}

// ============================================
// Extraction into analysis
// ============================================

#[tokio::test]
async fn test_captured_page_feeds_the_engine() {
    let gmgn = SITE_SCHEMAS.iter().find(|s| s.host == "gmgn.ai").unwrap();
    let twitter = gmgn.field(FieldId::Twitter).unwrap().selector.clone();
    let snapshot = CapturedPage::new("https://gmgn.ai/sol/token/So1abc")
        .with_value(&twitter, "https://x.com/search?q=So1abc");

    let data = extract_page_data(&snapshot).await.unwrap();
    assert_eq!(data.twitter, "not-found");

    let engine = RuleEngine::new(ScriptedSource::new());
    let result = engine.analyze(&data).await.unwrap();
    assert_eq!(engine.source().calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.summary.len(), 3);
}
