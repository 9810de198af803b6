//! Rule Orchestrator
//!
//! One `analyze` call per page view:
//! 1. Plan: Twitter checks need a Twitter account, the creator check needs
//!    both contract chain and address
//! 2. Dispatch every planned remote call at once and wait for all of them
//! 3. Any entitlement failure aborts the run with that error
//! 4. Otherwise fold the settled calls into an `AnalysisResult`, per-check
//!    failures become `error` results
//!
//! If folding itself fails (a remote row that cannot be decoded) the whole
//! report degrades to three `error` results.

use futures_util::future::{join_all, BoxFuture};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::core::rules::{
    completion_message, rule, MSG_EVALUATION_FAILED, MSG_NO_TWITTER, MSG_RULE_FAILED,
};
use crate::core::session::AnalysisSession;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{
    AnalysisResult, Category, CheckLevel, CheckResult, ModificationRecord, PageData,
    RemoteResponse, RuleId, TokenRecord,
};
use crate::providers::risk_api::RiskSource;
use crate::render::report::{error_panel, render_empty_section, render_section};

type Settled = Vec<(RuleId, AppResult<RemoteResponse>)>;

/// Runs the risk checks for a page against a [`RiskSource`]
pub struct RuleEngine<S> {
    source: S,
    generation: AtomicU64,
}

impl<S: RiskSource> RuleEngine<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            generation: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Generation stamped on the most recently started analysis
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Run every applicable check for `page`
    ///
    /// Only the entitlement error is returned as `Err`; every other failure is
    /// reported inside the result.
    pub async fn analyze(&self, page: &PageData) -> AppResult<AnalysisResult> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let start = Instant::now();
        let twitter = page.twitter_account();

        let mut plan: Vec<(RuleId, BoxFuture<'_, AppResult<RemoteResponse>>)> = Vec::new();
        if let Some(account) = twitter {
            plan.push((RuleId::CheckTwitterTokens, self.source.fetch_twitter_tokens(account)));
            plan.push((
                RuleId::CheckTwitterModifications,
                self.source.fetch_twitter_modifications(account),
            ));
        }
        if let Some((chain, address)) = page.contract_target() {
            plan.push((
                RuleId::CheckCreatorTokens,
                self.source.fetch_creator_tokens(chain, address),
            ));
        }

        info!(
            "📡 Analysis #{}: dispatching {} checks (twitter: {}, contract: {})",
            generation,
            plan.len(),
            twitter.is_some(),
            page.contract_target().is_some()
        );

        let (ids, calls): (Vec<RuleId>, Vec<_>) = plan.into_iter().unzip();
        let mut settled: Settled = ids.into_iter().zip(join_all(calls).await).collect();

        if let Some(idx) = settled
            .iter()
            .position(|(_, outcome)| outcome.as_ref().is_err_and(AppError::is_fatal))
        {
            let (rule_id, outcome) = settled.swap_remove(idx);
            if let Err(err) = outcome {
                warn!("🔒 {} aborted the analysis: {}", rule_id, err);
                return Err(err);
            }
        }

        let mut session = AnalysisSession::new(generation, page.contract_address_lower());
        let checks = match fold_results(&mut session, settled, twitter.is_none()) {
            Ok(checks) => checks,
            Err(err) => {
                error!("❌ Analysis #{} evaluation failed: {}", generation, err);
                session.clear_records();
                degraded(&err)
            }
        };

        let mut result = AnalysisResult::new(session);
        for (rule_id, check) in checks {
            result.push(rule_id, check);
        }

        info!(
            "📊 Analysis #{} ({}, started {}) done in {:?}: {} checks, {} errors",
            generation,
            result.session.id,
            result.session.started_at.format("%H:%M:%S%.3f"),
            start.elapsed(),
            result.summary.len(),
            result
                .summary
                .iter()
                .filter(|s| s.level == CheckLevel::Error)
                .count()
        );

        Ok(result)
    }
}

/// Settled calls in dispatch order, then the synthesized no-Twitter entries
fn fold_results(
    session: &mut AnalysisSession,
    settled: Settled,
    twitter_absent: bool,
) -> AppResult<Vec<(RuleId, CheckResult)>> {
    let mut checks = Vec::with_capacity(RuleId::ALL.len());

    for (rule_id, outcome) in settled {
        let check = match outcome {
            Ok(response) => process(session, rule_id, response)?,
            Err(err) => {
                warn!("⚠️ {} failed: {}", rule_id, err);
                CheckResult {
                    name: rule(rule_id).name.to_string(),
                    level: CheckLevel::Error,
                    message: MSG_RULE_FAILED.to_string(),
                    details: error_panel(&format!("API request failed: {}", err)),
                }
            }
        };
        checks.push((rule_id, check));
    }

    if twitter_absent {
        for rule_id in RuleId::TWITTER {
            checks.push((
                rule_id,
                CheckResult {
                    name: rule(rule_id).name.to_string(),
                    level: CheckLevel::Info,
                    message: MSG_NO_TWITTER.to_string(),
                    details: render_empty_section(rule_id.category()),
                },
            ));
        }
    }

    Ok(checks)
}

/// Decode one check's payload into the session and render its section
fn process(
    session: &mut AnalysisSession,
    rule_id: RuleId,
    response: RemoteResponse,
) -> AppResult<CheckResult> {
    let category = rule_id.category();
    match category {
        Category::Modifications => {
            session.set_modification_records(decode::<ModificationRecord>(rule_id, &response.data)?)
        }
        Category::Tokens | Category::Creator => {
            session.set_token_records(category, decode::<TokenRecord>(rule_id, &response.data)?)
        }
    }
    debug!("{}: {} records", rule_id, session.len(category));

    Ok(CheckResult {
        name: rule(rule_id).name.to_string(),
        level: CheckLevel::Info,
        message: completion_message(rule_id).to_string(),
        details: render_section(session, category),
    })
}

fn decode<T: DeserializeOwned>(rule_id: RuleId, rows: &[Value]) -> AppResult<Vec<T>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            T::deserialize(row).map_err(|e| {
                AppError::invalid_record(format!("{} row {}: {}", rule_id, i, e))
            })
        })
        .collect()
}

/// All three checks as `error`, sharing one panel
fn degraded(err: &AppError) -> Vec<(RuleId, CheckResult)> {
    let panel = error_panel(&format!("Evaluation failed: {}", err));
    RuleId::ALL
        .into_iter()
        .map(|rule_id| {
            (
                rule_id,
                CheckResult {
                    name: rule(rule_id).name.to_string(),
                    level: CheckLevel::Error,
                    message: MSG_EVALUATION_FAILED.to_string(),
                    details: panel.clone(),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::ContractRef;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Scripted {
        tokens: Option<AppResult<RemoteResponse>>,
        modifications: Option<AppResult<RemoteResponse>>,
        creator: Option<AppResult<RemoteResponse>>,
        calls: Mutex<Vec<&'static str>>,
    }

    fn take(slot: &Option<AppResult<RemoteResponse>>) -> AppResult<RemoteResponse> {
        match slot {
            Some(Ok(resp)) => Ok(resp.clone()),
            Some(Err(e)) => Err(AppError::new(e.code, e.message.clone())),
            None => Ok(RemoteResponse::empty()),
        }
    }

    #[async_trait]
    impl RiskSource for Scripted {
        async fn fetch_twitter_tokens(&self, _twitter: &str) -> AppResult<RemoteResponse> {
            self.calls.lock().unwrap().push("tokens");
            take(&self.tokens)
        }

        async fn fetch_twitter_modifications(&self, _twitter: &str) -> AppResult<RemoteResponse> {
            self.calls.lock().unwrap().push("modifications");
            take(&self.modifications)
        }

        async fn fetch_creator_tokens(&self, _chain: &str, _address: &str) -> AppResult<RemoteResponse> {
            self.calls.lock().unwrap().push("creator");
            take(&self.creator)
        }
    }

    fn page(twitter: &str, contract: Option<(&str, &str)>) -> PageData {
        PageData {
            content: "PEPE".into(),
            twitter: twitter.into(),
            contract: contract.map(|(chain, value)| ContractRef {
                value: Some(value.into()),
                chain: Some(chain.into()),
            }),
            ..PageData::default()
        }
    }

    #[tokio::test]
    async fn test_sentinel_twitter_skips_twitter_calls() {
        for sentinel in ["not-found", "parse-failed"] {
            let engine = RuleEngine::new(Scripted::default());
            let result = engine
                .analyze(&page(sentinel, Some(("sol", "So1"))))
                .await
                .unwrap();

            assert_eq!(*engine.source().calls.lock().unwrap(), vec!["creator"], "{}", sentinel);
            assert_eq!(result.summary.len(), 3);
            assert_eq!(result.summary[0].rule_id, RuleId::CheckCreatorTokens);
            assert_eq!(result.summary[1].message, MSG_NO_TWITTER);
            assert_eq!(result.summary[2].message, MSG_NO_TWITTER);
        }
    }

    #[tokio::test]
    async fn test_undecodable_row_degrades_everything() {
        let engine = RuleEngine::new(Scripted {
            tokens: Some(Ok(RemoteResponse {
                data: vec![json!({"chain_name": "Solana", "token_address": "a"}), json!(42)],
            })),
            ..Scripted::default()
        });
        let result = engine
            .analyze(&page("https://x.com/pepe", Some(("sol", "So1"))))
            .await
            .unwrap();

        assert_eq!(result.summary.len(), 3);
        assert!(result.summary.iter().all(|s| s.level == CheckLevel::Error));
        assert!(result.summary.iter().all(|s| s.message == MSG_EVALUATION_FAILED));
        assert!(result.details[&RuleId::CheckCreatorTokens].details.contains("Evaluation failed"));
        assert_eq!(result.session.len(Category::Tokens), 0);
    }

    #[tokio::test]
    async fn test_null_display_column_keeps_sibling_checks() {
        let engine = RuleEngine::new(Scripted {
            tokens: Some(Ok(RemoteResponse {
                data: vec![json!({
                    "chain_name": "Solana", "token_symbol": null, "token_address": "a", "market_cap": 100
                })],
            })),
            creator: Some(Ok(RemoteResponse {
                data: vec![json!({"chain_name": "Solana", "token_symbol": "OLD", "token_address": "b"})],
            })),
            ..Scripted::default()
        });
        let result = engine
            .analyze(&page("https://x.com/pepe", Some(("sol", "So1"))))
            .await
            .unwrap();

        assert!(result.summary.iter().all(|s| s.level == CheckLevel::Info));
        assert_eq!(result.session.len(Category::Tokens), 1);
        assert_eq!(result.session.len(Category::Creator), 1);
        assert!(result.details[&RuleId::CheckCreatorTokens].details.contains("OLD"));
    }

    #[tokio::test]
    async fn test_generations_increase() {
        let engine = RuleEngine::new(Scripted::default());
        let first = engine.analyze(&PageData::default()).await.unwrap();
        let second = engine.analyze(&PageData::default()).await.unwrap();
        assert!(second.generation() > first.generation());
        assert_eq!(engine.latest_generation(), second.generation());
        assert_ne!(first.session.id, second.session.id);
    }
}
