//! PageData extraction
//!
//! Every field ends up either a real value or a sentinel: a selector that
//! errors gives `"parse-failed"`, a selector or transform with no result gives
//! `"not-found"`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};
use url::Url;

use crate::extract::schema::{ContractSource, FieldId, FieldSpec, Selector};
use crate::extract::sites::{contract_from_path, schema_for_url};
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{is_extracted, ContractRef, CreatorRef, PageData};
use crate::utils::constants::{NOT_FOUND, PARSE_FAILED};

/// A page that selectors can be evaluated against
#[async_trait]
pub trait PageSource: Send + Sync {
    fn page_url(&self) -> &str;

    /// Raw value for `selector`, `None` when nothing matches
    async fn evaluate(&self, selector: &Selector) -> AppResult<Option<String>>;
}

/// Selector results captured from a live page, keyed by [`Selector::key`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapturedPage {
    pub url: String,
    #[serde(default)]
    pub values: HashMap<String, String>,
    /// Selectors whose evaluation threw
    #[serde(default)]
    pub failed: HashSet<String>,
}

impl CapturedPage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, selector: &Selector, value: impl Into<String>) -> Self {
        self.values.insert(selector.key(), value.into());
        self
    }

    pub fn with_failure(mut self, selector: &Selector) -> Self {
        self.failed.insert(selector.key());
        self
    }
}

#[async_trait]
impl PageSource for CapturedPage {
    fn page_url(&self) -> &str {
        &self.url
    }

    async fn evaluate(&self, selector: &Selector) -> AppResult<Option<String>> {
        let key = selector.key();
        if self.failed.contains(&key) {
            return Err(AppError::selector_failed(format!(
                "Selector failed: {}",
                selector.xpath()
            )));
        }
        Ok(self.values.get(&key).cloned())
    }
}

async fn extract_field<P: PageSource + ?Sized>(source: &P, spec: &FieldSpec) -> String {
    match source.evaluate(&spec.selector).await {
        Ok(Some(raw)) => spec.post.apply(&raw).unwrap_or_else(|| NOT_FOUND.to_string()),
        Ok(None) => NOT_FOUND.to_string(),
        Err(e) => {
            warn!("⚠️ {} ({}) failed: {}", spec.label, spec.field.as_str(), e);
            PARSE_FAILED.to_string()
        }
    }
}

/// Extract [`PageData`] using the schema of the page's site
pub async fn extract_page_data<P: PageSource + ?Sized>(source: &P) -> AppResult<PageData> {
    let page_url = source.page_url().to_string();
    let schema = schema_for_url(&page_url)?;
    debug!("Extracting {} with the {} schema", page_url, schema.host);

    let mut page = PageData {
        page_url: page_url.clone(),
        ..PageData::default()
    };

    for spec in &schema.fields {
        let value = extract_field(source, spec).await;
        match spec.field {
            FieldId::Content => page.content = value,
            FieldId::Twitter => page.twitter = value,
            FieldId::Creator => {
                page.creator = value.split_once(':').map(|(chain, address)| CreatorRef {
                    chain: chain.to_string(),
                    address: address.to_string(),
                });
            }
            FieldId::Contract => {
                if let ContractSource::Field { chain } = &schema.contract {
                    page.contract = Some(ContractRef {
                        value: Some(value),
                        chain: Some(chain.to_string()),
                    });
                }
            }
        }
    }

    if schema.contract == ContractSource::UrlPath {
        page.contract = contract_from_path(&Url::parse(&page_url)?);
    }

    info!(
        "🔍 Extracted {}: symbol={}, contract={}, twitter={}",
        schema.host,
        page.content,
        page.contract_target().is_some(),
        is_extracted(&page.twitter)
    );

    Ok(page)
}
