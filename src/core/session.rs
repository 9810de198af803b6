//! Per-run analysis session
//!
//! One session per `analyze` call. It owns the record snapshots that feed the
//! statistics, the summary card and pagination, so nothing is shared between
//! runs. The generation number orders sessions from the same engine.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::types::{Category, ModificationRecord, TokenRecord};

/// Borrowed view of one category's records
#[derive(Debug, Clone, Copy)]
pub enum RecordSet<'a> {
    Tokens(&'a [TokenRecord]),
    Modifications(&'a [ModificationRecord]),
}

impl RecordSet<'_> {
    pub fn len(&self) -> usize {
        match self {
            RecordSet::Tokens(records) => records.len(),
            RecordSet::Modifications(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSession {
    pub id: Uuid,
    pub generation: u64,
    pub started_at: DateTime<Utc>,
    /// Lower-cased address of the token being viewed
    pub current_contract: Option<String>,
    pub tokens: Vec<TokenRecord>,
    pub modifications: Vec<ModificationRecord>,
    pub creator: Vec<TokenRecord>,
}

impl AnalysisSession {
    pub fn new(generation: u64, current_contract: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            generation,
            started_at: Utc::now(),
            current_contract: current_contract.map(|c| c.to_lowercase()),
            tokens: Vec::new(),
            modifications: Vec::new(),
            creator: Vec::new(),
        }
    }

    pub fn records(&self, category: Category) -> RecordSet<'_> {
        match category {
            Category::Tokens => RecordSet::Tokens(&self.tokens),
            Category::Creator => RecordSet::Tokens(&self.creator),
            Category::Modifications => RecordSet::Modifications(&self.modifications),
        }
    }

    pub fn len(&self, category: Category) -> usize {
        self.records(category).len()
    }

    /// Replace one token category wholesale
    pub fn set_token_records(&mut self, category: Category, records: Vec<TokenRecord>) {
        match category {
            Category::Creator => self.creator = records,
            _ => self.tokens = records,
        }
    }

    pub fn set_modification_records(&mut self, records: Vec<ModificationRecord>) {
        self.modifications = records;
    }

    pub fn clear_records(&mut self) {
        self.tokens.clear();
        self.modifications.clear();
        self.creator.clear();
    }

    /// Token row belongs to the contract being viewed
    pub fn is_current_contract(&self, token_address: &str) -> bool {
        self.current_contract
            .as_deref()
            .is_some_and(|current| current == token_address.to_lowercase())
    }
}
