use super::alerts::ExpiryAlert;
use super::domain::{CaseId, VisaCase};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Source of the full case collection.
///
/// A load is one idempotent read with no side effects, so callers may retry it freely.
/// Implementations either return every case or fail; partial results are not a thing.
#[async_trait]
pub trait CaseRepository: Send + Sync {
    async fn load_cases(&self) -> Result<Vec<VisaCase>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("failed to read case data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid case CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid case record on line {line}: {field} {detail}")]
    InvalidRecord {
        line: u64,
        field: &'static str,
        detail: String,
    },
    #[error("case repository unavailable: {0}")]
    Unavailable(String),
}

/// Remembers when each case was last alerted so repeat alerts respect the cooldown.
pub trait AlertLedger: Send + Sync {
    fn history(&self) -> Result<HashMap<CaseId, NaiveDateTime>, LedgerError>;
    fn record(&self, alert: &ExpiryAlert, at: NaiveDateTime) -> Result<(), LedgerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("alert ledger unavailable: {0}")]
    Unavailable(String),
}
