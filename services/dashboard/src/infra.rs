use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;
use visa_tracker::cases::{AlertLedger, CaseId, CsvCaseRepository, ExpiryAlert, LedgerError};
use visa_tracker::config::DataConfig;

const BUNDLED_CASES: &str = include_str!("../data/visa_cases.csv");

/// Alert history kept for the lifetime of the process.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAlertLedger {
    last_alerted: Arc<Mutex<HashMap<CaseId, NaiveDateTime>>>,
}

impl AlertLedger for InMemoryAlertLedger {
    fn history(&self) -> Result<HashMap<CaseId, NaiveDateTime>, LedgerError> {
        let guard = self
            .last_alerted
            .lock()
            .map_err(|_| LedgerError::Unavailable("alert ledger mutex poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn record(&self, alert: &ExpiryAlert, at: NaiveDateTime) -> Result<(), LedgerError> {
        let mut guard = self
            .last_alerted
            .lock()
            .map_err(|_| LedgerError::Unavailable("alert ledger mutex poisoned".to_string()))?;
        guard.insert(alert.case_id.clone(), at);
        Ok(())
    }
}

pub(crate) fn bundled_repository() -> CsvCaseRepository {
    CsvCaseRepository::from_static(BUNDLED_CASES)
}

/// The configured CSV when one is set, otherwise the dataset compiled into the binary.
pub(crate) fn case_repository(config: &DataConfig) -> CsvCaseRepository {
    match &config.cases_csv {
        Some(path) => {
            debug!(path = %path.display(), "loading visa cases from csv");
            CsvCaseRepository::from_path(path.clone())
        }
        None => {
            debug!("loading bundled visa case dataset");
            bundled_repository()
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
