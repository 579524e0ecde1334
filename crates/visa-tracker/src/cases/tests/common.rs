use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::cases::alerts::ExpiryAlert;
use crate::cases::domain::{CaseId, VisaCase, VisaStatus};
use crate::cases::repository::{
    AlertLedger, CaseRepository, LedgerError, RepositoryError,
};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 1).expect("valid date")
}

pub(super) fn now() -> NaiveDateTime {
    today().and_hms_opt(8, 30, 0).expect("valid time")
}

#[allow(clippy::too_many_arguments)]
pub(super) fn case(
    id: &str,
    name: &str,
    department: &str,
    visa_type: &str,
    status: VisaStatus,
    days_left: i64,
    gender: &str,
    stay_months: u32,
) -> VisaCase {
    let expiration_date = today() + Duration::days(days_left);
    VisaCase {
        id: CaseId::from(id),
        employee_name: name.to_string(),
        department: department.to_string(),
        visa_type: visa_type.to_string(),
        status,
        expiration_date,
        visa_start_date: expiration_date.checked_sub_months(chrono::Months::new(stay_months)),
        gender: Some(gender.to_string()),
        email: None,
        phone: None,
    }
}

/// Fourteen cases covering every tier; nine are marked Active.
pub(super) fn fourteen_cases() -> Vec<VisaCase> {
    use VisaStatus::*;
    vec![
        case("1", "Fatima Al-Rashid", "Finance", "F-1", Expired, -42, "Female", 24),
        case("2", "Chen Wei", "Engineering", "OPT", Expired, -17, "Male", 24),
        case("3", "Maria Gonzalez", "Marketing", "H-1B", Active, 12, "Female", 36),
        case("4", "Raj Patel", "Sales", "OPT STEM", Pending, 22, "Male", 36),
        case("5", "Olumide Adebayo", "HR", "F-1", Processing, 27, "Male", 24),
        case("6", "Sofia Petrov", "Engineering", "H-1B", Active, 47, "Female", 36),
        case("7", "Kenji Nakamura", "Finance", "J-1", Processing, 73, "Male", 36),
        case("8", "Aisha Okonkwo", "Marketing", "F-1", Active, 127, "Female", 36),
        case("9", "Viktor Kozlov", "Sales", "H-1B", Active, 153, "Male", 36),
        case("10", "Isabella Rodriguez", "Engineering", "H-1B", Active, 285, "Female", 36),
        case("11", "Samuel Okafor", "HR", "Permanent Resident", Active, 753, "Male", 60),
        case("12", "Anastasia Volkov", "Finance", "J-1", Active, 863, "Female", 36),
        case("13", "Diego Morales", "Marketing", "H-1B", Active, 247, "Male", 36),
        case("14", "Priya Sharma", "Sales", "F-1", Active, 221, "Female", 36),
    ]
}

pub(super) struct MemoryRepository {
    cases: Vec<VisaCase>,
}

impl MemoryRepository {
    pub(super) fn new(cases: Vec<VisaCase>) -> Self {
        Self { cases }
    }
}

#[async_trait]
impl CaseRepository for MemoryRepository {
    async fn load_cases(&self) -> Result<Vec<VisaCase>, RepositoryError> {
        Ok(self.cases.clone())
    }
}

pub(super) struct UnavailableRepository;

#[async_trait]
impl CaseRepository for UnavailableRepository {
    async fn load_cases(&self) -> Result<Vec<VisaCase>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryLedger {
    entries: Mutex<HashMap<CaseId, NaiveDateTime>>,
}

impl MemoryLedger {
    pub(super) fn recorded(&self) -> usize {
        self.entries.lock().expect("ledger mutex poisoned").len()
    }
}

impl AlertLedger for MemoryLedger {
    fn history(&self) -> Result<HashMap<CaseId, NaiveDateTime>, LedgerError> {
        Ok(self.entries.lock().expect("ledger mutex poisoned").clone())
    }

    fn record(&self, alert: &ExpiryAlert, at: NaiveDateTime) -> Result<(), LedgerError> {
        self.entries
            .lock()
            .expect("ledger mutex poisoned")
            .insert(alert.case_id.clone(), at);
        Ok(())
    }
}
