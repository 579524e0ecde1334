//! Visa case priority, filtering, reporting, and expiry alerting.

pub mod alerts;
pub mod domain;
pub mod expiry;
pub mod filter;
pub mod import;
pub mod priority;
pub mod report;
pub mod repository;
pub mod service;
mod snapshot;
mod sorter;
pub mod views;

#[cfg(test)]
mod tests;

pub use alerts::{AlertDecision, AlertPlan, ExpiryAlert, ExpiryAlertPolicy};
pub use domain::{CaseId, UnknownStatus, VisaCase, VisaStatus};
pub use expiry::{days_left, days_left_at};
pub use filter::{department_options, filter_cases, group_by_department, FilterCriteria, Selection};
pub use import::{CaseImporter, CsvCaseRepository};
pub use priority::PriorityTier;
pub use report::{aggregate, CaseStatistics};
pub use repository::{AlertLedger, CaseRepository, LedgerError, RepositoryError};
pub use service::{CaseService, CaseServiceError};
pub use snapshot::{evaluate_cases, CaseSnapshot};
pub use sorter::{sort_by_priority, sorted_by_priority};
pub use views::{
    AlertRunSummary, CaseDetailView, ComplianceReport, DashboardView, DepartmentGroup,
    EmployeeDirectory, ViewPayload, ViewState,
};
