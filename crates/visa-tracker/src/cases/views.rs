use super::alerts::ExpiryAlert;
use super::domain::CaseId;
use super::filter::FilterCriteria;
use super::report::views::{ReportInsights, ReportSummary, StatusConflict};
use super::snapshot::CaseSnapshot;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// The named screens of the dashboard, each with the payload it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Dashboard(FilterCriteria),
    EmployeeList(FilterCriteria),
    EmployeeDetail(CaseId),
    Reports(FilterCriteria),
}

impl Default for ViewState {
    fn default() -> Self {
        Self::Dashboard(FilterCriteria::default())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewPayload {
    Dashboard(DashboardView),
    EmployeeList(EmployeeDirectory),
    EmployeeDetail(CaseDetailView),
    Reports(ComplianceReport),
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub evaluated_on: NaiveDate,
    pub shown: usize,
    pub total: usize,
    pub summary: ReportSummary,
    pub cases: Vec<CaseSnapshot>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status_conflicts: Vec<StatusConflict>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentGroup {
    pub department: String,
    pub cases: Vec<CaseSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeDirectory {
    pub evaluated_on: NaiveDate,
    pub shown: usize,
    pub total: usize,
    pub department_options: Vec<String>,
    pub departments: Vec<DepartmentGroup>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseDetailView {
    pub evaluated_on: NaiveDate,
    #[serde(flatten)]
    pub snapshot: CaseSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReport {
    pub evaluated_on: NaiveDate,
    pub criteria: FilterCriteria,
    pub shown: usize,
    pub total: usize,
    pub summary: ReportSummary,
    pub insights: ReportInsights,
    pub rows: Vec<CaseSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertRunSummary {
    pub ran_at: NaiveDateTime,
    pub created: Vec<ExpiryAlert>,
    pub skipped_cooldown: usize,
    pub skipped_unknown_type: usize,
}
