use super::super::domain::{CaseId, VisaStatus};
use serde::Serialize;

/// One bar/slice of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCountEntry {
    pub status: VisaStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StayLength {
    pub years: i64,
    pub months: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub status_counts: Vec<StatusCountEntry>,
    pub active: usize,
    pub pending: usize,
    pub expiring_soon: usize,
    pub overdue: usize,
    pub departments: Vec<CategoryCount>,
    pub visa_types: Vec<CategoryCount>,
    pub genders: Vec<CategoryCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_stay_months: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_stay: Option<StayLength>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    ActiveButOverdue,
    ExpiredButValid,
}

impl ConflictKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ActiveButOverdue => "Marked active but past expiration",
            Self::ExpiredButValid => "Marked expired but not yet past expiration",
        }
    }
}

/// A case whose recorded status disagrees with its computed day count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusConflict {
    pub case_id: CaseId,
    pub employee_name: String,
    pub status: VisaStatus,
    pub days_left: i64,
    pub kind: ConflictKind,
    pub kind_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportInsights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_department: Option<CategoryCount>,
    pub h1b_holders: usize,
    pub processing: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status_conflicts: Vec<StatusConflict>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
}
