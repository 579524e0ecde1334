use super::domain::VisaCase;
use super::expiry::days_left;
use super::priority::PriorityTier;
use chrono::NaiveDate;
use serde::Serialize;

/// A case evaluated against one date. Never stored: `days_left` is only valid for `evaluated_on`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseSnapshot {
    #[serde(flatten)]
    pub case: VisaCase,
    pub days_left: i64,
    pub priority: PriorityTier,
    pub priority_label: &'static str,
}

impl CaseSnapshot {
    pub fn evaluate(case: VisaCase, today: NaiveDate) -> Self {
        let days_left = days_left(case.expiration_date, today);
        let priority = PriorityTier::from_days_left(days_left);
        Self {
            case,
            days_left,
            priority,
            priority_label: priority.label(),
        }
    }
}

impl AsRef<VisaCase> for CaseSnapshot {
    fn as_ref(&self) -> &VisaCase {
        &self.case
    }
}

/// Evaluates a batch against a single date so every case in one view is comparable.
pub fn evaluate_cases<I>(cases: I, today: NaiveDate) -> Vec<CaseSnapshot>
where
    I: IntoIterator<Item = VisaCase>,
{
    cases
        .into_iter()
        .map(|case| CaseSnapshot::evaluate(case, today))
        .collect()
}
