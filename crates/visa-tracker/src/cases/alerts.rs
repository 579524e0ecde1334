use super::domain::CaseId;
use super::snapshot::CaseSnapshot;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Per-visa-type alert windows plus the quiet period between repeat alerts for one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryAlertPolicy {
    windows: BTreeMap<String, i64>,
    cooldown: Duration,
}

impl ExpiryAlertPolicy {
    pub const DEFAULT_COOLDOWN_DAYS: i64 = 7;

    pub fn standard() -> Self {
        Self::new(
            Self::standard_windows(),
            Duration::days(Self::DEFAULT_COOLDOWN_DAYS),
        )
    }

    /// H-1B renewals need roughly seven months of lead time, J-1 roughly four.
    pub fn standard_windows() -> BTreeMap<String, i64> {
        BTreeMap::from([("H-1B".to_string(), 210), ("J-1".to_string(), 120)])
    }

    pub fn new(windows: BTreeMap<String, i64>, cooldown: Duration) -> Self {
        Self { windows, cooldown }
    }

    pub fn window_for(&self, visa_type: &str) -> Option<i64> {
        self.windows.get(visa_type).copied()
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn evaluate(
        &self,
        snapshot: &CaseSnapshot,
        last_alerted: Option<NaiveDateTime>,
        now: NaiveDateTime,
    ) -> AlertDecision {
        let Some(threshold_days) = self.window_for(&snapshot.case.visa_type) else {
            return AlertDecision::UnknownVisaType;
        };
        if snapshot.days_left > threshold_days {
            return AlertDecision::OutsideWindow;
        }

        let cooldown_active = last_alerted.is_some_and(|at| now - at < self.cooldown);
        AlertDecision::Notify(ExpiryAlert {
            case_id: snapshot.case.id.clone(),
            employee_name: snapshot.case.employee_name.clone(),
            visa_type: snapshot.case.visa_type.clone(),
            expiration_date: snapshot.case.expiration_date,
            days_left: snapshot.days_left,
            threshold_days,
            cooldown_active,
            message: alert_message(snapshot, threshold_days),
        })
    }

    pub fn plan(
        &self,
        snapshots: &[CaseSnapshot],
        history: &HashMap<CaseId, NaiveDateTime>,
        now: NaiveDateTime,
    ) -> AlertPlan {
        let mut plan = AlertPlan {
            evaluated_at: now,
            candidates: Vec::new(),
            skipped_unknown_type: 0,
        };

        for snapshot in snapshots {
            let last_alerted = history.get(&snapshot.case.id).copied();
            match self.evaluate(snapshot, last_alerted, now) {
                AlertDecision::Notify(alert) => plan.candidates.push(alert),
                AlertDecision::UnknownVisaType => plan.skipped_unknown_type += 1,
                AlertDecision::OutsideWindow => {}
            }
        }

        plan
    }
}

impl Default for ExpiryAlertPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlertDecision {
    Notify(ExpiryAlert),
    OutsideWindow,
    UnknownVisaType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiryAlert {
    pub case_id: CaseId,
    pub employee_name: String,
    pub visa_type: String,
    pub expiration_date: NaiveDate,
    pub days_left: i64,
    pub threshold_days: i64,
    pub cooldown_active: bool,
    pub message: String,
}

/// Dry-run result: every case inside its window, flagged when still cooling down.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertPlan {
    pub evaluated_at: NaiveDateTime,
    pub candidates: Vec<ExpiryAlert>,
    pub skipped_unknown_type: usize,
}

impl AlertPlan {
    pub fn dispatchable(&self) -> impl Iterator<Item = &ExpiryAlert> {
        self.candidates.iter().filter(|alert| !alert.cooldown_active)
    }

    pub fn skipped_cooldown(&self) -> usize {
        self.candidates
            .iter()
            .filter(|alert| alert.cooldown_active)
            .count()
    }
}

fn alert_message(snapshot: &CaseSnapshot, threshold_days: i64) -> String {
    let case = &snapshot.case;
    if snapshot.days_left < 0 {
        format!(
            "{}'s {} visa expired {} day(s) ago. Please update the case records immediately.",
            case.employee_name,
            case.visa_type,
            -snapshot.days_left
        )
    } else {
        format!(
            "{}'s {} visa will expire in {} day(s), within the {}-day alert window. Please start the renewal.",
            case.employee_name, case.visa_type, snapshot.days_left, threshold_days
        )
    }
}
