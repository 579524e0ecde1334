use super::super::domain::VisaStatus;
use super::super::expiry::months_between;
use super::super::snapshot::CaseSnapshot;
use super::views::{CategoryCount, ReportSummary, StatusCountEntry, StayLength};
use std::collections::{BTreeMap, HashMap};

/// Upper bound (inclusive) of the dashboard's "expiring soon" alert.
pub const EXPIRING_SOON_DAYS: i64 = 60;
pub const UNSPECIFIED_GENDER: &str = "Unspecified";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseStatistics {
    pub total: usize,
    pub by_status: BTreeMap<VisaStatus, usize>,
    pub expiring_soon: usize,
    pub overdue: usize,
    pub by_department: HashMap<String, usize>,
    pub by_visa_type: HashMap<String, usize>,
    pub by_gender: HashMap<String, usize>,
    /// `None` when no case carries a start date; callers must not read it as zero.
    pub average_stay_months: Option<f64>,
}

pub fn aggregate(snapshots: &[CaseSnapshot]) -> CaseStatistics {
    let mut stats = CaseStatistics {
        by_status: VisaStatus::ordered()
            .into_iter()
            .map(|status| (status, 0))
            .collect(),
        ..CaseStatistics::default()
    };
    let mut stay_months_total: i64 = 0;
    let mut stay_samples: usize = 0;

    for snapshot in snapshots {
        let case = &snapshot.case;
        stats.total += 1;
        *stats.by_status.entry(case.status).or_default() += 1;

        if snapshot.days_left > 0 && snapshot.days_left <= EXPIRING_SOON_DAYS {
            stats.expiring_soon += 1;
        }
        if snapshot.days_left < 0 {
            stats.overdue += 1;
        }

        *stats
            .by_department
            .entry(case.department.clone())
            .or_default() += 1;
        *stats.by_visa_type.entry(case.visa_type.clone()).or_default() += 1;
        let gender = case.gender.as_deref().unwrap_or(UNSPECIFIED_GENDER);
        *stats.by_gender.entry(gender.to_string()).or_default() += 1;

        if let Some(start) = case.visa_start_date {
            stay_months_total += months_between(start, case.expiration_date);
            stay_samples += 1;
        }
    }

    stats.average_stay_months = if stay_samples == 0 {
        None
    } else {
        Some(stay_months_total as f64 / stay_samples as f64)
    };

    stats
}

impl CaseStatistics {
    pub fn count_for(&self, status: VisaStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    pub fn active(&self) -> usize {
        self.count_for(VisaStatus::Active)
    }

    /// Cases still waiting on a decision: Pending plus Processing.
    pub fn pending(&self) -> usize {
        self.count_for(VisaStatus::Pending) + self.count_for(VisaStatus::Processing)
    }

    pub fn stay_breakdown(&self) -> Option<StayLength> {
        self.average_stay_months.map(|average| {
            let mut years = (average / 12.0).floor() as i64;
            let mut months = (average % 12.0).round() as i64;
            if months == 12 {
                years += 1;
                months = 0;
            }
            StayLength { years, months }
        })
    }

    pub fn summary(&self) -> ReportSummary {
        let status_counts = VisaStatus::ordered()
            .into_iter()
            .map(|status| StatusCountEntry {
                status,
                status_label: status.label(),
                count: self.count_for(status),
            })
            .collect();

        ReportSummary {
            total: self.total,
            status_counts,
            active: self.active(),
            pending: self.pending(),
            expiring_soon: self.expiring_soon,
            overdue: self.overdue,
            departments: chart_series(&self.by_department),
            visa_types: chart_series(&self.by_visa_type),
            genders: chart_series(&self.by_gender),
            average_stay_months: self.average_stay_months,
            average_stay: self.stay_breakdown(),
        }
    }
}

/// Largest category first; ties broken alphabetically so output is deterministic.
pub(crate) fn chart_series(counts: &HashMap<String, usize>) -> Vec<CategoryCount> {
    let mut series: Vec<CategoryCount> = counts
        .iter()
        .map(|(label, count)| CategoryCount {
            label: label.clone(),
            count: *count,
        })
        .collect();
    series.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stay_breakdown_carries_rounded_months() {
        let stats = CaseStatistics {
            average_stay_months: Some(35.7),
            ..CaseStatistics::default()
        };
        assert_eq!(
            stats.stay_breakdown(),
            Some(StayLength {
                years: 3,
                months: 0
            })
        );

        let stats = CaseStatistics {
            average_stay_months: Some(30.2),
            ..CaseStatistics::default()
        };
        assert_eq!(
            stats.stay_breakdown(),
            Some(StayLength {
                years: 2,
                months: 6
            })
        );
    }

    #[test]
    fn empty_input_leaves_average_undefined() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.average_stay_months.is_none());
        assert!(stats.stay_breakdown().is_none());
        assert!(stats.by_status.values().all(|count| *count == 0));
    }

    #[test]
    fn chart_series_orders_by_count_then_label() {
        let counts = HashMap::from([
            ("Sales".to_string(), 2),
            ("Engineering".to_string(), 3),
            ("Finance".to_string(), 2),
        ]);
        let labels: Vec<_> = chart_series(&counts)
            .into_iter()
            .map(|entry| entry.label)
            .collect();
        assert_eq!(labels, vec!["Engineering", "Finance", "Sales"]);
    }
}
