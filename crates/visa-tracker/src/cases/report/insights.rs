use super::super::domain::VisaStatus;
use super::super::snapshot::CaseSnapshot;
use super::statistics::{chart_series, CaseStatistics};
use super::views::{ConflictKind, ReportInsights, StatusConflict};

const H1B_VISA_TYPE: &str = "H-1B";

/// Cases whose recorded status contradicts the computed day count. Reported, never corrected.
pub fn status_conflicts(snapshots: &[CaseSnapshot]) -> Vec<StatusConflict> {
    snapshots
        .iter()
        .filter_map(|snapshot| {
            let kind = match snapshot.case.status {
                VisaStatus::Active if snapshot.days_left < 0 => ConflictKind::ActiveButOverdue,
                VisaStatus::Expired if snapshot.days_left >= 0 => ConflictKind::ExpiredButValid,
                _ => return None,
            };
            Some(StatusConflict {
                case_id: snapshot.case.id.clone(),
                employee_name: snapshot.case.employee_name.clone(),
                status: snapshot.case.status,
                days_left: snapshot.days_left,
                kind,
                kind_label: kind.label(),
            })
        })
        .collect()
}

pub fn generate_insights(snapshots: &[CaseSnapshot], stats: &CaseStatistics) -> ReportInsights {
    let top_department = chart_series(&stats.by_department).into_iter().next();
    let h1b_holders = stats.by_visa_type.get(H1B_VISA_TYPE).copied().unwrap_or(0);
    let processing = stats.count_for(VisaStatus::Processing);
    let status_conflicts = status_conflicts(snapshots);

    let mut observations = Vec::new();
    if let Some(top) = &top_department {
        observations.push(format!(
            "{} holds the highest number of visa cases ({}).",
            top.label, top.count
        ));
    }
    observations.push(format!(
        "There {} currently {} {} visa holder{} across all departments.",
        if h1b_holders == 1 { "is" } else { "are" },
        h1b_holders,
        H1B_VISA_TYPE,
        plural(h1b_holders)
    ));
    observations.push(format!(
        "{} employee{} renewals in processing.",
        processing,
        if processing == 1 { " has" } else { "s have" }
    ));
    if stats.expiring_soon > 0 {
        observations.push(format!(
            "{} visa{} within the next 60 days.",
            stats.expiring_soon,
            if stats.expiring_soon == 1 { " expires" } else { "s expire" }
        ));
    }
    if !status_conflicts.is_empty() {
        observations.push(format!(
            "{} case{} a status that disagrees with the expiration date.",
            status_conflicts.len(),
            if status_conflicts.len() == 1 { " carries" } else { "s carry" }
        ));
    }

    ReportInsights {
        top_department,
        h1b_holders,
        processing,
        status_conflicts,
        observations,
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
