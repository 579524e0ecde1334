use super::common::*;
use std::sync::Arc;

use crate::cases::domain::{CaseId, VisaStatus};
use crate::cases::filter::{FilterCriteria, Selection};
use crate::cases::priority::PriorityTier;
use crate::cases::service::{CaseService, CaseServiceError};
use crate::cases::views::{ViewPayload, ViewState};
use crate::cases::repository::RepositoryError;

fn service() -> CaseService<MemoryRepository> {
    CaseService::new(Arc::new(MemoryRepository::new(fourteen_cases())))
}

#[tokio::test]
async fn dashboard_orders_cases_by_priority() {
    let view = service()
        .dashboard(&FilterCriteria::default(), today())
        .await
        .expect("dashboard builds");

    let days: Vec<i64> = view.cases.iter().map(|case| case.days_left).collect();
    assert_eq!(
        days,
        vec![-42, -17, 12, 22, 27, 47, 73, 127, 153, 221, 247, 285, 753, 863]
    );
    assert_eq!(view.cases[0].priority, PriorityTier::Expired);
    assert_eq!(view.cases[13].priority, PriorityTier::LongTerm);
    assert_eq!(view.shown, 14);
    assert_eq!(view.total, 14);
}

#[tokio::test]
async fn dashboard_kpis_follow_day_counts_and_status() {
    let view = service()
        .dashboard(&FilterCriteria::default(), today())
        .await
        .expect("dashboard builds");

    assert_eq!(view.summary.active, 9);
    assert_eq!(view.summary.pending, 3);
    assert_eq!(view.summary.expiring_soon, 4);
    assert_eq!(view.summary.overdue, 2);
    assert!(view.status_conflicts.is_empty());
}

#[tokio::test]
async fn directory_groups_departments_alphabetically() {
    let criteria = FilterCriteria {
        status: Selection::Only(VisaStatus::Active),
        ..FilterCriteria::default()
    };
    let directory = service()
        .directory(&criteria, today())
        .await
        .expect("directory builds");

    let names: Vec<&str> = directory
        .departments
        .iter()
        .map(|group| group.department.as_str())
        .collect();
    assert_eq!(names, vec!["Engineering", "Finance", "HR", "Marketing", "Sales"]);
    assert_eq!(directory.shown, 9);
    assert_eq!(directory.total, 14);
    assert_eq!(directory.department_options.len(), 5);

    let marketing = &directory.departments[3];
    let ids: Vec<&str> = marketing
        .cases
        .iter()
        .map(|case| case.case.id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["3", "8", "13"]);
}

#[tokio::test]
async fn directory_with_unknown_department_is_empty_not_an_error() {
    let criteria = FilterCriteria {
        department: Selection::Only("Legal".to_string()),
        ..FilterCriteria::default()
    };
    let directory = service()
        .directory(&criteria, today())
        .await
        .expect("directory builds");

    assert_eq!(directory.shown, 0);
    assert!(directory.departments.is_empty());
    assert_eq!(directory.department_options.len(), 5);
}

#[tokio::test]
async fn case_detail_reports_missing_ids() {
    let service = service();
    let detail = service
        .case_detail(&CaseId::from("6"), today())
        .await
        .expect("case exists");
    assert_eq!(detail.snapshot.case.employee_name, "Sofia Petrov");
    assert_eq!(detail.snapshot.days_left, 47);

    let error = service
        .case_detail(&CaseId::from("99"), today())
        .await
        .expect_err("unknown id");
    assert!(matches!(error, CaseServiceError::NotFound(id) if id.0 == "99"));
}

#[tokio::test]
async fn compliance_report_builds_insights_over_filtered_rows() {
    let report = service()
        .compliance_report(&FilterCriteria::default(), today())
        .await
        .expect("report builds");

    assert_eq!(report.summary.total, 14);
    let top = report.insights.top_department.expect("top department");
    assert_eq!(top.label, "Engineering");
    assert_eq!(top.count, 3);
    assert_eq!(report.insights.h1b_holders, 5);
    assert_eq!(report.insights.processing, 2);

    let average = report.summary.average_stay_months.expect("stay data present");
    assert!((average - 492.0 / 14.0).abs() < 1e-9);

    let criteria = FilterCriteria {
        gender: Selection::Only("Female".to_string()),
        visa_type: Selection::Only("H-1B".to_string()),
        ..FilterCriteria::default()
    };
    let report = service()
        .compliance_report(&criteria, today())
        .await
        .expect("report builds");
    assert_eq!(report.shown, 3);
    assert_eq!(report.total, 14);
}

#[tokio::test]
async fn render_dispatches_on_view_state() {
    let service = service();
    let payload = service
        .render(&ViewState::EmployeeDetail(CaseId::from("1")), today())
        .await
        .expect("renders");
    assert!(matches!(payload, ViewPayload::EmployeeDetail(_)));

    let payload = service
        .render(&ViewState::default(), today())
        .await
        .expect("renders");
    match payload {
        ViewPayload::Dashboard(view) => assert_eq!(view.cases.len(), 14),
        other => panic!("expected dashboard, got {other:?}"),
    }
}

#[tokio::test]
async fn repository_failure_is_propagated() {
    let service = CaseService::new(Arc::new(UnavailableRepository));
    let error = service
        .dashboard(&FilterCriteria::default(), today())
        .await
        .expect_err("repository offline");
    assert!(matches!(
        error,
        CaseServiceError::Repository(RepositoryError::Unavailable(_))
    ));
}

#[tokio::test]
async fn conflicting_status_is_surfaced() {
    let mut cases = fourteen_cases();
    cases[2].status = VisaStatus::Active;
    cases[2].expiration_date = today() - chrono::Duration::days(3);
    cases[1].expiration_date = today() + chrono::Duration::days(5);
    let service = CaseService::new(Arc::new(MemoryRepository::new(cases)));

    let view = service
        .dashboard(&FilterCriteria::default(), today())
        .await
        .expect("dashboard builds");

    let ids: Vec<&str> = view
        .status_conflicts
        .iter()
        .map(|conflict| conflict.case_id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["2", "3"]);
    let overdue_active = view
        .cases
        .iter()
        .find(|case| case.case.id.0 == "3")
        .expect("case present");
    assert_eq!(overdue_active.priority, PriorityTier::Expired);
}
