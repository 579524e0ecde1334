use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use super::alerts::{AlertPlan, ExpiryAlertPolicy};
use super::domain::CaseId;
use super::filter::{department_options, filter_cases, group_by_department, FilterCriteria};
use super::report::{aggregate, generate_insights, status_conflicts};
use super::repository::{AlertLedger, CaseRepository, LedgerError, RepositoryError};
use super::snapshot::{evaluate_cases, CaseSnapshot};
use super::sorter::sorted_by_priority;
use super::views::{
    AlertRunSummary, CaseDetailView, ComplianceReport, DashboardView, DepartmentGroup,
    EmployeeDirectory, ViewPayload, ViewState,
};

/// Service composing the repository with the priority, filter, and reporting engine.
pub struct CaseService<R> {
    repository: Arc<R>,
}

impl<R> CaseService<R>
where
    R: CaseRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Load the collection once and evaluate every case against the same `today`.
    pub async fn snapshots(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<CaseSnapshot>, CaseServiceError> {
        let cases = self.repository.load_cases().await?;
        debug!(count = cases.len(), %today, "evaluating visa cases");
        Ok(evaluate_cases(cases, today))
    }

    /// Priority-ordered case list with headline KPIs over the filtered set.
    pub async fn dashboard(
        &self,
        criteria: &FilterCriteria,
        today: NaiveDate,
    ) -> Result<DashboardView, CaseServiceError> {
        let snapshots = self.snapshots(today).await?;
        let total = snapshots.len();
        let filtered = filter_cases(&snapshots, criteria);
        let stats = aggregate(&filtered);
        let status_conflicts = status_conflicts(&filtered);
        let cases = sorted_by_priority(filtered);

        Ok(DashboardView {
            evaluated_on: today,
            shown: cases.len(),
            total,
            summary: stats.summary(),
            cases,
            status_conflicts,
        })
    }

    /// Filtered employees grouped by department.
    pub async fn directory(
        &self,
        criteria: &FilterCriteria,
        today: NaiveDate,
    ) -> Result<EmployeeDirectory, CaseServiceError> {
        let snapshots = self.snapshots(today).await?;
        let total = snapshots.len();
        let options = department_options(&snapshots);
        let filtered = filter_cases(&snapshots, criteria);
        let shown = filtered.len();

        let departments = group_by_department(filtered)
            .into_iter()
            .map(|(department, cases)| DepartmentGroup { department, cases })
            .collect();

        Ok(EmployeeDirectory {
            evaluated_on: today,
            shown,
            total,
            department_options: options,
            departments,
        })
    }

    pub async fn case_detail(
        &self,
        id: &CaseId,
        today: NaiveDate,
    ) -> Result<CaseDetailView, CaseServiceError> {
        let snapshot = self
            .snapshots(today)
            .await?
            .into_iter()
            .find(|snapshot| &snapshot.case.id == id)
            .ok_or_else(|| CaseServiceError::NotFound(id.clone()))?;

        Ok(CaseDetailView {
            evaluated_on: today,
            snapshot,
        })
    }

    /// Aggregate statistics, chart series, and insights over the filtered set.
    pub async fn compliance_report(
        &self,
        criteria: &FilterCriteria,
        today: NaiveDate,
    ) -> Result<ComplianceReport, CaseServiceError> {
        let snapshots = self.snapshots(today).await?;
        let total = snapshots.len();
        let rows = filter_cases(&snapshots, criteria);
        let stats = aggregate(&rows);
        let insights = generate_insights(&rows, &stats);

        Ok(ComplianceReport {
            evaluated_on: today,
            criteria: criteria.clone(),
            shown: rows.len(),
            total,
            summary: stats.summary(),
            insights,
            rows,
        })
    }

    pub async fn render(
        &self,
        view: &ViewState,
        today: NaiveDate,
    ) -> Result<ViewPayload, CaseServiceError> {
        let payload = match view {
            ViewState::Dashboard(criteria) => {
                ViewPayload::Dashboard(self.dashboard(criteria, today).await?)
            }
            ViewState::EmployeeList(criteria) => {
                ViewPayload::EmployeeList(self.directory(criteria, today).await?)
            }
            ViewState::EmployeeDetail(id) => {
                ViewPayload::EmployeeDetail(self.case_detail(id, today).await?)
            }
            ViewState::Reports(criteria) => {
                ViewPayload::Reports(self.compliance_report(criteria, today).await?)
            }
        };
        Ok(payload)
    }

    /// Dry run: which cases would alert at `now`, with cooldown flags. Records nothing.
    pub async fn preview_alerts<L>(
        &self,
        policy: &ExpiryAlertPolicy,
        ledger: &L,
        now: NaiveDateTime,
    ) -> Result<AlertPlan, CaseServiceError>
    where
        L: AlertLedger,
    {
        let snapshots = self.snapshots(now.date()).await?;
        let history = ledger.history()?;
        Ok(policy.plan(&snapshots, &history, now))
    }

    /// Dispatch every alert not cooling down and record it in the ledger.
    pub async fn run_alerts<L>(
        &self,
        policy: &ExpiryAlertPolicy,
        ledger: &L,
        now: NaiveDateTime,
    ) -> Result<AlertRunSummary, CaseServiceError>
    where
        L: AlertLedger,
    {
        let plan = self.preview_alerts(policy, ledger, now).await?;
        let mut created = Vec::new();
        for alert in plan.dispatchable() {
            ledger.record(alert, now)?;
            created.push(alert.clone());
        }

        let summary = AlertRunSummary {
            ran_at: now,
            skipped_cooldown: plan.skipped_cooldown(),
            skipped_unknown_type: plan.skipped_unknown_type,
            created,
        };
        info!(
            created = summary.created.len(),
            skipped_cooldown = summary.skipped_cooldown,
            skipped_unknown_type = summary.skipped_unknown_type,
            "expiry alert run complete"
        );
        Ok(summary)
    }
}

/// Error raised by the case service.
#[derive(Debug, thiserror::Error)]
pub enum CaseServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("visa case {0} not found")]
    NotFound(CaseId),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
