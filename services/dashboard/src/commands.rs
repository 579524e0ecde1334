use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::io::{self, Write};
use visa_tracker::cases::report::views::{CategoryCount, ReportSummary, StatusConflict};
use visa_tracker::cases::{
    AlertLedger, AlertPlan, AlertRunSummary, CaseDetailView, CaseRepository, CaseService,
    CaseSnapshot, ComplianceReport, DashboardView, EmployeeDirectory, ExpiryAlert,
    ExpiryAlertPolicy, ViewPayload, ViewState,
};
use visa_tracker::error::AppError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct AlertArgs {
    /// Record alerts in the ledger instead of only previewing them
    #[arg(long)]
    pub(crate) dispatch: bool,
}

pub(crate) async fn show_view<R, W>(
    service: &CaseService<R>,
    view: &ViewState,
    today: NaiveDate,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), AppError>
where
    R: CaseRepository + 'static,
    W: Write,
{
    let payload = service.render(view, today).await?;
    match format {
        OutputFormat::Json => write_json(out, &payload)?,
        OutputFormat::Text => render_payload(out, &payload)?,
    }
    Ok(())
}

pub(crate) async fn alerts<R, L, W>(
    service: &CaseService<R>,
    policy: &ExpiryAlertPolicy,
    ledger: &L,
    now: NaiveDateTime,
    args: &AlertArgs,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), AppError>
where
    R: CaseRepository + 'static,
    L: AlertLedger,
    W: Write,
{
    if args.dispatch {
        let summary = service.run_alerts(policy, ledger, now).await?;
        match format {
            OutputFormat::Json => write_json(out, &summary)?,
            OutputFormat::Text => render_alert_run(out, &summary)?,
        }
    } else {
        let plan = service.preview_alerts(policy, ledger, now).await?;
        match format {
            OutputFormat::Json => write_json(out, &plan)?,
            OutputFormat::Text => render_alert_plan(out, &plan)?,
        }
    }
    Ok(())
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::from)?;
    writeln!(out)
}

fn render_payload<W: Write>(out: &mut W, payload: &ViewPayload) -> io::Result<()> {
    match payload {
        ViewPayload::Dashboard(view) => render_dashboard(out, view),
        ViewPayload::EmployeeList(view) => render_directory(out, view),
        ViewPayload::EmployeeDetail(view) => render_detail(out, view),
        ViewPayload::Reports(view) => render_report(out, view),
    }
}

fn render_dashboard<W: Write>(out: &mut W, view: &DashboardView) -> io::Result<()> {
    writeln!(out, "Visa case dashboard (evaluated {})", view.evaluated_on)?;
    render_kpis(out, &view.summary)?;
    writeln!(out, "\nCases by priority ({} of {} shown)", view.shown, view.total)?;
    if view.cases.is_empty() {
        writeln!(out, "- No cases match the current filters")?;
    }
    for snapshot in &view.cases {
        render_case_line(out, snapshot)?;
    }
    render_conflicts(out, &view.status_conflicts)
}

fn render_directory<W: Write>(out: &mut W, view: &EmployeeDirectory) -> io::Result<()> {
    writeln!(
        out,
        "Employee directory (evaluated {}, {} of {} shown)",
        view.evaluated_on, view.shown, view.total
    )?;
    writeln!(out, "Departments: {}", view.department_options.join(", "))?;
    if view.departments.is_empty() {
        writeln!(out, "\n- No employees match the current filters")?;
    }
    for group in &view.departments {
        writeln!(out, "\n{} ({})", group.department, group.cases.len())?;
        for snapshot in &group.cases {
            let case = &snapshot.case;
            writeln!(
                out,
                "  - [{}] {} | {} | {} | {}",
                case.id,
                case.employee_name,
                case.visa_type,
                case.status,
                describe_days(snapshot.days_left)
            )?;
        }
    }
    Ok(())
}

fn render_detail<W: Write>(out: &mut W, view: &CaseDetailView) -> io::Result<()> {
    let snapshot = &view.snapshot;
    let case = &snapshot.case;
    writeln!(out, "{} (case {})", case.employee_name, case.id)?;
    writeln!(out, "- Department: {}", case.department)?;
    writeln!(out, "- Visa: {} ({})", case.visa_type, case.status)?;
    if let Some(start) = case.visa_start_date {
        writeln!(out, "- Start date: {start}")?;
    }
    writeln!(
        out,
        "- Expires: {} ({} as of {})",
        case.expiration_date,
        describe_days(snapshot.days_left),
        view.evaluated_on
    )?;
    writeln!(
        out,
        "- Priority: {} (tier {})",
        snapshot.priority_label,
        snapshot.priority.ordinal()
    )?;
    let optional = [
        ("Gender", case.gender.as_deref()),
        ("Email", case.email.as_deref()),
        ("Phone", case.phone.as_deref()),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            writeln!(out, "- {label}: {value}")?;
        }
    }
    Ok(())
}

fn render_report<W: Write>(out: &mut W, view: &ComplianceReport) -> io::Result<()> {
    writeln!(
        out,
        "Compliance report (evaluated {}, {} of {} cases)",
        view.evaluated_on, view.shown, view.total
    )?;
    render_kpis(out, &view.summary)?;

    match view.summary.average_stay {
        Some(stay) => writeln!(
            out,
            "- Average stay: {} years {} months",
            stay.years, stay.months
        )?,
        None => writeln!(out, "- Average stay: n/a (no start dates recorded)")?,
    }

    writeln!(out, "\nStatus distribution")?;
    for entry in &view.summary.status_counts {
        writeln!(out, "  - {}: {}", entry.status_label, entry.count)?;
    }
    render_series(out, "Departments", &view.summary.departments)?;
    render_series(out, "Visa types", &view.summary.visa_types)?;
    render_series(out, "Gender", &view.summary.genders)?;

    if !view.insights.observations.is_empty() {
        writeln!(out, "\nInsights")?;
        for observation in &view.insights.observations {
            writeln!(out, "- {observation}")?;
        }
    }

    writeln!(out, "\nCases")?;
    for snapshot in &view.rows {
        render_case_line(out, snapshot)?;
    }
    Ok(())
}

fn render_alert_plan<W: Write>(out: &mut W, plan: &AlertPlan) -> io::Result<()> {
    writeln!(out, "Expiry alert preview ({})", plan.evaluated_at)?;
    if plan.candidates.is_empty() {
        writeln!(out, "- No cases inside their alert window")?;
    }
    for alert in &plan.candidates {
        let marker = if alert.cooldown_active {
            " (cooling down)"
        } else {
            ""
        };
        render_alert_line(out, alert, marker)?;
    }
    writeln!(
        out,
        "Skipped: {} in cooldown | {} without an alert window",
        plan.skipped_cooldown(),
        plan.skipped_unknown_type
    )
}

fn render_alert_run<W: Write>(out: &mut W, summary: &AlertRunSummary) -> io::Result<()> {
    writeln!(
        out,
        "Expiry alert run ({}): {} created",
        summary.ran_at,
        summary.created.len()
    )?;
    for alert in &summary.created {
        render_alert_line(out, alert, "")?;
    }
    writeln!(
        out,
        "Skipped: {} in cooldown | {} without an alert window",
        summary.skipped_cooldown, summary.skipped_unknown_type
    )
}

fn render_alert_line<W: Write>(out: &mut W, alert: &ExpiryAlert, marker: &str) -> io::Result<()> {
    writeln!(
        out,
        "- [{}] {}{} (window {} days)",
        alert.case_id, alert.message, marker, alert.threshold_days
    )
}

fn render_kpis<W: Write>(out: &mut W, summary: &ReportSummary) -> io::Result<()> {
    writeln!(
        out,
        "- {} total | {} active | {} pending | {} expiring soon | {} overdue",
        summary.total, summary.active, summary.pending, summary.expiring_soon, summary.overdue
    )
}

fn render_case_line<W: Write>(out: &mut W, snapshot: &CaseSnapshot) -> io::Result<()> {
    let case = &snapshot.case;
    writeln!(
        out,
        "- [{}] {} ({}) | {} | {} | expires {} ({})",
        snapshot.priority_label,
        case.employee_name,
        case.department,
        case.visa_type,
        case.status,
        case.expiration_date,
        describe_days(snapshot.days_left)
    )
}

fn render_series<W: Write>(out: &mut W, title: &str, series: &[CategoryCount]) -> io::Result<()> {
    writeln!(out, "\n{title}")?;
    for entry in series {
        writeln!(out, "  - {}: {}", entry.label, entry.count)?;
    }
    Ok(())
}

fn render_conflicts<W: Write>(out: &mut W, conflicts: &[StatusConflict]) -> io::Result<()> {
    if conflicts.is_empty() {
        return Ok(());
    }
    writeln!(out, "\nStatus conflicts")?;
    for conflict in conflicts {
        writeln!(
            out,
            "- {} ({}): {} ({})",
            conflict.employee_name,
            conflict.status,
            conflict.kind_label,
            describe_days(conflict.days_left)
        )?;
    }
    Ok(())
}

fn describe_days(days_left: i64) -> String {
    match days_left {
        d if d < -1 => format!("{} days overdue", -d),
        -1 => "1 day overdue".to_string(),
        0 => "expires today".to_string(),
        1 => "1 day left".to_string(),
        d => format!("{d} days left"),
    }
}
