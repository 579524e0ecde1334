use crate::commands::{self, AlertArgs, OutputFormat};
use crate::infra;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use visa_tracker::cases::{CaseId, CaseService, FilterCriteria, Selection, ViewState, VisaStatus};
use visa_tracker::config::AppConfig;
use visa_tracker::error::AppError;
use visa_tracker::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Visa Case Tracker",
    about = "Prioritize, filter, and report on employee visa cases from the command line",
    version
)]
struct Cli {
    /// Evaluation date for day counts (YYYY-MM-DD). Defaults to today.
    #[arg(long, global = true, value_parser = infra::parse_date)]
    today: Option<NaiveDate>,
    /// Case CSV to load instead of the configured or bundled dataset
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// Output format for rendered views
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Priority-ordered case list with headline KPIs (default command)
    Dashboard(FilterArgs),
    /// Employee directory grouped by department
    Employees(FilterArgs),
    /// Detail view for a single visa case
    Employee {
        /// Case identifier as it appears in the dataset
        id: String,
    },
    /// Compliance report with aggregate statistics, chart series, and insights
    Report(FilterArgs),
    /// Preview expiry alerts, or dispatch them with --dispatch
    Alerts(AlertArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct FilterArgs {
    /// Case-insensitive substring of the employee name
    #[arg(long, default_value = "")]
    pub(crate) name: String,
    /// Exact department, or "all"
    #[arg(long, default_value = "all")]
    pub(crate) department: Selection<String>,
    /// Active, Pending, Processing, Expired, or "all"
    #[arg(long, default_value = "all")]
    pub(crate) status: Selection<VisaStatus>,
    /// Exact visa type, or "all"
    #[arg(long, default_value = "all")]
    pub(crate) visa_type: Selection<String>,
    /// Exact gender, or "all"
    #[arg(long, default_value = "all")]
    pub(crate) gender: Selection<String>,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        FilterCriteria {
            name_query: args.name.trim().to_string(),
            department: args.department,
            status: args.status,
            visa_type: args.visa_type,
            gender: args.gender,
        }
    }
}

/// What a parsed command asks for: one dashboard screen, or an alert pass.
#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    View(ViewState),
    Alerts(AlertArgs),
}

impl From<Command> for Invocation {
    fn from(command: Command) -> Self {
        match command {
            Command::Dashboard(args) => Self::View(ViewState::Dashboard(args.into())),
            Command::Employees(args) => Self::View(ViewState::EmployeeList(args.into())),
            Command::Employee { id } => Self::View(ViewState::EmployeeDetail(CaseId(id))),
            Command::Report(args) => Self::View(ViewState::Reports(args.into())),
            Command::Alerts(args) => Self::Alerts(args),
        }
    }
}

/// One reading of the clock per run. `--today` replaces the date and keeps the time.
fn evaluation_instant<Tz: TimeZone>(
    today: Option<NaiveDate>,
    clock: &DateTime<Tz>,
) -> NaiveDateTime {
    let local = clock.naive_local();
    today.unwrap_or(local.date()).and_time(local.time())
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(path) = cli.data {
        config.data.cases_csv = Some(path);
    }
    telemetry::init(&config.telemetry)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Dashboard(FilterArgs::default()));
    let now = evaluation_instant(cli.today, &Local::now());
    let service = CaseService::new(Arc::new(infra::case_repository(&config.data)));
    let mut out = std::io::stdout().lock();

    match Invocation::from(command) {
        Invocation::View(view) => {
            commands::show_view(&service, &view, now.date(), cli.format, &mut out).await
        }
        Invocation::Alerts(args) => {
            let ledger = infra::InMemoryAlertLedger::default();
            commands::alerts(
                &service,
                &config.alerts.policy(),
                &ledger,
                now,
                &args,
                cli.format,
                &mut out,
            )
            .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn filter_flags_parse_into_criteria() {
        let cli = Cli::try_parse_from([
            "visa-tracker",
            "report",
            "--department",
            "Engineering",
            "--status",
            "processing",
            "--name",
            " chen ",
        ])
        .expect("parse cli");

        let Some(Command::Report(args)) = cli.command else {
            panic!("expected report command");
        };
        let criteria = FilterCriteria::from(args);
        assert_eq!(criteria.department, Selection::Only("Engineering".to_string()));
        assert_eq!(criteria.status, Selection::Only(VisaStatus::Processing));
        assert_eq!(criteria.name_query, "chen");
        assert!(criteria.visa_type.is_all());
    }

    #[test]
    fn unknown_status_flag_is_rejected() {
        let err = Cli::try_parse_from(["visa-tracker", "dashboard", "--status", "lapsed"])
            .expect_err("status outside the closed set");
        assert!(err.to_string().contains("lapsed"));
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "visa-tracker",
            "employee",
            "7",
            "--today",
            "2024-11-01",
            "--format",
            "json",
        ])
        .expect("parse cli");

        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2024, 11, 1));
        assert_eq!(cli.format, OutputFormat::Json);
        let invocation = Invocation::from(cli.command.expect("command"));
        assert_eq!(
            invocation,
            Invocation::View(ViewState::EmployeeDetail(CaseId::from("7")))
        );
    }

    #[test]
    fn alerts_command_is_not_a_view() {
        let cli = Cli::try_parse_from(["visa-tracker", "alerts", "--dispatch"]).expect("parse cli");
        let invocation = Invocation::from(cli.command.expect("command"));
        assert_eq!(invocation, Invocation::Alerts(AlertArgs { dispatch: true }));
    }

    #[test]
    fn evaluation_instant_reads_one_clock() {
        let clock = FixedOffset::east_opt(0)
            .and_then(|offset| offset.with_ymd_and_hms(2024, 11, 1, 23, 59, 30).single())
            .expect("valid instant");

        let now = evaluation_instant(None, &clock);
        assert_eq!(now.date(), NaiveDate::from_ymd_opt(2024, 11, 1).expect("valid date"));
        assert_eq!(now.time(), clock.naive_local().time());

        let pinned = NaiveDate::from_ymd_opt(2025, 3, 3).expect("valid date");
        let now = evaluation_instant(Some(pinned), &clock);
        assert_eq!(now.date(), pinned);
        assert_eq!(now.time(), clock.naive_local().time());
    }

    #[test]
    fn default_filter_args_match_everything() {
        let criteria = FilterCriteria::from(FilterArgs::default());
        assert!(criteria.is_unconstrained());
    }
}
