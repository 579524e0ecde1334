mod insights;
mod statistics;
pub mod views;

pub use insights::{generate_insights, status_conflicts};
pub use statistics::{aggregate, CaseStatistics, EXPIRING_SOON_DAYS, UNSPECIFIED_GENDER};
