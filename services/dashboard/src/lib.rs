mod cli;
mod commands;
mod infra;

use visa_tracker::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
