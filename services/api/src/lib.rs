mod cli;
mod infra;
mod quote;
mod routes;
mod server;

use renewal_incentives::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
