mod cli;
mod harness;
mod infra;
mod routes;
mod server;

use meta_scorer::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
