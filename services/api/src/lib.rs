mod classify;
mod cli;
mod infra;
mod pages;
mod routes;
mod server;

pub use routes::with_document_routes;

use scholar_detect::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
