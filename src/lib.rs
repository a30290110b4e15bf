//! Multi-year labor contract cost projection.
//!
//! The [`costing`] module holds the calculator itself; the command line and HTTP
//! front-ends in this crate only collect input for it and render what it returns.

mod cli;
pub mod config;
pub mod costing;
pub mod error;
mod routes;
mod server;
pub mod telemetry;

use error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
