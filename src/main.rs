use anyhow::Context;
use chrono::Local;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    configuration::Configuration, configuration_handler::ConfigurationHandler,
    http::create_app, local_schedule::LocalSchedule, notifier::TracingNotifier,
    reservation_service::ReservationService,
};

mod backend;
mod cancellation_log;
mod configuration;
mod configuration_handler;
mod http;
mod local_schedule;
mod notifier;
mod outcome;
mod reservation_service;
mod schedule_state;
mod slot_catalog;
#[cfg(test)]
mod testutils;
mod types;
mod validation;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("########################");
    println!("# Appointment Schedule #");
    println!("########################");

    let configuration = ConfigurationHandler::parse_arguments();
    let schedule_config = configuration
        .schedule_config()
        .context("Invalid working hours")?;

    let today = Local::now().date_naive();
    let service = ReservationService::new(schedule_config, today, TracingNotifier);
    let backend = LocalSchedule::new(service);
    info!(?schedule_config, %today, "Schedule ready");

    let address = format!("0.0.0.0:{}", configuration.port());
    println!("Accessible at:\n{address}");
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    let app = create_app(backend, configuration);
    axum::serve(listener, app).await.context("Server stopped")?;
    Ok(())
}
