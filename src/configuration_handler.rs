use crate::{
    configuration::Configuration,
    types::{ConfigurationError, ScheduleConfig},
};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Parser)]
#[command(name = "appointment_scheduler", about = "Books appointments into the slots of a single day")]
pub struct ConfigurationHandler {
    #[arg(long, env = "APPOINTMENTS_PORT", default_value = "3000")]
    port: String,

    #[arg(long, env = "APPOINTMENTS_WEBSITE_TITLE", default_value = "Appointment Booking")]
    website_title: String,

    #[arg(long, env = "APPOINTMENTS_FRONTEND_PATH", default_value = "../frontend/index.html")]
    frontend_path: PathBuf,

    /// First bookable hour of the day
    #[arg(long, env = "APPOINTMENTS_START_HOUR", default_value_t = 9)]
    start_hour: u32,

    /// Hour at which the last slot has to end
    #[arg(long, env = "APPOINTMENTS_END_HOUR", default_value_t = 17)]
    end_hour: u32,

    /// Length of a slot in minutes
    #[arg(long, env = "APPOINTMENTS_STEP_MINUTES", default_value_t = 30)]
    step_minutes: u32,

    #[arg(long, env = "APPOINTMENTS_MAX_ADVANCE_DAYS", default_value_t = 30)]
    max_advance_days: u32,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        if let Err(err) = dotenvy::dotenv() {
            debug!(?err, "No .env file loaded");
        }
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn website_title(&self) -> String {
        self.website_title.clone()
    }

    fn frontend_path(&self) -> PathBuf {
        self.frontend_path.clone()
    }

    fn port(&self) -> String {
        self.port.clone()
    }

    fn schedule_config(&self) -> Result<ScheduleConfig, ConfigurationError> {
        ScheduleConfig::new(self.start_hour, self.end_hour, self.step_minutes)
    }

    fn max_advance_days(&self) -> u32 {
        self.max_advance_days
    }
}
