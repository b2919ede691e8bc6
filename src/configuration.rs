use crate::types::{ConfigurationError, ScheduleConfig};
use std::path::PathBuf;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn website_title(&self) -> String;
    fn frontend_path(&self) -> PathBuf;
    fn port(&self) -> String;
    fn schedule_config(&self) -> Result<ScheduleConfig, ConfigurationError>;
    /// How many days past today a date may be selected.
    fn max_advance_days(&self) -> u32;
}
