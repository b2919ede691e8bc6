use crate::types::{ScheduleConfig, Slot, SlotTime};
use tracing::debug;

/// Produces the day's slots from `start_hour:00` up to but excluding
/// `end_hour:00`. A trailing partial step is dropped.
pub fn generate_catalog(config: &ScheduleConfig) -> Vec<Slot> {
    let end_hour = config.end_hour.min(24);
    if config.step_minutes == 0 || config.start_hour >= end_hour {
        return vec![];
    }

    let start = config.start_hour * 60;
    let end = end_hour * 60;
    let step = config.step_minutes;

    let slots: Vec<Slot> = (start..end)
        .step_by(step as usize)
        .filter(|minutes| minutes.checked_add(step).is_some_and(|next| next <= end))
        .filter_map(SlotTime::from_minutes)
        .map(Slot::available)
        .collect();

    debug!(?config, slots = slots.len(), "Generated slot catalog");
    slots
}
