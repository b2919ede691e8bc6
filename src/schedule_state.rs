use crate::types::{DaySchedule, Slot, SlotStatus, SlotTime};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("no slot at {0} in the current schedule")]
    SlotNotFound(SlotTime),
    #[error("slot {0} is already booked")]
    SlotAlreadyBooked(SlotTime),
    #[error("slot {0} is not booked")]
    SlotNotBooked(SlotTime),
}

/// Owns the schedule of the selected day. Slots are only ever replaced as a
/// whole catalog; individual transitions touch status and booking fields.
#[derive(Debug, Clone)]
pub struct ScheduleState {
    schedule: DaySchedule,
}

impl ScheduleState {
    pub fn new(date: NaiveDate, catalog: Vec<Slot>) -> Self {
        let mut state = Self {
            schedule: DaySchedule {
                date,
                slots: vec![],
            },
        };
        state.replace(date, catalog);
        state
    }

    /// Discards the current day and installs `catalog` for `date`, every slot
    /// reset to `Available`.
    pub fn replace(&mut self, date: NaiveDate, catalog: Vec<Slot>) {
        let mut slots: Vec<Slot> = catalog
            .into_iter()
            .map(|slot| Slot::available(slot.time))
            .collect();
        slots.sort_unstable_by(|a, b| a.time.cmp(&b.time));
        slots.dedup_by(|a, b| a.time == b.time);

        self.schedule = DaySchedule { date, slots };
    }

    pub fn date(&self) -> NaiveDate {
        self.schedule.date
    }

    pub fn find(&self, time: SlotTime) -> Option<&Slot> {
        self.position(time).map(|index| &self.schedule.slots[index])
    }

    pub fn set_booked(
        &mut self,
        time: SlotTime,
        name: String,
        purpose: String,
    ) -> Result<(), ScheduleError> {
        let slot = self.slot_mut(time)?;
        if slot.status != SlotStatus::Available {
            return Err(ScheduleError::SlotAlreadyBooked(time));
        }
        slot.status = SlotStatus::Booked;
        slot.booked_by = Some(name);
        slot.purpose = Some(purpose);
        Ok(())
    }

    /// Returns the slot as it was before release.
    pub fn set_available(&mut self, time: SlotTime) -> Result<Slot, ScheduleError> {
        let slot = self.slot_mut(time)?;
        if slot.status != SlotStatus::Booked {
            return Err(ScheduleError::SlotNotBooked(time));
        }
        let released = slot.clone();
        *slot = Slot::available(time);
        Ok(released)
    }

    pub fn booked_slots(&self) -> Vec<Slot> {
        self.schedule
            .slots
            .iter()
            .filter(|slot| slot.is_booked())
            .cloned()
            .collect()
    }

    pub fn snapshot(&self) -> DaySchedule {
        self.schedule.clone()
    }

    fn position(&self, time: SlotTime) -> Option<usize> {
        self.schedule
            .slots
            .binary_search_by(|slot| slot.time.cmp(&time))
            .ok()
    }

    fn slot_mut(&mut self, time: SlotTime) -> Result<&mut Slot, ScheduleError> {
        match self.position(time) {
            Some(index) => Ok(&mut self.schedule.slots[index]),
            None => Err(ScheduleError::SlotNotFound(time)),
        }
    }
}
