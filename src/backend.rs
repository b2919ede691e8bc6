use crate::{
    outcome::BookingOutcome,
    types::{CancelledRecord, DaySchedule, Slot},
};
use chrono::NaiveDate;
use tokio_stream::wrappers::WatchStream;

pub trait ScheduleBackend: Clone + Send + Sync + 'static {
    fn schedule(&self) -> DaySchedule;
    fn schedule_stream(&self) -> WatchStream<DaySchedule>;
    fn select_date(&self, date: NaiveDate) -> DaySchedule;
    fn booked_slots(&self) -> Vec<Slot>;
    fn cancellations(&self, date: NaiveDate) -> Vec<CancelledRecord>;
    fn book_client(&self, time: &str, name: &str, purpose: &str) -> BookingOutcome;
    fn pre_book_admin(&self, time: &str, name: &str, purpose: &str) -> BookingOutcome;
    fn cancel(&self, time: &str, reason: &str) -> BookingOutcome;
}
