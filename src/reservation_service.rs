use crate::{
    cancellation_log::CancellationLog,
    notifier::Notifier,
    outcome::{BookingOutcome, Confirmation},
    schedule_state::{ScheduleError, ScheduleState},
    slot_catalog::generate_catalog,
    types::{CancelledRecord, DaySchedule, ScheduleConfig, Slot, SlotTime},
    validation::{BookingForm, CancellationForm},
};
use chrono::NaiveDate;
use tracing::{info, warn};

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Client,
    Admin,
}

/// The only way to change booking state. Every operation validates first and
/// mutates only once all checks passed, then reports its outcome to the
/// notifier.
pub struct ReservationService<N: Notifier> {
    config: ScheduleConfig,
    state: ScheduleState,
    log: CancellationLog,
    notifier: N,
}

impl<N: Notifier> ReservationService<N> {
    pub fn new(config: ScheduleConfig, date: NaiveDate, notifier: N) -> Self {
        Self {
            config,
            state: ScheduleState::new(date, generate_catalog(&config)),
            log: CancellationLog::default(),
            notifier,
        }
    }

    /// Installs a fresh, fully available catalog for `date`. Bookings of the
    /// previous day are dropped; cancellation history is kept.
    pub fn select_date(&mut self, date: NaiveDate) -> DaySchedule {
        let previous = self.state.date();
        self.state.replace(date, generate_catalog(&self.config));
        info!(%previous, %date, "Selected date");
        self.state.snapshot()
    }

    pub fn schedule(&self) -> DaySchedule {
        self.state.snapshot()
    }

    pub fn booked_slots(&self) -> Vec<Slot> {
        self.state.booked_slots()
    }

    pub fn cancellations(&self, date: NaiveDate) -> Vec<CancelledRecord> {
        self.log.records_for(date).to_vec()
    }

    pub fn book_client(&mut self, time: &str, name: &str, purpose: &str) -> BookingOutcome {
        let outcome = self.reserve(BookingForm::new(time, name, purpose), Channel::Client);
        self.report(outcome)
    }

    pub fn pre_book_admin(&mut self, time: &str, name: &str, purpose: &str) -> BookingOutcome {
        let outcome = self.reserve(BookingForm::new(time, name, purpose), Channel::Admin);
        self.report(outcome)
    }

    pub fn cancel(&mut self, time: &str, reason: &str) -> BookingOutcome {
        let outcome = self.release(CancellationForm::new(time, reason));
        self.report(outcome)
    }

    fn reserve(&mut self, form: BookingForm, channel: Channel) -> BookingOutcome {
        if let Err(fields) = form.check() {
            return BookingOutcome::ValidationError { fields };
        }
        let Ok(time) = form.time.parse::<SlotTime>() else {
            return BookingOutcome::NotFound { time: form.time };
        };

        match self.state.find(time) {
            None => return BookingOutcome::NotFound { time: form.time },
            Some(slot) if slot.is_booked() => {
                return BookingOutcome::AlreadyBooked { time: form.time }
            }
            Some(_) => {}
        }

        let BookingForm { name, purpose, .. } = form;
        if let Err(err) = self.state.set_booked(time, name.clone(), purpose.clone()) {
            return schedule_error_outcome(err);
        }

        let date = self.state.date();
        info!(%date, %time, %name, ?channel, "Booked slot");
        let confirmation = match channel {
            Channel::Client => Confirmation::Booked {
                date,
                time,
                name,
                purpose,
            },
            Channel::Admin => Confirmation::PreBooked {
                date,
                time,
                name,
                purpose,
            },
        };
        BookingOutcome::Success(confirmation)
    }

    fn release(&mut self, form: CancellationForm) -> BookingOutcome {
        if let Err(fields) = form.check() {
            return BookingOutcome::ValidationError { fields };
        }
        let Ok(time) = form.time.parse::<SlotTime>() else {
            return BookingOutcome::NotFound { time: form.time };
        };

        let released = match self.state.set_available(time) {
            Ok(released) => released,
            Err(err) => return schedule_error_outcome(err),
        };

        let record = CancelledRecord {
            date: self.state.date(),
            time,
            name: released.booked_by.unwrap_or_else(|| UNKNOWN.to_owned()),
            purpose: released.purpose.unwrap_or_else(|| UNKNOWN.to_owned()),
            reason: form.reason,
        };
        self.log.append(record.clone());
        warn!(
            date = %record.date,
            %time,
            name = %record.name,
            reason = %record.reason,
            total_cancellations = self.log.total_records(),
            "Cancelled booking"
        );
        BookingOutcome::Success(Confirmation::Cancelled(record))
    }

    fn report(&self, outcome: BookingOutcome) -> BookingOutcome {
        if !outcome.is_success() {
            warn!(?outcome, "Rejected operation");
        }
        self.notifier.notify(&outcome.notice());
        outcome
    }
}

fn schedule_error_outcome(err: ScheduleError) -> BookingOutcome {
    match err {
        ScheduleError::SlotAlreadyBooked(time) => BookingOutcome::AlreadyBooked {
            time: time.to_string(),
        },
        ScheduleError::SlotNotFound(time) | ScheduleError::SlotNotBooked(time) => {
            BookingOutcome::NotFound {
                time: time.to_string(),
            }
        }
    }
}
