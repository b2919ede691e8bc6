use crate::{
    backend::ScheduleBackend,
    notifier::{Notifier, TracingNotifier},
    outcome::BookingOutcome,
    reservation_service::ReservationService,
    types::{CancelledRecord, DaySchedule, Slot},
};
use chrono::NaiveDate;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch::{self, Sender};
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

/// In-memory backend. All callers share one `ReservationService`; each
/// operation holds the lock for its whole check-then-write sequence.
pub struct LocalSchedule<N: Notifier = TracingNotifier> {
    service: Arc<Mutex<ReservationService<N>>>,
    sender: Sender<DaySchedule>,
}

impl<N: Notifier> Clone for LocalSchedule<N> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            sender: self.sender.clone(),
        }
    }
}

impl<N: Notifier> LocalSchedule<N> {
    pub fn new(service: ReservationService<N>) -> Self {
        let (sender, _) = watch::channel(service.schedule());
        Self {
            service: Arc::new(Mutex::new(service)),
            sender,
        }
    }

    fn service(&self) -> MutexGuard<'_, ReservationService<N>> {
        self.service.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate<R>(&self, operation: impl FnOnce(&mut ReservationService<N>) -> R) -> R {
        let mut service = self.service();
        let result = operation(&mut service);
        self.send_schedule(service.schedule());
        result
    }

    fn send_schedule(&self, schedule: DaySchedule) {
        let changed = self.sender.send_if_modified(|current| {
            if *current == schedule {
                return false;
            }
            *current = schedule;
            true
        });
        if changed {
            debug!(
                receivers = self.sender.receiver_count(),
                "Published schedule"
            );
        }
    }
}

impl<N: Notifier> ScheduleBackend for LocalSchedule<N> {
    fn schedule(&self) -> DaySchedule {
        self.service().schedule()
    }

    fn schedule_stream(&self) -> WatchStream<DaySchedule> {
        WatchStream::new(self.sender.subscribe())
    }

    fn select_date(&self, date: NaiveDate) -> DaySchedule {
        self.mutate(|service| service.select_date(date))
    }

    fn booked_slots(&self) -> Vec<Slot> {
        self.service().booked_slots()
    }

    fn cancellations(&self, date: NaiveDate) -> Vec<CancelledRecord> {
        self.service().cancellations(date)
    }

    fn book_client(&self, time: &str, name: &str, purpose: &str) -> BookingOutcome {
        self.mutate(|service| service.book_client(time, name, purpose))
    }

    fn pre_book_admin(&self, time: &str, name: &str, purpose: &str) -> BookingOutcome {
        self.mutate(|service| service.pre_book_admin(time, name, purpose))
    }

    fn cancel(&self, time: &str, reason: &str) -> BookingOutcome {
        self.mutate(|service| service.cancel(time, reason))
    }
}
