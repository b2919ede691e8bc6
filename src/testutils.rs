use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use chrono::NaiveDate;
use futures::StreamExt;
use tokio::{
    sync::watch::{self, Sender},
    time::timeout,
};
use tokio_stream::wrappers::WatchStream;

use crate::{
    backend::ScheduleBackend,
    outcome::BookingOutcome,
    types::{CancelledRecord, DaySchedule, Slot},
};

pub async fn read_from_schedule_stream(stream: &mut WatchStream<DaySchedule>) -> DaySchedule {
    timeout(Duration::from_secs(1), stream.next())
        .await
        .expect("No schedule published within a second")
        .expect("Schedule stream closed")
}

pub struct MockScheduleBackendInner {
    pub outcome: Mutex<BookingOutcome>,
    pub calls_to_schedule: AtomicU64,
    pub calls_to_select_date: AtomicU64,
    pub calls_to_booked_slots: AtomicU64,
    pub calls_to_cancellations: AtomicU64,
    pub calls_to_book_client: AtomicU64,
    pub calls_to_pre_book_admin: AtomicU64,
    pub calls_to_cancel: AtomicU64,
    pub schedule: Mutex<DaySchedule>,
    pub cancelled: Mutex<Vec<CancelledRecord>>,
    pub sender: Sender<DaySchedule>,
}

#[derive(Clone)]
pub struct MockScheduleBackend(pub Arc<MockScheduleBackendInner>);

impl MockScheduleBackendInner {
    fn new(date: NaiveDate) -> Self {
        let schedule = DaySchedule {
            date,
            slots: vec![],
        };
        let (sender, _) = watch::channel(schedule.clone());
        Self {
            outcome: Mutex::new(BookingOutcome::NotFound {
                time: String::new(),
            }),
            calls_to_schedule: AtomicU64::default(),
            calls_to_select_date: AtomicU64::default(),
            calls_to_booked_slots: AtomicU64::default(),
            calls_to_cancellations: AtomicU64::default(),
            calls_to_book_client: AtomicU64::default(),
            calls_to_pre_book_admin: AtomicU64::default(),
            calls_to_cancel: AtomicU64::default(),
            schedule: Mutex::new(schedule),
            cancelled: Mutex::default(),
            sender,
        }
    }
}

impl MockScheduleBackend {
    pub fn new(date: NaiveDate) -> Self {
        Self(Arc::new(MockScheduleBackendInner::new(date)))
    }

    pub fn respond_with(&self, outcome: BookingOutcome) {
        *self.0.outcome.lock().unwrap() = outcome;
    }

    fn outcome(&self) -> BookingOutcome {
        self.0.outcome.lock().unwrap().clone()
    }
}

impl ScheduleBackend for MockScheduleBackend {
    fn schedule(&self) -> DaySchedule {
        self.0.calls_to_schedule.fetch_add(1, Ordering::SeqCst);
        self.0.schedule.lock().unwrap().clone()
    }

    fn schedule_stream(&self) -> WatchStream<DaySchedule> {
        WatchStream::new(self.0.sender.subscribe())
    }

    fn select_date(&self, date: NaiveDate) -> DaySchedule {
        self.0.calls_to_select_date.fetch_add(1, Ordering::SeqCst);
        let mut schedule = self.0.schedule.lock().unwrap();
        schedule.date = date;
        self.0.sender.send_replace(schedule.clone());
        schedule.clone()
    }

    fn booked_slots(&self) -> Vec<Slot> {
        self.0.calls_to_booked_slots.fetch_add(1, Ordering::SeqCst);
        self.0
            .schedule
            .lock()
            .unwrap()
            .slots
            .iter()
            .filter(|slot| slot.is_booked())
            .cloned()
            .collect()
    }

    fn cancellations(&self, _date: NaiveDate) -> Vec<CancelledRecord> {
        self.0.calls_to_cancellations.fetch_add(1, Ordering::SeqCst);
        self.0.cancelled.lock().unwrap().clone()
    }

    fn book_client(&self, _time: &str, _name: &str, _purpose: &str) -> BookingOutcome {
        self.0.calls_to_book_client.fetch_add(1, Ordering::SeqCst);
        self.outcome()
    }

    fn pre_book_admin(&self, _time: &str, _name: &str, _purpose: &str) -> BookingOutcome {
        self.0
            .calls_to_pre_book_admin
            .fetch_add(1, Ordering::SeqCst);
        self.outcome()
    }

    fn cancel(&self, _time: &str, _reason: &str) -> BookingOutcome {
        self.0.calls_to_cancel.fetch_add(1, Ordering::SeqCst);
        self.outcome()
    }
}
