use crate::types::{CancelledRecord, SlotTime};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// What a successful operation changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Confirmation {
    Booked {
        date: NaiveDate,
        time: SlotTime,
        name: String,
        purpose: String,
    },
    PreBooked {
        date: NaiveDate,
        time: SlotTime,
        name: String,
        purpose: String,
    },
    Cancelled(CancelledRecord),
}

/// Result of every state-changing operation. Failures carry the raw time the
/// caller submitted since it may not name a slot at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "details")]
pub enum BookingOutcome {
    Success(Confirmation),
    AlreadyBooked { time: String },
    NotFound { time: String },
    ValidationError { fields: Vec<FieldError> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    Success,
    AlreadyBooked,
    NotFound,
    ValidationError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// Presentation-ready rendering of an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: Uuid,
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

fn display_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

impl BookingOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            BookingOutcome::Success(_) => OutcomeKind::Success,
            BookingOutcome::AlreadyBooked { .. } => OutcomeKind::AlreadyBooked,
            BookingOutcome::NotFound { .. } => OutcomeKind::NotFound,
            BookingOutcome::ValidationError { .. } => OutcomeKind::ValidationError,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind() == OutcomeKind::Success
    }

    pub fn notice(&self) -> Notice {
        let (severity, title, message) = match self {
            BookingOutcome::Success(Confirmation::Booked {
                date, time, name, ..
            }) => (
                Severity::Success,
                "🎉 Appointment Booked Successfully!",
                format!(
                    "Your appointment with {name} is confirmed for {} at {}.",
                    display_date(*date),
                    time.display_12h()
                ),
            ),
            BookingOutcome::Success(Confirmation::PreBooked { time, name, .. }) => (
                Severity::Success,
                "✅ Admin Pre-booking Successful",
                format!("Appointment pre-booked for {name} at {}.", time.display_12h()),
            ),
            BookingOutcome::Success(Confirmation::Cancelled(record)) => (
                Severity::Warning,
                "⚠️ Appointment Cancelled",
                format!(
                    "Appointment for {} at {} has been cancelled. Reason: {}",
                    record.name,
                    record.time.display_12h(),
                    record.reason
                ),
            ),
            BookingOutcome::AlreadyBooked { .. } => (
                Severity::Error,
                "❌ Slot Already Booked",
                "This time slot is already booked. Please select a different time.".to_owned(),
            ),
            BookingOutcome::NotFound { .. } => (
                Severity::Error,
                "❌ Slot Not Found",
                "The selected slot was not found or is not currently booked.".to_owned(),
            ),
            BookingOutcome::ValidationError { fields } => (
                Severity::Error,
                "❌ Invalid Input",
                fields
                    .iter()
                    .map(|error| error.message.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
        };

        Notice {
            id: Uuid::new_v4(),
            severity,
            title: title.to_owned(),
            message,
        }
    }
}
