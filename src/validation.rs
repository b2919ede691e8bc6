use crate::outcome::FieldError;
use std::collections::HashMap;
use validator::{Validate, ValidationErrors};

/// Booking submission with every field trimmed. Used by both the client
/// form and the administrative pre-booking form.
#[derive(Debug, Clone, Validate)]
pub struct BookingForm {
    #[validate(length(min = 1, message = "Time is required"))]
    pub time: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Purpose is required"))]
    pub purpose: String,
}

impl BookingForm {
    const FIELDS: [&'static str; 3] = ["time", "name", "purpose"];

    pub fn new(time: &str, name: &str, purpose: &str) -> Self {
        Self {
            time: time.trim().to_owned(),
            name: name.trim().to_owned(),
            purpose: purpose.trim().to_owned(),
        }
    }

    pub fn check(&self) -> Result<(), Vec<FieldError>> {
        self.validate()
            .map_err(|errors| ordered_field_errors(&errors, &Self::FIELDS))
    }
}

#[derive(Debug, Clone, Validate)]
pub struct CancellationForm {
    #[validate(length(min = 1, message = "Time slot is required"))]
    pub time: String,
    #[validate(length(min = 1, message = "Cancellation reason is required"))]
    pub reason: String,
}

impl CancellationForm {
    const FIELDS: [&'static str; 2] = ["time", "reason"];

    pub fn new(time: &str, reason: &str) -> Self {
        Self {
            time: time.trim().to_owned(),
            reason: reason.trim().to_owned(),
        }
    }

    pub fn check(&self) -> Result<(), Vec<FieldError>> {
        self.validate()
            .map_err(|errors| ordered_field_errors(&errors, &Self::FIELDS))
    }
}

fn ordered_field_errors(errors: &ValidationErrors, order: &[&str]) -> Vec<FieldError> {
    let by_field: HashMap<String, _> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| (field.to_string(), errors))
        .collect();

    order
        .iter()
        .filter_map(|field| {
            let error = by_field.get(*field)?.first()?;
            let message = error
                .message
                .as_ref()
                .map(|message| message.to_string())
                .unwrap_or_else(|| error.code.to_string());
            Some(FieldError {
                field: (*field).to_owned(),
                message,
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|error| error.field.as_str()).collect()
    }

    #[test]
    fn complete_booking_form_passes() {
        let form = BookingForm::new(" 09:00 ", "  Alice ", "Checkup\n");
        form.check().unwrap();
        assert_eq!(form.time, "09:00");
        assert_eq!(form.name, "Alice");
        assert_eq!(form.purpose, "Checkup");
    }

    #[test_case("09:00", "", "x", vec!["name"] ; "empty name")]
    #[test_case("09:00", "   ", "x", vec!["name"] ; "whitespace name")]
    #[test_case("09:00", "Alice", "\t", vec!["purpose"] ; "whitespace purpose")]
    #[test_case("", "Alice", "x", vec!["time"] ; "missing time")]
    #[test_case(" ", "", "", vec!["time", "name", "purpose"] ; "all fields blank")]
    fn blank_booking_fields_are_reported(time: &str, name: &str, purpose: &str, expected: Vec<&str>) {
        let errors = BookingForm::new(time, name, purpose).check().unwrap_err();
        assert_eq!(fields(&errors), expected);
    }

    #[test]
    fn booking_messages_name_the_field() {
        let errors = BookingForm::new("", "", "").check().unwrap_err();
        let messages: Vec<&str> = errors.iter().map(|error| error.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Time is required", "Name is required", "Purpose is required"]
        );
    }

    #[test_case("10:00", "", vec!["reason"] ; "missing reason")]
    #[test_case("", "client request", vec!["time"] ; "missing time")]
    #[test_case("", " ", vec!["time", "reason"] ; "both blank")]
    fn blank_cancellation_fields_are_reported(time: &str, reason: &str, expected: Vec<&str>) {
        let errors = CancellationForm::new(time, reason).check().unwrap_err();
        assert_eq!(fields(&errors), expected);
    }

    #[test]
    fn cancellation_reason_is_trimmed() {
        let form = CancellationForm::new("10:00", "  client request ");
        form.check().unwrap();
        assert_eq!(form.reason, "client request");
    }
}
