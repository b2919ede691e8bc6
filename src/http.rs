use crate::backend::ScheduleBackend;
use crate::configuration::Configuration;
use crate::outcome::{BookingOutcome, Notice, OutcomeKind};
use crate::types::{CancelledRecord, DaySchedule, ScheduleConfig, Slot};
use axum::extract::Path;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::Html;
use axum::{extract::State, http::StatusCode, Json};
use axum::{
    routing::{get, post},
    Router,
};
use chrono::{Days, Local, NaiveDate};
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

#[derive(Clone)]
struct AppState<T: ScheduleBackend, C: Configuration> {
    backend: T,
    configuration: C,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct BookingRequest {
    time: String,
    name: String,
    purpose: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct CancelRequest {
    time: String,
    reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DateSelection {
    date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OutcomeResponse {
    outcome: BookingOutcome,
    notice: Notice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Settings {
    website_title: String,
    schedule: ScheduleConfig,
    first_date: NaiveDate,
    last_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum DateWindowError {
    #[error("{date} lies in the past")]
    InPast { date: NaiveDate },
    #[error("{date} is more than {max_advance_days} days ahead")]
    TooFarAhead {
        date: NaiveDate,
        max_advance_days: u32,
    },
}

/// First and last selectable date, both inclusive.
fn booking_window(today: NaiveDate, max_advance_days: u32) -> (NaiveDate, NaiveDate) {
    let last = today
        .checked_add_days(Days::new(max_advance_days.into()))
        .unwrap_or(NaiveDate::MAX);
    (today, last)
}

fn check_booking_window(
    today: NaiveDate,
    date: NaiveDate,
    max_advance_days: u32,
) -> Result<(), DateWindowError> {
    let (first, last) = booking_window(today, max_advance_days);
    if date < first {
        return Err(DateWindowError::InPast { date });
    }
    if date > last {
        return Err(DateWindowError::TooFarAhead {
            date,
            max_advance_days,
        });
    }
    Ok(())
}

fn outcome_response(outcome: BookingOutcome) -> (StatusCode, Json<OutcomeResponse>) {
    let status = match outcome.kind() {
        OutcomeKind::Success => StatusCode::OK,
        OutcomeKind::AlreadyBooked => StatusCode::CONFLICT,
        OutcomeKind::NotFound => StatusCode::NOT_FOUND,
        OutcomeKind::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
    };
    let notice = outcome.notice();
    (status, Json(OutcomeResponse { outcome, notice }))
}

pub fn create_app<T: ScheduleBackend, C: Configuration>(backend: T, configuration: C) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/frontend", get(get_frontend::<T, C>))
        .route("/settings", get(get_settings::<T, C>))
        .route("/schedule", get(get_schedule::<T, C>))
        .route("/schedule/stream", get(stream_schedule::<T, C>))
        .route("/date", post(select_date::<T, C>))
        .route("/book", post(book_slot::<T, C>));

    let admin = Router::new()
        .route("/admin/booked", get(get_booked_slots::<T, C>))
        .route("/admin/prebook", post(pre_book_slot::<T, C>))
        .route("/admin/cancel", post(cancel_slot::<T, C>))
        .route(
            "/admin/cancellations/:date",
            get(get_cancellations::<T, C>),
        );

    Router::new()
        .merge(public)
        .merge(admin)
        .with_state(AppState {
            backend,
            configuration,
        })
        .layer(cors)
}

async fn get_settings<T: ScheduleBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
) -> Result<Json<Settings>, (StatusCode, String)> {
    let schedule = state.configuration.schedule_config().map_err(|err| {
        error!(?err, "Invalid schedule configuration");
        (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    })?;
    let (first_date, last_date) = booking_window(
        Local::now().date_naive(),
        state.configuration.max_advance_days(),
    );
    Ok(Json(Settings {
        website_title: state.configuration.website_title(),
        schedule,
        first_date,
        last_date,
    }))
}

async fn get_schedule<T: ScheduleBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
) -> Json<DaySchedule> {
    Json(state.backend.schedule())
}

async fn stream_schedule<T: ScheduleBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let stream = state
        .backend
        .schedule_stream()
        .map(|schedule| Event::default().json_data(schedule));
    Sse::new(stream).keep_alive(KeepAlive::default())
}

async fn select_date<T: ScheduleBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Json(selection): Json<DateSelection>,
) -> Result<Json<DaySchedule>, (StatusCode, String)> {
    let today = Local::now().date_naive();
    if let Err(err) = check_booking_window(
        today,
        selection.date,
        state.configuration.max_advance_days(),
    ) {
        warn!(%err, "Rejected date selection");
        return Err((StatusCode::UNPROCESSABLE_ENTITY, err.to_string()));
    }
    Ok(Json(state.backend.select_date(selection.date)))
}

async fn book_slot<T: ScheduleBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Json(booking): Json<BookingRequest>,
) -> (StatusCode, Json<OutcomeResponse>) {
    outcome_response(
        state
            .backend
            .book_client(&booking.time, &booking.name, &booking.purpose),
    )
}

async fn get_booked_slots<T: ScheduleBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
) -> Json<Vec<Slot>> {
    Json(state.backend.booked_slots())
}

async fn pre_book_slot<T: ScheduleBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Json(booking): Json<BookingRequest>,
) -> (StatusCode, Json<OutcomeResponse>) {
    outcome_response(
        state
            .backend
            .pre_book_admin(&booking.time, &booking.name, &booking.purpose),
    )
}

async fn cancel_slot<T: ScheduleBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Json(cancellation): Json<CancelRequest>,
) -> (StatusCode, Json<OutcomeResponse>) {
    outcome_response(
        state
            .backend
            .cancel(&cancellation.time, &cancellation.reason),
    )
}

async fn get_cancellations<T: ScheduleBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Path(date): Path<NaiveDate>,
) -> Json<Vec<CancelledRecord>> {
    Json(state.backend.cancellations(date))
}

async fn get_frontend<T: ScheduleBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
) -> Result<Html<String>, (StatusCode, String)> {
    let path = state.configuration.frontend_path();
    info!(?path, "Serving frontend");

    match fs::read_to_string(&path).await {
        Ok(contents) => Ok(Html(contents)),
        Err(e) => {
            let error_message = format!("Failed to read frontend file: {}", e);
            error!(?path, %error_message, "Frontend unavailable");
            Err((StatusCode::INTERNAL_SERVER_ERROR, error_message))
        }
    }
}
