use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use log::{info, warn};
use serde::Deserialize;

use super::session::{session_id_or_new, with_session_id};
use crate::backend::domain::CalendarError;
use crate::backend::AppState;
use shared::{CalendarFocusDate, CalendarMonth, SelectDateRequest, UpdateCalendarFocusResponse};

// Query parameters for the month preview API
#[derive(Debug, Deserialize)]
pub struct CalendarMonthQuery {
    pub month: u32,
    pub year: i32,
}

/// Create a router for calendar related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/session", get(get_session))
        .route("/open", post(open_calendar))
        .route("/close", post(close_calendar))
        .route("/month", get(get_calendar_month))
        .route("/month/preview", get(preview_calendar_month))
        .route("/focus-date/previous", post(navigate_previous_month))
        .route("/focus-date/next", post(navigate_next_month))
        .route("/select", post(select_date))
        .route("/current-date", get(get_current_date))
        .route("/help", get(get_help_info))
}

fn calendar_error_response(e: CalendarError) -> Response {
    warn!("Calendar request rejected: {}", e);
    let status = match e {
        CalendarError::NotOpen => StatusCode::CONFLICT,
        CalendarError::InvalidMonth(_) | CalendarError::OutOfRange { .. } => StatusCode::BAD_REQUEST,
    };
    (status, e.to_string()).into_response()
}

fn month_response(result: Result<CalendarMonth, CalendarError>) -> Response {
    match result {
        Ok(calendar_month) => (StatusCode::OK, Json(calendar_month)).into_response(),
        Err(e) => calendar_error_response(e),
    }
}

fn navigation_response(state: &AppState, result: Result<CalendarFocusDate, CalendarError>) -> Response {
    match result {
        Ok(focus_date) => {
            let response = UpdateCalendarFocusResponse {
                focus_date,
                success_message: format!("Navigated to {}", state.calendar_service.month_label(focus_date)),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => calendar_error_response(e),
    }
}

/// Whether the calendar is open and which month it shows
async fn get_session(State(state): State<AppState>, headers: HeaderMap) -> Response {
    info!("GET /api/calendar/session");

    let session_id = session_id_or_new(&headers);
    let response = state.calendar_service.session(&session_id);
    with_session_id(&session_id, (StatusCode::OK, Json(response)))
}

/// Open the calendar on today's month
async fn open_calendar(State(state): State<AppState>, headers: HeaderMap) -> Response {
    info!("POST /api/calendar/open");

    let session_id = session_id_or_new(&headers);
    with_session_id(&session_id, month_response(state.calendar_service.open(&session_id)))
}

async fn close_calendar(State(state): State<AppState>, headers: HeaderMap) -> Response {
    info!("POST /api/calendar/close");

    let session_id = session_id_or_new(&headers);
    let response = state.calendar_service.close(&session_id);
    with_session_id(&session_id, (StatusCode::OK, Json(response)))
}

/// Get the displayed month with every cell classified
async fn get_calendar_month(State(state): State<AppState>, headers: HeaderMap) -> Response {
    info!("GET /api/calendar/month");

    let session_id = session_id_or_new(&headers);
    with_session_id(&session_id, month_response(state.calendar_service.current_month(&session_id)))
}

/// Render an arbitrary month without changing any session
async fn preview_calendar_month(
    State(state): State<AppState>,
    Query(query): Query<CalendarMonthQuery>,
) -> Response {
    info!("GET /api/calendar/month/preview - query: {:?}", query);

    month_response(state.calendar_service.preview_month(query.month, query.year))
}

/// Navigate to the previous month
async fn navigate_previous_month(State(state): State<AppState>, headers: HeaderMap) -> Response {
    info!("POST /api/calendar/focus-date/previous");

    let session_id = session_id_or_new(&headers);
    let result = state.calendar_service.navigate_previous_month(&session_id);
    with_session_id(&session_id, navigation_response(&state, result))
}

/// Navigate to the next month
async fn navigate_next_month(State(state): State<AppState>, headers: HeaderMap) -> Response {
    info!("POST /api/calendar/focus-date/next");

    let session_id = session_id_or_new(&headers);
    let result = state.calendar_service.navigate_next_month(&session_id);
    with_session_id(&session_id, navigation_response(&state, result))
}

/// Select a date. Unselectable dates are answered with `accepted: false`.
async fn select_date(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SelectDateRequest>,
) -> Response {
    info!("POST /api/calendar/select - request: {:?}", request);

    let session_id = session_id_or_new(&headers);
    let response = state.calendar_service.select_date(&session_id, &request.date);
    with_session_id(&session_id, (StatusCode::OK, Json(response)))
}

/// Get the calendar's reference date
async fn get_current_date(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/calendar/current-date");

    (StatusCode::OK, Json(state.calendar_service.current_date()))
}

/// Help text shown under the calendar
async fn get_help_info(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/calendar/help");

    (StatusCode::OK, Json(state.calendar_service.help_info()))
}
