use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use log::{error, info};

use super::session::client_session_id;
use crate::backend::domain::InquiryError;
use crate::backend::AppState;
use shared::{BookingInquiryRequest, BookingInquiryResponse};

/// Create a router for booking inquiry APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_inquiry))
        .route("/hike-date", get(get_hike_date))
}

/// The date this visitor picked in the calendar, `null` if none
async fn get_hike_date(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/inquiry/hike-date");

    let hike_date = client_session_id(&headers).and_then(|id| state.calendar_service.hike_date(&id));
    (StatusCode::OK, Json(hike_date))
}

/// Validate an inquiry and forward it to the spreadsheet
async fn submit_inquiry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<BookingInquiryRequest>,
) -> Response {
    info!("POST /api/inquiry - from {}", request.email);

    let session_id = client_session_id(&headers);
    let submitted_at = Local::now().naive_local();
    match state
        .inquiry_service
        .submit(session_id.as_deref(), request, submitted_at)
        .await
    {
        Ok(_) => {
            let response = BookingInquiryResponse {
                success: true,
                message: "Thank you! We will get back to you within 48 hours.".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            let status = if e.is_validation() {
                StatusCode::BAD_REQUEST
            } else if matches!(e, InquiryError::NotConfigured) {
                StatusCode::INTERNAL_SERVER_ERROR
            } else {
                StatusCode::BAD_GATEWAY
            };
            if status != StatusCode::BAD_REQUEST {
                error!("Failed to submit inquiry: {}", e);
            }
            let response = BookingInquiryResponse {
                success: false,
                message: e.to_string(),
            };
            (status, Json(response)).into_response()
        }
    }
}
