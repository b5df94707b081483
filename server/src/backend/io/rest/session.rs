use axum::{
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use log::debug;
use uuid::Uuid;

/// Header carrying the visitor's calendar session id, both ways
pub const SESSION_HEADER: &str = "x-session-id";

const MAX_SESSION_ID_LEN: usize = 64;

/// The session id sent by the client, if it is usable
pub fn client_session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| {
            !id.is_empty()
                && id.len() <= MAX_SESSION_ID_LEN
                && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
        .map(str::to_string)
}

/// The client's session id, or a freshly issued one
pub fn session_id_or_new(headers: &HeaderMap) -> String {
    client_session_id(headers).unwrap_or_else(|| {
        let id = Uuid::new_v4().to_string();
        debug!("Issued calendar session {}", id);
        id
    })
}

/// Echo the session id on a response so the client can send it back
pub fn with_session_id(session_id: &str, response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    if let Ok(value) = HeaderValue::from_str(session_id) {
        response.headers_mut().insert(SESSION_HEADER, value);
    }
    response
}
