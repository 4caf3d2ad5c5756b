use super::common::{EventResponse, service_error};
use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::attendance_event::EventInput;

/// PUT `/api/admin/attendance/events/{event_id}`
///
/// Replaces name, date, type, destinations and the active flag. QR codes are
/// not re-rendered since the URLs they encode do not change.
///
/// ### Responses
/// - `200 OK`: the updated event
/// - `404 Not Found`: no such event
/// - `422 Unprocessable Entity`: empty name or a non-Apps-Script destination URL
pub async fn edit_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<EventInput>,
) -> (StatusCode, Json<ApiResponse<EventResponse>>) {
    match state.events().update(&event_id, &req).await {
        Ok(event) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                EventResponse::new(event, state.events().urls()),
                "Event updated successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
