use super::common::service_error;
use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// DELETE `/api/admin/attendance/events/{event_id}`
///
/// ### Responses
/// - `200 OK`: deleted
/// - `404 Not Found`: no such event
pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    match state.events().delete(&event_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Event deleted successfully")),
        ),
        Err(e) => service_error(e),
    }
}
