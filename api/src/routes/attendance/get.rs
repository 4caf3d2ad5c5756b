use super::common::{FormDescriptor, load_page};
use crate::response::ApiResponse;
use crate::state::AppState;
use attendance::messages;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// GET `/api/attendance/{segment}/{event_id}`
///
/// Form descriptor for an active event: event details, segment title, the
/// field list and whether the segment has a destination configured.
///
/// ### Responses
/// - `200 OK`: [`FormDescriptor`]
/// - `404 Not Found`: unknown segment, or the event does not exist or is inactive
/// - `500 Internal Server Error`: registry lookup failed
pub async fn get_form(
    State(state): State<AppState>,
    Path((segment, event_id)): Path<(String, String)>,
) -> (StatusCode, Json<ApiResponse<FormDescriptor>>) {
    let page = match load_page(&state, &segment, &event_id).await {
        Ok(page) => page,
        Err(rejection) => return rejection,
    };

    match FormDescriptor::from_page(&page) {
        Some(descriptor) => {
            let title = descriptor.title.clone();
            (StatusCode::OK, Json(ApiResponse::success(descriptor, title)))
        }
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(messages::EVENT_LOAD_FAILED)),
        ),
    }
}
