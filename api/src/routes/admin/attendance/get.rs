use super::common::{EventResponse, service_error};
use crate::response::ApiResponse;
use crate::state::AppState;
use attendance::{Segment, messages};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

/// GET `/api/admin/attendance/events`
///
/// All events, newest event date first.
pub async fn list_events(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Vec<EventResponse>>>) {
    match state.events().list().await {
        Ok(events) => {
            let urls = state.events().urls();
            let data = events
                .into_iter()
                .map(|e| EventResponse::new(e, urls))
                .collect::<Vec<_>>();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Events retrieved successfully")),
            )
        }
        Err(e) => service_error(e),
    }
}

/// GET `/api/admin/attendance/events/{event_id}`
///
/// ### Responses
/// - `200 OK`: the event with its QR codes and check-in URLs
/// - `404 Not Found`: no such event
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> (StatusCode, Json<ApiResponse<EventResponse>>) {
    match state.events().get(&event_id).await {
        Ok(event) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                EventResponse::new(event, state.events().urls()),
                "Event retrieved successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}

/// GET `/api/admin/attendance/events/{event_id}/qr/{segment}`
///
/// Downloads the stored QR code for one segment as `image/png`, named
/// `qr-{segment}-{event-name}.png`.
///
/// ### Responses
/// - `200 OK`: PNG bytes with a `Content-Disposition: attachment` header
/// - `404 Not Found`: unknown segment, no such event, or no QR code stored yet
/// - `500 Internal Server Error`: the stored image could not be decoded
pub async fn download_qr(
    State(state): State<AppState>,
    Path((event_id, segment)): Path<(String, String)>,
) -> Response {
    let Ok(segment) = segment.parse::<Segment>() else {
        return (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(messages::UNKNOWN_SEGMENT)),
        )
            .into_response();
    };

    let image = match state.events().qr_download(&event_id, segment).await {
        Ok(image) => image,
        Err(e) => return service_error::<()>(e).into_response(),
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", image.file_name))
            .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
    );
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));

    (StatusCode::OK, headers, image.png).into_response()
}
