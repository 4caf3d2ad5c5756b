use super::common::{EventResponse, TestConnectionReq, service_error};
use crate::response::ApiResponse;
use crate::state::AppState;
use attendance::SubmitResult;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::attendance_event::EventInput;

/// POST `/api/admin/attendance/events`
///
/// Creates an event and renders one QR code per segment.
///
/// ### Request Body
/// ```json
/// {
///   "event_name": "Makrab 2025",
///   "event_date": "2025-03-01",
///   "event_type": "general",
///   "spreadsheet_url_senior": "https://script.google.com/macros/s/ABC/exec",
///   "spreadsheet_url_umum": null,
///   "spreadsheet_url_panitia": "",
///   "is_active": true
/// }
/// ```
/// Blank destination URLs are stored as unset.
///
/// ### Responses
/// - `201 Created`: the new event, QR codes included
/// - `422 Unprocessable Entity`: empty name or a non-Apps-Script destination URL
/// - `500 Internal Server Error`: QR rendering or database failure
pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<EventInput>,
) -> (StatusCode, Json<ApiResponse<EventResponse>>) {
    match state.events().create(&req).await {
        Ok(event) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                EventResponse::new(event, state.events().urls()),
                "Event created successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}

/// POST `/api/admin/attendance/events/{event_id}/qr`
///
/// Re-renders and replaces all three QR codes, e.g. after the public origin changed.
pub async fn regenerate_qr(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> (StatusCode, Json<ApiResponse<EventResponse>>) {
    match state.events().regenerate_qr_codes(&event_id).await {
        Ok(event) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                EventResponse::new(event, state.events().urls()),
                "QR codes regenerated successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}

/// POST `/api/admin/attendance/test-connection`
///
/// Sends a probe to an Apps Script URL. Always `200 OK`; the outcome is in
/// `success` and `message`.
///
/// ```json
/// { "url": "https://script.google.com/macros/s/ABC/exec" }
/// ```
pub async fn test_connection(
    State(state): State<AppState>,
    Json(req): Json<TestConnectionReq>,
) -> (StatusCode, Json<ApiResponse<SubmitResult>>) {
    let result = state.sheets().test_connection(&req.url).await;
    let message = result.message_or_default().to_owned();
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: result.success,
            data: result,
            message,
        }),
    )
}
