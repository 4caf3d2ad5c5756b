use super::common::{CheckinOutcome, load_page};
use crate::response::ApiResponse;
use crate::state::AppState;
use attendance::Payload;
use attendance::form::{Banner, FormState};
use attendance::messages;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// POST `/api/attendance/{segment}/{event_id}`
///
/// Submits one check-in. The body is a flat JSON object of form fields, e.g.
/// `{ "nama": "Andi", "angkatan": 2021 }`; an optional `waktu_checkin` is kept.
///
/// ### Responses
/// - `200 OK`: recorded; `message` is the spreadsheet's confirmation
/// - `400 Bad Request`: this segment has no spreadsheet configured
/// - `404 Not Found`: unknown segment, or the event does not exist or is inactive
/// - `422 Unprocessable Entity`: field validation failed; `data.errors` lists each field
/// - `502 Bad Gateway`: the spreadsheet endpoint could not record the check-in
pub async fn submit_form(
    State(state): State<AppState>,
    Path((segment, event_id)): Path<(String, String)>,
    Json(values): Json<Payload>,
) -> (StatusCode, Json<ApiResponse<CheckinOutcome>>) {
    let mut page = match load_page(&state, &segment, &event_id).await {
        Ok(page) => page,
        Err(rejection) => return rejection,
    };

    page.fill(values);
    let FormState::Ready {
        banner: Some(banner),
        ..
    } = page.submit(state.sheets()).await
    else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(messages::SUBMIT_UNEXPECTED)),
        );
    };

    match banner {
        Banner::Success(message) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                CheckinOutcome {
                    success: true,
                    errors: Vec::new(),
                },
                message.clone(),
            )),
        ),
        Banner::Invalid(errors) => {
            let message = errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::failure(
                    CheckinOutcome {
                        success: false,
                        errors: errors.clone(),
                    },
                    message,
                )),
            )
        }
        Banner::NotConfigured(message) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(message.clone())),
        ),
        Banner::Failed(message) => (
            StatusCode::BAD_GATEWAY,
            Json(ApiResponse::error(message.clone())),
        ),
    }
}
