//! Request and response models for the event admin routes.

use crate::response::ApiResponse;
use attendance::{CheckinUrls, Segment, messages};
use axum::{Json, http::StatusCode};
use chrono::NaiveDate;
use db::models::attendance_event::Model as EventModel;
use serde::{Deserialize, Serialize};
use services::ServiceError;
use tracing::error;

/// Check-in page URL per segment, i.e. what each QR code encodes.
#[derive(Debug, Serialize, Default)]
pub struct CheckinUrlSet {
    pub senior: String,
    pub umum: String,
    pub panitia: String,
}

#[derive(Debug, Serialize, Default)]
pub struct EventResponse {
    pub id: String,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub event_type: String,
    pub qr_code_senior: Option<String>,
    pub qr_code_umum: Option<String>,
    pub qr_code_panitia: Option<String>,
    pub spreadsheet_url_senior: Option<String>,
    pub spreadsheet_url_umum: Option<String>,
    pub spreadsheet_url_panitia: Option<String>,
    pub checkin_urls: CheckinUrlSet,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl EventResponse {
    pub fn new(event: EventModel, urls: &CheckinUrls) -> Self {
        let checkin_urls = CheckinUrlSet {
            senior: urls.build(&event.id, Segment::Senior),
            umum: urls.build(&event.id, Segment::General),
            panitia: urls.build(&event.id, Segment::Staff),
        };
        Self {
            id: event.id,
            event_name: event.event_name,
            event_date: event.event_date,
            event_type: event.event_type,
            qr_code_senior: event.qr_code_senior,
            qr_code_umum: event.qr_code_umum,
            qr_code_panitia: event.qr_code_panitia,
            spreadsheet_url_senior: event.spreadsheet_url_senior,
            spreadsheet_url_umum: event.spreadsheet_url_umum,
            spreadsheet_url_panitia: event.spreadsheet_url_panitia,
            checkin_urls,
            is_active: event.is_active,
            created_at: event.created_at.to_rfc3339(),
            updated_at: event.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TestConnectionReq {
    pub url: String,
}

/// Maps a [`ServiceError`] onto a status code and an error envelope.
pub fn service_error<T>(err: ServiceError) -> (StatusCode, Json<ApiResponse<T>>)
where
    T: Serialize + Default,
{
    match err {
        ServiceError::NotFound(message) => {
            (StatusCode::NOT_FOUND, Json(ApiResponse::error(message)))
        }
        ServiceError::Validation(errors) => {
            let message = errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            (StatusCode::UNPROCESSABLE_ENTITY, Json(ApiResponse::error(message)))
        }
        ServiceError::Database(e) => {
            error!("Database error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
        ServiceError::Qr(e) => {
            error!("QR generation error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(messages::QR_FAILED)),
            )
        }
    }
}
