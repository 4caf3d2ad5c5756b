use crate::response::ApiResponse;
use crate::state::AppState;
use attendance::form::{FieldError, FieldSpec, FormPage, FormState, LoadError};
use attendance::{Segment, messages};
use axum::{Json, http::StatusCode};
use chrono::NaiveDate;
use serde::Serialize;

/// What a client needs to render a check-in form.
#[derive(Debug, Serialize, Default)]
pub struct FormDescriptor {
    pub event_id: String,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub event_type: String,
    pub segment: String,
    pub title: String,
    pub fields: Vec<FieldSpec>,
    /// Whether this segment has a spreadsheet destination.
    pub configured: bool,
}

impl FormDescriptor {
    pub fn from_page(page: &FormPage) -> Option<Self> {
        let FormState::Ready { event, .. } = page.state() else {
            return None;
        };
        let schema = page.schema();
        Some(Self {
            event_id: event.id.clone(),
            event_name: event.event_name.clone(),
            event_date: event.event_date,
            event_type: event.event_type.clone(),
            segment: schema.segment.as_str().to_owned(),
            title: schema.title.to_owned(),
            fields: schema.fields.to_vec(),
            configured: event.destination_url(schema.segment).is_some(),
        })
    }
}

#[derive(Debug, Serialize, Default)]
pub struct CheckinOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

pub type Rejection<T> = (StatusCode, Json<ApiResponse<T>>);

/// Resolves the segment and loads the event into a fresh page.
///
/// Unknown segments and unknown or inactive events are `404`; a registry
/// failure is `500`.
pub async fn load_page<T>(state: &AppState, segment: &str, event_id: &str) -> Result<FormPage, Rejection<T>>
where
    T: Serialize + Default,
{
    let segment: Segment = segment.parse().map_err(|_| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(messages::UNKNOWN_SEGMENT)),
        )
    })?;

    let mut page = FormPage::new(segment);
    page.load(&state.event_source(), event_id).await;

    if let FormState::Error { kind, message } = page.state() {
        let status = match kind {
            LoadError::NotFound => StatusCode::NOT_FOUND,
            LoadError::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
        };
        return Err((status, Json(ApiResponse::error(message.clone()))));
    }
    Ok(page)
}
