//! Admin-side operations on the event registry.
//!
//! Creating an event renders one QR code per segment. The three renders run
//! concurrently and are joined before a single write stores them; if any one
//! fails, none are stored and the whole creation reports the failure.

use crate::error::ServiceError;
use attendance::CheckinUrls;
use attendance::error::QrError;
use attendance::form::FieldError;
use attendance::messages;
use attendance::qr::{QrGenerator, decode_data_uri};
use attendance::segment::Segment;
use attendance::sheets::validate_apps_script_url;
use db::models::attendance_event::{EventInput, Model as EventModel, QrCodes};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    pub file_name: String,
    pub png: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct AttendanceEventService {
    db: DatabaseConnection,
    qr: Arc<QrGenerator>,
    urls: CheckinUrls,
}

impl AttendanceEventService {
    pub fn new(db: DatabaseConnection, qr: Arc<QrGenerator>, urls: CheckinUrls) -> Self {
        Self { db, qr, urls }
    }

    pub fn urls(&self) -> &CheckinUrls {
        &self.urls
    }

    pub async fn list(&self) -> Result<Vec<EventModel>, ServiceError> {
        Ok(EventModel::list(&self.db).await?)
    }

    pub async fn get(&self, id: &str) -> Result<EventModel, ServiceError> {
        EventModel::find_by_id(&self.db, id)
            .await?
            .ok_or(ServiceError::NotFound(messages::EVENT_MISSING))
    }

    /// Validates, inserts, then renders and stores the three QR codes.
    ///
    /// A QR failure is returned after the row was inserted; the event then
    /// exists without images until [`Self::regenerate_qr_codes`] succeeds.
    pub async fn create(&self, input: &EventInput) -> Result<EventModel, ServiceError> {
        validate_input(input)?;

        let event = EventModel::create(&self.db, input).await?;
        info!(event_id = %event.id, name = %event.event_name, "Created attendance event");

        let codes = self.render_qr_codes(&event.id).await.map_err(|e| {
            error!(event_id = %event.id, "QR generation failed: {e}");
            e
        })?;
        Ok(EventModel::set_qr_codes(&self.db, &event.id, codes).await?)
    }

    pub async fn update(&self, id: &str, input: &EventInput) -> Result<EventModel, ServiceError> {
        validate_input(input)?;
        self.get(id).await?;

        let event = EventModel::update(&self.db, id, input).await?;
        info!(event_id = %id, "Updated attendance event");
        Ok(event)
    }

    pub async fn regenerate_qr_codes(&self, id: &str) -> Result<EventModel, ServiceError> {
        self.get(id).await?;
        let codes = self.render_qr_codes(id).await?;
        info!(event_id = %id, "Regenerated QR codes");
        Ok(EventModel::set_qr_codes(&self.db, id, codes).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if EventModel::delete(&self.db, id).await? {
            info!(event_id = %id, "Deleted attendance event");
            Ok(())
        } else {
            Err(ServiceError::NotFound(messages::EVENT_MISSING))
        }
    }

    /// A stored QR code decoded to PNG, named after the event and segment.
    pub async fn qr_download(&self, id: &str, segment: Segment) -> Result<QrImage, ServiceError> {
        let event = self.get(id).await?;
        let uri = event
            .qr_code(segment)
            .ok_or(ServiceError::NotFound(messages::QR_MISSING))?;
        let (_, png) = decode_data_uri(uri)?;
        Ok(QrImage {
            file_name: format!("qr-{}-{}.png", segment.as_str(), slugify(&event.event_name)),
            png,
        })
    }

    async fn render_qr_codes(&self, id: &str) -> Result<QrCodes, QrError> {
        let senior_url = self.urls.build(id, Segment::Senior);
        let umum_url = self.urls.build(id, Segment::General);
        let panitia_url = self.urls.build(id, Segment::Staff);

        let (senior, umum, panitia) = tokio::try_join!(
            self.qr.generate(&senior_url),
            self.qr.generate(&umum_url),
            self.qr.generate(&panitia_url),
        )?;
        Ok(QrCodes {
            senior,
            umum,
            panitia,
        })
    }
}

/// `"Makrab 2025!"` -> `"makrab-2025"`
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "event".to_owned()
    } else {
        slug.to_owned()
    }
}

/// Event name must be present; destination URLs must be blank or Apps Script URLs.
pub fn validate_input(input: &EventInput) -> Result<(), ServiceError> {
    let mut errors = Vec::new();
    if input.event_name.trim().is_empty() {
        errors.push(FieldError {
            field: "event_name".into(),
            message: messages::field_required(messages::EVENT_NAME_LABEL),
        });
    }
    for segment in Segment::ALL {
        let url = input.destination_url(segment).unwrap_or_default();
        if let Some(message) = validate_apps_script_url(url) {
            errors.push(FieldError {
                field: format!("spreadsheet_url_{}", segment.as_str()),
                message: message.to_owned(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(errors))
    }
}
