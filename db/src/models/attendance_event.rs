use attendance::{AttendanceEvent, Segment};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::QueryOrder;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "attendance_events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub event_name: String,
    pub event_date: NaiveDate,
    pub event_type: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub qr_code_senior: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub qr_code_umum: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub qr_code_panitia: Option<String>,

    pub spreadsheet_url_senior: Option<String>,
    pub spreadsheet_url_umum: Option<String>,
    pub spreadsheet_url_panitia: Option<String>,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Editable part of an event, as submitted by the admin panel.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct EventInput {
    pub event_name: String,
    pub event_date: NaiveDate,
    #[serde(default = "default_event_type")]
    pub event_type: String,
    #[serde(default)]
    pub spreadsheet_url_senior: Option<String>,
    #[serde(default)]
    pub spreadsheet_url_umum: Option<String>,
    #[serde(default)]
    pub spreadsheet_url_panitia: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_event_type() -> String {
    "general".to_owned()
}

fn default_active() -> bool {
    true
}

impl EventInput {
    pub fn destination_url(&self, segment: Segment) -> Option<&str> {
        match segment {
            Segment::Senior => self.spreadsheet_url_senior.as_deref(),
            Segment::General => self.spreadsheet_url_umum.as_deref(),
            Segment::Staff => self.spreadsheet_url_panitia.as_deref(),
        }
    }
}

/// Rendered QR images for the three segments, as PNG data URIs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrCodes {
    pub senior: String,
    pub umum: String,
    pub panitia: String,
}

/// Blank URLs are stored as NULL.
fn clean_url(url: &Option<String>) -> Option<String> {
    url.as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_owned)
}

impl Model {
    /// Inserts a new event under a fresh UUID. QR images are added afterwards
    /// with [`Model::set_qr_codes`], once the id they encode is known.
    pub async fn create(db: &DbConn, input: &EventInput) -> Result<Model, DbErr> {
        let now = Utc::now();
        let event = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            event_name: Set(input.event_name.trim().to_owned()),
            event_date: Set(input.event_date),
            event_type: Set(input.event_type.clone()),
            qr_code_senior: Set(None),
            qr_code_umum: Set(None),
            qr_code_panitia: Set(None),
            spreadsheet_url_senior: Set(clean_url(&input.spreadsheet_url_senior)),
            spreadsheet_url_umum: Set(clean_url(&input.spreadsheet_url_umum)),
            spreadsheet_url_panitia: Set(clean_url(&input.spreadsheet_url_panitia)),
            is_active: Set(input.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        };

        event.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id.to_owned()).one(db).await
    }

    /// Same as [`Model::find_by_id`] but treats inactive events as missing.
    pub async fn find_active_by_id(db: &DbConn, id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id.to_owned())
            .filter(Column::IsActive.eq(true))
            .one(db)
            .await
    }

    /// All events, most recent event date first.
    pub async fn list(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_desc(Column::EventDate)
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await
    }

    /// Replaces the editable fields. QR images are left untouched.
    pub async fn update(db: &DbConn, id: &str, input: &EventInput) -> Result<Model, DbErr> {
        let event = ActiveModel {
            id: Set(id.to_owned()),
            event_name: Set(input.event_name.trim().to_owned()),
            event_date: Set(input.event_date),
            event_type: Set(input.event_type.clone()),
            spreadsheet_url_senior: Set(clean_url(&input.spreadsheet_url_senior)),
            spreadsheet_url_umum: Set(clean_url(&input.spreadsheet_url_umum)),
            spreadsheet_url_panitia: Set(clean_url(&input.spreadsheet_url_panitia)),
            is_active: Set(input.is_active),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        event.update(db).await
    }

    /// Stores all three QR images in a single write.
    pub async fn set_qr_codes(db: &DbConn, id: &str, codes: QrCodes) -> Result<Model, DbErr> {
        let event = ActiveModel {
            id: Set(id.to_owned()),
            qr_code_senior: Set(Some(codes.senior)),
            qr_code_umum: Set(Some(codes.umum)),
            qr_code_panitia: Set(Some(codes.panitia)),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        event.update(db).await
    }

    /// Returns whether a row was removed.
    pub async fn delete(db: &DbConn, id: &str) -> Result<bool, DbErr> {
        let res = Entity::delete_by_id(id.to_owned()).exec(db).await?;
        Ok(res.rows_affected > 0)
    }

    pub fn qr_code(&self, segment: Segment) -> Option<&str> {
        match segment {
            Segment::Senior => self.qr_code_senior.as_deref(),
            Segment::General => self.qr_code_umum.as_deref(),
            Segment::Staff => self.qr_code_panitia.as_deref(),
        }
    }

    pub fn destination_url(&self, segment: Segment) -> Option<&str> {
        match segment {
            Segment::Senior => self.spreadsheet_url_senior.as_deref(),
            Segment::General => self.spreadsheet_url_umum.as_deref(),
            Segment::Staff => self.spreadsheet_url_panitia.as_deref(),
        }
    }
}

impl From<Model> for AttendanceEvent {
    fn from(m: Model) -> Self {
        AttendanceEvent {
            id: m.id,
            event_name: m.event_name,
            event_date: m.event_date,
            event_type: m.event_type,
            spreadsheet_url_senior: m.spreadsheet_url_senior,
            spreadsheet_url_umum: m.spreadsheet_url_umum,
            spreadsheet_url_panitia: m.spreadsheet_url_panitia,
            is_active: m.is_active,
        }
    }
}
