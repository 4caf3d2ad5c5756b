use crate::segment::Segment;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What a check-in page needs to know about an attendance event.
///
/// This is the registry's record minus the rendered QR images and bookkeeping
/// timestamps; the database layer converts its own model into this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    pub id: String,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub event_type: String,
    pub spreadsheet_url_senior: Option<String>,
    pub spreadsheet_url_umum: Option<String>,
    pub spreadsheet_url_panitia: Option<String>,
    pub is_active: bool,
}

impl AttendanceEvent {
    /// Destination web-app URL for `segment`. Blank values count as unconfigured.
    pub fn destination_url(&self, segment: Segment) -> Option<&str> {
        let url = match segment {
            Segment::Senior => &self.spreadsheet_url_senior,
            Segment::General => &self.spreadsheet_url_umum,
            Segment::Staff => &self.spreadsheet_url_panitia,
        };
        url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Read access to the event registry as seen by a check-in page.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Looks up an event by id, returning `None` when it does not exist **or** is inactive.
    async fn find_active(&self, event_id: &str) -> Result<Option<AttendanceEvent>, SourceError>;
}
