use async_trait::async_trait;
use attendance::event::SourceError;
use attendance::{AttendanceEvent, EventSource};
use db::models::attendance_event::Model as EventModel;
use sea_orm::DatabaseConnection;

/// The event registry as seen by check-in pages: inactive events do not exist.
#[derive(Debug, Clone)]
pub struct DbEventSource {
    db: DatabaseConnection,
}

impl DbEventSource {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventSource for DbEventSource {
    async fn find_active(&self, event_id: &str) -> Result<Option<AttendanceEvent>, SourceError> {
        let found = EventModel::find_active_by_id(&self.db, event_id).await?;
        Ok(found.map(AttendanceEvent::from))
    }
}
