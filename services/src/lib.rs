pub mod attendance_event_service;
pub mod error;
pub mod event_source;

pub use attendance_event_service::{AttendanceEventService, QrImage};
pub use error::ServiceError;
pub use event_source::DbEventSource;
