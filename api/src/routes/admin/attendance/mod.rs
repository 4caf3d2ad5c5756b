//! # Attendance Event Admin Routes
//!
//! Defines the `/api/admin/attendance` endpoint group.
//!
//! ## Structure
//! - `get.rs`: list events, fetch one event, download a QR code
//! - `post.rs`: create events, regenerate QR codes, test a spreadsheet URL
//! - `put.rs`: edit an event
//! - `delete.rs`: remove an event
//!
//! Routes:
//! - `GET    /events`                          → list events, most recent first
//! - `POST   /events`                          → create an event and its QR codes
//! - `GET    /events/{event_id}`               → get a single event
//! - `PUT    /events/{event_id}`               → edit an event (QR codes are kept)
//! - `DELETE /events/{event_id}`               → delete an event
//! - `POST   /events/{event_id}/qr`            → re-render all three QR codes
//! - `GET    /events/{event_id}/qr/{segment}`  → download one QR code as PNG
//! - `POST   /test-connection`                 → probe an Apps Script URL

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use delete::delete_event;
use get::{download_qr, get_event, list_events};
use post::{create_event, regenerate_qr, test_connection};
use put::edit_event;

pub fn attendance_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{event_id}",
            get(get_event).put(edit_event).delete(delete_event),
        )
        .route("/events/{event_id}/qr", post(regenerate_qr))
        .route("/events/{event_id}/qr/{segment}", get(download_qr))
        .route("/test-connection", post(test_connection))
}
