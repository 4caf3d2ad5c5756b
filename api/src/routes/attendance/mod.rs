//! Public check-in pages, one per `(segment, event)` pair. These are the
//! targets of the printed QR codes and need no authentication.

use crate::state::AppState;
use axum::{Router, routing::get};

mod common;
mod get;
mod post;

pub use common::{CheckinOutcome, FormDescriptor};
pub use get::get_form;
pub use post::submit_form;

pub fn attendance_routes() -> Router<AppState> {
    Router::new().route("/{segment}/{event_id}", get(get_form).post(submit_form))
}
