//! Admin route group, mounted under `/api/admin` behind `allow_admin`.

use crate::state::AppState;
use axum::Router;

pub mod attendance;

pub fn admin_routes() -> Router<AppState> {
    Router::new().nest("/attendance", attendance::attendance_admin_routes())
}
