//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → health check (public)
//! - `/attendance/{segment}/{event_id}` → check-in form pages (public)
//! - `/admin/attendance` → event registry management (admin only)

use crate::auth::guards::allow_admin;
use crate::routes::{
    admin::admin_routes, attendance::attendance_routes, health::health_routes,
};
use crate::state::AppState;
use axum::{Router, middleware::from_fn};

pub mod admin;
pub mod attendance;
pub mod health;

/// Builds the `/api` router.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/attendance", attendance_routes())
        .nest("/admin", admin_routes().route_layer(from_fn(allow_admin)))
        .with_state(app_state)
}
