//! HTTP surface of the attendance system.
//!
//! - `/api/attendance/{segment}/{event_id}`: public check-in form pages.
//! - `/api/admin/attendance/...`: event registry management, admin JWT required.

pub mod auth;
pub mod response;
pub mod routes;
pub mod state;
