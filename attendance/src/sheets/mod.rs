//! Delivery of check-ins to Google Sheets through an Apps Script web app.

pub mod client;
pub mod transport;
pub mod url;

pub use client::{FallbackPolicy, SheetsClient, SubmitResult};
pub use transport::{HttpTransport, Transport, TransportResponse};
pub use url::{is_valid_apps_script_url, normalize_exec_url, validate_apps_script_url};
