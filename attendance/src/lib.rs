//! # Attendance Library
//!
//! Core logic for QR-based event check-in: every attendance event exposes one
//! check-in page per audience [`Segment`], each reachable through a QR code, and
//! every submitted form is delivered to a Google Apps Script web app that appends
//! it to a spreadsheet.
//!
//! ## Key Concepts
//! - **Check-in URLs** ([`checkin_url`]): the `(event id, segment) -> URL` mapping shared
//!   by QR generation and route parsing.
//! - **QR generation** ([`qr`]): high error-correction codes with an optional brand mark.
//! - **Sheets delivery** ([`sheets`]): POST-then-GET submission normalized into a [`SubmitResult`].
//! - **Form pages** ([`form`]): per-segment field schemas and the check-in state machine.

pub mod checkin_url;
pub mod error;
pub mod event;
pub mod form;
pub mod messages;
pub mod payload;
pub mod qr;
pub mod segment;
pub mod sheets;

pub use checkin_url::CheckinUrls;
pub use event::{AttendanceEvent, EventSource};
pub use payload::{FieldValue, Payload, format_attendance_data};
pub use segment::Segment;
pub use sheets::{FallbackPolicy, SheetsClient, SubmitResult};
