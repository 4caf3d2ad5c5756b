//! Attendance Error Types
//!
//! [`QrError`] covers QR synthesis and brand-mark compositing; only
//! [`QrError::Encode`] and [`QrError::Render`] ever leave the generator, logo
//! failures are logged and degraded to a plain code.
//!
//! [`SubmitError`] covers delivery to the spreadsheet endpoint. It never reaches
//! callers of [`crate::SheetsClient::submit`], which folds every variant into a
//! failed [`crate::SubmitResult`]; its `Display` text is what the user reads.

use crate::messages;

#[derive(Debug, thiserror::Error)]
pub enum QrError {
    /// The payload cannot be represented as a QR code (e.g. too long).
    #[error("could not encode QR payload: {0}")]
    Encode(#[from] qrcode::types::QrError),
    /// Rasterising or PNG-encoding the code failed.
    #[error("could not render QR image: {0}")]
    Render(String),
    #[error("could not load logo from {source_url}: {reason}")]
    LogoFetch { source_url: String, reason: String },
    #[error("could not decode logo image: {0}")]
    LogoDecode(#[from] image::ImageError),
    /// A stored value is not a `data:image/png;base64,...` URI.
    #[error("invalid image data URI: {0}")]
    DataUri(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("{}", messages::INVALID_APPS_SCRIPT_URL)]
    InvalidUrl,
    /// Connection refused, DNS failure and similar.
    #[error("{}", messages::UNREACHABLE)]
    Unreachable(String),
    #[error("{}", messages::TIMEOUT)]
    Timeout,
    /// Any other failure while sending or reading the body.
    #[error("{0}")]
    Transport(String),
    /// Non-2xx status. `message` is the endpoint's own message when the body was a JSON envelope.
    #[error("{}", http_status_text(.status, .message))]
    HttpStatus { status: u16, message: Option<String> },
    /// The body was not a JSON envelope.
    #[error("{}", messages::invalid_response(.0))]
    InvalidResponse(String),
    /// Parseable envelope whose status is not `"success"`.
    #[error("{}", rejected_text(.0))]
    Rejected(Option<String>),
}

impl SubmitError {
    /// Failures that carry no verdict from the endpoint itself.
    pub fn is_transport(&self) -> bool {
        !matches!(self, SubmitError::Rejected(_) | SubmitError::InvalidUrl)
    }
}

fn http_status_text(status: &u16, message: &Option<String>) -> String {
    message
        .clone()
        .unwrap_or_else(|| messages::connection_failed(*status))
}

fn rejected_text(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or(messages::SUBMIT_FAILED)
}
