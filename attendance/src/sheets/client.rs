//! # Attendance Submission Client
//!
//! Delivers a check-in [`Payload`] to a Google Apps Script web app and folds
//! every outcome into a [`SubmitResult`].
//!
//! ## Delivery
//!
//! 1. The destination must match [`APPS_SCRIPT_PATTERN`](super::url::APPS_SCRIPT_PATTERN);
//!    anything else fails before any request is made. `/dev` is rewritten to `/exec`.
//! 2. **POST** the payload form-encoded. A 2xx JSON body with `"status": "success"`
//!    wins immediately.
//! 3. Otherwise **GET** `url?{same payload}`. The script reads query parameters
//!    more reliably than POST bodies, so this is the dependable path. Under
//!    [`FallbackPolicy::TransportOnly`] the GET is skipped when the POST got an
//!    explicit non-success envelope, to avoid a second write.
//!
//! The two phases are strictly sequential. [`SheetsClient::submit`] never returns
//! an error; failures become `SubmitResult { success: false, message }`.

use super::transport::{HttpTransport, Transport, TransportResponse};
use super::url::{is_valid_apps_script_url, normalize_exec_url};
use crate::error::SubmitError;
use crate::event::AttendanceEvent;
use crate::messages;
use crate::payload::{Payload, format_attendance_data};
use crate::segment::Segment;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Uniform outcome of a delivery attempt, whichever transport produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmitResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    pub fn message_or_default(&self) -> &str {
        self.message.as_deref().unwrap_or(if self.success {
            messages::SUBMIT_SUCCESS
        } else {
            messages::SUBMIT_UNEXPECTED
        })
    }
}

/// When a failed POST falls through to the GET phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Any non-success POST outcome retries with GET.
    #[default]
    AnyFailure,
    /// Only transport-level failures retry; an explicit error envelope is final.
    TransportOnly,
}

impl FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any-failure" | "any_failure" | "any" => Ok(FallbackPolicy::AnyFailure),
            "transport-only" | "transport_only" | "transport" => Ok(FallbackPolicy::TransportOnly),
            other => Err(format!("unknown fallback policy `{other}`")),
        }
    }
}

/// Parsed `{ "status": ..., "message": ... }` body.
struct Envelope {
    success: bool,
    message: Option<String>,
}

fn parse_envelope(body: &str) -> Result<Envelope, SubmitError> {
    let value: Value = serde_json::from_str(body.trim())
        .map_err(|e| SubmitError::InvalidResponse(e.to_string()))?;
    Ok(Envelope {
        success: value.get("status").and_then(Value::as_str) == Some("success"),
        message: value.get("message").and_then(|m| match m {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Null | Value::String(_) => None,
            other => Some(other.to_string()),
        }),
    })
}

/// Success yields the endpoint's message, if it sent one.
fn evaluate(response: TransportResponse) -> Result<Option<String>, SubmitError> {
    let envelope = parse_envelope(&response.body);
    if !response.is_success() {
        return Err(SubmitError::HttpStatus {
            status: response.status,
            message: envelope.ok().and_then(|e| e.message),
        });
    }
    let envelope = envelope?;
    if envelope.success {
        Ok(envelope.message)
    } else {
        Err(SubmitError::Rejected(envelope.message))
    }
}

#[derive(Clone)]
pub struct SheetsClient {
    transport: Arc<dyn Transport>,
    policy: FallbackPolicy,
}

impl SheetsClient {
    /// Client over HTTP with the given per-request timeout.
    pub fn new(timeout: Duration, policy: FallbackPolicy) -> Result<Self, reqwest::Error> {
        Ok(Self::with_transport(
            Arc::new(HttpTransport::new(timeout)?),
            policy,
        ))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, policy: FallbackPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Delivers `payload` to `destination_url`. Always resolves.
    pub async fn submit(&self, destination_url: &str, payload: &Payload) -> SubmitResult {
        match self.deliver(destination_url, payload).await {
            Ok(message) => {
                SubmitResult::ok(message.unwrap_or_else(|| messages::SUBMIT_SUCCESS.to_owned()))
            }
            Err(err) => {
                error!(url = destination_url, "Attendance submission failed: {err:?}");
                SubmitResult::failed(err.to_string())
            }
        }
    }

    async fn deliver(&self, destination_url: &str, payload: &Payload) -> Result<Option<String>, SubmitError> {
        if !is_valid_apps_script_url(destination_url) {
            return Err(SubmitError::InvalidUrl);
        }
        let url = normalize_exec_url(destination_url);
        let encoded = payload.to_form_urlencoded();
        info!(url = %url, fields = payload.len(), "Submitting attendance to Google Sheets");

        let post_err = match self.transport.post_form(&url, encoded.clone()).await {
            Ok(response) => {
                debug!(status = response.status, "POST response received");
                match evaluate(response) {
                    Ok(message) => {
                        info!("Attendance recorded via POST");
                        return Ok(message);
                    }
                    Err(err) => err,
                }
            }
            Err(err) => err,
        };

        if self.policy == FallbackPolicy::TransportOnly && !post_err.is_transport() {
            warn!("POST rejected by endpoint, not retrying: {post_err:?}");
            return Err(post_err);
        }
        warn!("POST did not succeed, falling back to GET: {post_err:?}");

        let response = self.transport.get(&format!("{url}?{encoded}")).await?;
        debug!(status = response.status, "GET response received");
        let message = evaluate(response)?;
        info!("Attendance recorded via GET");
        Ok(message)
    }

    /// Picks `segment`'s destination on `event`, formats `fields` and submits them.
    pub async fn submit_attendance(
        &self,
        event: &AttendanceEvent,
        fields: &Payload,
        segment: Segment,
    ) -> SubmitResult {
        let Some(url) = event.destination_url(segment) else {
            warn!(event_id = %event.id, %segment, "No spreadsheet configured for segment");
            return SubmitResult::failed(messages::segment_not_configured(segment.as_str()));
        };
        let payload = format_attendance_data(fields, &event.event_name, segment);
        self.submit(url, &payload).await
    }

    /// Pre-flight for admin tooling: checks the URL shape and makes one bare GET.
    pub async fn test_connection(&self, url: &str) -> SubmitResult {
        if !is_valid_apps_script_url(url) {
            return SubmitResult::failed(messages::INVALID_URL_SHORT);
        }

        match self.transport.get(url).await {
            Ok(response) if response.is_success() => {
                let message = parse_envelope(&response.body)
                    .ok()
                    .and_then(|e| e.message)
                    .unwrap_or_else(|| messages::CONNECTION_OK.to_owned());
                SubmitResult::ok(message)
            }
            Ok(response) => SubmitResult::failed(messages::connection_failed(response.status)),
            Err(err) => {
                warn!(url, "Connection test failed: {err:?}");
                SubmitResult::failed(messages::CONNECTION_UNREACHABLE)
            }
        }
    }
}
