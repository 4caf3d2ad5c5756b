//! # Check-in Form State Machine
//!
//! ```text
//! Loading ──Loaded(active)──▶ Ready ──Submit──▶ Submitting ──Delivered──▶ Ready(+banner)
//!    │                          ▲                                             │
//!    └─Loaded(none|inactive)─▶ Error (terminal)         FillAgain ◀───────────┘
//! ```
//!
//! [`transition`] is pure: it never performs I/O. When delivery is needed it
//! returns an [`Effect::Deliver`] for the caller to run, then feeds the outcome
//! back as [`FormEvent::Delivered`].

use super::schema::{FieldError, FormSchema};
use crate::event::AttendanceEvent;
use crate::messages;
use crate::payload::{FieldValue, Payload, format_attendance_data_at};
use crate::sheets::SubmitResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Banner {
    Success(String),
    /// The segment has no spreadsheet destination; nothing was sent.
    NotConfigured(String),
    Invalid(Vec<FieldError>),
    /// Delivery was attempted and failed.
    Failed(String),
}

impl Banner {
    pub fn is_success(&self) -> bool {
        matches!(self, Banner::Success(_))
    }
}

/// Why a page ended in [`FormState::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    /// Unknown id or inactive event.
    NotFound,
    /// The registry lookup itself failed.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Loading,
    /// Terminal. No retry is offered.
    Error {
        kind: LoadError,
        message: String,
    },
    Ready {
        event: AttendanceEvent,
        values: Payload,
        banner: Option<Banner>,
    },
    Submitting {
        event: AttendanceEvent,
        values: Payload,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// Registry lookup finished; `None` when the id is unknown.
    Loaded(Option<AttendanceEvent>),
    LoadFailed,
    Edit { field: String, value: FieldValue },
    /// Replace several values at once, as a client posting the whole form does.
    Fill(Payload),
    Submit,
    Delivered(SubmitResult),
    FillAgain,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Deliver { url: String, payload: Payload },
}

pub fn transition(
    state: FormState,
    event: FormEvent,
    schema: &FormSchema,
    now: DateTime<Utc>,
) -> (FormState, Option<Effect>) {
    use FormEvent as E;
    use FormState as S;

    match (state, event) {
        (S::Loading, E::Loaded(Some(event))) if event.is_active => (
            S::Ready {
                event,
                values: schema.empty_values(),
                banner: None,
            },
            None,
        ),
        (S::Loading, E::Loaded(_)) => (error(LoadError::NotFound), None),
        (S::Loading, E::LoadFailed) => (error(LoadError::Unavailable), None),

        (S::Ready { event, mut values, .. }, E::Edit { field, value }) => {
            values.insert(field, value);
            (ready(event, values, None), None)
        }
        (S::Ready { event, mut values, .. }, E::Fill(input)) => {
            for (key, value) in input.iter() {
                values.insert(key, value.clone());
            }
            (ready(event, values, None), None)
        }
        (S::Ready { event, .. }, E::FillAgain) => {
            (ready(event, schema.empty_values(), None), None)
        }
        (S::Ready { event, values, .. }, E::Submit) => {
            let normalized = match schema.validate(&values) {
                Ok(normalized) => normalized,
                Err(errors) => return (ready(event, values, Some(Banner::Invalid(errors))), None),
            };
            let Some(url) = event.destination_url(schema.segment).map(str::to_owned) else {
                let banner = Banner::NotConfigured(messages::SHEETS_NOT_CONFIGURED.to_owned());
                return (ready(event, values, Some(banner)), None);
            };
            let payload =
                format_attendance_data_at(&normalized, &event.event_name, schema.segment, now);
            (
                S::Submitting { event, values },
                Some(Effect::Deliver { url, payload }),
            )
        }

        (S::Submitting { event, values }, E::Delivered(result)) => {
            if result.success {
                let banner = Banner::Success(result.message_or_default().to_owned());
                (ready(event, schema.empty_values(), Some(banner)), None)
            } else {
                let banner = Banner::Failed(result.message_or_default().to_owned());
                (ready(event, values, Some(banner)), None)
            }
        }

        // Anything else is ignored: Error is terminal, Submitting waits for delivery.
        (state, _) => (state, None),
    }
}

fn error(kind: LoadError) -> FormState {
    let message = match kind {
        LoadError::NotFound => messages::EVENT_NOT_FOUND,
        LoadError::Unavailable => messages::EVENT_LOAD_FAILED,
    };
    FormState::Error {
        kind,
        message: message.to_owned(),
    }
}

fn ready(event: AttendanceEvent, values: Payload, banner: Option<Banner>) -> FormState {
    FormState::Ready {
        event,
        values,
        banner,
    }
}
