use super::machine::{Effect, FormEvent, FormState, transition};
use super::schema::{FieldSpec, FormSchema, schema_for};
use crate::event::EventSource;
use crate::payload::{FieldValue, Payload};
use crate::segment::Segment;
use crate::sheets::SheetsClient;
use chrono::Utc;
use tracing::{error, info};

/// One check-in page for one segment, driving [`transition`] with real I/O.
///
/// A page is reusable: after a successful submission it is back in `Ready`
/// with empty values, so a kiosk can take the next check-in without reloading.
#[derive(Debug, Clone)]
pub struct FormPage {
    schema: FormSchema,
    state: FormState,
}

impl FormPage {
    pub fn new(segment: Segment) -> Self {
        Self {
            schema: schema_for(segment),
            state: FormState::Loading,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.schema.fields
    }

    fn apply(&mut self, event: FormEvent) -> Option<Effect> {
        let current = std::mem::replace(&mut self.state, FormState::Loading);
        let (next, effect) = transition(current, event, &self.schema, Utc::now());
        self.state = next;
        effect
    }

    /// Looks up the event. Lookup failures end in the terminal error state.
    pub async fn load(&mut self, source: &dyn EventSource, event_id: &str) -> &FormState {
        let event = match source.find_active(event_id).await {
            Ok(found) => FormEvent::Loaded(found),
            Err(err) => {
                error!(event_id, "Failed to load attendance event: {err}");
                FormEvent::LoadFailed
            }
        };
        self.apply(event);
        &self.state
    }

    pub fn edit(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.apply(FormEvent::Edit {
            field: field.into(),
            value: value.into(),
        });
    }

    pub fn fill(&mut self, values: Payload) {
        self.apply(FormEvent::Fill(values));
    }

    pub fn fill_again(&mut self) {
        self.apply(FormEvent::FillAgain);
    }

    /// Submits the current values and waits for delivery to finish.
    pub async fn submit(&mut self, client: &SheetsClient) -> &FormState {
        if let Some(Effect::Deliver { url, payload }) = self.apply(FormEvent::Submit) {
            info!(segment = %self.schema.segment, "Delivering check-in");
            let result = client.submit(&url, &payload).await;
            self.apply(FormEvent::Delivered(result));
        }
        &self.state
    }
}
