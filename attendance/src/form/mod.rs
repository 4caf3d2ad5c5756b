//! Check-in form pages: one generic form driven by a per-segment field schema.

pub mod machine;
pub mod page;
pub mod schema;

pub use crate::event::EventSource;
pub use machine::{Banner, Effect, FormEvent, FormState, LoadError, transition};
pub use page::FormPage;
pub use schema::{FieldError, FieldKind, FieldSpec, FormSchema, schema_for};
