//! Per-segment field descriptors and their validation rules.

use crate::messages;
use crate::payload::{FieldValue, Payload, TIMESTAMP_KEY};
use crate::segment::Segment;
use serde::Serialize;

const MIN_PHONE_DIGITS: usize = 8;
const MAX_PHONE_DIGITS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Integer { min: i64 },
    /// Digits with an optional leading `+`; spaces and dashes are dropped.
    Phone,
    /// Identifier made of digits only, kept as text to preserve leading zeros.
    Digits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub placeholder: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormSchema {
    pub segment: Segment,
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

const NAMA: FieldSpec = FieldSpec {
    name: "nama",
    label: "Nama Lengkap",
    kind: FieldKind::Text,
    placeholder: "Masukkan nama lengkap",
};

const ANGKATAN: FieldSpec = FieldSpec {
    name: "angkatan",
    label: "Angkatan",
    kind: FieldKind::Integer { min: 1 },
    placeholder: "Contoh: 1",
};

const SENIOR_FIELDS: &[FieldSpec] = &[NAMA, ANGKATAN];

const GENERAL_FIELDS: &[FieldSpec] = &[
    NAMA,
    FieldSpec {
        name: "prodi",
        label: "Program Studi",
        kind: FieldKind::Text,
        placeholder: "Contoh: Teknik Informatika",
    },
    FieldSpec {
        name: "nomor_hp",
        label: "Nomor HP",
        kind: FieldKind::Phone,
        placeholder: "Contoh: 081234567890",
    },
];

const STAFF_FIELDS: &[FieldSpec] = &[
    NAMA,
    FieldSpec {
        name: "npm",
        label: "NPM",
        kind: FieldKind::Digits,
        placeholder: "Contoh: 2110010123",
    },
    ANGKATAN,
];

pub fn schema_for(segment: Segment) -> FormSchema {
    let fields = match segment {
        Segment::Senior => SENIOR_FIELDS,
        Segment::General => GENERAL_FIELDS,
        Segment::Staff => STAFF_FIELDS,
    };
    FormSchema {
        segment,
        title: segment.title(),
        fields,
    }
}

impl FormSchema {
    /// A blank form: empty text fields, integer fields at their minimum.
    pub fn empty_values(&self) -> Payload {
        self.fields
            .iter()
            .map(|spec| match spec.kind {
                FieldKind::Integer { min } => (spec.name, FieldValue::Integer(min)),
                _ => (spec.name, FieldValue::Text(String::new())),
            })
            .collect()
    }

    /// Checks `input` against every field and returns the normalized values in
    /// schema order. Keys the schema does not know are dropped, except a
    /// client-supplied `waktu_checkin`.
    pub fn validate(&self, input: &Payload) -> Result<Payload, Vec<FieldError>> {
        let mut out = Payload::new();
        let mut errors = Vec::new();

        for spec in self.fields {
            match check_field(spec, input.get(spec.name)) {
                Ok(value) => out.insert(spec.name, value),
                Err(message) => errors.push(FieldError {
                    field: spec.name.to_owned(),
                    message,
                }),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        if let Some(ts) = input.get(TIMESTAMP_KEY).filter(|v| !v.is_blank()) {
            out.insert(TIMESTAMP_KEY, ts.clone());
        }
        Ok(out)
    }
}

fn check_field(spec: &FieldSpec, value: Option<&FieldValue>) -> Result<FieldValue, String> {
    let value = match value {
        Some(v) if !v.is_blank() => v,
        _ => return Err(messages::field_required(spec.label)),
    };

    match spec.kind {
        FieldKind::Text => match value {
            FieldValue::Text(s) => Ok(FieldValue::Text(s.trim().to_owned())),
            other => Ok(FieldValue::Text(other.to_string())),
        },
        FieldKind::Integer { min } => {
            let parsed = match value {
                FieldValue::Integer(i) => Some(*i),
                FieldValue::Number(n) if n.fract() == 0.0 && n.is_finite() => Some(*n as i64),
                FieldValue::Text(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            };
            match parsed {
                Some(n) if n >= min => Ok(FieldValue::Integer(n)),
                _ => Err(messages::field_must_be_number(spec.label, min)),
            }
        }
        FieldKind::Digits => {
            let text = scalar_text(value).ok_or_else(|| messages::field_must_be_digits(spec.label))?;
            if text.chars().all(|c| c.is_ascii_digit()) {
                Ok(FieldValue::Text(text))
            } else {
                Err(messages::field_must_be_digits(spec.label))
            }
        }
        FieldKind::Phone => scalar_text(value)
            .map(|t| t.replace([' ', '-'], ""))
            .filter(|t| is_phone_number(t))
            .map(FieldValue::Text)
            .ok_or_else(|| messages::field_must_be_phone(spec.label)),
    }
}

fn scalar_text(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Text(s) => Some(s.trim().to_owned()),
        FieldValue::Integer(i) => Some(i.to_string()),
        _ => None,
    }
}

fn is_phone_number(s: &str) -> bool {
    let digits = s.strip_prefix('+').unwrap_or(s);
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
}
