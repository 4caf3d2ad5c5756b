//! The `(event id, segment) -> check-in URL` contract.
//!
//! QR generation encodes what [`CheckinUrls::build`] returns and the HTTP router
//! recovers the pair with [`parse_checkin_url`]. Both sides go through this module
//! so the URL shape lives in exactly one place: `{origin}/attendance/{segment}/{event_id}`.

use crate::segment::Segment;
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use url::Url;

/// First path segment of every check-in URL.
pub const ROUTE_PREFIX: &str = "attendance";

/// Characters escaped inside the event id path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid public origin `{0}`: expected an http(s) origin such as https://example.org")]
pub struct InvalidOrigin(pub String);

/// Builds check-in URLs for one public origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckinUrls {
    origin: String,
}

impl CheckinUrls {
    /// Accepts anything that parses as an http(s) URL and keeps only its origin,
    /// so `https://example.org/` and `https://example.org` behave the same.
    pub fn new(origin: &str) -> Result<Self, InvalidOrigin> {
        let parsed = Url::parse(origin.trim()).map_err(|_| InvalidOrigin(origin.to_owned()))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(InvalidOrigin(origin.to_owned()));
        }
        Ok(Self {
            origin: parsed.origin().ascii_serialization(),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// `{origin}/attendance/{segment}/{event_id}`
    pub fn build(&self, event_id: &str, segment: Segment) -> String {
        format!("{}{}", self.origin, checkin_path(event_id, segment))
    }
}

/// Origin-relative form of the check-in URL: `/attendance/{segment}/{event_id}`.
///
/// Ids made only of dots (`.`, `..`) are written as `%2E` runs so they are not
/// read as dot segments.
pub fn checkin_path(event_id: &str, segment: Segment) -> String {
    let id = if !event_id.is_empty() && event_id.chars().all(|c| c == '.') {
        "%2E".repeat(event_id.len())
    } else {
        utf8_percent_encode(event_id, PATH_SEGMENT).to_string()
    };
    format!("/{ROUTE_PREFIX}/{}/{id}", segment.as_str())
}

/// Path of `input` as written, without query or fragment. Unlike [`Url::path`]
/// this keeps `%2E` segments untouched.
fn raw_path(input: &str) -> Option<&str> {
    let path = if input.starts_with('/') {
        input
    } else {
        let url = Url::parse(input).ok()?;
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        let (_, rest) = input.split_once("://")?;
        match rest.find(['/', '?', '#']) {
            Some(i) if rest[i..].starts_with('/') => &rest[i..],
            _ => "/",
        }
    };
    path.split(['?', '#']).next()
}

/// Recovers `(segment, event_id)` from an absolute check-in URL or its path.
///
/// Returns `None` for anything that is not exactly `/attendance/{segment}/{id}`.
pub fn parse_checkin_url(input: &str) -> Option<(Segment, String)> {
    let path = raw_path(input)?;

    let mut parts = path.trim_start_matches('/').split('/');
    if parts.next()? != ROUTE_PREFIX {
        return None;
    }
    let segment = parts.next()?.parse::<Segment>().ok()?;
    let raw_id = parts.next()?;
    if raw_id.is_empty() || parts.next().is_some() {
        return None;
    }
    let event_id = percent_decode_str(raw_id).decode_utf8().ok()?.into_owned();
    Some((segment, event_id))
}
