//! Shape checks for Google Apps Script web-app URLs.

use crate::messages;
use once_cell::sync::Lazy;
use regex::Regex;

/// `https://script.google.com/macros/s/{SCRIPT_ID}/exec` (or `/dev`).
pub const APPS_SCRIPT_PATTERN: &str =
    r"^https://script\.google\.com/macros/s/[A-Za-z0-9_-]+/(exec|dev)$";

static APPS_SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(APPS_SCRIPT_PATTERN).expect("valid Apps Script pattern"));

pub fn is_valid_apps_script_url(url: &str) -> bool {
    !url.is_empty() && APPS_SCRIPT_RE.is_match(url)
}

/// Admin-form validation: blank means "not configured" and is accepted.
///
/// Returns the message to show next to the field, or `None` when acceptable.
pub fn validate_apps_script_url(url: &str) -> Option<&'static str> {
    let url = url.trim();
    if url.is_empty() || is_valid_apps_script_url(url) {
        None
    } else {
        Some(messages::INVALID_APPS_SCRIPT_URL_ADMIN)
    }
}

/// Points a `/dev` deployment URL at the live `/exec` alias.
pub fn normalize_exec_url(url: &str) -> String {
    match url.strip_suffix("/dev") {
        Some(base) => format!("{base}/exec"),
        None => url.to_owned(),
    }
}
