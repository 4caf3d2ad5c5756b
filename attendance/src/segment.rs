use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Audience segment of an attendance event. Each segment has its own check-in
/// page, QR code, form fields and spreadsheet destination.
///
/// The slug (`senior`, `umum`, `panitia`) is what appears in check-in URLs and in
/// the `type` field sent to the spreadsheet. `general` and `staff` are accepted
/// as aliases when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    #[serde(rename = "senior")]
    Senior,
    #[serde(rename = "umum", alias = "general")]
    General,
    #[serde(rename = "panitia", alias = "staff")]
    Staff,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::Senior, Segment::General, Segment::Staff];

    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Senior => "senior",
            Segment::General => "umum",
            Segment::Staff => "panitia",
        }
    }

    /// Page heading for the segment's check-in form.
    pub fn title(&self) -> &'static str {
        match self {
            Segment::Senior => "Absensi Senior",
            Segment::General => "Absensi Umum",
            Segment::Staff => "Absensi Panitia",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown attendance segment `{0}`")]
pub struct UnknownSegment(pub String);

impl FromStr for Segment {
    type Err = UnknownSegment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "senior" => Ok(Segment::Senior),
            "umum" | "general" => Ok(Segment::General),
            "panitia" | "staff" => Ok(Segment::Staff),
            _ => Err(UnknownSegment(s.to_owned())),
        }
    }
}
