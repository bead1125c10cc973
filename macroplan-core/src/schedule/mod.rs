//! Schedule normalization: two calendar payload formats in, one
//! canonical ordered event sequence out.
//!
//! The format is declared by the caller (or derived from the file
//! extension); no content sniffing is performed. Any parse failure —
//! malformed calendar structure, invalid JSON, a missing or unparseable
//! timestamp — fails the whole call: the outcome is either a complete
//! event sequence or a single error, never a partial list.

mod ics;
mod items;
mod timestamp;

pub use timestamp::canonicalize_timestamp;

use crate::error::{MacroPlanError, MacroPlanResult};
use crate::event::ScheduleEvent;
use std::path::Path;

/// Supported calendar payload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleFormat {
    /// Calendar-interchange format (`.ics`)
    Ics,
    /// Generic item-list JSON (`{"items": [...]}`), as exported by
    /// calendar APIs
    Items,
}

impl ScheduleFormat {
    /// Derive the format from a file extension. Unknown extensions are
    /// never sniffed; the caller gets `None` and decides.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("ics") => Some(ScheduleFormat::Ics),
            Some("json") => Some(ScheduleFormat::Items),
            _ => None,
        }
    }
}

/// Normalize a calendar payload of the declared format into canonical
/// events, preserving source order.
pub fn normalize(payload: &str, format: ScheduleFormat) -> MacroPlanResult<Vec<ScheduleEvent>> {
    match format {
        ScheduleFormat::Ics => ics::parse_events(payload),
        ScheduleFormat::Items => items::parse_events(payload),
    }
}

/// Read a calendar file and normalize it, picking the format from the
/// file extension.
pub fn normalize_file(path: &Path) -> MacroPlanResult<Vec<ScheduleEvent>> {
    let format = ScheduleFormat::from_path(path).ok_or_else(|| {
        MacroPlanError::MalformedInput(format!(
            "Unsupported calendar file type: {} (expected .ics or .json)",
            path.display()
        ))
    })?;
    let payload = std::fs::read_to_string(path)?;
    normalize(&payload, format)
}
