//! Canonical schedule event model.
//!
//! Both calendar source formats normalize into this shape; the CLI and
//! the meal-plan prompt work exclusively with it.

use serde::{Deserialize, Serialize};

/// One normalized schedule entry, independent of source format.
///
/// `start` and `end` are ISO-8601 timestamp strings, timezone-aware when
/// the source carried an offset. Events keep source iteration order, not
/// chronological order, and `start <= end` is not enforced (pass-through
/// of source data).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub summary: Option<String>,
    pub start: String,
    pub end: String,
}
