//! Item-list JSON branch of the normalizer.
//!
//! Accepts the `{"items": [...]}` shape exported by calendar APIs: each
//! item carries nested `start`/`end` objects offering a full `dateTime`
//! (preferred) or a date-only `date` (fallback).

use super::timestamp::canonicalize_timestamp;
use crate::error::{MacroPlanError, MacroPlanResult};
use crate::event::ScheduleEvent;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ItemList {
    /// A payload without an items array is an empty schedule, not an
    /// error.
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    summary: Option<String>,
    start: Option<ItemTime>,
    end: Option<ItemTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemTime {
    date_time: Option<String>,
    date: Option<String>,
}

pub(super) fn parse_events(payload: &str) -> MacroPlanResult<Vec<ScheduleEvent>> {
    let list: ItemList = serde_json::from_str(payload)
        .map_err(|e| MacroPlanError::MalformedInput(format!("Invalid item-list JSON: {e}")))?;

    let mut events = Vec::new();
    for item in &list.items {
        let start = resolve_time(item.start.as_ref(), "start")?;
        let end = resolve_time(item.end.as_ref(), "end")?;
        events.push(ScheduleEvent {
            summary: item.summary.clone(),
            start,
            end,
        });
    }
    Ok(events)
}

/// Prefer the full dateTime, fall back to the date-only field. An item
/// offering neither fails the whole parse, not just this event.
fn resolve_time(time: Option<&ItemTime>, bound: &str) -> MacroPlanResult<String> {
    let raw = time
        .and_then(|t| t.date_time.as_deref().or(t.date.as_deref()))
        .ok_or_else(|| MacroPlanError::MalformedInput(format!("Event has no {bound} time")))?;
    canonicalize_timestamp(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_time_preferred_date_falls_back_to_midnight() {
        let payload = r#"{
            "items": [
                {
                    "summary": "Lunch with Sam",
                    "start": { "dateTime": "2024-05-01T08:00:00" },
                    "end": { "date": "2024-05-01" }
                }
            ]
        }"#;

        let events = parse_events(payload).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary.as_deref(), Some("Lunch with Sam"));
        assert_eq!(events[0].start, "2024-05-01T08:00:00");
        assert_eq!(events[0].end, "2024-05-01T00:00:00");
    }

    #[test]
    fn test_date_time_wins_when_both_present() {
        let payload = r#"{
            "items": [
                {
                    "start": { "dateTime": "2024-05-01T08:00:00", "date": "2024-04-30" },
                    "end": { "dateTime": "2024-05-01T09:00:00", "date": "2024-04-30" }
                }
            ]
        }"#;

        let events = parse_events(payload).unwrap();
        assert_eq!(events[0].start, "2024-05-01T08:00:00");
        assert_eq!(events[0].end, "2024-05-01T09:00:00");
    }

    #[test]
    fn test_missing_items_array_is_empty_schedule() {
        let events = parse_events(r#"{"kind": "calendar#events"}"#).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_source_order_preserved_even_when_unchronological() {
        let payload = r#"{
            "items": [
                {
                    "summary": "Later",
                    "start": { "dateTime": "2024-05-02T08:00:00" },
                    "end": { "dateTime": "2024-05-02T09:00:00" }
                },
                {
                    "summary": "Earlier",
                    "start": { "dateTime": "2024-05-01T08:00:00" },
                    "end": { "dateTime": "2024-05-01T09:00:00" }
                }
            ]
        }"#;

        let events = parse_events(payload).unwrap();
        assert_eq!(events[0].summary.as_deref(), Some("Later"));
        assert_eq!(events[1].summary.as_deref(), Some("Earlier"));
    }

    #[test]
    fn test_missing_both_time_fields_fails_whole_parse() {
        let payload = r#"{
            "items": [
                {
                    "summary": "Fine",
                    "start": { "dateTime": "2024-05-01T08:00:00" },
                    "end": { "dateTime": "2024-05-01T09:00:00" }
                },
                {
                    "summary": "Broken",
                    "start": {},
                    "end": { "dateTime": "2024-05-01T10:00:00" }
                }
            ]
        }"#;

        let err = parse_events(payload).unwrap_err();
        match err {
            MacroPlanError::MalformedInput(reason) => {
                assert!(reason.contains("start"), "Got: {}", reason);
            }
            other => panic!("Expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_item_fields_ignored() {
        let payload = r#"{
            "items": [
                {
                    "id": "abc123",
                    "status": "confirmed",
                    "htmlLink": "https://example.com",
                    "start": { "dateTime": "2024-05-01T08:00:00", "timeZone": "Europe/Paris" },
                    "end": { "dateTime": "2024-05-01T09:00:00", "timeZone": "Europe/Paris" }
                }
            ]
        }"#;

        let events = parse_events(payload).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, None);
    }

    #[test]
    fn test_invalid_json_is_malformed_input() {
        let err = parse_events("{not json").unwrap_err();
        assert!(matches!(err, MacroPlanError::MalformedInput(_)));
    }
}
