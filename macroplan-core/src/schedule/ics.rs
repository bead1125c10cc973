//! Calendar-interchange branch of the normalizer, using the icalendar
//! crate's parser.

use super::timestamp::canonicalize_timestamp;
use crate::error::{MacroPlanError, MacroPlanResult};
use crate::event::ScheduleEvent;
use icalendar::parser::{read_calendar, unfold, Component};

/// Parse an .ics payload into canonical events, one per VEVENT, in
/// source order.
pub(super) fn parse_events(payload: &str) -> MacroPlanResult<Vec<ScheduleEvent>> {
    let unfolded = unfold(payload);
    let calendar = read_calendar(&unfolded)
        .map_err(|e| MacroPlanError::MalformedInput(format!("Bad calendar structure: {e}")))?;

    let mut events = Vec::new();
    for vevent in calendar.components.iter().filter(|c| c.name == "VEVENT") {
        let start = required_timestamp(vevent, "DTSTART")?;
        let end = required_timestamp(vevent, "DTEND")?;
        let summary = vevent.find_prop("SUMMARY").map(|p| p.val.to_string());
        events.push(ScheduleEvent { summary, start, end });
    }
    Ok(events)
}

/// Extract a date-time property and canonicalize its raw value. A
/// missing property fails the whole parse, not just this event.
fn required_timestamp(vevent: &Component<'_>, name: &str) -> MacroPlanResult<String> {
    let prop = vevent
        .find_prop(name)
        .ok_or_else(|| MacroPlanError::MalformedInput(format!("Event has no {name} property")))?;
    canonicalize_timestamp(prop.val.as_ref())
}
