//! iCalendar output
//!
//! Collects [`Event`]s as VEVENTs and writes them out as a single `.ics`
//! file. Each added event gets a fresh UUID and creation timestamps.

use std::path::Path;

use chrono::{DateTime, FixedOffset, Utc};
use icalendar::{Calendar, Component, EventLike, Property};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::Result;
use crate::types::Event;

/// Default file name used by the CLI
pub const DEFAULT_CALENDAR_FILE: &str = "mainz-events.ics";

/// Display name written as X-WR-CALNAME
const CALENDAR_NAME: &str = "Mainz Events";

/// Product identifier written as the calendar PRODID
pub const PRODUCT_ID: &str = "-//Mainz Events//Mainz Events//DE";

/// iCalendar date-time format in UTC
const ICAL_UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Calendar being filled with scraped events
pub struct EventCalendar {
    calendar: Calendar,
    len: usize,
}

impl Default for EventCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl EventCalendar {
    /// Create an empty calendar with `METHOD:REQUEST`.
    pub fn new() -> Self {
        let mut calendar = Calendar::new();
        calendar.name(CALENDAR_NAME);
        calendar.append_property(Property::new("METHOD", "REQUEST"));
        Self { calendar, len: 0 }
    }

    /// Add an event under a new UID and return that UID.
    ///
    /// Missing start or end times are left out of the VEVENT.
    pub fn add_event(&mut self, event: &Event) -> String {
        let uid = Uuid::new_v4().to_string();
        let now = Utc::now();
        let stamp = now.format(ICAL_UTC_FORMAT).to_string();

        let mut vevent = icalendar::Event::new();
        vevent
            .uid(&uid)
            .summary(&event.title)
            .description(&event.description)
            .location(&event.location)
            .timestamp(now);
        vevent.add_property("CREATED", &stamp);
        vevent.add_property("LAST-MODIFIED", &stamp);

        if let Some(start) = event.start {
            vevent.starts(to_utc(start));
        }
        if let Some(end) = event.end {
            vevent.ends(to_utc(end));
        }

        debug!(uid = %uid, title = %event.title, "added event");
        self.calendar.push(vevent.done());
        self.len += 1;
        uid
    }

    /// Number of events added so far
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no event has been added
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Serialized calendar text
    pub fn to_ics(&self) -> String {
        with_product_id(&self.calendar.to_string())
    }

    /// Write the calendar to `path`, replacing any existing file.
    ///
    /// # Errors
    /// Returns `ScrapeError::Io` if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_ics())?;
        info!(path = %path.display(), events = self.len, "calendar file written");
        Ok(())
    }
}

/// Replace the library's default PRODID with [`PRODUCT_ID`].
///
/// The line goes right after `BEGIN:VCALENDAR`; any other PRODID line is dropped.
fn with_product_id(ics: &str) -> String {
    let mut out = String::with_capacity(ics.len() + PRODUCT_ID.len());
    for line in ics.split_inclusive("\r\n") {
        if line.starts_with("PRODID:") {
            continue;
        }
        out.push_str(line);
        if line.trim_end() == "BEGIN:VCALENDAR" {
            out.push_str("PRODID:");
            out.push_str(PRODUCT_ID);
            out.push_str("\r\n");
        }
    }
    out
}

fn to_utc(time: DateTime<FixedOffset>) -> DateTime<Utc> {
    time.with_timezone(&Utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> Event {
        let start = DateTime::parse_from_rfc3339("2025-03-16T18:00:00+01:00").unwrap();
        Event {
            title: "Domkonzert".to_string(),
            summary: "Orgel".to_string(),
            description: "Orgelmusik im Dom".to_string(),
            location: "Mainzer Dom, Markt 10, 55116 Mainz".to_string(),
            start: Some(start),
            end: Some(start),
        }
    }

    #[test]
    fn test_new_calendar_is_empty() {
        let calendar = EventCalendar::new();
        assert!(calendar.is_empty());

        let ics = calendar.to_ics();
        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(ics.contains("METHOD:REQUEST"));
        assert!(!ics.contains("BEGIN:VEVENT"));

        let prodids: Vec<&str> = ics.lines().filter(|l| l.starts_with("PRODID:")).collect();
        assert_eq!(prodids, vec!["PRODID:-//Mainz Events//Mainz Events//DE"]);
    }

    #[test]
    fn test_with_product_id_replaces_default() {
        let ics = concat!(
            "BEGIN:VCALENDAR\r\n",
            "VERSION:2.0\r\n",
            "PRODID:ICALENDAR-RS\r\n",
            "END:VCALENDAR\r\n",
        );
        assert_eq!(
            with_product_id(ics),
            concat!(
                "BEGIN:VCALENDAR\r\n",
                "PRODID:-//Mainz Events//Mainz Events//DE\r\n",
                "VERSION:2.0\r\n",
                "END:VCALENDAR\r\n",
            )
        );
    }

    #[test]
    fn test_add_event_writes_vevent() {
        let mut calendar = EventCalendar::new();
        let uid = calendar.add_event(&sample_event());
        assert_eq!(calendar.len(), 1);

        let ics = calendar.to_ics();
        assert!(ics.contains("BEGIN:VEVENT"));
        assert!(ics.contains(&format!("UID:{}", uid)));
        assert!(ics.contains("SUMMARY:Domkonzert"));
        assert!(ics.contains("DTSTART:20250316T170000Z"));
        assert!(ics.contains("DTEND:20250316T170000Z"));
        assert!(ics.contains("CREATED:"));
        assert!(ics.contains("DTSTAMP:"));
    }

    #[test]
    fn test_each_add_gets_fresh_uid() {
        let mut calendar = EventCalendar::new();
        let first = calendar.add_event(&sample_event());
        let second = calendar.add_event(&sample_event());
        assert_ne!(first, second);
        assert_eq!(calendar.len(), 2);
    }

    #[test]
    fn test_event_without_times_has_no_dtstart() {
        let mut calendar = EventCalendar::new();
        calendar.add_event(&Event {
            title: "Ohne Datum".to_string(),
            ..Event::default()
        });
        assert!(!calendar.to_ics().contains("DTSTART"));
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CALENDAR_FILE);

        let mut calendar = EventCalendar::new();
        calendar.add_event(&sample_event());
        calendar.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, calendar.to_ics());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fehlt").join(DEFAULT_CALENDAR_FILE);

        let result = EventCalendar::new().save(&path);
        assert!(matches!(result, Err(crate::error::ScrapeError::Io(_))));
    }
}
