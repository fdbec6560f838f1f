//! Data types for the Mainz events scraper
//!
//! Listing pages yield either bare detail links (`String`) or
//! [`EventPreview`] records; detail pages and previews both end up as
//! [`Event`], the unit handed to the calendar.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Event data taken straight from a listing page teaser.
///
/// Fields missing from the markup stay empty or `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPreview {
    /// Absolute URL of the detail page
    pub link: String,
    /// Event title
    pub title: String,
    /// Organizer text; the listing only has a combined location block
    pub organizer: String,
    /// Location text
    pub location: String,
    /// Start instant with the offset published by the site
    pub start_time: Option<DateTime<FixedOffset>>,
    /// End instant with the offset published by the site
    pub end_time: Option<DateTime<FixedOffset>>,
}

/// Normalized event as consumed by the calendar.
///
/// `start <= end` is not checked. Detail pages only carry a date, so
/// events scraped from them have `end == start`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event title, written as the calendar SUMMARY
    pub title: String,
    /// Teaser or shortened description
    pub summary: String,
    /// Full description text
    pub description: String,
    /// Comma-separated venue and address
    pub location: String,
    /// Start instant
    pub start: Option<DateTime<FixedOffset>>,
    /// End instant; equals `start` for detail-page events
    pub end: Option<DateTime<FixedOffset>>,
}

impl From<EventPreview> for Event {
    /// The preview link goes into the description so the calendar entry
    /// points back at the full event page.
    fn from(preview: EventPreview) -> Self {
        Self {
            title: preview.title,
            summary: String::new(),
            description: preview.link,
            location: preview.location,
            start: preview.start_time,
            end: preview.end_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_from_preview() {
        let start =
            DateTime::parse_from_str("2025-03-16T18:00:00+0100", "%Y-%m-%dT%H:%M:%S%z").unwrap();
        let preview = EventPreview {
            link: "https://www.mainz.de/event.php".to_string(),
            title: "Konzert".to_string(),
            organizer: "Staatstheater".to_string(),
            location: "Staatstheater".to_string(),
            start_time: Some(start),
            end_time: None,
        };

        let event = Event::from(preview);
        assert_eq!(event.title, "Konzert");
        assert_eq!(event.description, "https://www.mainz.de/event.php");
        assert_eq!(event.location, "Staatstheater");
        assert_eq!(event.start, Some(start));
        assert!(event.end.is_none());
        assert!(event.summary.is_empty());
    }

    #[test]
    fn test_preview_default_is_empty() {
        let preview = EventPreview::default();
        assert!(preview.link.is_empty());
        assert!(preview.title.is_empty());
        assert!(preview.start_time.is_none());
    }

    #[test]
    fn test_event_serialization() {
        let event = Event {
            title: "Fastnacht".to_string(),
            summary: "Umzug".to_string(),
            description: "Umzug durch die Innenstadt".to_string(),
            location: "Mainz".to_string(),
            start: None,
            end: None,
        };

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, event);
    }
}
