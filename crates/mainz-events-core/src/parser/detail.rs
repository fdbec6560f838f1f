//! Event detail page parser for mainz.de
//!
//! Turns the `article#SP-content` block of a single event page into an
//! [`Event`].

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use scraper::Html;

use crate::error::{Result, ScrapeError};
use crate::types::Event;

use super::{select_attr, select_text, selector};

/// Longest description used verbatim as summary when there is no teaser
pub const SUMMARY_MAX_CHARS: usize = 100;

/// Appended to a truncated summary
pub const ELLIPSIS: &str = "...";

/// Parse a detail page into an event.
///
/// # Arguments
/// * `html` - Raw HTML content of the event page
///
/// # Returns
/// * `Ok(Event)` with all fields the page provides
/// * `Err(ScrapeError::ContentNotFound)` if the page has no `article#SP-content`
pub fn parse_event_detail(html: &str) -> Result<Event> {
    let document = Html::parse_document(html);

    let article_selector = selector("article#SP-content")?;
    let article = document
        .select(&article_selector)
        .next()
        .ok_or_else(|| ScrapeError::ContentNotFound("article#SP-content".to_string()))?;

    let title = select_text(&article, &selector("h1[itemprop='name']")?);

    let start = select_attr(&article, &selector("time[itemprop='startDate']")?, "datetime")
        .and_then(parse_detail_date);

    let teaser = select_text(&article, &selector(".event-teaser")?);

    let paragraph = selector("div[itemprop='description'] .SP-text p")?;
    let mut description = String::new();
    for p in article.select(&paragraph) {
        // Blank paragraphs before the first text are dropped, later ones kept.
        if !description.is_empty() {
            description.push('\n');
        }
        description.push_str(p.text().collect::<String>().trim());
    }

    let location_part = |class: &str| -> Result<String> {
        let css = format!(".SPmod-events-location .{}", class);
        Ok(select_text(&article, &selector(&css)?))
    };
    let location = join_location(
        &location_part("SP-contact-organisation")?,
        &location_part("SP-contact-streetAddress")?,
        &location_part("SP-contact-postalCode")?,
        &location_part("SP-contact-addressLocality")?,
    );

    let (summary, description) = summarize(&teaser, description);

    Ok(Event {
        title,
        summary,
        description,
        location,
        start,
        // Detail pages only publish a start date.
        end: start,
    })
}

/// Parse a `YYYY-MM-DD` date as midnight UTC.
fn parse_detail_date(value: &str) -> Option<DateTime<FixedOffset>> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(DateTime::<Utc>::from_naive_utc_and_offset(midnight, Utc).fixed_offset())
}

/// Pick the summary and description for an event.
///
/// A non-empty teaser is the summary. Otherwise a description longer than
/// [`SUMMARY_MAX_CHARS`] characters is cut and suffixed with [`ELLIPSIS`];
/// shorter descriptions serve as their own summary.
///
/// # Returns
/// `(summary, description)`; the description is always the full text.
///
/// # Examples
/// ```
/// use mainz_events_core::parser::summarize;
///
/// let (summary, description) = summarize("", "Kurz".to_string());
/// assert_eq!(summary, "Kurz");
/// assert_eq!(description, "Kurz");
///
/// let (summary, _) = summarize("Teaser", "Lang".to_string());
/// assert_eq!(summary, "Teaser");
/// ```
pub fn summarize(teaser: &str, description: String) -> (String, String) {
    if !teaser.is_empty() {
        return (teaser.to_string(), description);
    }

    if description.chars().count() > SUMMARY_MAX_CHARS {
        let head: String = description.chars().take(SUMMARY_MAX_CHARS).collect();
        (format!("{}{}", head, ELLIPSIS), description)
    } else {
        (description.clone(), description)
    }
}

/// Build the comma-separated location line of a detail page.
///
/// Postal code and city form one segment joined by a space. Empty segments
/// are dropped entirely.
///
/// # Examples
/// ```
/// use mainz_events_core::parser::join_location;
///
/// assert_eq!(
///     join_location("Staatstheater", "Gutenbergplatz 7", "55116", "Mainz"),
///     "Staatstheater, Gutenbergplatz 7, 55116 Mainz"
/// );
/// assert_eq!(join_location("Staatstheater", "", "", ""), "Staatstheater");
/// ```
pub fn join_location(organizer: &str, street: &str, postal_code: &str, city: &str) -> String {
    let postal_city = format!("{} {}", postal_code.trim(), city.trim());

    [organizer.trim(), street.trim(), postal_city.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn description_block(paragraphs: &str) -> String {
        format!(
            r#"<div itemprop="description"><div class="SP-text">{}</div></div>"#,
            paragraphs
        )
    }

    fn detail_page(body: &str) -> String {
        format!(
            r#"<html><body><article id="SP-content">{}</article></body></html>"#,
            body
        )
    }

    const FULL_DETAIL: &str = r#"
        <h1 itemprop="name">  Mainzer Johannisnacht </h1>
        <time itemprop="startDate" datetime="2025-03-16">16. März 2025</time>
        <div class="event-teaser"> Das große Stadtfest am Rhein. </div>
        <div itemprop="description">
          <div class="SP-text">
            <p> Erster Absatz. </p>
            <p>Zweiter Absatz.</p>
          </div>
        </div>
        <div class="SPmod-events-location">
          <span class="SP-contact-organisation">Stadt Mainz</span>
          <span class="SP-contact-streetAddress">Rheinufer 1</span>
          <span class="SP-contact-postalCode">55116</span>
          <span class="SP-contact-addressLocality">Mainz</span>
        </div>
    "#;

    #[test]
    fn test_parse_full_detail_page() {
        let event = parse_event_detail(&detail_page(FULL_DETAIL)).unwrap();

        assert_eq!(event.title, "Mainzer Johannisnacht");
        assert_eq!(event.summary, "Das große Stadtfest am Rhein.");
        assert_eq!(event.description, "Erster Absatz.\nZweiter Absatz.");
        assert_eq!(event.location, "Stadt Mainz, Rheinufer 1, 55116 Mainz");
    }

    #[test]
    fn test_detail_date_sets_start_and_end_to_midnight() {
        let event = parse_event_detail(&detail_page(FULL_DETAIL)).unwrap();

        let start = event.start.unwrap();
        assert_eq!(
            start.naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string(),
            "2025-03-16T00:00:00"
        );
        assert_eq!(event.end, event.start);
    }

    #[test]
    fn test_missing_article_is_content_not_found() {
        let result = parse_event_detail("<html><body><h1 itemprop=\"name\">X</h1></body></html>");
        assert!(matches!(result, Err(ScrapeError::ContentNotFound(_))));
    }

    #[test]
    fn test_empty_article_yields_empty_event() {
        let event = parse_event_detail(&detail_page("")).unwrap();
        assert_eq!(event, Event::default());
    }

    #[test]
    fn test_invalid_date_leaves_times_unset() {
        let event = parse_event_detail(&detail_page(
            r#"<time itemprop="startDate" datetime="16.03.2025"></time>"#,
        ))
        .unwrap();
        assert!(event.start.is_none());
        assert!(event.end.is_none());
    }

    #[test]
    fn test_leading_blank_paragraph_is_dropped() {
        let body = description_block("<p> </p><p>Text</p>");
        let event = parse_event_detail(&detail_page(&body)).unwrap();

        assert_eq!(event.description, "Text");
        assert_eq!(event.summary, "Text");
    }

    #[test]
    fn test_inner_blank_paragraph_is_kept() {
        let body = description_block("<p>A</p><p></p><p>B</p>");
        let event = parse_event_detail(&detail_page(&body)).unwrap();

        assert_eq!(event.description, "A\n\nB");
    }

    #[test]
    fn test_long_description_without_teaser_is_truncated() {
        let text = "x".repeat(150);
        let body = format!(
            r#"<div itemprop="description"><div class="SP-text"><p>{}</p></div></div>"#,
            text
        );
        let event = parse_event_detail(&detail_page(&body)).unwrap();

        assert_eq!(event.summary, format!("{}...", "x".repeat(100)));
        assert_eq!(event.description, text);
    }

    #[test]
    fn test_summarize_exactly_limit_is_not_truncated() {
        let text = "y".repeat(SUMMARY_MAX_CHARS);
        let (summary, description) = summarize("", text.clone());
        assert_eq!(summary, text);
        assert_eq!(description, text);
    }

    #[test]
    fn test_summarize_counts_characters_not_bytes() {
        let text = "ä".repeat(120);
        let (summary, _) = summarize("", text);
        assert_eq!(summary, format!("{}...", "ä".repeat(100)));
    }

    #[test]
    fn test_location_without_postal_code_and_city() {
        let location = join_location("Staatstheater", "Gutenbergplatz 7", "", "");
        assert_eq!(location, "Staatstheater, Gutenbergplatz 7");
    }

    #[test]
    fn test_location_city_only() {
        assert_eq!(join_location("", "", "", "Mainz"), "Mainz");
        assert_eq!(join_location("", "", "55116", ""), "55116");
    }

    #[test]
    fn test_location_all_empty() {
        assert_eq!(join_location("", "", "", ""), "");
    }

    proptest! {
        #[test]
        fn prop_location_has_no_empty_segments(
            organizer in "[ a-zA-Z]{0,8}",
            street in "[ a-zA-Z0-9]{0,8}",
            postal in "[ 0-9]{0,5}",
            city in "[ a-zA-Z]{0,8}",
        ) {
            let location = join_location(&organizer, &street, &postal, &city);
            prop_assert!(!location.starts_with(", "));
            prop_assert!(!location.ends_with(", "));
            prop_assert!(!location.contains(", , "));
            prop_assert_eq!(location.trim(), location.as_str());
        }

        #[test]
        fn prop_summary_without_teaser_is_bounded(text in "\\PC{0,300}") {
            let (summary, description) = summarize("", text.clone());
            prop_assert_eq!(&description, &text);
            prop_assert!(summary.chars().count() <= SUMMARY_MAX_CHARS + ELLIPSIS.len());
            if text.chars().count() <= SUMMARY_MAX_CHARS {
                prop_assert_eq!(summary, text);
            } else {
                prop_assert!(summary.ends_with(ELLIPSIS));
            }
        }
    }
}
