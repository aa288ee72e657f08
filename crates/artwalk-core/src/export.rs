//! Export adapters: calendar-event records and a plain-text share
//! summary. Pure functions of the plan, no network.

use serde::Serialize;

use crate::clock;
use crate::itinerary::{Itinerary, ItineraryItem};

/// One calendar event per visit. Transit and break items are not
/// exported as events; they only shape the visits' times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    pub title: String,
    pub location: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Map the plan to calendar-event records, deterministically.
///
/// A visit's note, when present, is prepended to the venue description.
pub fn calendar_events(plan: &Itinerary) -> Vec<CalendarEvent> {
    plan.items
        .iter()
        .filter_map(|item| match item {
            ItineraryItem::Visit {
                start_time,
                end_time,
                venue,
                note,
                ..
            } => {
                let base = venue.description.clone().unwrap_or_default();
                let description = if note.is_empty() {
                    base
                } else if base.is_empty() {
                    note.clone()
                } else {
                    format!("{note}\n\n{base}")
                };
                Some(CalendarEvent {
                    title: venue.title.clone(),
                    location: venue.address.clone().unwrap_or_default(),
                    start_time: start_time.clone(),
                    end_time: end_time.clone(),
                    description,
                    url: venue.url.clone(),
                })
            }
            _ => None,
        })
        .collect()
}

/// Plain-text share summary: one block per item, blocks separated by
/// exactly one blank line, no trailing blank line.
pub fn text_summary(plan: &Itinerary) -> String {
    let blocks: Vec<String> = plan.items.iter().map(item_block).collect();
    blocks.join("\n\n")
}

fn item_block(item: &ItineraryItem) -> String {
    match item {
        ItineraryItem::Visit {
            start_time,
            end_time,
            venue,
            note,
            ..
        } => {
            let mut lines = vec![
                format!("{start_time} - {end_time}: {}", venue.title),
                format!("  {}", venue.address.as_deref().unwrap_or(&venue.title)),
            ];
            if !note.is_empty() {
                lines.push(format!("  Note: {note}"));
            }
            lines.join("\n")
        }
        ItineraryItem::Transit {
            start_time,
            end_time,
            mode,
            duration_minutes,
            distance_meters,
            last_error,
            ..
        } => {
            let mut detail = clock::format_duration(*duration_minutes);
            if let Some(meters) = distance_meters {
                detail.push_str(&format!(", {}", clock::format_distance(*meters)));
            }
            if let Some(error) = last_error {
                detail.push_str(&format!(" ({error})"));
            }
            format!("({start_time} - {end_time}) Travel via {mode}\n  {detail}")
        }
        ItineraryItem::Break {
            start_time,
            end_time,
            note,
            ..
        } => {
            let mut lines = vec![format!("{start_time} - {end_time}: Break")];
            if !note.is_empty() {
                lines.push(format!("  Note: {note}"));
            }
            lines.join("\n")
        }
    }
}
