//! Itinerary item types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::venue::{Coordinates, Venue};

/// Fixed duration of a break item, in minutes.
pub const BREAK_MINUTES: i64 = 30;

/// Transport mode for a transit segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Walk,
    Drive,
    #[serde(rename = "transit")]
    PublicTransit,
    Bicycle,
}

impl TransportMode {
    /// Wire token, as passed through to the routing collaborator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Drive => "drive",
            Self::PublicTransit => "transit",
            Self::Bicycle => "bicycle",
        }
    }

    /// Human-readable label for summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Walk => "walking",
            Self::Drive => "driving",
            Self::PublicTransit => "public transit",
            Self::Bicycle => "bicycle",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walk" | "walking" => Ok(Self::Walk),
            "drive" | "driving" | "car" => Ok(Self::Drive),
            "transit" | "public-transit" | "public_transit" => Ok(Self::PublicTransit),
            "bicycle" | "bike" | "cycling" => Ok(Self::Bicycle),
            other => Err(format!("unknown transport mode: {other}")),
        }
    }
}

/// One entry in the day plan: a venue visit, a travel segment between
/// two visits, or a fixed-length break.
///
/// `start_time`/`end_time` are "HH:MM" wall-clock strings. After every
/// mandated recalculation pass, adjacent items are contiguous:
/// `items[i + 1].start_time == items[i].end_time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItineraryItem {
    Visit {
        id: String,
        start_time: String,
        end_time: String,
        venue: Venue,
        #[serde(default)]
        note: String,
    },
    Transit {
        id: String,
        start_time: String,
        end_time: String,
        mode: TransportMode,
        /// Provider-resolved minutes; `None` until computed. The
        /// recalculator substitutes the configured default while unset.
        #[serde(default)]
        duration_minutes: Option<i64>,
        #[serde(default)]
        distance_meters: Option<i64>,
        /// Encoded polyline for map rendering.
        #[serde(default)]
        path: Option<String>,
        /// Set only when a reconciliation attempt fell back to the
        /// default duration.
        #[serde(default)]
        last_error: Option<String>,
    },
    Break {
        id: String,
        start_time: String,
        end_time: String,
        #[serde(default)]
        note: String,
    },
}

impl ItineraryItem {
    /// New visit with unset times (the recalculator assigns them).
    pub fn visit(venue: Venue) -> Self {
        Self::Visit {
            id: uuid::Uuid::new_v4().to_string(),
            start_time: String::new(),
            end_time: String::new(),
            venue,
            note: String::new(),
        }
    }

    /// New transit segment with no resolved route.
    pub fn transit(mode: TransportMode) -> Self {
        Self::Transit {
            id: uuid::Uuid::new_v4().to_string(),
            start_time: String::new(),
            end_time: String::new(),
            mode,
            duration_minutes: None,
            distance_meters: None,
            path: None,
            last_error: None,
        }
    }

    /// New break with unset times.
    pub fn pause() -> Self {
        Self::Break {
            id: uuid::Uuid::new_v4().to_string(),
            start_time: String::new(),
            end_time: String::new(),
            note: String::new(),
        }
    }

    /// Stable identity token, preserved across reorders.
    pub fn id(&self) -> &str {
        match self {
            Self::Visit { id, .. } | Self::Transit { id, .. } | Self::Break { id, .. } => id,
        }
    }

    pub fn start_time(&self) -> &str {
        match self {
            Self::Visit { start_time, .. }
            | Self::Transit { start_time, .. }
            | Self::Break { start_time, .. } => start_time,
        }
    }

    pub fn end_time(&self) -> &str {
        match self {
            Self::Visit { end_time, .. }
            | Self::Transit { end_time, .. }
            | Self::Break { end_time, .. } => end_time,
        }
    }

    pub(crate) fn set_span(&mut self, start: String, end: String) {
        match self {
            Self::Visit {
                start_time,
                end_time,
                ..
            }
            | Self::Transit {
                start_time,
                end_time,
                ..
            }
            | Self::Break {
                start_time,
                end_time,
                ..
            } => {
                *start_time = start;
                *end_time = end;
            }
        }
    }

    pub fn is_visit(&self) -> bool {
        matches!(self, Self::Visit { .. })
    }

    pub fn is_transit(&self) -> bool {
        matches!(self, Self::Transit { .. })
    }

    pub fn is_break(&self) -> bool {
        matches!(self, Self::Break { .. })
    }

    /// Venue record, for visit items.
    pub fn venue(&self) -> Option<&Venue> {
        match self {
            Self::Visit { venue, .. } => Some(venue),
            _ => None,
        }
    }

    /// Coordinates of a geocoded visit; `None` for other variants or
    /// ungeocoded venues.
    pub fn visit_coordinates(&self) -> Option<Coordinates> {
        self.venue().and_then(|v| v.coordinates)
    }

    /// Effective duration for timeline purposes, given per-plan defaults.
    pub fn duration_for(&self, visit_minutes: i64, default_transit_minutes: i64) -> i64 {
        match self {
            Self::Visit { .. } => visit_minutes,
            Self::Transit {
                duration_minutes, ..
            } => duration_minutes.unwrap_or(default_transit_minutes),
            Self::Break { .. } => BREAK_MINUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_tokens() {
        assert_eq!(TransportMode::Walk.as_str(), "walk");
        assert_eq!(TransportMode::PublicTransit.as_str(), "transit");
        assert_eq!("bike".parse::<TransportMode>(), Ok(TransportMode::Bicycle));
        assert!("teleport".parse::<TransportMode>().is_err());
    }

    #[test]
    fn test_item_ids_are_unique() {
        let a = ItineraryItem::visit(Venue::new("v1", "A"));
        let b = ItineraryItem::visit(Venue::new("v1", "A"));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_duration_for_defaults() {
        let visit = ItineraryItem::visit(Venue::new("v1", "A"));
        let pause = ItineraryItem::pause();
        let transit = ItineraryItem::transit(TransportMode::Walk);
        assert_eq!(visit.duration_for(60, 30), 60);
        assert_eq!(pause.duration_for(60, 30), BREAK_MINUTES);
        assert_eq!(transit.duration_for(60, 30), 30);
    }

    #[test]
    fn test_duration_for_resolved_transit() {
        let mut transit = ItineraryItem::transit(TransportMode::Walk);
        if let ItineraryItem::Transit {
            duration_minutes, ..
        } = &mut transit
        {
            *duration_minutes = Some(12);
        }
        assert_eq!(transit.duration_for(60, 30), 12);
    }

    #[test]
    fn test_serde_tagging() {
        let item = ItineraryItem::transit(TransportMode::PublicTransit);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "transit");
        assert_eq!(json["mode"], "transit");
        let back: ItineraryItem = serde_json::from_value(json).unwrap();
        assert!(back.is_transit());
    }
}
