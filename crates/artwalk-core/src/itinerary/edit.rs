//! Edit operations on the plan sequence.
//!
//! Every operation here restores the contiguity invariant before
//! returning, except [`Itinerary::set_item_time`], which is an explicit
//! scratch edit that suspends it (flagged via `time_override_pending`).
//! Operations that can invalidate previously resolved routes (move,
//! mode change) are wrapped by [`crate::planner::Planner`], which follows
//! them with a full reconciliation pass.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Itinerary, ItineraryItem, TransportMode};
use crate::clock;
use crate::error::ValidationError;

/// Which displayed time a manual override targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeField {
    Start,
    End,
}

impl FromStr for TimeField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            other => Err(format!("unknown time field: {other}, expected start|end")),
        }
    }
}

impl Itinerary {
    fn check_index(&self, index: usize) -> Result<(), ValidationError> {
        if index >= self.items.len() {
            return Err(ValidationError::OutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }

    /// Move the item at `from` to position `to`, preserving identities.
    ///
    /// Transit legs are re-seated between the visits afterwards and their
    /// resolutions cleared: a reorder changes every leg's endpoints, so
    /// previously valid routes must be recomputed from scratch. Callers
    /// that care about route validity follow with a reconciliation pass.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), ValidationError> {
        self.check_index(from)?;
        self.check_index(to)?;
        let item = self.items.remove(from);
        self.items.insert(to, item);
        self.rebuild_transit_legs();
        self.recalculate();
        Ok(())
    }

    /// Re-seat transit legs between directly consecutive visits, reusing
    /// existing leg items (and their ids/modes) in order and minting
    /// default legs where the reorder created a new visit pair. Every
    /// reused leg has its resolution discarded. Legs stranded at the ends
    /// of the sequence or next to breaks are dropped.
    fn rebuild_transit_legs(&mut self) {
        let mut legs = Vec::new();
        let mut rest = Vec::new();
        for item in self.items.drain(..) {
            if item.is_transit() {
                legs.push(item);
            } else {
                rest.push(item);
            }
        }

        let mut legs = legs.into_iter();
        let mut items: Vec<ItineraryItem> = Vec::with_capacity(rest.len() * 2);
        for item in rest {
            let needs_leg =
                item.is_visit() && items.last().is_some_and(ItineraryItem::is_visit);
            if needs_leg {
                let mut leg = legs
                    .next()
                    .unwrap_or_else(|| ItineraryItem::transit(TransportMode::PublicTransit));
                if let ItineraryItem::Transit {
                    duration_minutes,
                    distance_meters,
                    path,
                    last_error,
                    ..
                } = &mut leg
                {
                    *duration_minutes = None;
                    *distance_meters = None;
                    *path = None;
                    *last_error = None;
                }
                items.push(leg);
            }
            items.push(item);
        }
        self.items = items;
    }

    /// Delete the item at `index` and re-time the remainder.
    ///
    /// Deliberately does not repair now-adjacent transit endpoints; the
    /// next reconciliation pass corrects them.
    pub fn remove_item(&mut self, index: usize) -> Result<ItineraryItem, ValidationError> {
        self.check_index(index)?;
        let removed = self.items.remove(index);
        self.recalculate();
        Ok(removed)
    }

    /// Append a 30-minute break after the current last item.
    pub fn add_break(&mut self) -> Result<(), ValidationError> {
        if self.items.is_empty() {
            return Err(ValidationError::EmptyPlan);
        }
        self.items.push(ItineraryItem::pause());
        self.recalculate();
        Ok(())
    }

    /// Change a transit segment's mode, discarding any resolved route so
    /// the next reconciliation pass re-resolves it.
    pub fn set_mode(&mut self, index: usize, new_mode: TransportMode) -> Result<(), ValidationError> {
        self.check_index(index)?;
        match &mut self.items[index] {
            ItineraryItem::Transit {
                mode,
                duration_minutes,
                distance_meters,
                path,
                last_error,
                ..
            } => {
                *mode = new_mode;
                *duration_minutes = None;
                *distance_meters = None;
                *path = None;
                *last_error = None;
                self.recalculate();
                Ok(())
            }
            _ => Err(ValidationError::NotATransit { index }),
        }
    }

    /// Replace the free-text note on a visit or break. No recalculation:
    /// notes do not affect timing.
    pub fn set_note(&mut self, index: usize, text: &str) -> Result<(), ValidationError> {
        self.check_index(index)?;
        match &mut self.items[index] {
            ItineraryItem::Visit { note, .. } | ItineraryItem::Break { note, .. } => {
                text.clone_into(note);
                Ok(())
            }
            ItineraryItem::Transit { .. } => Err(ValidationError::NoNoteField { index }),
        }
    }

    /// Directly override a displayed time without cascading.
    ///
    /// This is a scratch edit: it can desynchronize the contiguity
    /// invariant until the next full recalculation, which is why it sets
    /// `time_override_pending` instead of recalculating.
    pub fn set_item_time(
        &mut self,
        index: usize,
        field: TimeField,
        value: &str,
    ) -> Result<(), ValidationError> {
        self.check_index(index)?;
        if !clock::is_valid_hhmm(value) {
            return Err(ValidationError::InvalidTime {
                value: value.to_string(),
            });
        }
        let owned = value.to_string();
        let item = &mut self.items[index];
        match field {
            TimeField::Start => {
                let end = item.end_time().to_string();
                item.set_span(owned, end);
            }
            TimeField::End => {
                let start = item.start_time().to_string();
                item.set_span(start, owned);
            }
        }
        self.time_override_pending = true;
        Ok(())
    }
}
