//! The ordered day plan and its timeline algorithms.
//!
//! [`Itinerary::build`] constructs the initial visit/transit sequence from
//! the selected venues; [`Itinerary::recalculate`] walks the sequence with
//! a minute cursor and restores the contiguity invariant after any
//! mutation. Edit operations live in [`edit`]; route reconciliation in
//! [`crate::routing`].

mod edit;
mod item;

pub use edit::TimeField;
pub use item::{ItineraryItem, TransportMode, BREAK_MINUTES};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::error::ValidationError;
use crate::venue::Venue;

/// Per-plan defaults applied wherever a concrete value is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(default = "default_start_time")]
    pub start_time: String,
    #[serde(default = "default_visit_minutes")]
    pub visit_duration_minutes: i64,
    #[serde(default = "default_transit_minutes")]
    pub default_transit_minutes: i64,
}

fn default_start_time() -> String {
    "10:00".to_string()
}
fn default_visit_minutes() -> i64 {
    60
}
fn default_transit_minutes() -> i64 {
    30
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            start_time: default_start_time(),
            visit_duration_minutes: default_visit_minutes(),
            default_transit_minutes: default_transit_minutes(),
        }
    }
}

/// The full ordered day plan for one date.
///
/// Lives only in client/session memory; the engine never persists it
/// server-side. `time_override_pending` marks that a manual time override
/// has suspended the contiguity invariant until the next full
/// recalculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    pub date: NaiveDate,
    pub items: Vec<ItineraryItem>,
    pub config: PlanConfig,
    #[serde(default)]
    pub time_override_pending: bool,
}

impl Itinerary {
    /// Build the initial sequence from selected venues, in input order.
    ///
    /// Emits a visit per venue and a transit segment (default mode
    /// public transit) between consecutive venues, then timestamps the
    /// whole sequence. The builder never reorders or optimizes.
    ///
    /// # Errors
    /// Rejects fewer than two venues: a one-stop plan has no transit leg
    /// and is a caller contract violation.
    pub fn build(
        venues: Vec<Venue>,
        date: NaiveDate,
        config: PlanConfig,
    ) -> Result<Self, ValidationError> {
        if venues.len() < 2 {
            return Err(ValidationError::TooFewVenues {
                count: venues.len(),
            });
        }

        let last = venues.len() - 1;
        let mut items = Vec::with_capacity(venues.len() * 2 - 1);
        for (i, venue) in venues.into_iter().enumerate() {
            items.push(ItineraryItem::visit(venue));
            if i < last {
                items.push(ItineraryItem::transit(TransportMode::PublicTransit));
            }
        }

        let mut plan = Self {
            date,
            items,
            config,
            time_override_pending: false,
        };
        plan.recalculate();
        Ok(plan)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Recompute every item's start/end from the configured start time.
    ///
    /// Total and idempotent: safe to call after any mutation, including
    /// ones that leave a transit duration unset. Clears the manual-
    /// override flag.
    pub fn recalculate(&mut self) {
        let start = clock::to_minutes(&self.config.start_time);
        self.walk_from(0, start);
        self.time_override_pending = false;
    }

    /// Recompute items `index..` only, starting the cursor at the item's
    /// current start time. Used by the route reconciler to refresh the
    /// timeline downstream of a just-resolved segment without touching
    /// earlier items.
    pub fn recalculate_from(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        let cursor = clock::to_minutes(self.items[index].start_time());
        self.walk_from(index, cursor);
    }

    fn walk_from(&mut self, index: usize, mut cursor: i64) {
        let visit_minutes = self.config.visit_duration_minutes;
        let transit_minutes = self.config.default_transit_minutes;
        for item in self.items.iter_mut().skip(index) {
            let start = clock::from_minutes(cursor);
            cursor += item.duration_for(visit_minutes, transit_minutes);
            item.set_span(start, clock::from_minutes(cursor));
        }
    }

    /// Total plan duration in minutes; `None` for an empty plan.
    pub fn total_minutes(&self) -> Option<i64> {
        let first = self.items.first()?;
        let last = self.items.last()?;
        Some(clock::to_minutes(last.end_time()) - clock::to_minutes(first.start_time()))
    }
}
