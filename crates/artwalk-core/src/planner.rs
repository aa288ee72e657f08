//! Planning facade: one itinerary, one route provider, an explicit
//! synchronous pipeline.
//!
//! Every operation runs its mandated recalculation/reconciliation to
//! completion before returning, so callers never observe a half-settled
//! plan and two passes cannot interleave within one planner. A second
//! edit simply runs after the first (last write wins).

use chrono::NaiveDate;
use log::debug;

use crate::error::ValidationError;
use crate::itinerary::{Itinerary, ItineraryItem, PlanConfig, TimeField, TransportMode};
use crate::routing::{reconcile, ReconcileReport, RouteProvider};
use crate::venue::Venue;

pub struct Planner<P: RouteProvider> {
    plan: Itinerary,
    provider: P,
}

impl<P: RouteProvider> Planner<P> {
    /// Wrap an existing plan (e.g. one restored from session state).
    pub fn new(plan: Itinerary, provider: P) -> Self {
        Self { plan, provider }
    }

    /// Build a fresh plan from selected venues and immediately reconcile
    /// its transit segments.
    pub fn build(
        venues: Vec<Venue>,
        date: NaiveDate,
        config: PlanConfig,
        provider: P,
    ) -> Result<(Self, ReconcileReport), ValidationError> {
        let plan = Itinerary::build(venues, date, config)?;
        let mut planner = Self { plan, provider };
        let report = planner.refresh_routes();
        Ok((planner, report))
    }

    pub fn plan(&self) -> &Itinerary {
        &self.plan
    }

    pub fn into_plan(self) -> Itinerary {
        self.plan
    }

    /// Full recalculation followed by a full reconciliation pass.
    pub fn refresh_routes(&mut self) -> ReconcileReport {
        self.plan.recalculate();
        let report = reconcile(&mut self.plan, &self.provider);
        debug!(
            "reconciliation pass: {} resolved, {} fallbacks, {} skipped",
            report.resolved, report.fallbacks, report.skipped
        );
        report
    }

    /// Reorder an item. Neighbors change, so previously valid route
    /// resolutions may be stale; the simplest correct policy is a full
    /// reconciliation pass, trading redundant requests for correctness.
    pub fn move_item(
        &mut self,
        from: usize,
        to: usize,
    ) -> Result<ReconcileReport, ValidationError> {
        self.plan.move_item(from, to)?;
        Ok(self.refresh_routes())
    }

    /// Remove an item. Recalculates only; orphaned transit segments are
    /// corrected by the next explicit reconciliation pass.
    pub fn remove_item(&mut self, index: usize) -> Result<ItineraryItem, ValidationError> {
        self.plan.remove_item(index)
    }

    /// Append a break after the last item.
    pub fn add_break(&mut self) -> Result<(), ValidationError> {
        self.plan.add_break()
    }

    /// Change a transit segment's mode and re-resolve every segment.
    pub fn set_mode(
        &mut self,
        index: usize,
        mode: TransportMode,
    ) -> Result<ReconcileReport, ValidationError> {
        self.plan.set_mode(index, mode)?;
        Ok(self.refresh_routes())
    }

    /// Edit a note; no recalculation.
    pub fn set_note(&mut self, index: usize, text: &str) -> Result<(), ValidationError> {
        self.plan.set_note(index, text)
    }

    /// Manual time override; scratch edit, see
    /// [`Itinerary::set_item_time`].
    pub fn override_time(
        &mut self,
        index: usize,
        field: TimeField,
        value: &str,
    ) -> Result<(), ValidationError> {
        self.plan.set_item_time(index, field, value)
    }
}
