//! Sequential route reconciliation over a day plan.
//!
//! Transit segments are resolved strictly in sequence order: each
//! segment's outcome (provider data or fallback) is applied and the
//! timeline downstream of it refreshed before the next segment is
//! attempted. Later items therefore always display times that reflect
//! every already-resolved segment, even while the pass is still running.

use log::{debug, warn};

use super::{ReconcileReport, RouteProvider};
use crate::itinerary::{Itinerary, ItineraryItem};
use crate::venue::Coordinates;

/// User-facing message stored on a segment whose route request failed.
pub const FALLBACK_MESSAGE: &str = "Could not calculate route. Using default time.";

/// Run one full reconciliation pass over the plan.
///
/// Only transit items whose immediate neighbors are both geocoded visits
/// are sent to the provider; anything else is left at its default
/// duration, which is expected for venues without coordinates and not a
/// failure. Provider errors never escape this function: they become a
/// fallback duration plus a stored `last_error` string.
pub fn reconcile<P: RouteProvider + ?Sized>(
    plan: &mut Itinerary,
    provider: &P,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    // Need at least two visits around one transit segment.
    if plan.items.len() < 3 {
        return report;
    }

    let default_minutes = plan.config.default_transit_minutes;
    for index in 0..plan.items.len() {
        let Some(mode) = transit_mode(&plan.items[index]) else {
            continue;
        };
        clear_last_error(&mut plan.items[index]);

        let Some((origin, destination)) = bounding_coordinates(plan, index) else {
            report.skipped += 1;
            continue;
        };

        match provider.compute_route(origin, destination, mode) {
            Ok(route) => {
                debug!(
                    "segment {index}: {} in {}s over {}m",
                    mode.as_str(),
                    route.duration_seconds,
                    route.distance_meters
                );
                if let ItineraryItem::Transit {
                    duration_minutes,
                    distance_meters,
                    path,
                    last_error,
                    ..
                } = &mut plan.items[index]
                {
                    // i64::div_ceil is unstable; this is equivalent for a positive divisor.
                    *duration_minutes = Some((route.duration_seconds + 59).div_euclid(60));
                    *distance_meters = Some(route.distance_meters);
                    *path = Some(route.encoded_path);
                    *last_error = None;
                }
                report.resolved += 1;
            }
            Err(err) => {
                warn!("segment {index}: route request failed, using default: {err}");
                if let ItineraryItem::Transit {
                    duration_minutes,
                    distance_meters,
                    path,
                    last_error,
                    ..
                } = &mut plan.items[index]
                {
                    *duration_minutes = Some(default_minutes);
                    *distance_meters = None;
                    *path = None;
                    *last_error = Some(FALLBACK_MESSAGE.to_string());
                }
                report.fallbacks += 1;
            }
        }

        // Refresh the timeline downstream of the just-resolved segment
        // before the next one is attempted.
        plan.recalculate_from(index);
    }

    report
}

fn transit_mode(item: &ItineraryItem) -> Option<crate::itinerary::TransportMode> {
    match item {
        ItineraryItem::Transit { mode, .. } => Some(*mode),
        _ => None,
    }
}

fn clear_last_error(item: &mut ItineraryItem) {
    if let ItineraryItem::Transit { last_error, .. } = item {
        *last_error = None;
    }
}

/// Coordinates of the visits immediately before and after `index`, when
/// both exist and are geocoded.
fn bounding_coordinates(plan: &Itinerary, index: usize) -> Option<(Coordinates, Coordinates)> {
    if index == 0 || index + 1 >= plan.items.len() {
        return None;
    }
    let origin = plan.items[index - 1].visit_coordinates()?;
    let destination = plan.items[index + 1].visit_coordinates()?;
    Some((origin, destination))
}
