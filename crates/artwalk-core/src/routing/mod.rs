//! Route calculation collaborator and reconciliation.

mod http;
mod reconcile;

pub use http::HttpRouteProvider;
pub use reconcile::{reconcile, FALLBACK_MESSAGE};

use serde::{Deserialize, Serialize};

use crate::error::RoutingError;
use crate::itinerary::TransportMode;
use crate::venue::Coordinates;

/// A resolved route between two venues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub duration_seconds: i64,
    pub distance_meters: i64,
    /// Encoded polyline for map rendering.
    pub encoded_path: String,
}

/// The route-calculation collaborator, behind a seam so tests can script
/// outcomes. Implementations are stateless between calls; each call may
/// fail independently and the engine performs no retries.
pub trait RouteProvider {
    fn compute_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        mode: TransportMode,
    ) -> Result<Route, RoutingError>;
}

/// Aggregate outcome of one reconciliation pass, used to surface a single
/// warning instead of one message per failed segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Segments resolved with provider data.
    pub resolved: usize,
    /// Segments that fell back to the default duration.
    pub fallbacks: usize,
    /// Transit items not bounded by two geocoded visits (not an error).
    pub skipped: usize,
}

impl ReconcileReport {
    pub fn any_fallback(&self) -> bool {
        self.fallbacks > 0
    }
}
