//! HTTP client for the route-calculation collaborator.
//!
//! `GET {base}/route?origin=lat,lng&destination=lat,lng&mode=m` returning
//! `{"durationSeconds": n, "distanceMeters": n, "encodedPath": "..."}`.
//! The provider's own timeout governs each call; failures are returned
//! to the reconciler, which converts them to per-segment fallbacks.

use serde::Deserialize;
use url::Url;

use super::{Route, RouteProvider};
use crate::error::RoutingError;
use crate::itinerary::TransportMode;
use crate::venue::Coordinates;

/// Reqwest-backed [`RouteProvider`]. The base URL is injectable so tests
/// can point it at a local mock server.
pub struct HttpRouteProvider {
    base_url: Url,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteResponse {
    duration_seconds: i64,
    distance_meters: i64,
    encoded_path: String,
}

impl HttpRouteProvider {
    pub fn new(base_url: &str) -> Result<Self, RoutingError> {
        let base_url = Url::parse(base_url).map_err(|e| RoutingError::InvalidEndpoint {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| RoutingError::Runtime(e.to_string()))?;
        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
            runtime,
        })
    }

    fn route_url(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        mode: TransportMode,
    ) -> Result<Url, RoutingError> {
        let mut url = self
            .base_url
            .join("route")
            .map_err(|e| RoutingError::InvalidEndpoint {
                url: self.base_url.to_string(),
                message: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("origin", &format!("{},{}", origin.lat, origin.lng))
            .append_pair(
                "destination",
                &format!("{},{}", destination.lat, destination.lng),
            )
            .append_pair("mode", mode.as_str());
        Ok(url)
    }
}

impl RouteProvider for HttpRouteProvider {
    fn compute_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        mode: TransportMode,
    ) -> Result<Route, RoutingError> {
        let url = self.route_url(origin, destination, mode)?;

        let response: RouteResponse = self
            .runtime
            .block_on(async {
                self.client
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .json::<RouteResponse>()
                    .await
            })
            .map_err(|e: reqwest::Error| {
                if e.is_decode() {
                    RoutingError::MalformedResponse(e.to_string())
                } else {
                    RoutingError::Request(e.to_string())
                }
            })?;

        Ok(Route {
            duration_seconds: response.duration_seconds,
            distance_meters: response.distance_meters,
            encoded_path: response.encoded_path,
        })
    }
}
