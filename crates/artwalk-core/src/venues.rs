//! Venue/exhibition data source client.

use url::Url;

use crate::error::VenueError;
use crate::venue::Venue;

/// The venue data source collaborator.
pub trait VenueSource {
    /// Fetch one venue record by id.
    fn venue(&self, id: &str) -> Result<Venue, VenueError>;

    /// Fetch several venues, preserving input order. Fails on the first
    /// unavailable record: a plan built from a partial selection would
    /// silently drop stops.
    fn venues(&self, ids: &[String]) -> Result<Vec<Venue>, VenueError> {
        ids.iter().map(|id| self.venue(id)).collect()
    }
}

/// Reqwest-backed [`VenueSource`]: `GET {base}/venues/{id}` returning a
/// venue record as JSON.
pub struct HttpVenueSource {
    base_url: Url,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl HttpVenueSource {
    pub fn new(base_url: &str) -> Result<Self, VenueError> {
        let base_url = Url::parse(base_url).map_err(|e| VenueError::InvalidEndpoint {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        let runtime =
            tokio::runtime::Runtime::new().map_err(|e| VenueError::Runtime(e.to_string()))?;
        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
            runtime,
        })
    }
}

impl VenueSource for HttpVenueSource {
    fn venue(&self, id: &str) -> Result<Venue, VenueError> {
        let url = self
            .base_url
            .join(&format!("venues/{id}"))
            .map_err(|e| VenueError::InvalidEndpoint {
                url: self.base_url.to_string(),
                message: e.to_string(),
            })?;

        let response = self
            .runtime
            .block_on(self.client.get(url).send())
            .map_err(|e| VenueError::Request(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(VenueError::NotFound { id: id.to_string() });
        }

        self.runtime
            .block_on(async {
                response.error_for_status()?.json::<Venue>().await
            })
            .map_err(|e| VenueError::Request(e.to_string()))
    }
}
