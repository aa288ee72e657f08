//! Venue/exhibition records consumed from the data source.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Geographic point for routing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A venue/exhibition record.
///
/// `coordinates` is optional by contract: venues without one are valid
/// inputs, their adjoining transit segments simply never resolve via the
/// routing collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    /// Weekday name (e.g. "Monday") on which the venue is closed.
    #[serde(default)]
    pub closed_weekday: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Venue {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            coordinates: None,
            closed_weekday: None,
            address: None,
            description: None,
            url: None,
        }
    }

    /// Set coordinates
    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.coordinates = Some(Coordinates { lat, lng });
        self
    }

    /// Set street address
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Set weekly closure day
    pub fn with_closed_weekday(mut self, weekday: impl Into<String>) -> Self {
        self.closed_weekday = Some(weekday.into());
        self
    }

    /// Whether the venue's weekly closure day falls on the given date.
    pub fn is_closed_on(&self, date: NaiveDate) -> bool {
        match &self.closed_weekday {
            Some(day) => date
                .format("%A")
                .to_string()
                .eq_ignore_ascii_case(day.trim()),
            None => false,
        }
    }
}
