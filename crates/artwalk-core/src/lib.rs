//! # Artwalk Core Library
//!
//! Core business logic for the Artwalk day planner: build an ordered
//! day plan from selected venues, keep its timeline contiguous through
//! every edit, reconcile locally estimated transit durations against an
//! external routing service that can fail per segment, and export the
//! result as calendar-event records or a shareable text summary.
//!
//! ## Architecture
//!
//! - **Itinerary**: the ordered visit/transit/break sequence with the
//!   cursor-walk recalculator and the edit operations
//! - **Routing**: the `RouteProvider` seam, its HTTP implementation, and
//!   the sequential reconciliation pass
//! - **Planner**: facade tying one itinerary to one provider so every
//!   edit returns a fully settled plan
//! - **Export**: pure mapping to calendar events and text summaries
//!
//! ## Key Components
//!
//! - [`Itinerary`]: the day plan and its timeline algorithms
//! - [`Planner`]: edit operations with their mandated follow-up passes
//! - [`RouteProvider`]: the routing collaborator seam
//! - [`Config`]: application configuration management

pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod itinerary;
pub mod planner;
pub mod routing;
pub mod venue;
pub mod venues;

pub use config::Config;
pub use error::{ConfigError, EngineError, RoutingError, ValidationError, VenueError};
pub use export::{calendar_events, text_summary, CalendarEvent};
pub use itinerary::{Itinerary, ItineraryItem, PlanConfig, TimeField, TransportMode, BREAK_MINUTES};
pub use planner::Planner;
pub use routing::{reconcile, HttpRouteProvider, ReconcileReport, Route, RouteProvider};
pub use venue::{Coordinates, Venue};
pub use venues::{HttpVenueSource, VenueSource};
