//! Core error types for artwalk-core.
//!
//! One enum per concern, composed into [`EngineError`] via `#[from]`.
//! Routing failures never surface through this module during a
//! reconciliation pass -- they are absorbed into per-segment fallbacks
//! (see [`crate::routing::reconcile`]) and only the HTTP provider itself
//! returns [`RoutingError`] values.

use std::path::PathBuf;
use thiserror::Error;

/// Umbrella error type for artwalk-core.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Caller contract violations (bad index, too few venues, ...).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Routing collaborator errors.
    #[error("Routing error: {0}")]
    Routing(#[from] RoutingError),

    /// Venue data source errors.
    #[error("Venue error: {0}")]
    Venue(#[from] VenueError),

    /// Configuration errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Structural misuse of the engine by a caller. These fail fast; the
/// engine never silently no-ops an invalid edit.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A day plan needs at least two venues to have a transit leg.
    #[error("At least 2 venues are required to build a plan, got {count}")]
    TooFewVenues { count: usize },

    /// Index out of range for the item sequence.
    #[error("Index {index} out of bounds for plan (length: {len})")]
    OutOfBounds { index: usize, len: usize },

    /// Operation only valid on a transit item.
    #[error("Item at index {index} is not a transit segment")]
    NotATransit { index: usize },

    /// Operation only valid on an item carrying a note.
    #[error("Item at index {index} has no note field")]
    NoNoteField { index: usize },

    /// Operation requires a non-empty plan.
    #[error("Plan is empty")]
    EmptyPlan,

    /// Not a valid "HH:MM" wall-clock value.
    #[error("Invalid wall-clock time '{value}', expected HH:MM")]
    InvalidTime { value: String },
}

/// Errors from the route-calculation collaborator.
#[derive(Error, Debug)]
pub enum RoutingError {
    /// The configured endpoint is not a usable URL.
    #[error("Invalid routing endpoint '{url}': {message}")]
    InvalidEndpoint { url: String, message: String },

    /// Request-level failure (network, timeout, non-2xx status).
    #[error("Route request failed: {0}")]
    Request(String),

    /// The provider responded but the body was not the expected shape.
    #[error("Malformed route response: {0}")]
    MalformedResponse(String),

    /// Tokio runtime could not be created for blocking calls.
    #[error("Failed to create runtime: {0}")]
    Runtime(String),
}

/// Errors from the venue/exhibition data source.
#[derive(Error, Debug)]
pub enum VenueError {
    /// The configured endpoint is not a usable URL.
    #[error("Invalid venue endpoint '{url}': {message}")]
    InvalidEndpoint { url: String, message: String },

    /// No venue record for the given id.
    #[error("Venue '{id}' not found")]
    NotFound { id: String },

    /// Request-level failure (network, timeout, non-2xx status).
    #[error("Venue request failed: {0}")]
    Request(String),

    /// Tokio runtime could not be created for blocking calls.
    #[error("Failed to create runtime: {0}")]
    Runtime(String),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {}: {message}", path.display())]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {}: {message}", path.display())]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dotted config key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for EngineError
pub type Result<T, E = EngineError> = std::result::Result<T, E>;
