//! Error types for the Advisor

use crate::state::InvalidTransition;
use thiserror::Error;

/// Errors that end a recommendation request
///
/// Running out of in-budget stock is not an error; it produces a fallback
/// selection instead.
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Inventory could not be fetched or parsed
    #[error("Inventory unavailable: {0}")]
    SourceUnavailable(String),

    /// The model call failed (transport, quota, authentication, bad reply)
    #[error("Recommendation unavailable: {0}")]
    ModelUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request lifecycle violated
    #[error(transparent)]
    State(#[from] InvalidTransition),
}
