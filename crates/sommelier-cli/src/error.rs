//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error (missing key, no inventory location, bad file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request pipeline error
    #[error(transparent)]
    Advisor(#[from] sommelier_advisor::AdvisorError),

    /// Inventory error outside a request (e.g. `inventory` listing)
    #[error("Inventory unavailable: {0}")]
    Inventory(#[from] sommelier_inventory::InventoryError),

    /// Model client could not be built
    #[error("Model error: {0}")]
    Llm(#[from] sommelier_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
