//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::InventoryRow;

/// Trait for loading the shop's inventory
///
/// Implemented by the infrastructure layer (sommelier-inventory)
pub trait InventorySource {
    /// Error type for load operations
    type Error;

    /// Load every inventory row
    fn load(&self) -> Result<Vec<InventoryRow>, Self::Error>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (sommelier-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Model identifier, for logs
    fn model_name(&self) -> &str;
}
