//! Sommelier Advisor
//!
//! Turns a customer's picks into a wine recommendation grounded in the shop's
//! stock.
//!
//! # Architecture
//!
//! ```text
//! InventorySource → select → PromptBuilder → LlmProvider → Recommendation
//! ```
//!
//! Selection shuffles the stock, keeps what fits the price bucket and caps
//! the result so the prompt stays small. When nothing fits, the whole
//! inventory is used and the result carries a fallback flag so the user can
//! be told.
//!
//! # Example Usage
//!
//! ```
//! use sommelier_advisor::{Advisor, SelectionConfig};
//! use sommelier_domain::{InventoryRow, PriceBucket, RecommendationRequest, TastePreference};
//! use sommelier_inventory::MemorySource;
//! use sommelier_llm::MockProvider;
//!
//! let source = MemorySource::new(vec![
//!     InventoryRow::new("Wine A", Some(25_000.0)),
//!     InventoryRow::new("Wine B", Some(45_000.0)),
//! ]);
//! let llm = MockProvider::new("1️⃣ **Wine A**");
//! let mut advisor = Advisor::new(source, llm, SelectionConfig::default());
//!
//! let request = RecommendationRequest::new(PriceBucket::Low, TastePreference::NoPreference, "");
//! let recommendation = advisor.recommend(&request).unwrap();
//!
//! assert_eq!(recommendation.candidates, 1);
//! assert!(!recommendation.is_fallback);
//! ```

#![warn(missing_docs)]

mod advisor;
mod config;
mod error;
mod prompt;
mod selector;
mod state;
mod types;


pub use advisor::{prepare, Advisor};
pub use config::SelectionConfig;
pub use error::AdvisorError;
pub use prompt::{PromptBuilder, CLOSING_LINE};
pub use selector::{select, Selection};
pub use state::{InvalidTransition, RequestMachine, RequestState};
pub use types::{PreparedPrompt, Recommendation, FALLBACK_NOTICE};
