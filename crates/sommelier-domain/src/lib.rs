//! Sommelier Domain Layer
//!
//! Core value types and trait seams for the wine recommender. This crate has
//! no external dependencies; sources, model clients and presentation live in
//! other crates and plug in through the traits in [`traits`].
//!
//! ## Key Concepts
//!
//! - **InventoryRow**: one line of the shop's stock spreadsheet
//! - **PriceBucket**: a named price range used to pre-filter stock
//! - **TastePreference**: either "no preference" or four ordinal taste axes
//! - **RecommendationRequest**: everything the user picked for one request

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod inventory;
pub mod price;
pub mod request;
pub mod taste;
pub mod traits;

// Re-exports for convenience
pub use inventory::{format_amount, parse_price, InventoryRow};
pub use price::PriceBucket;
pub use request::RecommendationRequest;
pub use taste::{Scale, TasteAxis, TastePreference, NO_PREFERENCE_TEXT};
