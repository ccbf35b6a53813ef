//! A single recommendation request

use crate::{PriceBucket, TastePreference};

/// Everything the customer picked for one recommendation
///
/// Built fresh for every submission and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecommendationRequest {
    /// Budget range
    pub bucket: PriceBucket,

    /// Taste sliders or "no preference"
    pub taste: TastePreference,

    /// Free-text request, possibly empty
    pub query: String,
}

impl RecommendationRequest {
    /// Create a request
    pub fn new(bucket: PriceBucket, taste: TastePreference, query: impl Into<String>) -> Self {
        Self {
            bucket,
            taste,
            query: query.into(),
        }
    }

    /// The free-text request with surrounding whitespace removed, if any
    pub fn query_text(&self) -> Option<&str> {
        let trimmed = self.query.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}
