//! Results handed to the presenter

use crate::selector::Selection;
use sommelier_domain::{PriceBucket, RecommendationRequest};

/// Disclosure shown above the answer when the price bucket had no stock
pub const FALLBACK_NOTICE: &str = "선택하신 가격대에 맞는 재고가 없어 전체 재고에서 골랐어요.";

/// Prompt ready to send, with the selection it was built from
#[derive(Debug, Clone)]
pub struct PreparedPrompt {
    /// The request this prompt answers
    pub request: RecommendationRequest,

    /// Candidate rows
    pub selection: Selection,

    /// Prompt text
    pub prompt: String,
}

/// A model answer for one request
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Model text, verbatim
    pub text: String,

    /// Candidates came from the whole inventory
    pub is_fallback: bool,

    /// Number of rows shown to the model
    pub candidates: usize,

    /// Bucket the user asked for
    pub bucket: PriceBucket,

    /// Model that answered
    pub model: String,
}

impl Recommendation {
    /// Disclosure line to show before the text, if any
    pub fn notice(&self) -> Option<&'static str> {
        self.is_fallback.then_some(FALLBACK_NOTICE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_only_on_fallback() {
        let mut recommendation = Recommendation {
            text: "추천".to_string(),
            is_fallback: false,
            candidates: 3,
            bucket: PriceBucket::Low,
            model: "mock".to_string(),
        };
        assert_eq!(recommendation.notice(), None);

        recommendation.is_fallback = true;
        assert_eq!(recommendation.notice(), Some(FALLBACK_NOTICE));
    }
}
