//! Price buckets - named price ranges for pre-filtering stock

/// Upper bound of [`PriceBucket::Low`] (inclusive)
pub const LOW_MAX: f64 = 30_000.0;

/// Upper bound of [`PriceBucket::Mid`] (inclusive)
pub const MID_MAX: f64 = 70_000.0;

/// Upper bound of [`PriceBucket::High`] (inclusive)
pub const HIGH_MAX: f64 = 150_000.0;

/// Price range picked by the customer
///
/// Bounded buckets are half-open: exclusive on the lower bound, inclusive on
/// the upper bound. `All` matches every row, including rows without a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PriceBucket {
    /// Any price
    #[default]
    All,

    /// Everyday value: price <= 30,000
    Low,

    /// Gifts and gatherings: 30,000 < price <= 70,000
    Mid,

    /// Special occasions: 70,000 < price <= 150,000
    High,

    /// Premium collection: price > 150,000
    Premium,
}

impl PriceBucket {
    /// Every bucket, in form order
    pub const BUCKETS: [PriceBucket; 5] = [
        PriceBucket::All,
        PriceBucket::Low,
        PriceBucket::Mid,
        PriceBucket::High,
        PriceBucket::Premium,
    ];

    /// Half-open bounds `(lower_exclusive, upper_inclusive)`; `None` for `All`
    pub fn bounds(&self) -> Option<(Option<f64>, Option<f64>)> {
        match self {
            PriceBucket::All => None,
            PriceBucket::Low => Some((None, Some(LOW_MAX))),
            PriceBucket::Mid => Some((Some(LOW_MAX), Some(MID_MAX))),
            PriceBucket::High => Some((Some(MID_MAX), Some(HIGH_MAX))),
            PriceBucket::Premium => Some((Some(HIGH_MAX), None)),
        }
    }

    /// Whether a row with this price belongs to the bucket
    ///
    /// A missing price only matches `All`.
    pub fn contains(&self, price: Option<f64>) -> bool {
        let Some((lower, upper)) = self.bounds() else {
            return true;
        };
        let Some(price) = price else {
            return false;
        };

        lower.map_or(true, |lo| price > lo) && upper.map_or(true, |hi| price <= hi)
    }

    /// Whether the bucket restricts price at all
    pub fn is_bounded(&self) -> bool {
        !matches!(self, PriceBucket::All)
    }

    /// Short machine name
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceBucket::All => "all",
            PriceBucket::Low => "low",
            PriceBucket::Mid => "mid",
            PriceBucket::High => "high",
            PriceBucket::Premium => "premium",
        }
    }

    /// Label shown to customers and passed to the model
    pub fn label(&self) -> &'static str {
        match self {
            PriceBucket::All => "전체 가격대",
            PriceBucket::Low => "가성비 데일리 (3만원 이하)",
            PriceBucket::Mid => "부담 없는 선물/모임 (3~7만원)",
            PriceBucket::High => "특별한 날의 주인공 (7~15만원)",
            PriceBucket::Premium => "프리미엄 콜렉션 (15만원 이상)",
        }
    }

    /// Position in the form (1-based)
    pub fn option_number(&self) -> usize {
        match self {
            PriceBucket::All => 1,
            PriceBucket::Low => 2,
            PriceBucket::Mid => 3,
            PriceBucket::High => 4,
            PriceBucket::Premium => 5,
        }
    }

    /// Parse from a machine name or a 1-based option number
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" | "any" | "1" => Some(PriceBucket::All),
            "low" | "2" => Some(PriceBucket::Low),
            "mid" | "3" => Some(PriceBucket::Mid),
            "high" | "4" => Some(PriceBucket::High),
            "premium" | "5" => Some(PriceBucket::Premium),
            _ => None,
        }
    }
}

impl std::fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PriceBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!("Invalid price bucket: {} (expected all|low|mid|high|premium or 1-5)", s)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bucket_boundaries() {
        assert!(PriceBucket::Low.contains(Some(30_000.0)));
        assert!(!PriceBucket::Low.contains(Some(30_000.01)));
        assert!(!PriceBucket::Mid.contains(Some(30_000.0)));
        assert!(PriceBucket::Mid.contains(Some(30_001.0)));
        assert!(PriceBucket::Mid.contains(Some(70_000.0)));
        assert!(PriceBucket::High.contains(Some(150_000.0)));
        assert!(!PriceBucket::Premium.contains(Some(150_000.0)));
        assert!(PriceBucket::Premium.contains(Some(150_000.5)));
        assert!(PriceBucket::Low.contains(Some(0.0)));
    }

    #[test]
    fn test_missing_price_only_matches_all() {
        assert!(PriceBucket::All.contains(None));
        for bucket in PriceBucket::BUCKETS.iter().filter(|b| b.is_bounded()) {
            assert!(!bucket.contains(None), "{:?} matched a missing price", bucket);
        }
    }

    #[test]
    fn test_parse_names_and_numbers() {
        assert_eq!(PriceBucket::parse("premium"), Some(PriceBucket::Premium));
        assert_eq!(PriceBucket::parse(" MID "), Some(PriceBucket::Mid));
        assert_eq!(PriceBucket::parse("2"), Some(PriceBucket::Low));
        assert_eq!(PriceBucket::parse("6"), None);
        assert!("cheap".parse::<PriceBucket>().is_err());
    }

    #[test]
    fn test_option_numbers_round_trip() {
        for bucket in PriceBucket::BUCKETS {
            let parsed = PriceBucket::parse(&bucket.option_number().to_string());
            assert_eq!(parsed, Some(bucket));
        }
    }

    proptest! {
        #[test]
        fn prop_every_price_has_exactly_one_bounded_bucket(price in 0.0f64..1_000_000.0) {
            let matching = PriceBucket::BUCKETS
                .iter()
                .filter(|b| b.is_bounded() && b.contains(Some(price)))
                .count();
            prop_assert_eq!(matching, 1);
        }
    }
}
