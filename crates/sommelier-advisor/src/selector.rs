//! Candidate selection
//!
//! Shrinks the inventory to a bounded, shuffled subset that fits in one
//! prompt. Shuffling first means repeated requests surface different parts
//! of the catalog instead of always the first rows of the sheet.

use crate::config::SelectionConfig;
use rand::seq::SliceRandom;
use rand::Rng;
use sommelier_domain::{InventoryRow, PriceBucket};
use tracing::{debug, warn};

/// Rows chosen for one prompt
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    /// Candidate rows, in shuffled order
    pub rows: Vec<InventoryRow>,

    /// True when no row matched the bucket and the whole inventory was used
    pub is_fallback: bool,
}

impl Selection {
    /// Number of candidate rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no candidates at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Pick candidate rows for a price bucket
///
/// Never fails. An empty inventory gives an empty fallback selection.
pub fn select<R: Rng + ?Sized>(
    inventory: &[InventoryRow],
    bucket: PriceBucket,
    config: &SelectionConfig,
    rng: &mut R,
) -> Selection {
    let mut shuffled: Vec<&InventoryRow> = inventory.iter().collect();
    shuffled.shuffle(rng);

    let matching: Vec<&InventoryRow> = shuffled
        .iter()
        .copied()
        .filter(|row| bucket.contains(row.price))
        .collect();

    let (rows, is_fallback, limit) = if matching.is_empty() {
        (shuffled, true, config.fallback_limit)
    } else {
        (matching, false, config.full_limit)
    };

    if is_fallback {
        warn!(
            bucket = bucket.as_str(),
            inventory = inventory.len(),
            "No stock in price bucket, falling back to the whole inventory"
        );
    }

    let rows: Vec<InventoryRow> = rows.into_iter().take(limit).cloned().collect();
    debug!(
        bucket = bucket.as_str(),
        selected = rows.len(),
        is_fallback,
        "Selected candidates"
    );

    Selection { rows, is_fallback }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> Vec<InventoryRow> {
        vec![
            InventoryRow::new("Wine A", Some(25_000.0)),
            InventoryRow::new("Wine B", Some(45_000.0)),
            InventoryRow::new("Wine C", None),
        ]
    }

    fn names(selection: &Selection) -> Vec<String> {
        let mut names: Vec<String> = selection.rows.iter().map(|r| r.name.clone()).collect();
        names.sort();
        names
    }

    fn catalog(size: usize) -> Vec<InventoryRow> {
        (0..size)
            .map(|i| InventoryRow::new(format!("Wine {}", i), Some(10_000.0 + i as f64 * 1_000.0)))
            .collect()
    }

    #[test]
    fn test_low_bucket_keeps_only_matching_rows() {
        let mut rng = StdRng::seed_from_u64(7);
        let selection = select(&sample(), PriceBucket::Low, &SelectionConfig::default(), &mut rng);

        assert!(!selection.is_fallback);
        assert_eq!(names(&selection), vec!["Wine A"]);
    }

    #[test]
    fn test_empty_bucket_falls_back_to_everything() {
        let mut rng = StdRng::seed_from_u64(7);
        let selection = select(
            &sample(),
            PriceBucket::Premium,
            &SelectionConfig::default(),
            &mut rng,
        );

        assert!(selection.is_fallback);
        assert_eq!(names(&selection), vec!["Wine A", "Wine B", "Wine C"]);
    }

    #[test]
    fn test_all_bucket_includes_unpriced_rows() {
        let mut rng = StdRng::seed_from_u64(1);
        let selection = select(&sample(), PriceBucket::All, &SelectionConfig::default(), &mut rng);

        assert!(!selection.is_fallback);
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn test_empty_inventory() {
        let mut rng = StdRng::seed_from_u64(1);
        for bucket in PriceBucket::BUCKETS {
            let selection = select(&[], bucket, &SelectionConfig::default(), &mut rng);
            assert!(selection.is_empty());
            assert!(selection.is_fallback);
        }
    }

    #[test]
    fn test_limits() {
        let mut rng = StdRng::seed_from_u64(3);
        let inventory = catalog(300);
        let config = SelectionConfig::default();

        let full = select(&inventory, PriceBucket::All, &config, &mut rng);
        assert_eq!(full.len(), 100);
        assert!(!full.is_fallback);

        // Tops out at 129,000, so no premium stock
        let cheap = catalog(120);
        let fallback = select(&cheap, PriceBucket::Premium, &config, &mut rng);
        assert!(fallback.is_fallback);
        assert_eq!(fallback.len(), 50);
    }

    #[test]
    fn test_shuffle_varies_between_calls() {
        let inventory = catalog(30);
        let mut rng = StdRng::seed_from_u64(42);
        let config = SelectionConfig::default();

        let first = select(&inventory, PriceBucket::All, &config, &mut rng);
        let orders_differ = (0..10).any(|_| {
            select(&inventory, PriceBucket::All, &config, &mut rng).rows != first.rows
        });
        assert!(orders_differ);
    }

    fn arb_inventory() -> impl Strategy<Value = Vec<InventoryRow>> {
        prop::collection::vec(
            (
                "[a-z]{1,8}",
                prop::option::of(0u32..300_000u32),
            )
                .prop_map(|(name, price)| InventoryRow::new(name, price.map(f64::from))),
            0..200,
        )
    }

    fn arb_bucket() -> impl Strategy<Value = PriceBucket> {
        prop::sample::select(PriceBucket::BUCKETS.to_vec())
    }

    proptest! {
        #[test]
        fn prop_non_fallback_rows_are_in_bucket(
            inventory in arb_inventory(),
            bucket in arb_bucket(),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = select(&inventory, bucket, &SelectionConfig::default(), &mut rng);

            if !selection.is_fallback && bucket.is_bounded() {
                for row in &selection.rows {
                    prop_assert!(row.price.is_some());
                    prop_assert!(bucket.contains(row.price));
                }
            }
        }

        #[test]
        fn prop_fallback_is_bounded(
            inventory in arb_inventory(),
            bucket in arb_bucket(),
            seed in any::<u64>(),
        ) {
            let config = SelectionConfig::default();
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = select(&inventory, bucket, &config, &mut rng);

            let matching = inventory.iter().filter(|r| bucket.contains(r.price)).count();
            prop_assert_eq!(selection.is_fallback, matching == 0);
            if selection.is_fallback {
                prop_assert!(selection.len() <= config.fallback_limit.min(inventory.len()));
            } else {
                prop_assert_eq!(selection.len(), matching.min(config.full_limit));
            }
        }
    }
}
