//! Session-lifetime memoization of a source

use once_cell::sync::OnceCell;
use sommelier_domain::traits::InventorySource;
use sommelier_domain::InventoryRow;
use tracing::debug;

/// Fetches from the wrapped source once and serves the same rows afterwards
///
/// A failed load is not remembered; the next call tries again. There is no
/// invalidation short of dropping the cache.
pub struct CachedSource<S> {
    inner: S,
    rows: OnceCell<Vec<InventoryRow>>,
}

impl<S> CachedSource<S> {
    /// Wrap a source
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            rows: OnceCell::new(),
        }
    }

    /// Whether a successful load has been cached
    pub fn is_loaded(&self) -> bool {
        self.rows.get().is_some()
    }

    /// The wrapped source
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: InventorySource> InventorySource for CachedSource<S> {
    type Error = S::Error;

    fn load(&self) -> Result<Vec<InventoryRow>, Self::Error> {
        let mut fetched = false;
        let rows = self.rows.get_or_try_init(|| {
            fetched = true;
            self.inner.load()
        })?;
        if !fetched {
            debug!(count = rows.len(), "Serving cached inventory");
        }
        Ok(rows.clone())
    }
}
