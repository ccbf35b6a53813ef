//! In-memory source for tests and demos

use crate::InventoryError;
use sommelier_domain::traits::InventorySource;
use sommelier_domain::InventoryRow;
use std::sync::{Arc, Mutex};

/// Source that serves fixed rows, or always fails
///
/// Clones share the load counter, so a test can keep a handle while the
/// source itself is moved into the code under test.
///
/// # Examples
///
/// ```
/// use sommelier_domain::{traits::InventorySource, InventoryRow};
/// use sommelier_inventory::MemorySource;
///
/// let source = MemorySource::new(vec![InventoryRow::new("Wine A", Some(25000.0))]);
/// assert_eq!(source.load().unwrap().len(), 1);
/// assert_eq!(source.load_count(), 1);
///
/// let broken = MemorySource::unavailable("sheet offline");
/// assert!(broken.load().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<InventoryRow>,
    failure: Option<String>,
    load_count: Arc<Mutex<usize>>,
}

impl MemorySource {
    /// Serve the given rows
    pub fn new(rows: Vec<InventoryRow>) -> Self {
        Self {
            rows,
            failure: None,
            load_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Fail every load with the given reason
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            failure: Some(reason.into()),
            load_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of times `load` was called
    pub fn load_count(&self) -> usize {
        self.load_count.lock().map(|count| *count).unwrap_or(0)
    }
}

impl InventorySource for MemorySource {
    type Error = InventoryError;

    fn load(&self) -> Result<Vec<InventoryRow>, Self::Error> {
        if let Ok(mut count) = self.load_count.lock() {
            *count += 1;
        }

        match &self.failure {
            Some(reason) => Err(InventoryError::Unavailable(reason.clone())),
            None => Ok(self.rows.clone()),
        }
    }
}
