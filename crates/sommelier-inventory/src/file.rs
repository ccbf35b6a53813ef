//! Local CSV file source

use crate::columns::ColumnHints;
use crate::parse::read_inventory;
use crate::InventoryError;
use sommelier_domain::traits::InventorySource;
use sommelier_domain::InventoryRow;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

/// Inventory read from a CSV file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    hints: ColumnHints,
}

impl FileSource {
    /// Create a source for a CSV file
    pub fn new(path: impl Into<PathBuf>, hints: ColumnHints) -> Self {
        Self {
            path: path.into(),
            hints,
        }
    }

    /// Path this source reads from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InventorySource for FileSource {
    type Error = InventoryError;

    fn load(&self) -> Result<Vec<InventoryRow>, Self::Error> {
        info!(path = %self.path.display(), "Reading inventory file");
        let file = File::open(&self.path)?;
        let rows = read_inventory(BufReader::new(file), &self.hints)?;
        info!(count = rows.len(), "Loaded inventory");
        Ok(rows)
    }
}
