//! Runtime choice between the sheet and file sources

use crate::{FileSource, InventoryError, SheetSource};
use sommelier_domain::traits::InventorySource;
use sommelier_domain::InventoryRow;

/// The inventory location chosen by configuration
pub enum CatalogSource {
    /// CSV over HTTP
    Sheet(SheetSource),
    /// CSV on disk
    File(FileSource),
}

impl CatalogSource {
    /// Where the inventory comes from, for display
    pub fn location(&self) -> String {
        match self {
            CatalogSource::Sheet(source) => source.url().to_string(),
            CatalogSource::File(source) => source.path().display().to_string(),
        }
    }
}

impl InventorySource for CatalogSource {
    type Error = InventoryError;

    fn load(&self) -> Result<Vec<InventoryRow>, Self::Error> {
        match self {
            CatalogSource::Sheet(source) => source.load(),
            CatalogSource::File(source) => source.load(),
        }
    }
}

impl From<SheetSource> for CatalogSource {
    fn from(source: SheetSource) -> Self {
        CatalogSource::Sheet(source)
    }
}

impl From<FileSource> for CatalogSource {
    fn from(source: FileSource) -> Self {
        CatalogSource::File(source)
    }
}
