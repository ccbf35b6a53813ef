//! Sommelier Inventory Sources
//!
//! Implementations of the `InventorySource` trait from `sommelier-domain`.
//!
//! # Sources
//!
//! - `SheetSource`: CSV export of a Google spreadsheet (or any CSV URL) over HTTP
//! - `FileSource`: local CSV file
//! - `MemorySource`: fixed rows for tests and demos
//! - `CachedSource`: wraps another source and fetches only once per session
//!
//! Column names differ between spreadsheet versions (`가격` vs `공급가` for
//! price, for example), so columns are matched against [`ColumnHints`].
//!
//! # Examples
//!
//! ```
//! use sommelier_inventory::{read_inventory, ColumnHints};
//!
//! let csv = "와인명,종류,가격\nWine A,레드,\"25,000\"\nWine B,화이트,문의\n";
//! let rows = read_inventory(csv.as_bytes(), &ColumnHints::default()).unwrap();
//!
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[0].price, Some(25000.0));
//! assert_eq!(rows[1].price, None);
//! ```

#![warn(missing_docs)]

mod cache;
mod catalog;
mod columns;
mod file;
mod memory;
mod parse;
mod sheet;

use thiserror::Error;

pub use cache::CachedSource;
pub use catalog::CatalogSource;
pub use columns::{ColumnHints, ColumnMapping};
pub use file::FileSource;
pub use memory::MemorySource;
pub use parse::read_inventory;
pub use sheet::{SheetSource, DEFAULT_TIMEOUT_SECS, GOOGLE_SHEETS_BASE};

/// Errors that can occur while loading inventory
#[derive(Error, Debug)]
pub enum InventoryError {
    /// Network or transport failure
    #[error("Request failed: {0}")]
    Request(String),

    /// Endpoint answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code
        status: u16,
        /// Start of the response body
        body: String,
    },

    /// The spreadsheet answered with a sign-in page instead of CSV
    #[error("Spreadsheet is not shared publicly (received a sign-in page instead of CSV)")]
    NotShared,

    /// CSV could not be decoded
    #[error("Malformed CSV: {0}")]
    Csv(String),

    /// The data has no header row
    #[error("Inventory has no columns")]
    NoColumns,

    /// Local file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source was built with unusable settings
    #[error("Invalid source configuration: {0}")]
    Config(String),

    /// Source reported itself unavailable
    #[error("Inventory unavailable: {0}")]
    Unavailable(String),
}

impl From<csv::Error> for InventoryError {
    fn from(e: csv::Error) -> Self {
        InventoryError::Csv(e.to_string())
    }
}

impl From<reqwest::Error> for InventoryError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            InventoryError::Http {
                status: status.as_u16(),
                body: e.to_string(),
            }
        } else {
            InventoryError::Request(e.to_string())
        }
    }
}
