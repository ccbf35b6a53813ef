//! Header detection for spreadsheet exports

use crate::InventoryError;
use serde::{Deserialize, Serialize};

/// Candidate header names for the columns we interpret
///
/// Matching is case-insensitive and ignores surrounding whitespace. Earlier
/// entries win when several headers match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnHints {
    /// Headers that may hold the wine name
    #[serde(default = "default_name_columns")]
    pub name: Vec<String>,

    /// Headers that may hold the price
    #[serde(default = "default_price_columns")]
    pub price: Vec<String>,

    /// Headers that may hold the category
    #[serde(default = "default_category_columns")]
    pub category: Vec<String>,
}

impl Default for ColumnHints {
    fn default() -> Self {
        Self {
            name: default_name_columns(),
            price: default_price_columns(),
            category: default_category_columns(),
        }
    }
}

fn default_name_columns() -> Vec<String> {
    to_strings(&["상품명", "와인명", "이름", "품명", "name", "wine"])
}

fn default_price_columns() -> Vec<String> {
    to_strings(&["가격", "공급가", "판매가", "price"])
}

fn default_category_columns() -> Vec<String> {
    to_strings(&["종류", "분류", "카테고리", "category", "type"])
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Column positions resolved against a concrete header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Name column
    pub name: usize,
    /// Price column, if any header matched
    pub price: Option<usize>,
    /// Category column, if any header matched
    pub category: Option<usize>,
}

impl ColumnMapping {
    /// Resolve hints against a header row
    ///
    /// The name column falls back to the first column not claimed by price or
    /// category when no hint matches.
    pub fn detect(headers: &[String], hints: &ColumnHints) -> Result<Self, InventoryError> {
        if headers.iter().all(|h| normalize(h).is_empty()) {
            return Err(InventoryError::NoColumns);
        }

        let price = find_column(headers, &hints.price, &[]);
        let category = find_column(headers, &hints.category, &[price]);
        let name = find_column(headers, &hints.name, &[price, category])
            .or_else(|| {
                (0..headers.len()).find(|i| Some(*i) != price && Some(*i) != category)
            })
            .unwrap_or(0);

        Ok(Self {
            name,
            price,
            category,
        })
    }

    /// Whether a column position is interpreted (not an opaque attribute)
    pub fn is_mapped(&self, index: usize) -> bool {
        index == self.name || Some(index) == self.price || Some(index) == self.category
    }
}

/// Strip a UTF-8 BOM and whitespace, lowercase
pub(crate) fn normalize(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}

fn find_column(headers: &[String], candidates: &[String], taken: &[Option<usize>]) -> Option<usize> {
    candidates.iter().find_map(|candidate| {
        let candidate = normalize(candidate);
        headers
            .iter()
            .enumerate()
            .find(|(i, h)| !taken.contains(&Some(*i)) && normalize(h) == candidate)
            .map(|(i, _)| i)
    })
}
