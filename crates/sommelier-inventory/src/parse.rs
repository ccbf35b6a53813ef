//! CSV decoding into inventory rows

use crate::columns::{normalize, ColumnHints, ColumnMapping};
use crate::InventoryError;
use sommelier_domain::{parse_price, InventoryRow};
use std::io::Read;
use tracing::{debug, warn};

/// Decode CSV into inventory rows
///
/// The first record is the header row. Rows without a name are skipped;
/// prices that cannot be read become `None` instead of failing the load.
pub fn read_inventory<R: Read>(
    reader: R,
    hints: &ColumnHints,
) -> Result<Vec<InventoryRow>, InventoryError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    let mapping = ColumnMapping::detect(&headers, hints)?;

    debug!(
        "Column mapping: name='{}', price={:?}, category={:?}",
        headers[mapping.name],
        mapping.price.map(|i| headers[i].as_str()),
        mapping.category.map(|i| headers[i].as_str())
    );
    if mapping.price.is_none() {
        warn!("No price column found; every row will be treated as unpriced");
    }

    let mut rows = Vec::new();
    let mut nameless = 0usize;
    let mut unpriced = 0usize;

    for record in csv_reader.records() {
        let record = record?;
        let cell = |i: usize| record.get(i).unwrap_or("").trim();

        let name = cell(mapping.name);
        if name.is_empty() {
            nameless += 1;
            continue;
        }

        let price = mapping.price.and_then(|i| parse_price(cell(i)));
        if mapping.price.is_some() && price.is_none() {
            unpriced += 1;
        }

        let category = mapping
            .category
            .map(|i| cell(i))
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let attributes = headers
            .iter()
            .enumerate()
            .filter(|(i, header)| !mapping.is_mapped(*i) && !normalize(header).is_empty())
            .filter_map(|(i, header)| {
                let value = cell(i);
                (!value.is_empty()).then(|| (header.clone(), value.to_string()))
            })
            .collect();

        rows.push(InventoryRow {
            name: name.to_string(),
            category,
            price,
            attributes,
        });
    }

    if nameless > 0 {
        debug!("Skipped {} rows without a name", nameless);
    }
    if unpriced > 0 {
        warn!("{} rows have an unreadable price and will only match 'all'", unpriced);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(csv: &str) -> Vec<InventoryRow> {
        read_inventory(csv.as_bytes(), &ColumnHints::default()).unwrap()
    }

    #[test]
    fn test_reads_rows_with_prices() {
        let rows = load("와인명,종류,가격,재고\nWine A,레드,25000,3\nWine B,화이트,\"45,000\",1\n");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Wine A");
        assert_eq!(rows[0].category.as_deref(), Some("레드"));
        assert_eq!(rows[0].price, Some(25000.0));
        assert_eq!(rows[0].attributes, vec![("재고".to_string(), "3".to_string())]);
        assert_eq!(rows[1].price, Some(45000.0));
    }

    #[test]
    fn test_bad_price_does_not_abort() {
        let rows = load("상품명,공급가\nWine A,25000\nWine C,시가\nWine D,\n");

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].price, None);
        assert_eq!(rows[2].price, None);
    }

    #[test]
    fn test_skips_nameless_rows() {
        let rows = load("name,price\n,10000\nWine A,20000\n  ,\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Wine A");
    }

    #[test]
    fn test_short_records_are_tolerated() {
        let rows = load("name,price,region\nWine A,20000\nWine B\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].price, None);
        assert!(rows[0].attributes.is_empty());
    }

    #[test]
    fn test_empty_headers_are_not_attributes() {
        let rows = load("name,price,\nWine A,20000,memo\n");
        assert!(rows[0].attributes.is_empty());
    }

    #[test]
    fn test_header_only() {
        assert!(load("name,price\n").is_empty());
    }

    #[test]
    fn test_empty_input_has_no_columns() {
        let result = read_inventory("".as_bytes(), &ColumnHints::default());
        assert!(matches!(result, Err(InventoryError::NoColumns)));
    }
}
