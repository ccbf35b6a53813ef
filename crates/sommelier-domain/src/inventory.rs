//! Inventory rows as loaded from the shop's spreadsheet

/// One wine in the shop's stock
///
/// `name` is always non-empty. `price` is `None` when the source cell was
/// blank or could not be read as a number; such rows never match a bounded
/// price bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRow {
    /// Display name of the wine
    pub name: String,

    /// Wine style or category (red, white, sparkling, ...)
    pub category: Option<String>,

    /// Price in the shop's currency unit
    pub price: Option<f64>,

    /// Remaining columns (stock, vintage, region, ...) in source order
    pub attributes: Vec<(String, String)>,
}

impl InventoryRow {
    /// Create a row with just a name and a price
    pub fn new(name: impl Into<String>, price: Option<f64>) -> Self {
        Self {
            name: name.into(),
            category: None,
            price,
            attributes: Vec::new(),
        }
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Append an opaque attribute column
    pub fn with_attribute(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((column.into(), value.into()));
        self
    }

    /// Price formatted for display, without a fractional part when whole
    pub fn price_label(&self) -> Option<String> {
        self.price.map(format_amount)
    }
}

/// Format an amount with thousands separators (`25000` -> `25,000`)
pub fn format_amount(amount: f64) -> String {
    if amount.fract() != 0.0 {
        return format!("{:.2}", amount);
    }

    let digits = format!("{:.0}", amount.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Best-effort conversion of a price cell into a number
///
/// Strips thousands separators, whitespace and a trailing currency marker
/// (`원`, `₩`). Returns `None` for blank, non-numeric, negative or non-finite
/// input.
///
/// # Examples
///
/// ```
/// use sommelier_domain::parse_price;
///
/// assert_eq!(parse_price("25,000"), Some(25000.0));
/// assert_eq!(parse_price("₩ 45,000원"), Some(45000.0));
/// assert_eq!(parse_price("문의"), None);
/// ```
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '원' && *c != '₩')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_plain_and_separated() {
        assert_eq!(parse_price("25000"), Some(25000.0));
        assert_eq!(parse_price("1,250,000"), Some(1_250_000.0));
        assert_eq!(parse_price(" 32000.5 "), Some(32000.5));
    }

    #[test]
    fn test_parse_price_currency_markers() {
        assert_eq!(parse_price("30,000원"), Some(30000.0));
        assert_eq!(parse_price("₩70,000"), Some(70000.0));
    }

    #[test]
    fn test_parse_price_rejects_garbage() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("   "), None);
        assert_eq!(parse_price("품절"), None);
        assert_eq!(parse_price("-5000"), None);
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price("inf"), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(25000.0), "25,000");
        assert_eq!(format_amount(1_250_000.0), "1,250,000");
        assert_eq!(format_amount(12.5), "12.50");
    }

    #[test]
    fn test_format_negative_amount() {
        assert_eq!(format_amount(-250_000.0), "-250,000");
        assert_eq!(format_amount(-1_500.0), "-1,500");
        assert_eq!(format_amount(-999.0), "-999");
        assert_eq!(format_amount(-0.0), "0");
    }

    #[test]
    fn test_row_builder() {
        let row = InventoryRow::new("Wine A", Some(25000.0))
            .with_category("레드")
            .with_attribute("재고", "3");

        assert_eq!(row.category.as_deref(), Some("레드"));
        assert_eq!(row.attributes, vec![("재고".to_string(), "3".to_string())]);
        assert_eq!(row.price_label().as_deref(), Some("25,000"));
    }
}
