//! Inventory command implementation.

use crate::cli::InventoryArgs;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::session::Session;
use sommelier_domain::traits::InventorySource;

/// Execute the inventory command.
pub fn execute_inventory(args: InventoryArgs, session: &Session) -> Result<()> {
    let source = session.source()?;
    let mut rows = source.load()?;
    let total = rows.len();

    if let Some(limit) = args.limit {
        rows.truncate(limit);
    }

    let formatter = &session.formatter;
    if formatter.format() == OutputFormat::Table {
        let unpriced = rows.iter().filter(|row| row.price.is_none()).count();
        println!(
            "{}",
            formatter.info(&format!(
                "{} wine(s) from {} ({} shown, {} without a price)",
                total,
                source.inner().location(),
                rows.len(),
                unpriced
            ))
        );
    }
    println!("{}", formatter.format_rows(&rows)?);

    Ok(())
}
