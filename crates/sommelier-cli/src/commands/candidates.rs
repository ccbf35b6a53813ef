//! Candidates command implementation.

use crate::cli::CandidatesArgs;
use crate::error::Result;
use crate::session::Session;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sommelier_advisor::select;
use sommelier_domain::traits::InventorySource;
use sommelier_domain::PriceBucket;

/// Execute the candidates command.
pub fn execute_candidates(args: CandidatesArgs, session: &Session) -> Result<()> {
    let bucket: PriceBucket = args.price.into();
    let inventory = session.source()?.load()?;

    let mut rng = StdRng::from_entropy();
    let selection = select(&inventory, bucket, &session.config.selection, &mut rng);

    println!("{}", session.formatter.format_selection(&selection, bucket)?);
    Ok(())
}
