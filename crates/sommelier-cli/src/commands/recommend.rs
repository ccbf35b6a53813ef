//! Recommend command implementation.

use crate::cli::RecommendArgs;
use crate::error::Result;
use crate::session::Session;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sommelier_advisor::prepare;
use sommelier_domain::RecommendationRequest;

/// Execute the recommend command.
pub fn execute_recommend(args: RecommendArgs, session: &Session) -> Result<()> {
    let request = RecommendationRequest::new(
        args.price.into(),
        args.taste.preference(),
        args.query_text(),
    );
    let formatter = &session.formatter;

    if args.dry_run {
        let source = session.source()?;
        let mut rng = StdRng::from_entropy();
        let prepared = prepare(&source, &request, &session.config.selection, &mut rng)?;
        println!("{}", formatter.format_prompt(&prepared)?);
        return Ok(());
    }

    // Key problems are fatal before any network traffic
    let mut advisor = session.advisor()?;
    let recommendation = advisor.recommend(&request)?;
    println!("{}", formatter.format_recommendation(&recommendation)?);

    Ok(())
}
