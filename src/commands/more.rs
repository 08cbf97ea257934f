use crate::commands::list::{outcome_count, show_grid};
use crate::core::{
    context::HubContext,
    error::{Result, ScriptHubError},
    print_info, print_warning,
};

/// Append the next page to the last grid.
pub fn execute_more() -> Result<()> {
    let mut ctx = HubContext::initialize()?;
    if ctx.load_snapshot()?.is_none() {
        return Err(ScriptHubError::NoGridState);
    }

    let mut grid = ctx.load_grid()?;
    let outcome = grid.load_more(&mut ctx.catalog);
    log::debug!("Load more finished: {outcome:?}");

    match outcome_count(outcome) {
        Some(0) => {
            ctx.save_grid(&grid)?;
            print_info("No more scripts.");
            Ok(())
        }
        Some(_) => show_grid(&ctx, &grid),
        None => {
            show_grid(&ctx, &grid)?;
            print_warning("Failed to load more scripts. (CORS or API Error)");
            Ok(())
        }
    }
}
