use crate::core::{
    context::HubContext,
    error::Result,
    filter::ScriptFilter,
    grid::{GridController, LoadMode, QueryOutcome},
    state::QueryState,
    templates::render_grid,
};

/// Fresh listing under `filter`, starting at `page`.
pub fn execute_list(filter: ScriptFilter, page: u32) -> Result<()> {
    let mut ctx = HubContext::initialize()?;
    let mut grid = GridController::new(ctx.config.debounce());

    let query = QueryState::new("", filter, page);
    let outcome = grid.load(&mut ctx.catalog, query, LoadMode::Replace);
    log::debug!("List finished: {outcome:?}");

    show_grid(&ctx, &grid)
}

/// Search from page 1. Search text wins over the filter for the endpoint,
/// but the filter still keys the cache.
pub fn execute_search(terms: Vec<String>, filter: ScriptFilter) -> Result<()> {
    let mut ctx = HubContext::initialize()?;
    let mut grid = GridController::new(ctx.config.debounce());

    let query = QueryState::new(terms.join(" "), filter, 1);
    let outcome = grid.load(&mut ctx.catalog, query, LoadMode::Replace);
    log::debug!("Search finished: {outcome:?}");

    show_grid(&ctx, &grid)
}

/// Print the grid and remember it for `more`, `show` and `copy`.
pub fn show_grid(ctx: &HubContext, grid: &GridController) -> Result<()> {
    print!("{}", render_grid(grid, &ctx.catalog.style));
    ctx.save_grid(grid)
}

pub(crate) fn outcome_count(outcome: QueryOutcome) -> Option<usize> {
    match outcome {
        QueryOutcome::Cached { count } | QueryOutcome::Fetched { count } => Some(count),
        QueryOutcome::Exhausted => Some(0),
        QueryOutcome::Failed | QueryOutcome::Superseded => None,
    }
}
