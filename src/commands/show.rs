use crate::core::{
    context::HubContext,
    detail::{BodyState, DetailModal},
    error::Result,
    selection::{resolve, Target},
    templates::render_detail,
};
use colored::*;

pub fn execute_show(target: String) -> Result<()> {
    let target = Target::parse(&target)?;
    let mut ctx = HubContext::initialize()?;
    let snapshot = ctx.load_snapshot()?;
    let selection = resolve(&target, snapshot.as_ref(), &ctx.catalog.style)?;

    let mut modal = DetailModal::new();
    let view = modal.open_with(
        &mut ctx.catalog,
        &selection.identifier,
        &selection.title,
        &selection.image_url,
        |view| {
            if view.body == BodyState::Fetching {
                println!("{}", view.body.display_text().bright_black());
            }
        },
    );

    print!("{}", render_detail(view));
    Ok(())
}
