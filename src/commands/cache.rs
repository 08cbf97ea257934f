use crate::core::{
    context::HubContext, error::Result, print_key_value, print_section_header, print_success,
};

pub fn execute_cache_stats() -> Result<()> {
    let ctx = HubContext::initialize()?;

    print_section_header("Cache");
    let responses = ctx.catalog.responses.len()?;
    print_key_value("Cached responses", &responses.to_string());
    print_key_value("Cached script bodies", &ctx.catalog.bodies.len().to_string());
    print_key_value(
        "Response lifetime",
        &format!("{}s", ctx.config.response_ttl_secs),
    );
    print_key_value("Location", &ctx.cache_dir.display().to_string());
    println!();
    Ok(())
}

/// Clear both tiers unless one is named.
pub fn execute_cache_clear(responses_only: bool, bodies_only: bool) -> Result<()> {
    let mut ctx = HubContext::initialize()?;
    let clear_responses = responses_only || !bodies_only;
    let clear_bodies = bodies_only || !responses_only;

    let mut parts = Vec::new();
    if clear_responses {
        let removed = ctx.catalog.responses.clear()?;
        log::debug!("Removed {removed} cached responses");
        parts.push(format!("{removed} responses"));
    }
    if clear_bodies {
        let removed = ctx.catalog.bodies.clear()?;
        log::debug!("Removed {removed} cached script bodies");
        parts.push(format!("{removed} script bodies"));
    }

    print_success(&format!("Cleared {}", parts.join(" and ")));
    println!();
    Ok(())
}
