use crate::core::{
    context::HubContext,
    detail::{copy_script, CopyOutcome, MemoryClipboard, SystemClipboard},
    error::Result,
    print_success, print_warning,
    selection::{resolve, Target},
};

/// Resolve the script body and put it on the clipboard, or print it raw
/// with `print_only`.
pub fn execute_copy(target: String, print_only: bool) -> Result<()> {
    let target = Target::parse(&target)?;
    let mut ctx = HubContext::initialize()?;
    let snapshot = ctx.load_snapshot()?;
    let selection = resolve(&target, snapshot.as_ref(), &ctx.catalog.style)?;

    if print_only {
        let mut sink = MemoryClipboard::default();
        let outcome = copy_script(&mut ctx.catalog, &selection.identifier, &mut sink);
        match sink.contents {
            Some(body) => println!("{body}"),
            None => print_warning(outcome.label()),
        }
        return Ok(());
    }

    let outcome = match SystemClipboard::new() {
        Ok(mut clipboard) => copy_script(&mut ctx.catalog, &selection.identifier, &mut clipboard),
        Err(e) => {
            log::warn!("{e}");
            CopyOutcome::Error
        }
    };
    report(outcome, &selection.title);
    Ok(())
}

pub(crate) fn report(outcome: CopyOutcome, title: &str) {
    match outcome {
        CopyOutcome::Copied => print_success(&format!("{} {}", outcome.label(), title)),
        CopyOutcome::Failed | CopyOutcome::Error => {
            print_warning(&format!("{} copying {}", outcome.label(), title))
        }
    }
}
