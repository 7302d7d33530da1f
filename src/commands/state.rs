use super::AppContext;
use crate::storage::{load_state, STATE_KEY};
use anyhow::Result;

/// Print the saved state. Loading first means a legacy record is upgraded
/// and shown in its current form.
pub fn show_state(ctx: &AppContext) -> Result<()> {
    let loaded = load_state(&ctx.store, &ctx.fallback_state());
    println!("{}", serde_json::to_string_pretty(&loaded.state)?);
    eprintln!(
        "{} ({:?})",
        ctx.store.path_for(STATE_KEY).display(),
        loaded.origin
    );
    Ok(())
}
