use super::AppContext;
use crate::config::OutputFormat;
use crate::formatting::OutputFormatter;
use crate::io::output::render_affordability;
use crate::pricing::affordability::{clamp_installments, AffordScope};
use anyhow::Result;

#[derive(Debug, Clone, Default)]
pub struct AffordOptions {
    pub smmlv: Option<String>,
    pub max: Option<u32>,
    pub scope: Option<AffordScope>,
    pub format: Option<OutputFormat>,
    pub save: bool,
}

pub fn show_affordability(ctx: &AppContext, options: &AffordOptions) -> Result<()> {
    let mut session = ctx.load_session();
    {
        let afford = &mut session.preferences_mut().afford;
        if let Some(smmlv) = &options.smmlv {
            afford.smmlv = smmlv.trim().to_string();
        }
        if let Some(max) = options.max {
            afford.max = clamp_installments(max);
        }
        if let Some(scope) = options.scope {
            afford.scope = scope;
        }
    }

    let formatter = ctx.formatter();
    let format = options.format.unwrap_or(ctx.config.display.format);
    println!(
        "{}",
        render_affordability(&session.affordability(), format, &formatter)?
    );

    if options.save {
        if ctx.save_session(&session) {
            eprintln!("{}", formatter.success("Saved affordability settings"));
        } else {
            eprintln!("{}", formatter.warning("Could not save affordability settings"));
        }
    }
    Ok(())
}
