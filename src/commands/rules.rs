use super::AppContext;
use crate::core::RuleSection;
use crate::formatting::OutputFormatter;
use crate::io::output::render_rules;
use crate::io::read_input;
use crate::session::ConfigEdits;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Files to read for `rules edit`, one per section.
#[derive(Debug, Clone, Default)]
pub struct EditSources {
    pub groups: Option<PathBuf>,
    pub types: Option<PathBuf>,
    pub packs: Option<PathBuf>,
    pub months: Option<PathBuf>,
    pub services: Option<PathBuf>,
}

impl EditSources {
    fn source(&self, section: RuleSection) -> Option<&PathBuf> {
        match section {
            RuleSection::Group => self.groups.as_ref(),
            RuleSection::Type => self.types.as_ref(),
            RuleSection::Pack => self.packs.as_ref(),
            RuleSection::Months => self.months.as_ref(),
            RuleSection::Services => self.services.as_ref(),
        }
    }

    /// Read every given file into the matching edit field.
    pub fn read(&self) -> Result<ConfigEdits> {
        let mut edits = ConfigEdits::default();
        for section in RuleSection::ALL {
            if let Some(path) = self.source(section) {
                *edits.section_mut(section) = read_input(path)
                    .with_context(|| format!("Failed to read {} rules", section))?;
            }
        }
        Ok(edits)
    }
}

pub fn show_rules(ctx: &AppContext) -> Result<()> {
    let session = ctx.load_session();
    print!("{}", render_rules(session.rules(), &ctx.formatter()));
    Ok(())
}

pub fn export_section(ctx: &AppContext, section: RuleSection) -> Result<()> {
    let session = ctx.load_session();
    println!("{}", session.rules().export_section(section));
    Ok(())
}

pub fn edit_rules(ctx: &AppContext, sources: &EditSources) -> Result<()> {
    let edits = sources.read()?;
    let formatter = ctx.formatter();
    if edits.is_empty() {
        eprintln!("{}", formatter.warning("Nothing to apply"));
        return Ok(());
    }

    let mut session = ctx.load_session();
    let skipped = edits.unusable_sections();
    let rules = session
        .apply_config_edits(&edits)
        .context("Rule edit rejected")?;
    let summary = format!(
        "Rules updated: {} groups, {} types, {} pack sizes, {} month lengths, {} services",
        rules.group_factor.len(),
        rules.type_factor.len(),
        rules.pack_discount.len(),
        rules.months_mult.len(),
        rules.service_names.len()
    );

    for section in skipped {
        eprintln!(
            "{}",
            formatter.warning(&format!("No valid lines for {section}; kept the current rules"))
        );
    }
    if !ctx.save_session(&session) {
        eprintln!("{}", formatter.warning("Could not save the updated rules"));
    }
    println!("{}", formatter.success(&summary));
    Ok(())
}

pub fn reset_rules(ctx: &AppContext) -> Result<()> {
    let mut session = ctx.load_session();
    session.reset_rules();
    let formatter = ctx.formatter();
    if !ctx.save_session(&session) {
        eprintln!("{}", formatter.warning("Could not save the restored rules"));
    }
    println!("{}", formatter.success("Rules restored to defaults"));
    Ok(())
}
