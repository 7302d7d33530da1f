use anyhow::Result;
use std::path::Path;
use tarifario::cli::{self, Cli, Commands, RulesCommand, StateCommand};
use tarifario::commands::{
    self, afford::AffordOptions, prices::PricesOptions, rules::EditSources, AppContext,
};

fn main() -> Result<()> {
    let cli = cli::parse_args();
    cli::init_logging(cli.verbose);

    if let Commands::Init { force } = cli.command {
        return commands::init::init_config(Path::new("."), force);
    }

    let ctx = AppContext::from_cli(&cli)?;
    run(&ctx, cli)
}

fn run(ctx: &AppContext, cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Prices {
            base,
            rounding,
            adjust,
            card_fee,
            no_card_fee,
            query,
            modality,
            type_label,
            group,
            sort,
            desc,
            format,
            view,
            compact,
            only_visible,
            all_rows,
            copy,
            save,
        } => {
            let options = PricesOptions {
                base,
                rounding,
                adjust,
                card_fee: flag_pair(card_fee, no_card_fee),
                query,
                modality,
                type_label,
                group,
                sort: sort.map(Into::into).unwrap_or_default(),
                descending: desc,
                format: format.map(Into::into),
                view: view.map(Into::into),
                compact,
                only_visible: flag_pair(only_visible, all_rows),
                copy,
                save,
            };
            commands::prices::show_prices(ctx, &options)
        }
        Commands::Quote { name, json } => commands::quote::quote(ctx, &name.join(" "), json),
        Commands::Rules { action } => match action {
            RulesCommand::Show => commands::rules::show_rules(ctx),
            RulesCommand::Export { section } => {
                commands::rules::export_section(ctx, section.into())
            }
            RulesCommand::Edit {
                groups,
                types,
                packs,
                months,
                services,
            } => commands::rules::edit_rules(
                ctx,
                &EditSources {
                    groups,
                    types,
                    packs,
                    months,
                    services,
                },
            ),
            RulesCommand::Reset => commands::rules::reset_rules(ctx),
        },
        Commands::Afford {
            smmlv,
            max,
            scope,
            format,
            save,
        } => commands::afford::show_affordability(
            ctx,
            &AffordOptions {
                smmlv,
                max,
                scope: scope.map(Into::into),
                format: format.map(Into::into),
                save,
            },
        ),
        Commands::State { action } => match action {
            StateCommand::Show => commands::state::show_state(ctx),
        },
        Commands::Init { force } => commands::init::init_config(Path::new("."), force),
    }
}

/// `--x` / `--no-x` style pair: `None` when neither was given.
fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}
