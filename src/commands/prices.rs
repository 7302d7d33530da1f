use super::AppContext;
use crate::catalog::{CatalogFilter, SortKey};
use crate::config::OutputFormat;
use crate::formatting::{format_currency, format_percent, OutputFormatter};
use crate::io::clipboard::copy_to_clipboard;
use crate::io::output::{clipboard_text, price_rows, render_prices, RenderOptions};
use crate::pricing::PricingState;
use crate::session::Session;
use crate::storage::ViewMode;
use anyhow::Result;

/// Parsed `prices` arguments.
#[derive(Debug, Clone, Default)]
pub struct PricesOptions {
    pub base: Option<f64>,
    pub rounding: Option<u64>,
    pub adjust: Option<f64>,
    pub card_fee: Option<bool>,
    pub query: Option<String>,
    pub modality: Option<String>,
    pub type_label: Option<String>,
    pub group: Option<String>,
    pub sort: SortKey,
    pub descending: bool,
    pub format: Option<OutputFormat>,
    pub view: Option<ViewMode>,
    pub compact: bool,
    pub only_visible: Option<bool>,
    pub copy: bool,
    pub save: bool,
}

impl PricesOptions {
    fn pricing(&self, current: &PricingState) -> PricingState {
        PricingState {
            base_price: self.base.unwrap_or(current.base_price),
            rounding_step: self.rounding.unwrap_or(current.rounding_step),
            global_pct: self.adjust.unwrap_or(current.global_pct),
            card_fee: self.card_fee.unwrap_or(current.card_fee),
        }
    }

    fn filters(&self, current: &CatalogFilter) -> CatalogFilter {
        let pick = |flag: &Option<String>, saved: &String| flag.clone().unwrap_or_else(|| saved.clone());
        CatalogFilter {
            query: pick(&self.query, &current.query),
            modality: pick(&self.modality, &current.modality),
            type_label: pick(&self.type_label, &current.type_label),
            group: pick(&self.group, &current.group),
        }
    }
}

/// Fold command-line overrides into the session.
pub fn apply_options(session: &mut Session, options: &PricesOptions) {
    let pricing = options.pricing(session.pricing());
    session.set_pricing(pricing);
    let filters = options.filters(&session.preferences().filters);
    session.set_filters(filters);

    let prefs = session.preferences_mut();
    if let Some(view) = options.view {
        prefs.view = view;
    }
    if options.compact {
        prefs.compact = true;
    }
    if let Some(only_visible) = options.only_visible {
        prefs.show_only_visible = only_visible;
    }
}

pub fn show_prices(ctx: &AppContext, options: &PricesOptions) -> Result<()> {
    let mut session = ctx.load_session();
    apply_options(&mut session, options);
    let formatter = ctx.formatter();

    let format = options.format.unwrap_or(ctx.config.display.format);
    let prefs = session.preferences();
    let render = RenderOptions {
        format,
        view: prefs.view,
        compact: prefs.compact,
        color: ctx.use_color(),
    };

    let visible = session.visible_entries(options.sort, options.descending);
    let rows = price_rows(&session, &visible);

    if format == OutputFormat::Terminal {
        println!("{}", summary_line(&session, rows.len(), &formatter));
    }
    println!("{}", render_prices(&rows, &render)?);

    if options.copy {
        let exported = session.export_entries(options.sort, options.descending);
        let export_rows = price_rows(&session, &exported);
        let status = copy_to_clipboard(
            &clipboard_text(&export_rows),
            &format!("{} prices", export_rows.len()),
        );
        eprintln!("{}", formatter.info(&status));
    }

    if options.save {
        if ctx.save_session(&session) {
            eprintln!("{}", formatter.success("Saved pricing settings"));
        } else {
            eprintln!("{}", formatter.warning("Could not save pricing settings"));
        }
    }

    Ok(())
}

fn summary_line(session: &Session, shown: usize, formatter: &dyn OutputFormatter) -> String {
    let pricing = session.pricing();
    let rounding = if pricing.rounding_step == 0 {
        "no rounding".to_string()
    } else {
        format!("rounded to {}", format_currency(pricing.rounding_step))
    };
    let card_fee = if pricing.card_fee { " · card fee +6%" } else { "" };
    formatter.dim(&format!(
        "{} of {} services · base {} · {} · adjustment {}{}",
        shown,
        session.catalog().len(),
        format_currency(pricing.base_price.max(0.0).round() as u64),
        rounding,
        format_percent(pricing.global_pct),
        card_fee
    ))
}
