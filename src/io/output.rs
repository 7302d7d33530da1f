//! Rendering of price lists, quotes, affordability reports and rule sets.
//!
//! Every renderer returns a `String`; printing and copying is left to the
//! command handlers.

use crate::config::OutputFormat;
use crate::core::{CatalogEntry, RuleSection, TypeLabel};
use crate::formatting::{format_currency, format_factor, format_percent, OutputFormatter};
use crate::pricing::affordability::{AffordabilityReport, Unavailable};
use crate::pricing::{to_display_units, PriceBasis, PriceBreakdown};
use crate::rules::RuleSet;
use crate::session::Session;
use crate::storage::ViewMode;
use anyhow::Result;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;
use std::fmt::Write;

/// One priced catalog line, as exported.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRow {
    pub name: String,
    pub group: String,
    pub modality: String,
    #[serde(rename = "type")]
    pub type_label: TypeLabel,
    pub classes: u32,
    pub months: u32,
    pub price: u64,
}

impl PriceRow {
    pub fn new(entry: &CatalogEntry, price: u64) -> Self {
        Self {
            name: entry.name.clone(),
            group: entry.group.clone(),
            modality: entry.modality.as_str().to_string(),
            type_label: entry.type_label,
            classes: entry.classes,
            months: entry.months,
            price,
        }
    }

    /// Human quantity: "8 clases", "3 meses", "1 clase".
    pub fn quantity(&self) -> String {
        match self.type_label {
            TypeLabel::Mes if self.months == 1 => "1 mes".to_string(),
            TypeLabel::Mes => format!("{} meses", self.months),
            TypeLabel::Prueba | TypeLabel::Individual => "1 clase".to_string(),
            TypeLabel::Pack => format!("{} clases", self.classes),
            TypeLabel::Otro => String::new(),
        }
    }
}

pub fn price_rows(session: &Session, entries: &[&CatalogEntry]) -> Vec<PriceRow> {
    entries
        .iter()
        .map(|entry| PriceRow::new(entry, session.price_of(entry)))
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub view: ViewMode,
    pub compact: bool,
    pub color: bool,
}

pub fn render_prices(rows: &[PriceRow], options: &RenderOptions) -> Result<String> {
    match options.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Markdown => Ok(render_markdown(rows, options.compact)),
        OutputFormat::Terminal => Ok(match options.view {
            ViewMode::Table => render_table(rows, options.compact, options.color),
            ViewMode::Cards => render_cards(rows, options.compact),
        }),
    }
}

fn header_cell(text: &str, color: bool) -> Cell {
    let cell = Cell::new(text);
    if color {
        cell.fg(Color::Cyan)
    } else {
        cell
    }
}

pub fn render_table(rows: &[PriceRow], compact: bool, color: bool) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    if compact {
        table.set_header(vec![header_cell("Service", color), header_cell("Price", color)]);
        for row in rows {
            table.add_row(vec![
                Cell::new(&row.name),
                Cell::new(format_currency(row.price)).set_alignment(CellAlignment::Right),
            ]);
        }
    } else {
        table.set_header(vec![
            header_cell("Service", color),
            header_cell("Group", color),
            header_cell("Modality", color),
            header_cell("Type", color),
            header_cell("Quantity", color),
            header_cell("Price", color),
        ]);
        for row in rows {
            table.add_row(vec![
                Cell::new(&row.name),
                Cell::new(&row.group),
                Cell::new(&row.modality),
                Cell::new(row.type_label.as_str()),
                Cell::new(row.quantity()),
                Cell::new(format_currency(row.price)).set_alignment(CellAlignment::Right),
            ]);
        }
    }

    table.to_string()
}

pub fn render_cards(rows: &[PriceRow], compact: bool) -> String {
    let mut out = String::new();
    for row in rows {
        if compact {
            writeln!(out, "{}  {}", row.name, format_currency(row.price)).unwrap();
            continue;
        }
        let details: Vec<&str> = [row.group.as_str(), row.modality.as_str(), row.type_label.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        let quantity = row.quantity();
        writeln!(out, "{}", row.name).unwrap();
        if quantity.is_empty() {
            writeln!(out, "  {}", details.join(" · ")).unwrap();
        } else {
            writeln!(out, "  {} · {}", details.join(" · "), quantity).unwrap();
        }
        writeln!(out, "  {}", format_currency(row.price)).unwrap();
        out.push('\n');
    }
    out
}

pub fn render_markdown(rows: &[PriceRow], compact: bool) -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_MARKDOWN);
    if compact {
        table.set_header(vec!["Service", "Price"]);
        for row in rows {
            table.add_row(vec![row.name.clone(), format_currency(row.price)]);
        }
    } else {
        table.set_header(vec!["Service", "Group", "Type", "Quantity", "Price"]);
        for row in rows {
            table.add_row(vec![
                row.name.clone(),
                row.group.clone(),
                row.type_label.as_str().to_string(),
                row.quantity(),
                format_currency(row.price),
            ]);
        }
    }
    table.to_string()
}

/// Plain `name: $ price` lines for pasting into chats and documents.
pub fn clipboard_text(rows: &[PriceRow]) -> String {
    rows.iter()
        .map(|row| format!("{}: {}", row.name, format_currency(row.price)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_breakdown(
    entry: &CatalogEntry,
    breakdown: &PriceBreakdown,
    rounding_step: u64,
    formatter: &dyn OutputFormatter,
) -> String {
    let mut out = String::new();
    let group = if entry.has_group() {
        entry.group.as_str()
    } else {
        "(none)"
    };

    writeln!(out, "{}", formatter.header(&entry.name)).unwrap();
    writeln!(
        out,
        "  {:<12} {}",
        "base",
        format_currency(to_display_units(breakdown.base_price))
    )
    .unwrap();
    writeln!(
        out,
        "  {:<12} {} {}",
        "group",
        group,
        format_factor(breakdown.group_factor)
    )
    .unwrap();
    match &breakdown.basis {
        PriceBasis::Subscription {
            months,
            months_multiplier,
            fallback,
        } => {
            let note = if *fallback { " (linear fallback)" } else { "" };
            writeln!(
                out,
                "  {:<12} {} {}{}",
                "months",
                months,
                format_factor(*months_multiplier),
                note
            )
            .unwrap();
        }
        PriceBasis::PerClass {
            type_key,
            type_factor,
            classes,
            pack_multiplier,
        } => {
            writeln!(out, "  {:<12} {} {}", "type", type_key, format_factor(*type_factor)).unwrap();
            writeln!(out, "  {:<12} {}", "classes", classes).unwrap();
            writeln!(out, "  {:<12} {}", "pack", format_factor(*pack_multiplier)).unwrap();
        }
    }
    writeln!(
        out,
        "  {:<12} {} {}",
        "adjustment",
        format_percent((breakdown.global_multiplier - 1.0) * 100.0),
        format_factor(breakdown.global_multiplier)
    )
    .unwrap();
    writeln!(
        out,
        "  {:<12} {}",
        "raw",
        format_currency(to_display_units(breakdown.raw_price))
    )
    .unwrap();
    let step = if rounding_step == 0 {
        "off".to_string()
    } else {
        format_currency(rounding_step)
    };
    writeln!(
        out,
        "  {:<12} {} (step {})",
        "rounded",
        format_currency(to_display_units(breakdown.rounded_price)),
        step
    )
    .unwrap();
    writeln!(
        out,
        "  {:<12} {}",
        "card fee",
        if breakdown.card_fee_applied { "+6%" } else { "no" }
    )
    .unwrap();
    writeln!(
        out,
        "  {:<12} {}",
        "price",
        formatter.success(&format_currency(to_display_units(breakdown.final_price)))
    )
    .unwrap();
    out
}

pub fn render_affordability(
    report: &AffordabilityReport,
    format: OutputFormat,
    formatter: &dyn OutputFormatter,
) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    let (smmlv, max, rows) = match report {
        AffordabilityReport::Unavailable { reason } => {
            let message = match reason {
                Unavailable::MissingReference => "No SMMLV reference value set",
                Unavailable::NoPrices => "No priced services in scope",
            };
            return Ok(formatter.warning(message));
        }
        AffordabilityReport::Ready { smmlv, max, rows } => (smmlv, max, rows),
    };

    let mut table = Table::new();
    table.load_preset(if format == OutputFormat::Markdown {
        ASCII_MARKDOWN
    } else {
        UTF8_FULL
    });
    table.set_header(vec![
        "Service".to_string(),
        "Price".to_string(),
        "% SMMLV".to_string(),
        "Installments".to_string(),
        format!("Monthly (÷{max})"),
        "Affordable".to_string(),
    ]);
    for row in rows {
        table.add_row(vec![
            row.name.clone(),
            format_currency(row.price),
            format!("{:.1}%", row.share_of_smmlv * 100.0),
            row.installments_needed.to_string(),
            format_currency(row.monthly_installment),
            formatter.emoji(if row.affordable { "✓" } else { "✗" }, if row.affordable { "yes" } else { "no" }),
        ]);
    }

    let affordable = rows.iter().filter(|row| row.affordable).count();
    Ok(format!(
        "SMMLV {} · up to {} installments · {}/{} affordable\n{}",
        format_currency(*smmlv),
        max,
        affordable,
        rows.len(),
        table
    ))
}

/// Every section in its import text format, under a header.
pub fn render_rules(rules: &RuleSet, formatter: &dyn OutputFormatter) -> String {
    RuleSection::ALL
        .iter()
        .map(|section| {
            format!(
                "{}\n{}\n",
                formatter.header(&format!("# {}", section)),
                rules.export_section(*section)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
