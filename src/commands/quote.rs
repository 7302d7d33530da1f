use super::AppContext;
use crate::core::CatalogEntry;
use crate::formatting::OutputFormatter;
use crate::io::output::render_breakdown;
use crate::pricing::PriceBreakdown;
use anyhow::Result;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Serialize;

const MAX_SUGGESTIONS: usize = 3;

#[derive(Serialize)]
struct Quote<'a> {
    entry: &'a CatalogEntry,
    breakdown: &'a PriceBreakdown,
}

pub fn quote(ctx: &AppContext, name: &str, json: bool) -> Result<()> {
    let session = ctx.load_session();
    let (entry, breakdown) = session.quote(name);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&Quote {
                entry: &entry,
                breakdown: &breakdown,
            })?
        );
        return Ok(());
    }

    let formatter = ctx.formatter();
    print!(
        "{}",
        render_breakdown(&entry, &breakdown, session.pricing().rounding_step, &formatter)
    );

    if !entry.has_group() {
        let names: Vec<&str> = session.catalog().iter().map(|e| e.name.as_str()).collect();
        let suggestions = suggest_names(&entry.name, &names);
        eprintln!(
            "{} {}",
            formatter.emoji("⚠", "[WARN]"),
            formatter.warning("No group matched; group factor is neutral")
        );
        if !suggestions.is_empty() {
            eprintln!("Did you mean:");
            for suggestion in suggestions {
                eprintln!("  {}", suggestion);
            }
        }
    }

    Ok(())
}

/// Catalog names closest to `name`, best first.
pub fn suggest_names<'a>(name: &str, candidates: &[&'a str]) -> Vec<&'a str> {
    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(i64, &str)> = candidates
        .iter()
        .filter_map(|candidate| {
            let best = name
                .split_whitespace()
                .filter_map(|word| matcher.fuzzy_match(candidate, word))
                .sum::<i64>();
            (best > 0).then_some((best, *candidate))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, candidate)| candidate)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggests_close_names() {
        let names = ["Musigym 3 meses", "Sede Grupal Paquete de 8 clases", "Curso Vacacional 1 mes"];
        let suggestions = suggest_names("musigim 3 meses", &names);
        assert_eq!(suggestions.first(), Some(&"Musigym 3 meses"));
    }

    #[test]
    fn test_no_suggestions_for_unrelated_text() {
        let names = ["Musigym 3 meses"];
        assert!(suggest_names("zzz", &names).is_empty());
    }
}
