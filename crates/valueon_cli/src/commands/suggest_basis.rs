//! Suggest-basis command - Recommend how a cost item should be calculated.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::info;

use valueon_core::{AnalysisInputs, BasisTag};

use super::Context;
use crate::config::OutputFormat;

#[derive(Args)]
pub struct SuggestBasisArgs {
    /// Item name to classify; omit to review every item of the snapshot
    name: Option<String>,

    /// Category id of the item (land, construction, sales, ...)
    #[arg(short, long)]
    category: Option<String>,

    /// JSON or YAML inputs document (defaults to the saved session)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Suggestion {
    #[serde(skip_serializing_if = "Option::is_none")]
    category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    item_id: Option<String>,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    current: Option<&'static str>,
    suggested: &'static str,
    label: &'static str,
}

fn suggest(name: &str, category: Option<&str>) -> Suggestion {
    let tag = BasisTag::recommend(name, category);
    Suggestion {
        category_id: category.map(str::to_string),
        item_id: None,
        name: name.to_string(),
        current: None,
        suggested: tag.as_str(),
        label: tag.label(),
    }
}

/// One suggestion per advanced cost item, with its current basis.
fn review(inputs: &AnalysisInputs) -> Vec<Suggestion> {
    inputs
        .advanced_categories
        .iter()
        .flat_map(|cat| {
            cat.items.iter().map(move |item| Suggestion {
                item_id: Some(item.id.clone()),
                current: Some(item.basis.tag().label()),
                ..suggest(&item.name, Some(&cat.id))
            })
        })
        .collect()
}

pub fn execute(args: SuggestBasisArgs, ctx: &Context) -> Result<()> {
    let suggestions = match &args.name {
        Some(name) => vec![suggest(name, args.category.as_deref())],
        None => review(&ctx.load_inputs(args.input.as_deref())?),
    };
    info!("Suggested a basis for {} item(s)", suggestions.len());

    match args.format.unwrap_or(ctx.format) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&suggestions)?),
        OutputFormat::Table => {
            for s in &suggestions {
                match s.current {
                    Some(current) => println!("  {:<24} {:<10} → {} ({})", s.name, current, s.label, s.suggested),
                    None => println!("  {:<24} → {} ({})", s.name, s.label, s.suggested),
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use valueon_core::default_inputs;

    #[test]
    fn test_suggest_by_name() {
        let s = suggest("토지매입비", None);
        assert_eq!(s.suggested, "per_site_pyung");
        assert_eq!(s.label, "대지평당");

        assert_eq!(suggest("분양수수료", None).suggested, "per_unit");
        assert_eq!(suggest("Misc", Some("construction")).label, "연면적평당");
        assert_eq!(suggest("Misc", None).suggested, "fixed");
    }

    #[test]
    fn test_review_covers_every_item() {
        let inputs = default_inputs();
        let rows = review(&inputs);
        let items: usize = inputs.advanced_categories.iter().map(|c| c.items.len()).sum();
        assert_eq!(rows.len(), items);

        // Reference items are all fixed
        assert!(rows.iter().all(|r| r.current == Some("고정")));
        let demolition = rows.iter().find(|r| r.item_id.as_deref() == Some("c2")).unwrap();
        assert_eq!(demolition.suggested, "per_floor_pyung");
        assert_eq!(demolition.category_id.as_deref(), Some("construction"));
    }
}
