//! Dry run: show what `publish` would type into each create form.

use crate::OutputFormat;
use crate::commands::source::SourceArgs;
use anyhow::Result;
use relister_core::{Category, ListingRecord};
use relister_engine::{Composers, InputKind, StepPlan};
use serde::Serialize;

/// The form plan for one record
#[derive(Debug, Serialize)]
pub struct ListingPlan {
    pub title: String,
    pub category: Category,
    pub location: String,
    pub groups: Vec<String>,
    pub steps: StepPlan,
}

/// Plan every record, rejecting the batch the same way `publish` would
pub fn build_plans(records: &[ListingRecord], category: Category) -> Result<Vec<ListingPlan>> {
    let composers = Composers::standard();
    composers.check_batch(records, category)?;

    records
        .iter()
        .map(|record| -> Result<ListingPlan> {
            Ok(ListingPlan {
                title: record.derived_title(),
                category,
                location: record.location.clone(),
                groups: record.group_names(),
                steps: composers.form_plan(record, category)?,
            })
        })
        .collect()
}

pub fn execute(source: &SourceArgs, category: Category, format: OutputFormat) -> Result<()> {
    let records = source.load(category)?;
    let plans = build_plans(&records, category)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plans)?),
        OutputFormat::Pretty => output_pretty(&plans, category),
    }

    Ok(())
}

fn output_pretty(plans: &[ListingPlan], category: Category) {
    use console::style;

    println!(
        "\n{}",
        style(format!("{} {} listings", plans.len(), category))
            .bold()
            .cyan()
    );

    for (index, plan) in plans.iter().enumerate() {
        println!(
            "\n{} {}",
            style(format!("[{}]", index + 1)).dim(),
            style(&plan.title).bold()
        );
        println!("  Location: {}", plan.location);
        if !plan.groups.is_empty() {
            println!("  Groups:   {}", plan.groups.join(", "));
        }

        for step in plan.steps.steps() {
            let action = match step.kind {
                InputKind::Text | InputKind::MultilineText => "type",
                InputKind::Select(_) => "pick",
                InputKind::FileUpload => "upload",
            };
            // Multi-line values (photo lists, descriptions) print on one line
            let value = step.value.replace('\n', " | ");
            println!(
                "    {:<7} {:<14} {}",
                action,
                style(&step.field).green(),
                value
            );
        }
    }
    println!();
}
