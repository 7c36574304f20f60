use std::path::Path;

use anyhow::{Context, Result};
use dayplan_core::{PlanRepository, PlanStore, transfer};

use crate::render::pluralize;

pub fn run<S: PlanStore>(repo: &PlanRepository<S>, path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let doc = transfer::import_json(&raw)?;
    repo.replace(&doc)?;

    println!(
        "Imported {} {} from {}",
        doc.plans.len(),
        pluralize("date", doc.plans.len()),
        path.display()
    );

    Ok(())
}
