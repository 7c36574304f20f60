use std::path::PathBuf;

use anyhow::{Context, Result};
use dayplan_core::{DateKey, PlanRepository, PlanStore, transfer};

use crate::render::pluralize;

pub fn run<S: PlanStore>(repo: &PlanRepository<S>, output: Option<PathBuf>) -> Result<()> {
    let doc = repo.document()?;
    let json = transfer::export_json(&doc)?;

    let path =
        output.unwrap_or_else(|| PathBuf::from(transfer::export_filename(DateKey::today())));
    std::fs::write(&path, &json).with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "Exported {} {} to {}",
        doc.plans.len(),
        pluralize("date", doc.plans.len()),
        path.display()
    );

    Ok(())
}
