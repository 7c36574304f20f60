use anyhow::Result;
use dayplan_core::{PlanRepository, PlanStore};
use owo_colors::OwoColorize;

use crate::render::pluralize;

pub fn run<S: PlanStore>(repo: &PlanRepository<S>) -> Result<()> {
    let dates = repo.all_plan_dates()?;

    if dates.is_empty() {
        println!("{}", "No plans yet".dimmed());
        return Ok(());
    }

    for date in dates {
        let plans = repo.plans_by_date(date)?;
        let pending = plans.iter().filter(|p| !p.is_completed()).count();

        let marker = if pending > 0 {
            "●".yellow().to_string()
        } else {
            "○".dimmed().to_string()
        };
        let summary = format!(
            "{} {}, {} pending",
            plans.len(),
            pluralize("plan", plans.len()),
            pending
        );
        println!("{} {}  {}", marker, date, summary.dimmed());
    }

    Ok(())
}
