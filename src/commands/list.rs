use anyhow::Result;
use dayplan_core::{Plan, PlanRepository, PlanStore};
use owo_colors::OwoColorize;

use crate::render::{Render, pluralize};

pub fn run<S: PlanStore>(repo: &PlanRepository<S>, date: Option<&str>) -> Result<()> {
    let date = super::parse_date(date)?;
    let plans = repo.plans_by_date(date)?;

    if plans.is_empty() {
        println!("{}", format!("No plans on {date}").dimmed());
        return Ok(());
    }

    let (pending, completed): (Vec<Plan>, Vec<Plan>) =
        plans.into_iter().partition(|p| !p.is_completed());

    println!("{}", date.to_string().bold());
    for plan in &pending {
        println!("  {}", plan.render());
    }

    if !completed.is_empty() {
        println!(
            "{}",
            format!(
                "Completed ({} {})",
                completed.len(),
                pluralize("plan", completed.len())
            )
            .dimmed()
        );
        for plan in &completed {
            println!("  {}", plan.render());
        }
    }

    Ok(())
}
