use anyhow::Result;
use dayplan_core::{NewPlan, PlanRepository, PlanStore};
use owo_colors::OwoColorize;

pub fn run<S: PlanStore>(
    repo: &PlanRepository<S>,
    date: Option<&str>,
    text: &str,
    repeat: bool,
) -> Result<()> {
    let date = super::parse_date(date)?;

    if repeat {
        let root_id = repo.add_ebbinghaus_plan(date, text)?;

        // The origin member carries the whole schedule.
        let origin = repo
            .plans_by_date(date)?
            .into_iter()
            .find(|p| p.family_root() == Some(root_id));

        println!("Added repeating plan on {}:", date.to_string().bold());
        if let Some(link) = origin.and_then(|p| p.ebbinghaus) {
            for (index, member_date) in link.dates.iter().enumerate() {
                let label = if index == 0 { "origin" } else { "review" };
                println!("  {} {}", member_date, label.dimmed());
            }
        }
    } else {
        let plan = repo.add_plan(date, NewPlan::normal(text))?;
        println!(
            "Added plan {} on {}",
            format!("#{}", plan.id).bold(),
            date.to_string().bold()
        );
    }

    Ok(())
}
