use anyhow::Result;
use dayplan_core::{DateKey, PlanRepository, PlanStore};
use owo_colors::OwoColorize;

pub fn run<S: PlanStore>(repo: &PlanRepository<S>, date: &str, id: i64) -> Result<()> {
    let date: DateKey = date.parse()?;

    if !repo.complete_plan(date, id)? {
        anyhow::bail!("No plan #{id} on {date}");
    }

    let plan = repo.plans_by_date(date)?.into_iter().find(|p| p.id == id);
    match plan.and_then(|p| p.completed_at) {
        Some(done_on) => println!("{} plan #{id} (done {done_on})", "Completed".green()),
        None => println!("Reopened plan #{id}"),
    }

    Ok(())
}
