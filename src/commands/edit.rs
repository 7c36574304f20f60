use anyhow::Result;
use dayplan_core::{DateKey, PlanRepository, PlanStore, Scope};

pub fn run<S: PlanStore>(
    repo: &PlanRepository<S>,
    date: &str,
    id: i64,
    text: &str,
    all: bool,
) -> Result<()> {
    let date: DateKey = date.parse()?;
    let scope = super::resolve_scope(repo, date, id, all, "Edit")?;

    if !repo.update_plan(date, id, text, scope)? {
        anyhow::bail!("No plan #{id} on {date}");
    }

    match scope {
        Scope::All => println!("Updated every date in the family"),
        Scope::Current => println!("Updated plan #{id}"),
    }

    Ok(())
}
