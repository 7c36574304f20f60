use anyhow::Result;
use dayplan_core::{DateKey, PlanRepository, PlanStore, Scope};

pub fn run<S: PlanStore>(repo: &PlanRepository<S>, date: &str, id: i64, all: bool) -> Result<()> {
    let date: DateKey = date.parse()?;
    let scope = super::resolve_scope(repo, date, id, all, "Delete")?;

    if !repo.delete_plan(date, id, scope)? {
        anyhow::bail!("No plan #{id} on {date}");
    }

    match scope {
        Scope::All => println!("Deleted every date in the family"),
        Scope::Current => println!("Deleted plan #{id}"),
    }

    Ok(())
}
