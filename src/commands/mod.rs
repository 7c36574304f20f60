pub mod add;
pub mod config;
pub mod dates;
pub mod done;
pub mod edit;
pub mod export;
pub mod import;
pub mod list;
pub mod remove;

use anyhow::Result;
use dayplan_core::{DateKey, PlanKind, PlanRepository, PlanStore, Scope};
use dialoguer::Select;

/// Parse an optional date argument, defaulting to today.
pub fn parse_date(arg: Option<&str>) -> Result<DateKey> {
    match arg {
        None => Ok(DateKey::today()),
        Some(s) => Ok(s.parse()?),
    }
}

/// Resolve the scope for an edit or delete. When the target belongs to a
/// repetition family and `--all` wasn't passed, ask which scope to use;
/// everything else is `Current`.
pub fn resolve_scope<S: PlanStore>(
    repo: &PlanRepository<S>,
    date: DateKey,
    id: i64,
    all: bool,
    verb: &str,
) -> Result<Scope> {
    if all {
        return Ok(Scope::All);
    }

    let Some(plan) = repo.plans_by_date(date)?.into_iter().find(|p| p.id == id) else {
        return Ok(Scope::Current);
    };
    if plan.kind != PlanKind::Ebbinghaus {
        return Ok(Scope::Current);
    }

    let choice = Select::new()
        .with_prompt(format!("{verb} a repeating plan"))
        .items(&["This date only", "Every date in its family"])
        .default(0)
        .interact()?;

    Ok(if choice == 1 { Scope::All } else { Scope::Current })
}
