use anyhow::Result;
use dayplan_core::{DayplanConfig, PlanRepository, PlanStore, Theme};
use owo_colors::OwoColorize;

use crate::ConfigAction;

pub fn run<S: PlanStore>(
    repo: &PlanRepository<S>,
    config: &DayplanConfig,
    action: Option<ConfigAction>,
) -> Result<()> {
    match action {
        None => show(repo, config),
        Some(ConfigAction::Set { key, value }) => set(repo, &key, &value),
    }
}

fn show<S: PlanStore>(repo: &PlanRepository<S>, config: &DayplanConfig) -> Result<()> {
    let settings = repo.settings()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", DayplanConfig::config_path()?.display());
    println!("  Data:    {}", config.display_path().display());

    println!();
    println!("{}", "Settings".bold());
    println!("  theme:           {}", settings.theme);
    println!("  showWarning:     {}", settings.show_warning);
    println!("  killAnimation:   {}", settings.kill_animation);
    println!("  killSound:       {}", settings.kill_sound);
    println!(
        "  whiteNoiseType:  {}",
        settings.white_noise_type.as_deref().unwrap_or("(none)")
    );
    println!(
        "  deepseekApiKey:  {}",
        if settings.deepseek_api_key.is_some() {
            "(set)"
        } else {
            "(unset)"
        }
    );
    println!("  quickTasks:      {}", settings.quick_tasks.join(", "));

    Ok(())
}

fn set<S: PlanStore>(repo: &PlanRepository<S>, key: &str, value: &str) -> Result<()> {
    match key {
        "theme" => {
            let theme = match value {
                "light" => Theme::Light,
                "dark" => Theme::Dark,
                _ => anyhow::bail!("theme must be 'light' or 'dark'"),
            };
            repo.update_settings(|s| s.theme = theme)?;
        }
        "showWarning" | "killAnimation" | "killSound" => {
            let flag: bool = value
                .parse()
                .map_err(|_| anyhow::anyhow!("{key} must be 'true' or 'false'"))?;
            repo.update_settings(|s| match key {
                "showWarning" => s.show_warning = flag,
                "killAnimation" => s.kill_animation = flag,
                _ => s.kill_sound = flag,
            })?;
        }
        "whiteNoiseType" => {
            repo.update_settings(|s| s.white_noise_type = non_empty(value))?;
        }
        "deepseekApiKey" => {
            repo.update_settings(|s| s.deepseek_api_key = non_empty(value))?;
        }
        "quickTasks" => {
            let tasks: Vec<String> = value
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            repo.update_settings(|s| s.quick_tasks = tasks)?;
        }
        other => anyhow::bail!("Unknown settings key '{other}'"),
    }

    println!("Updated {key}");
    Ok(())
}

/// Empty string clears the setting.
fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
