//! Terminal rendering for dayplan types.

use dayplan_core::{Plan, PlanKind};
use owo_colors::OwoColorize;

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Plan {
    fn render(&self) -> String {
        let marker = if self.is_completed() {
            "✓".green().to_string()
        } else {
            "○".to_string()
        };

        let text = if self.is_completed() {
            self.text.strikethrough().dimmed().to_string()
        } else {
            self.text.clone()
        };

        let tag = match (&self.kind, &self.ebbinghaus) {
            (PlanKind::Ebbinghaus, Some(link)) => format!(
                " [review {}/{}]",
                link.index + 1,
                link.dates.len()
            )
            .dimmed()
            .to_string(),
            _ => String::new(),
        };

        format!("{} {}  {}{}", marker, format!("#{}", self.id).dimmed(), text, tag)
    }
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> &str {
    if count == 1 {
        word
    } else {
        match word {
            "plan" => "plans",
            "date" => "dates",
            _ => word,
        }
    }
}
