//! Import/export of the whole document.

use crate::date_key::DateKey;
use crate::document::Document;
use crate::error::{PlanError, PlanResult};

/// Pretty-printed JSON of the full document, suitable for a backup file.
pub fn export_json(doc: &Document) -> PlanResult<String> {
    serde_json::to_string_pretty(doc).map_err(|e| PlanError::Serialization(e.to_string()))
}

/// Suggested backup filename, embedding the export date.
pub fn export_filename(date: DateKey) -> String {
    format!("plan-backup-{date}.json")
}

/// Parse an import payload. Accepted only when it is valid JSON carrying
/// both a `plans` and a `settings` top-level key; anything else is
/// rejected whole, never partially merged.
pub fn import_json(raw: &str) -> PlanResult<Document> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| PlanError::Import(format!("not valid JSON: {e}")))?;

    let obj = value
        .as_object()
        .ok_or_else(|| PlanError::Import("expected a JSON object".into()))?;
    if !obj.contains_key("plans") || !obj.contains_key("settings") {
        return Err(PlanError::Import(
            "missing required `plans` or `settings` key".into(),
        ));
    }

    serde_json::from_value(value).map_err(|e| PlanError::Import(format!("malformed document: {e}")))
}
