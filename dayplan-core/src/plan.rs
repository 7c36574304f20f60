//! Plan entries and the Ebbinghaus family linkage.

use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;

/// Review intervals of the classical Ebbinghaus forgetting-curve schedule,
/// in days after the origin date. A family covers the origin plus these
/// five follow-ups.
pub const EBBINGHAUS_INTERVALS: [i64; 5] = [1, 3, 6, 14, 29];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    Normal,
    Ebbinghaus,
}

/// Linkage shared by every member of one spaced-repetition family.
///
/// The family has no central index; each member carries the full schedule
/// and the shared root id, and scoped operations walk the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EbbinghausLink {
    /// The full family schedule: origin date plus the five follow-ups.
    #[serde(rename = "ebbinghausDates")]
    pub dates: Vec<DateKey>,
    /// This member's 0-based position in `dates`.
    #[serde(rename = "ebbinghausIndex")]
    pub index: usize,
    /// Shared family identifier, used to scope multi-date edits and deletes.
    #[serde(rename = "ebbinghausRootId")]
    pub root_id: i64,
}

/// A single reminder/task entry attached to one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Unique within its date bucket at creation time. Ebbinghaus members
    /// derive theirs from the family root id plus their position, so the
    /// whole family is collision-free without a global registry.
    pub id: i64,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: PlanKind,
    /// Origin date of the plan (identical across an Ebbinghaus family).
    #[serde(rename = "createdAt")]
    pub created_at: DateKey,
    /// The day completion was toggled on; `None` means pending.
    #[serde(rename = "completedAt")]
    pub completed_at: Option<DateKey>,
    /// Present only for `ebbinghaus` plans; a `normal` plan carries none
    /// of these fields on the wire.
    #[serde(flatten)]
    pub ebbinghaus: Option<EbbinghausLink>,
}

impl Plan {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// The family root id, for plans that belong to a family.
    pub fn family_root(&self) -> Option<i64> {
        self.ebbinghaus.as_ref().map(|link| link.root_id)
    }
}

/// Whether an edit or delete targets only the current date's entry, or
/// every member of the plan's Ebbinghaus family. For a `normal` plan the
/// two are equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    Current,
    All,
}

/// Descriptor for a plan to be created via `PlanRepository::add_plan`.
#[derive(Debug, Clone)]
pub struct NewPlan {
    pub text: String,
    pub kind: PlanKind,
    /// Explicit id; assigned bucket-locally when omitted.
    pub id: Option<i64>,
    /// Origin date of the plan; defaults to the target date.
    pub created_at: Option<DateKey>,
    pub ebbinghaus: Option<EbbinghausLink>,
}

impl NewPlan {
    /// A plain single-date plan with a repository-assigned id.
    pub fn normal(text: impl Into<String>) -> Self {
        NewPlan {
            text: text.into(),
            kind: PlanKind::Normal,
            id: None,
            created_at: None,
            ebbinghaus: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_normal_plan_wire_shape() {
        let plan = Plan {
            id: 1,
            text: "Buy milk".to_string(),
            kind: PlanKind::Normal,
            created_at: d("2024-03-01"),
            completed_at: None,
            ebbinghaus: None,
        };

        let value = serde_json::to_value(&plan).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["type"], "normal");
        assert_eq!(obj["createdAt"], "2024-03-01");
        assert!(obj["completedAt"].is_null());
        assert!(!obj.contains_key("ebbinghausDates"));
        assert!(!obj.contains_key("ebbinghausRootId"));
    }

    #[test]
    fn test_ebbinghaus_plan_wire_shape() {
        let dates: Vec<DateKey> = ["2024-01-01", "2024-01-02", "2024-01-04"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let plan = Plan {
            id: 1700000000001,
            text: "Review notes".to_string(),
            kind: PlanKind::Ebbinghaus,
            created_at: d("2024-01-01"),
            completed_at: Some(d("2024-01-02")),
            ebbinghaus: Some(EbbinghausLink {
                dates: dates.clone(),
                index: 1,
                root_id: 1700000000000,
            }),
        };

        let value = serde_json::to_value(&plan).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["type"], "ebbinghaus");
        assert_eq!(obj["ebbinghausIndex"], 1);
        assert_eq!(obj["ebbinghausRootId"], 1700000000000i64);
        assert_eq!(obj["ebbinghausDates"][2], "2024-01-04");

        let back: Plan = serde_json::from_value(value).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn test_plan_without_ebbinghaus_keys_deserializes_to_none() {
        let raw = r#"{
            "id": 3,
            "text": "Water plants",
            "type": "normal",
            "createdAt": "2024-05-01",
            "completedAt": null
        }"#;
        let plan: Plan = serde_json::from_str(raw).unwrap();
        assert_eq!(plan.ebbinghaus, None);
        assert!(!plan.is_completed());
    }
}
