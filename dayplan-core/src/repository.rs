//! The plan repository: sole authority over the persisted document.
//!
//! Every operation is a full read-modify-write over the whole document:
//! load it from the store, mutate in memory, write it back. The document
//! is small (a personal planner), so re-reading on every call keeps the
//! design simple and the reads free of caching staleness. Two writers
//! racing on the same data file are last-write-wins.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::date_key::DateKey;
use crate::document::Document;
use crate::error::{PlanError, PlanResult};
use crate::plan::{EBBINGHAUS_INTERVALS, EbbinghausLink, NewPlan, Plan, PlanKind, Scope};
use crate::settings::Settings;
use crate::store::PlanStore;

pub struct PlanRepository<S: PlanStore> {
    store: S,
}

impl<S: PlanStore> PlanRepository<S> {
    pub fn new(store: S) -> Self {
        PlanRepository { store }
    }

    /// Load the whole document. A missing store yields the default empty
    /// document; a malformed one is logged and replaced by the default
    /// rather than crashing.
    pub fn load(&self) -> PlanResult<Document> {
        match self.store.read()? {
            None => Ok(Document::default()),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(doc) => Ok(doc),
                Err(e) => {
                    tracing::warn!("stored plan document is malformed, starting empty: {e}");
                    Ok(Document::default())
                }
            },
        }
    }

    fn save(&self, doc: &Document) -> PlanResult<()> {
        let raw =
            serde_json::to_string(doc).map_err(|e| PlanError::Serialization(e.to_string()))?;
        self.store.write(&raw)
    }

    /// Append a plan to `date`'s bucket and persist; returns the created
    /// plan. When the descriptor carries no id, the next free bucket-local
    /// integer is assigned (`max + 1`, or 1 for an empty bucket) — unique
    /// within that bucket only, not globally.
    pub fn add_plan(&self, date: DateKey, new: NewPlan) -> PlanResult<Plan> {
        let text = new.text.trim();
        if text.is_empty() {
            return Err(PlanError::Validation("plan text must not be empty".into()));
        }

        let mut doc = self.load()?;
        let id = new.id.unwrap_or_else(|| next_bucket_id(doc.bucket(date)));
        let ebbinghaus = match new.kind {
            PlanKind::Ebbinghaus => new.ebbinghaus,
            PlanKind::Normal => None,
        };

        let plan = Plan {
            id,
            text: text.to_string(),
            kind: new.kind,
            created_at: new.created_at.unwrap_or(date),
            completed_at: None,
            ebbinghaus,
        };

        let mut bucket = doc.bucket(date).to_vec();
        bucket.push(plan.clone());
        doc.set_bucket(date, bucket);
        self.save(&doc)?;
        Ok(plan)
    }

    /// Create a full spaced-repetition family from one origin date: one
    /// plan per date in `[origin, +1, +3, +6, +14, +29]`, all sharing one
    /// root id, with member ids `root_id + index`. Returns the root id.
    ///
    /// The six buckets are written one read-modify-write cycle at a time;
    /// a store failure partway leaves the earlier members persisted.
    pub fn add_ebbinghaus_plan(&self, origin: DateKey, text: &str) -> PlanResult<i64> {
        let root_id = next_root_id();

        let mut dates = vec![origin];
        dates.extend(EBBINGHAUS_INTERVALS.iter().map(|&days| origin.add_days(days)));

        for (index, &date) in dates.iter().enumerate() {
            self.add_plan(
                date,
                NewPlan {
                    text: text.to_string(),
                    kind: PlanKind::Ebbinghaus,
                    id: Some(root_id + index as i64),
                    created_at: Some(origin),
                    ebbinghaus: Some(EbbinghausLink {
                        dates: dates.clone(),
                        index,
                        root_id,
                    }),
                },
            )?;
        }

        Ok(root_id)
    }

    /// Toggle a plan's completion. A pending plan gets `completed_at` set
    /// to today's date (the day of the toggle, not the plan's own date);
    /// a completed plan goes back to pending. Returns whether the plan
    /// was found.
    pub fn complete_plan(&self, date: DateKey, plan_id: i64) -> PlanResult<bool> {
        let mut doc = self.load()?;
        let Some(bucket) = doc.plans.get_mut(&date) else {
            return Ok(false);
        };
        let Some(plan) = bucket.iter_mut().find(|p| p.id == plan_id) else {
            return Ok(false);
        };

        plan.completed_at = match plan.completed_at {
            Some(_) => None,
            None => Some(DateKey::today()),
        };
        self.save(&doc)?;
        Ok(true)
    }

    /// Delete a plan. `Scope::All` on an ebbinghaus plan removes every
    /// member of its family across the family's dates; members already
    /// deleted individually are simply absent, and unrelated plans on
    /// shared dates are untouched. For a `normal` plan both scopes remove
    /// just the one entry. Returns whether the target plan was found.
    pub fn delete_plan(&self, date: DateKey, plan_id: i64, scope: Scope) -> PlanResult<bool> {
        let mut doc = self.load()?;
        let Some(plan) = doc.bucket(date).iter().find(|p| p.id == plan_id).cloned() else {
            return Ok(false);
        };

        match (scope, &plan.ebbinghaus) {
            (Scope::All, Some(link)) if plan.kind == PlanKind::Ebbinghaus => {
                let root_id = link.root_id;
                for &member_date in &link.dates {
                    let filtered: Vec<Plan> = doc
                        .bucket(member_date)
                        .iter()
                        .filter(|p| p.family_root() != Some(root_id))
                        .cloned()
                        .collect();
                    doc.set_bucket(member_date, filtered);
                }
            }
            _ => {
                let filtered: Vec<Plan> = doc
                    .bucket(date)
                    .iter()
                    .filter(|p| p.id != plan_id)
                    .cloned()
                    .collect();
                doc.set_bucket(date, filtered);
            }
        }

        self.save(&doc)?;
        Ok(true)
    }

    /// Rewrite a plan's text. Scope semantics mirror `delete_plan`:
    /// `Scope::All` rewrites every currently-existing family member and
    /// never resurrects deleted ones. Returns whether the target plan was
    /// found.
    pub fn update_plan(
        &self,
        date: DateKey,
        plan_id: i64,
        new_text: &str,
        scope: Scope,
    ) -> PlanResult<bool> {
        let text = new_text.trim();
        if text.is_empty() {
            return Err(PlanError::Validation("plan text must not be empty".into()));
        }

        let mut doc = self.load()?;
        let Some(plan) = doc.bucket(date).iter().find(|p| p.id == plan_id).cloned() else {
            return Ok(false);
        };

        match (scope, &plan.ebbinghaus) {
            (Scope::All, Some(link)) if plan.kind == PlanKind::Ebbinghaus => {
                let root_id = link.root_id;
                for &member_date in &link.dates {
                    if let Some(bucket) = doc.plans.get_mut(&member_date) {
                        for member in bucket.iter_mut().filter(|p| p.family_root() == Some(root_id))
                        {
                            member.text = text.to_string();
                        }
                    }
                }
            }
            _ => {
                if let Some(bucket) = doc.plans.get_mut(&date) {
                    if let Some(target) = bucket.iter_mut().find(|p| p.id == plan_id) {
                        target.text = text.to_string();
                    }
                }
            }
        }

        self.save(&doc)?;
        Ok(true)
    }

    /// All plans on one date. Empty when the bucket is absent.
    pub fn plans_by_date(&self, date: DateKey) -> PlanResult<Vec<Plan>> {
        Ok(self.load()?.bucket(date).to_vec())
    }

    pub fn has_plans(&self, date: DateKey) -> PlanResult<bool> {
        Ok(!self.load()?.bucket(date).is_empty())
    }

    pub fn has_pending_plans(&self, date: DateKey) -> PlanResult<bool> {
        Ok(self.load()?.bucket(date).iter().any(|p| !p.is_completed()))
    }

    /// Every date with at least one plan, in ascending order.
    pub fn all_plan_dates(&self) -> PlanResult<Vec<DateKey>> {
        Ok(self.load()?.plans.keys().copied().collect())
    }

    pub fn settings(&self) -> PlanResult<Settings> {
        Ok(self.load()?.settings)
    }

    /// Merge-style settings update: load, let the caller mutate, persist.
    /// Returns the settings as persisted.
    pub fn update_settings(&self, f: impl FnOnce(&mut Settings)) -> PlanResult<Settings> {
        let mut doc = self.load()?;
        f(&mut doc.settings);
        self.save(&doc)?;
        Ok(doc.settings)
    }

    /// The full document (export path).
    pub fn document(&self) -> PlanResult<Document> {
        self.load()
    }

    /// Replace the whole document (import path).
    pub fn replace(&self, doc: &Document) -> PlanResult<()> {
        self.save(doc)
    }
}

/// Next free id within one bucket: `max + 1`, or 1 when empty.
fn next_bucket_id(bucket: &[Plan]) -> i64 {
    bucket.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
}

/// Family root ids come from the wall clock in milliseconds, bumped past
/// the previous id so two families created in the same millisecond still
/// get distinct roots. Repository operations are single-threaded (one per
/// UI event), so a load/store pair is enough.
fn next_root_id() -> i64 {
    static LAST: AtomicI64 = AtomicI64::new(0);
    let now = Utc::now().timestamp_millis();
    let id = now.max(LAST.load(Ordering::Relaxed) + 1);
    LAST.store(id, Ordering::Relaxed);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn repo() -> PlanRepository<MemoryStore> {
        PlanRepository::new(MemoryStore::new())
    }

    fn d(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_add_plan_assigns_bucket_local_ids() {
        let repo = repo();
        let first = repo.add_plan(d("2024-03-01"), NewPlan::normal("a")).unwrap();
        let second = repo.add_plan(d("2024-03-01"), NewPlan::normal("b")).unwrap();
        let other_bucket = repo.add_plan(d("2024-03-02"), NewPlan::normal("c")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(other_bucket.id, 1);
    }

    #[test]
    fn test_add_plan_respects_explicit_id() {
        let repo = repo();
        let plan = repo
            .add_plan(
                d("2024-03-01"),
                NewPlan {
                    id: Some(42),
                    ..NewPlan::normal("a")
                },
            )
            .unwrap();
        assert_eq!(plan.id, 42);
    }

    #[test]
    fn test_add_plan_rejects_empty_text() {
        let repo = repo();
        assert!(matches!(
            repo.add_plan(d("2024-03-01"), NewPlan::normal("   ")),
            Err(PlanError::Validation(_))
        ));
        assert!(!repo.has_plans(d("2024-03-01")).unwrap());
    }

    #[test]
    fn test_add_plan_trims_text_and_defaults_created_at() {
        let repo = repo();
        let plan = repo
            .add_plan(d("2024-03-01"), NewPlan::normal("  walk  "))
            .unwrap();
        assert_eq!(plan.text, "walk");
        assert_eq!(plan.created_at, d("2024-03-01"));
        assert_eq!(plan.completed_at, None);
    }

    #[test]
    fn test_ebbinghaus_fan_out_completeness() {
        let repo = repo();
        let root = repo.add_ebbinghaus_plan(d("2024-01-01"), "Review notes").unwrap();

        let expected = [
            "2024-01-01",
            "2024-01-02",
            "2024-01-04",
            "2024-01-07",
            "2024-01-15",
            "2024-01-30",
        ];

        for (index, date) in expected.iter().enumerate() {
            let plans = repo.plans_by_date(d(date)).unwrap();
            assert_eq!(plans.len(), 1, "exactly one plan on {date}");

            let plan = &plans[0];
            let link = plan.ebbinghaus.as_ref().unwrap();
            assert_eq!(plan.kind, PlanKind::Ebbinghaus);
            assert_eq!(plan.id, root + index as i64);
            assert_eq!(plan.text, "Review notes");
            assert_eq!(plan.created_at, d("2024-01-01"));
            assert_eq!(link.root_id, root);
            assert_eq!(link.index, index);
            assert_eq!(link.dates.len(), 6);
            assert_eq!(link.dates[index], d(date));
        }
    }

    #[test]
    fn test_ebbinghaus_fan_out_rolls_over_year() {
        let repo = repo();
        repo.add_ebbinghaus_plan(d("2024-12-05"), "x").unwrap();

        let dates = repo.all_plan_dates().unwrap();
        assert_eq!(
            dates,
            vec![
                d("2024-12-05"),
                d("2024-12-06"),
                d("2024-12-08"),
                d("2024-12-11"),
                d("2024-12-19"),
                d("2025-01-03"),
            ]
        );
    }

    #[test]
    fn test_ebbinghaus_root_ids_are_distinct() {
        let repo = repo();
        let a = repo.add_ebbinghaus_plan(d("2024-01-01"), "a").unwrap();
        let b = repo.add_ebbinghaus_plan(d("2024-01-01"), "b").unwrap();
        assert_ne!(a, b);
        assert_eq!(repo.plans_by_date(d("2024-01-01")).unwrap().len(), 2);
    }

    #[test]
    fn test_complete_toggle_round_trip() {
        let repo = repo();
        let plan = repo.add_plan(d("2024-03-01"), NewPlan::normal("a")).unwrap();

        assert!(repo.complete_plan(d("2024-03-01"), plan.id).unwrap());
        let completed = &repo.plans_by_date(d("2024-03-01")).unwrap()[0];
        assert_eq!(completed.completed_at, Some(DateKey::today()));

        assert!(repo.complete_plan(d("2024-03-01"), plan.id).unwrap());
        let reopened = &repo.plans_by_date(d("2024-03-01")).unwrap()[0];
        assert_eq!(reopened.completed_at, None);
        assert_eq!(reopened.text, "a");
        assert_eq!(reopened.id, plan.id);
        assert_eq!(reopened.kind, PlanKind::Normal);
    }

    #[test]
    fn test_complete_missing_plan_is_false() {
        let repo = repo();
        assert!(!repo.complete_plan(d("2024-03-01"), 99).unwrap());
    }

    #[test]
    fn test_has_pending_plans_reflects_completion() {
        let repo = repo();
        let plan = repo.add_plan(d("2024-03-01"), NewPlan::normal("a")).unwrap();

        assert!(repo.has_pending_plans(d("2024-03-01")).unwrap());
        repo.complete_plan(d("2024-03-01"), plan.id).unwrap();
        assert!(!repo.has_pending_plans(d("2024-03-01")).unwrap());
        assert!(repo.has_plans(d("2024-03-01")).unwrap());
    }

    #[test]
    fn test_delete_current_removes_exactly_one_member() {
        let repo = repo();
        let root = repo.add_ebbinghaus_plan(d("2024-01-01"), "Review").unwrap();

        assert!(
            repo.delete_plan(d("2024-01-04"), root + 2, Scope::Current)
                .unwrap()
        );

        assert!(!repo.has_plans(d("2024-01-04")).unwrap());
        for date in ["2024-01-01", "2024-01-02", "2024-01-07", "2024-01-15", "2024-01-30"] {
            assert_eq!(repo.plans_by_date(d(date)).unwrap().len(), 1, "{date} survives");
        }
    }

    #[test]
    fn test_delete_all_removes_family_and_spares_unrelated() {
        let repo = repo();
        let root = repo.add_ebbinghaus_plan(d("2024-01-01"), "Review").unwrap();
        let unrelated = repo
            .add_plan(d("2024-01-04"), NewPlan::normal("Dentist"))
            .unwrap();

        assert!(repo.delete_plan(d("2024-01-01"), root, Scope::All).unwrap());

        let remaining = repo.plans_by_date(d("2024-01-04")).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, unrelated.id);
        assert_eq!(repo.all_plan_dates().unwrap(), vec![d("2024-01-04")]);
    }

    #[test]
    fn test_delete_all_skips_already_deleted_members() {
        let repo = repo();
        let root = repo.add_ebbinghaus_plan(d("2024-01-01"), "Review").unwrap();

        repo.delete_plan(d("2024-01-02"), root + 1, Scope::Current).unwrap();
        assert!(
            repo.delete_plan(d("2024-01-07"), root + 3, Scope::All)
                .unwrap()
        );

        assert!(repo.all_plan_dates().unwrap().is_empty());
    }

    #[test]
    fn test_delete_all_on_normal_plan_behaves_like_current() {
        let repo = repo();
        let plan = repo
            .add_plan(d("2024-03-01"), NewPlan::normal("Buy milk"))
            .unwrap();
        let other = repo.add_plan(d("2024-03-01"), NewPlan::normal("Call mom")).unwrap();

        assert!(repo.delete_plan(d("2024-03-01"), plan.id, Scope::All).unwrap());

        let remaining = repo.plans_by_date(d("2024-03-01")).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, other.id);
    }

    #[test]
    fn test_delete_missing_plan_is_false() {
        let repo = repo();
        assert!(!repo.delete_plan(d("2024-03-01"), 1, Scope::Current).unwrap());
    }

    #[test]
    fn test_bucket_compaction_on_last_delete() {
        let repo = repo();
        let plan = repo.add_plan(d("2024-03-01"), NewPlan::normal("a")).unwrap();
        assert_eq!(repo.all_plan_dates().unwrap(), vec![d("2024-03-01")]);

        repo.delete_plan(d("2024-03-01"), plan.id, Scope::Current).unwrap();

        assert!(repo.all_plan_dates().unwrap().is_empty());
        assert!(!repo.has_plans(d("2024-03-01")).unwrap());
    }

    #[test]
    fn test_update_all_rewrites_whole_family() {
        let repo = repo();
        repo.add_ebbinghaus_plan(d("2024-01-01"), "Review notes").unwrap();

        let member = repo.plans_by_date(d("2024-01-04")).unwrap()[0].clone();
        assert!(
            repo.update_plan(d("2024-01-04"), member.id, "Review notes v2", Scope::All)
                .unwrap()
        );

        for date in ["2024-01-01", "2024-01-02", "2024-01-04", "2024-01-07", "2024-01-15", "2024-01-30"] {
            let plans = repo.plans_by_date(d(date)).unwrap();
            assert_eq!(plans[0].text, "Review notes v2", "{date} updated");
        }
    }

    #[test]
    fn test_update_current_touches_one_member() {
        let repo = repo();
        let root = repo.add_ebbinghaus_plan(d("2024-01-01"), "Review").unwrap();

        repo.update_plan(d("2024-01-02"), root + 1, "Review again", Scope::Current)
            .unwrap();

        assert_eq!(repo.plans_by_date(d("2024-01-02")).unwrap()[0].text, "Review again");
        assert_eq!(repo.plans_by_date(d("2024-01-01")).unwrap()[0].text, "Review");
    }

    #[test]
    fn test_update_all_spares_unrelated_plans() {
        let repo = repo();
        let root = repo.add_ebbinghaus_plan(d("2024-01-01"), "Review").unwrap();
        repo.add_plan(d("2024-01-02"), NewPlan::normal("Dentist")).unwrap();

        repo.update_plan(d("2024-01-01"), root, "Review v2", Scope::All).unwrap();

        let bucket = repo.plans_by_date(d("2024-01-02")).unwrap();
        let texts: Vec<&str> = bucket.iter().map(|p| p.text.as_str()).collect();
        assert!(texts.contains(&"Review v2"));
        assert!(texts.contains(&"Dentist"));
    }

    #[test]
    fn test_update_rejects_empty_text() {
        let repo = repo();
        let plan = repo.add_plan(d("2024-03-01"), NewPlan::normal("a")).unwrap();
        assert!(matches!(
            repo.update_plan(d("2024-03-01"), plan.id, "  ", Scope::Current),
            Err(PlanError::Validation(_))
        ));
    }

    #[test]
    fn test_update_missing_plan_is_false() {
        let repo = repo();
        assert!(
            !repo
                .update_plan(d("2024-03-01"), 7, "text", Scope::Current)
                .unwrap()
        );
    }

    #[test]
    fn test_malformed_store_falls_back_to_empty() {
        let store = MemoryStore::new();
        store.write("not json at all").unwrap();
        let repo = PlanRepository::new(store);

        assert!(repo.all_plan_dates().unwrap().is_empty());
        // Operations keep working on the fallback document.
        let plan = repo.add_plan(d("2024-03-01"), NewPlan::normal("a")).unwrap();
        assert_eq!(plan.id, 1);
    }

    #[test]
    fn test_update_settings_merges() {
        let repo = repo();
        repo.update_settings(|s| s.theme = crate::settings::Theme::Dark).unwrap();
        repo.update_settings(|s| s.quick_tasks.push("stretch".to_string())).unwrap();

        let settings = repo.settings().unwrap();
        assert_eq!(settings.theme, crate::settings::Theme::Dark);
        assert_eq!(settings.quick_tasks, vec!["stretch".to_string()]);
    }
}
