//! The persisted document: all date buckets plus settings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::plan::Plan;
use crate::settings::Settings;

/// The whole persisted state, read and rewritten as one unit.
///
/// Invariant: no date key maps to an empty bucket. A date with zero plans
/// is absent from the map, never present with an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub plans: BTreeMap<DateKey, Vec<Plan>>,
    #[serde(default)]
    pub settings: Settings,
}

impl Document {
    /// The plans on one date. Empty when the bucket is absent.
    pub fn bucket(&self, date: DateKey) -> &[Plan] {
        self.plans.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace one date's bucket, removing the key when the bucket is empty.
    pub fn set_bucket(&mut self, date: DateKey, plans: Vec<Plan>) {
        if plans.is_empty() {
            self.plans.remove(&date);
        } else {
            self.plans.insert(date, plans);
        }
    }
}
