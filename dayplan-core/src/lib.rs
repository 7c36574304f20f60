//! Core types and storage for the dayplan planner.
//!
//! This crate owns the persisted plan document: date-keyed plan buckets,
//! the Ebbinghaus spaced-repetition fan-out logic, user settings, and the
//! import/export surface. Everything else (the CLI, any future frontend)
//! goes through `PlanRepository` — it is the only valid path to read or
//! mutate plan state.

pub mod config;
pub mod date_key;
pub mod document;
pub mod error;
pub mod plan;
pub mod repository;
pub mod settings;
pub mod store;
pub mod transfer;

pub use config::DayplanConfig;
pub use date_key::DateKey;
pub use document::Document;
pub use error::{PlanError, PlanResult};
pub use plan::{EbbinghausLink, NewPlan, Plan, PlanKind, Scope};
pub use repository::PlanRepository;
pub use settings::{Settings, Theme};
pub use store::{JsonFileStore, MemoryStore, PlanStore};
