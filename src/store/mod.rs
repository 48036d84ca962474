//! Persistence port for profiles, cycles and symptom logs.
//!
//! The tracker only talks to [`CycleStore`]. `main` picks the implementation:
//! Postgres when `DATABASE_URL` is set, otherwise the in-memory map.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Cycle, Profile, SymptomEntry};

#[async_trait]
pub trait CycleStore: Send + Sync {
    async fn insert_profile(&self, profile: &Profile) -> Result<(), AppError>;

    /// Profiles ordered by creation time.
    async fn list_profiles(&self) -> Result<Vec<Profile>, AppError>;

    async fn get_profile(&self, id: Uuid) -> Result<Profile, AppError>;

    /// Removes the profile together with its cycles and symptom entries.
    async fn delete_profile(&self, id: Uuid) -> Result<(), AppError>;

    /// Cycles of one profile ordered by start date, symptoms included.
    async fn list_cycles(&self, profile_id: Uuid) -> Result<Vec<Cycle>, AppError>;

    async fn get_cycle(&self, id: Uuid) -> Result<Cycle, AppError>;

    async fn insert_cycle(&self, cycle: &Cycle) -> Result<(), AppError>;

    async fn set_end_date(&self, cycle_id: Uuid, end_date: NaiveDate) -> Result<(), AppError>;

    /// Adds the entry, replacing any entry already logged for the same day.
    async fn upsert_symptom(&self, cycle_id: Uuid, entry: &SymptomEntry) -> Result<(), AppError>;
}
