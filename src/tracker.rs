//! Profile and cycle operations on top of a [`CycleStore`].
//!
//! Write paths validate here so every store implementation sees the same
//! rules. Read paths fetch a fresh cycle list and hand it to [`crate::engine`].

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::engine;
use crate::error::AppError;
use crate::models::{
    Cycle, CyclePrediction, CycleStatsSummary, CycleStatus, Profile, SymptomEntry,
};
use crate::store::CycleStore;

#[derive(Clone)]
pub struct Tracker {
    store: Arc<dyn CycleStore>,
    default_period_length: i64,
}

impl Tracker {
    pub fn new(store: Arc<dyn CycleStore>, default_period_length: i64) -> Self {
        Self {
            store,
            default_period_length,
        }
    }

    pub async fn create_profile(&self, name: &str) -> Result<Profile, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidName);
        }

        let profile = Profile {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.store.insert_profile(&profile).await?;
        tracing::info!("👤 Created profile {}", profile.id);
        Ok(profile)
    }

    pub async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        self.store.list_profiles().await
    }

    pub async fn get_profile(&self, id: Uuid) -> Result<Profile, AppError> {
        self.store.get_profile(id).await
    }

    pub async fn delete_profile(&self, id: Uuid) -> Result<(), AppError> {
        self.store.delete_profile(id).await?;
        tracing::info!("🗑️ Deleted profile {} and its cycles", id);
        Ok(())
    }

    pub async fn cycles(&self, profile_id: Uuid) -> Result<Vec<Cycle>, AppError> {
        self.store.list_cycles(profile_id).await
    }

    /// Records a finished period with both dates known.
    pub async fn log_cycle(
        &self,
        profile_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Cycle, AppError> {
        if end_date < start_date {
            return Err(AppError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }

        let cycle = Cycle::new(profile_id, start_date, end_date);
        self.store.insert_cycle(&cycle).await?;
        tracing::info!("🩸 Logged cycle {} for profile {}", cycle.id, profile_id);
        Ok(cycle)
    }

    /// Opens a period on `date` with a provisional end the default length later.
    pub async fn start_period(&self, profile_id: Uuid, date: NaiveDate) -> Result<Cycle, AppError> {
        let history = self.store.list_cycles(profile_id).await?;
        if engine::get_cycle_status(&history, date).is_on_period {
            return Err(AppError::AlreadyOnPeriod(date));
        }

        let end_date = date
            .checked_add_signed(Duration::days(self.default_period_length - 1))
            .ok_or(AppError::DateOutOfRange(date))?;
        let cycle = Cycle::new(profile_id, date, end_date);
        self.store.insert_cycle(&cycle).await?;
        tracing::info!("🩸 Started period {} for profile {}", cycle.id, profile_id);
        Ok(cycle)
    }

    pub async fn end_period(&self, cycle_id: Uuid, date: NaiveDate) -> Result<Cycle, AppError> {
        let mut cycle = self.store.get_cycle(cycle_id).await?;
        if date < cycle.start_date {
            return Err(AppError::InvalidRange {
                start: cycle.start_date,
                end: date,
            });
        }
        if let Some(last) = cycle.symptoms.last().filter(|s| s.date > date) {
            return Err(AppError::SymptomsAfterEnd {
                end: date,
                last: last.date,
            });
        }

        self.store.set_end_date(cycle_id, date).await?;
        cycle.end_date = date;
        tracing::info!("✅ Ended period {} on {}", cycle_id, date);
        Ok(cycle)
    }

    pub async fn log_symptom(
        &self,
        cycle_id: Uuid,
        entry: SymptomEntry,
    ) -> Result<Cycle, AppError> {
        let mut cycle = self.store.get_cycle(cycle_id).await?;
        if !cycle.contains(entry.date) {
            return Err(AppError::SymptomOutsideCycle {
                date: entry.date,
                start: cycle.start_date,
                end: cycle.end_date,
            });
        }

        self.store.upsert_symptom(cycle_id, &entry).await?;
        cycle.upsert_symptom(entry);
        Ok(cycle)
    }

    pub async fn status(
        &self,
        profile_id: Uuid,
        reference: NaiveDate,
    ) -> Result<CycleStatus, AppError> {
        let history = self.store.list_cycles(profile_id).await?;
        Ok(engine::get_cycle_status(&history, reference))
    }

    pub async fn prediction(
        &self,
        profile_id: Uuid,
        today: NaiveDate,
    ) -> Result<CyclePrediction, AppError> {
        let history = self.store.list_cycles(profile_id).await?;
        Ok(engine::get_cycle_prediction(&history, today))
    }

    pub async fn stats(&self, profile_id: Uuid) -> Result<CycleStatsSummary, AppError> {
        let history = self.store.list_cycles(profile_id).await?;
        Ok(engine::cycle_stats(&history))
    }
}
