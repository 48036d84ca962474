use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CycleStore;
use crate::error::AppError;
use crate::models::{Cycle, Profile, SymptomEntry};

#[derive(Default)]
struct Tables {
    profiles: HashMap<Uuid, Profile>,
    cycles: HashMap<Uuid, Cycle>,
}

/// Process-local store, used when no database is configured and in tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CycleStore for MemoryStore {
    async fn insert_profile(&self, profile: &Profile) -> Result<(), AppError> {
        self.tables
            .write()
            .await
            .profiles
            .insert(profile.id, profile.clone());
        Ok(())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        let tables = self.tables.read().await;
        let mut profiles: Vec<Profile> = tables.profiles.values().cloned().collect();
        profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(profiles)
    }

    async fn get_profile(&self, id: Uuid) -> Result<Profile, AppError> {
        self.tables
            .read()
            .await
            .profiles
            .get(&id)
            .cloned()
            .ok_or(AppError::ProfileNotFound(id))
    }

    async fn delete_profile(&self, id: Uuid) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables
            .profiles
            .remove(&id)
            .ok_or(AppError::ProfileNotFound(id))?;
        tables.cycles.retain(|_, cycle| cycle.profile_id != id);
        Ok(())
    }

    async fn list_cycles(&self, profile_id: Uuid) -> Result<Vec<Cycle>, AppError> {
        let tables = self.tables.read().await;
        if !tables.profiles.contains_key(&profile_id) {
            return Err(AppError::ProfileNotFound(profile_id));
        }

        let mut cycles: Vec<Cycle> = tables
            .cycles
            .values()
            .filter(|c| c.profile_id == profile_id)
            .cloned()
            .collect();
        cycles.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id)));
        Ok(cycles)
    }

    async fn get_cycle(&self, id: Uuid) -> Result<Cycle, AppError> {
        self.tables
            .read()
            .await
            .cycles
            .get(&id)
            .cloned()
            .ok_or(AppError::CycleNotFound(id))
    }

    async fn insert_cycle(&self, cycle: &Cycle) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if !tables.profiles.contains_key(&cycle.profile_id) {
            return Err(AppError::ProfileNotFound(cycle.profile_id));
        }
        tables.cycles.insert(cycle.id, cycle.clone());
        Ok(())
    }

    async fn set_end_date(&self, cycle_id: Uuid, end_date: NaiveDate) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        let cycle = tables
            .cycles
            .get_mut(&cycle_id)
            .ok_or(AppError::CycleNotFound(cycle_id))?;
        cycle.end_date = end_date;
        Ok(())
    }

    async fn upsert_symptom(&self, cycle_id: Uuid, entry: &SymptomEntry) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        let cycle = tables
            .cycles
            .get_mut(&cycle_id)
            .ok_or(AppError::CycleNotFound(cycle_id))?;
        cycle.upsert_symptom(entry.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Mood, Severity};
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn profile(name: &str) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn cycles_come_back_sorted_by_start() {
        let store = MemoryStore::new();
        let p = profile("Ada");
        store.insert_profile(&p).await.unwrap();

        for start in [date(2024, 3, 1), date(2024, 1, 1), date(2024, 2, 1)] {
            store
                .insert_cycle(&Cycle::new(p.id, start, start))
                .await
                .unwrap();
        }

        let starts: Vec<_> = store
            .list_cycles(p.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.start_date)
            .collect();
        assert_eq!(starts, vec![date(2024, 1, 1), date(2024, 2, 1), date(2024, 3, 1)]);
    }

    #[tokio::test]
    async fn deleting_profile_drops_its_cycles_only() {
        let store = MemoryStore::new();
        let (a, b) = (profile("Ada"), profile("Bea"));
        store.insert_profile(&a).await.unwrap();
        store.insert_profile(&b).await.unwrap();

        let kept = Cycle::new(b.id, date(2024, 1, 1), date(2024, 1, 4));
        let dropped = Cycle::new(a.id, date(2024, 1, 1), date(2024, 1, 4));
        store.insert_cycle(&kept).await.unwrap();
        store.insert_cycle(&dropped).await.unwrap();

        store.delete_profile(a.id).await.unwrap();

        assert!(matches!(store.get_cycle(dropped.id).await, Err(AppError::CycleNotFound(_))));
        assert_eq!(store.get_cycle(kept.id).await.unwrap(), kept);
        assert!(matches!(
            store.delete_profile(a.id).await,
            Err(AppError::ProfileNotFound(_))
        ));
    }

    #[tokio::test]
    async fn cycle_for_unknown_profile_is_rejected() {
        let store = MemoryStore::new();
        let orphan = Cycle::new(Uuid::new_v4(), date(2024, 1, 1), date(2024, 1, 2));
        assert!(matches!(
            store.insert_cycle(&orphan).await,
            Err(AppError::ProfileNotFound(_))
        ));
    }

    #[tokio::test]
    async fn symptoms_and_end_date_update_in_place() {
        let store = MemoryStore::new();
        let p = profile("Ada");
        store.insert_profile(&p).await.unwrap();
        let cycle = Cycle::new(p.id, date(2024, 1, 1), date(2024, 1, 5));
        store.insert_cycle(&cycle).await.unwrap();

        store.set_end_date(cycle.id, date(2024, 1, 3)).await.unwrap();
        store
            .upsert_symptom(
                cycle.id,
                &SymptomEntry {
                    date: date(2024, 1, 2),
                    severity: Severity::Medium,
                    mood: Mood::Tired,
                    note: Some("cramps".into()),
                },
            )
            .await
            .unwrap();

        let stored = store.get_cycle(cycle.id).await.unwrap();
        assert_eq!(stored.end_date, date(2024, 1, 3));
        assert_eq!(stored.symptoms.len(), 1);
        assert_eq!(stored.symptoms[0].note.as_deref(), Some("cramps"));
    }
}
