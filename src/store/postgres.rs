use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use uuid::Uuid;

use super::CycleStore;
use crate::error::AppError;
use crate::models::{Cycle, Mood, Profile, Severity, SymptomEntry};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

#[derive(FromRow)]
struct ProfileRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[derive(FromRow)]
struct CycleRow {
    id: Uuid,
    profile_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(FromRow)]
struct SymptomRow {
    cycle_id: Uuid,
    logged_on: NaiveDate,
    severity: String,
    mood: String,
    note: Option<String>,
}

impl TryFrom<SymptomRow> for SymptomEntry {
    type Error = AppError;

    fn try_from(row: SymptomRow) -> Result<Self, Self::Error> {
        Ok(SymptomEntry {
            date: row.logged_on,
            severity: Severity::parse(&row.severity)
                .ok_or_else(|| AppError::CorruptRecord(row.severity.clone()))?,
            mood: Mood::parse(&row.mood).ok_or_else(|| AppError::CorruptRecord(row.mood.clone()))?,
            note: row.note,
        })
    }
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool and brings the schema up to date.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("🗄️ Migrations applied");

        Ok(Self::new(pool))
    }

    async fn attach_symptoms(&self, rows: Vec<CycleRow>) -> Result<Vec<Cycle>, AppError> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let symptom_rows = sqlx::query_as::<_, SymptomRow>(
            r#"
            SELECT cycle_id, logged_on, severity, mood, note
            FROM symptom_entries
            WHERE cycle_id = ANY($1)
            ORDER BY logged_on ASC
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_cycle = HashMap::<Uuid, Vec<SymptomEntry>>::new();
        for row in symptom_rows {
            let cycle_id = row.cycle_id;
            by_cycle.entry(cycle_id).or_default().push(row.try_into()?);
        }

        Ok(rows
            .into_iter()
            .map(|row| Cycle {
                id: row.id,
                profile_id: row.profile_id,
                start_date: row.start_date,
                end_date: row.end_date,
                symptoms: by_cycle.remove(&row.id).unwrap_or_default(),
            })
            .collect())
    }
}

#[async_trait]
impl CycleStore for PgStore {
    async fn insert_profile(&self, profile: &Profile) -> Result<(), AppError> {
        sqlx::query("INSERT INTO profiles (id, name, created_at) VALUES ($1, $2, $3)")
            .bind(profile.id)
            .bind(&profile.name)
            .bind(profile.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, name, created_at FROM profiles ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn get_profile(&self, id: Uuid) -> Result<Profile, AppError> {
        sqlx::query_as::<_, ProfileRow>("SELECT id, name, created_at FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Profile::from)
            .ok_or(AppError::ProfileNotFound(id))
    }

    async fn delete_profile(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        match result.rows_affected() {
            0 => Err(AppError::ProfileNotFound(id)),
            _ => Ok(()),
        }
    }

    async fn list_cycles(&self, profile_id: Uuid) -> Result<Vec<Cycle>, AppError> {
        self.get_profile(profile_id).await?;

        let rows = sqlx::query_as::<_, CycleRow>(
            r#"
            SELECT id, profile_id, start_date, end_date
            FROM cycles
            WHERE profile_id = $1
            ORDER BY start_date ASC, id ASC
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;

        self.attach_symptoms(rows).await
    }

    async fn get_cycle(&self, id: Uuid) -> Result<Cycle, AppError> {
        let row = sqlx::query_as::<_, CycleRow>(
            "SELECT id, profile_id, start_date, end_date FROM cycles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::CycleNotFound(id))?;

        let mut cycles = self.attach_symptoms(vec![row]).await?;
        cycles.pop().ok_or(AppError::CycleNotFound(id))
    }

    async fn insert_cycle(&self, cycle: &Cycle) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO cycles (id, profile_id, start_date, end_date) VALUES ($1, $2, $3, $4)",
        )
        .bind(cycle.id)
        .bind(cycle.profile_id)
        .bind(cycle.start_date)
        .bind(cycle.end_date)
        .execute(&mut *tx)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_foreign_key_violation() => {
                tracing::info!("🔒 Constraint violated: {:?}", db_err.constraint());
                AppError::ProfileNotFound(cycle.profile_id)
            }
            _ => AppError::Database(e),
        })?;

        for entry in &cycle.symptoms {
            insert_symptom(&mut tx, cycle.id, entry).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn set_end_date(&self, cycle_id: Uuid, end_date: NaiveDate) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE cycles SET end_date = $2 WHERE id = $1")
            .bind(cycle_id)
            .bind(end_date)
            .execute(&self.pool)
            .await?;

        match result.rows_affected() {
            0 => Err(AppError::CycleNotFound(cycle_id)),
            _ => Ok(()),
        }
    }

    async fn upsert_symptom(&self, cycle_id: Uuid, entry: &SymptomEntry) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        insert_symptom(&mut tx, cycle_id, entry)
            .await
            .map_err(|e| match e {
                AppError::Database(ref db) if db
                    .as_database_error()
                    .is_some_and(|d| d.is_foreign_key_violation()) =>
                {
                    AppError::CycleNotFound(cycle_id)
                }
                other => other,
            })?;
        tx.commit().await?;
        Ok(())
    }
}

async fn insert_symptom(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    cycle_id: Uuid,
    entry: &SymptomEntry,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO symptom_entries (cycle_id, logged_on, severity, mood, note)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (cycle_id, logged_on)
        DO UPDATE SET severity = EXCLUDED.severity, mood = EXCLUDED.mood, note = EXCLUDED.note
        "#,
    )
    .bind(cycle_id)
    .bind(entry.date)
    .bind(entry.severity.as_str())
    .bind(entry.mood.as_str())
    .bind(&entry.note)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

// Run with `DATABASE_URL` pointing at a scratch server: `cargo test -- --ignored`.
#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seeded_profile(store: &PgStore) -> Profile {
        let profile = Profile {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            created_at: Utc::now(),
        };
        store.insert_profile(&profile).await.unwrap();
        profile
    }

    #[sqlx::test]
    #[ignore = "needs DATABASE_URL"]
    async fn cycles_are_listed_by_start_date(pool: PgPool) {
        let store = PgStore::new(pool);
        let profile = seeded_profile(&store).await;

        for start in [date(2024, 3, 1), date(2024, 1, 1), date(2024, 2, 1)] {
            store
                .insert_cycle(&Cycle::new(profile.id, start, start))
                .await
                .unwrap();
        }

        let starts: Vec<_> = store
            .list_cycles(profile.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.start_date)
            .collect();
        assert_eq!(starts, vec![date(2024, 1, 1), date(2024, 2, 1), date(2024, 3, 1)]);
    }

    #[sqlx::test]
    #[ignore = "needs DATABASE_URL"]
    async fn symptom_for_same_day_replaces_previous(pool: PgPool) {
        let store = PgStore::new(pool);
        let profile = seeded_profile(&store).await;
        let cycle = Cycle::new(profile.id, date(2024, 1, 1), date(2024, 1, 5));
        store.insert_cycle(&cycle).await.unwrap();

        for (severity, note) in [(Severity::Light, None), (Severity::Heavy, Some("cramps"))] {
            let entry = SymptomEntry {
                date: date(2024, 1, 2),
                severity,
                mood: Mood::Tired,
                note: note.map(str::to_string),
            };
            store.upsert_symptom(cycle.id, &entry).await.unwrap();
        }

        let stored = store.get_cycle(cycle.id).await.unwrap();
        assert_eq!(stored.symptoms.len(), 1);
        assert_eq!(stored.symptoms[0].severity, Severity::Heavy);
        assert_eq!(stored.symptoms[0].note.as_deref(), Some("cramps"));

        assert!(matches!(
            store.upsert_symptom(Uuid::new_v4(), &stored.symptoms[0]).await,
            Err(AppError::CycleNotFound(_))
        ));
    }

    #[sqlx::test]
    #[ignore = "needs DATABASE_URL"]
    async fn reversed_dates_violate_check_constraint(pool: PgPool) {
        let store = PgStore::new(pool);
        let profile = seeded_profile(&store).await;
        let reversed = Cycle::new(profile.id, date(2024, 1, 5), date(2024, 1, 1));

        assert!(matches!(
            store.insert_cycle(&reversed).await,
            Err(AppError::Database(_))
        ));
        let orphan = Cycle::new(Uuid::new_v4(), date(2024, 1, 1), date(2024, 1, 2));
        assert!(matches!(
            store.insert_cycle(&orphan).await,
            Err(AppError::ProfileNotFound(_))
        ));
    }

    #[sqlx::test]
    #[ignore = "needs DATABASE_URL"]
    async fn deleting_profile_cascades(pool: PgPool) {
        let store = PgStore::new(pool);
        let profile = seeded_profile(&store).await;
        let cycle = Cycle::new(profile.id, date(2024, 1, 1), date(2024, 1, 5));
        store.insert_cycle(&cycle).await.unwrap();

        store.delete_profile(profile.id).await.unwrap();

        assert!(matches!(
            store.get_cycle(cycle.id).await,
            Err(AppError::CycleNotFound(_))
        ));
    }
}
