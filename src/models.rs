use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// One logged period for a profile. `start_date <= end_date` is enforced on write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub symptoms: Vec<SymptomEntry>,
}

impl Cycle {
    pub fn new(profile_id: Uuid, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile_id,
            start_date,
            end_date,
            symptoms: Vec::new(),
        }
    }

    /// Inclusive day bounds, tolerant of records stored with swapped dates.
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        if self.start_date <= self.end_date {
            (self.start_date, self.end_date)
        } else {
            (self.end_date, self.start_date)
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let (first, last) = self.bounds();
        (first..=last).contains(&date)
    }

    /// Inserts the entry keeping date order; an existing entry for the same day is replaced.
    pub fn upsert_symptom(&mut self, entry: SymptomEntry) {
        match self.symptoms.binary_search_by_key(&entry.date, |s| s.date) {
            Ok(i) => self.symptoms[i] = entry,
            Err(i) => self.symptoms.insert(i, entry),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Light,
    Medium,
    Heavy,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Light => "light",
            Severity::Medium => "medium",
            Severity::Heavy => "heavy",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(Severity::None),
            "light" => Some(Severity::Light),
            "medium" => Some(Severity::Medium),
            "heavy" => Some(Severity::Heavy),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
    Irritable,
    Anxious,
    Tired,
}

impl Mood {
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Irritable => "irritable",
            Mood::Anxious => "anxious",
            Mood::Tired => "tired",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "happy" => Some(Mood::Happy),
            "neutral" => Some(Mood::Neutral),
            "sad" => Some(Mood::Sad),
            "irritable" => Some(Mood::Irritable),
            "anxious" => Some(Mood::Anxious),
            "tired" => Some(Mood::Tired),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomEntry {
    pub date: NaiveDate,
    pub severity: Severity,
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleStatus {
    pub is_on_period: bool,
    pub current_day: i64,
    pub active_cycle_id: Option<Uuid>,
}

impl CycleStatus {
    pub fn off_period() -> Self {
        Self {
            is_on_period: false,
            current_day: 0,
            active_cycle_id: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CyclePrediction {
    pub predicted_start_date: Option<NaiveDate>,
    pub days_until_next_cycle: Option<i64>,
    pub average_cycle_length: Option<i64>,
}

impl CyclePrediction {
    pub fn insufficient_data() -> Self {
        Self {
            predicted_start_date: None,
            days_until_next_cycle: None,
            average_cycle_length: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleStat {
    pub cycle_number: usize,
    pub cycle_id: Uuid,
    pub start_date: NaiveDate,
    pub period_length: i64,
    pub cycle_length: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleStatsSummary {
    pub average_period_length: Option<f64>,
    pub average_cycle_length: Option<f64>,
    pub cycle_stats: Vec<CycleStat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn upsert_symptom_keeps_date_order_and_replaces_same_day() {
        let mut cycle = Cycle::new(Uuid::new_v4(), date(2024, 3, 1), date(2024, 3, 5));
        for (d, severity) in [(3, Severity::Light), (1, Severity::Heavy), (3, Severity::Medium)] {
            cycle.upsert_symptom(SymptomEntry {
                date: date(2024, 3, d),
                severity,
                mood: Mood::Neutral,
                note: None,
            });
        }

        let days: Vec<_> = cycle.symptoms.iter().map(|s| s.date).collect();
        assert_eq!(days, vec![date(2024, 3, 1), date(2024, 3, 3)]);
        assert_eq!(cycle.symptoms[1].severity, Severity::Medium);
    }

    #[test]
    fn contains_tolerates_swapped_dates() {
        let mut cycle = Cycle::new(Uuid::new_v4(), date(2024, 3, 5), date(2024, 3, 1));
        assert!(cycle.contains(date(2024, 3, 3)));
        cycle.end_date = date(2024, 3, 5);
        assert!(!cycle.contains(date(2024, 3, 6)));
    }

    #[test]
    fn enums_serialize_lowercase() {
        let entry = SymptomEntry {
            date: date(2024, 3, 2),
            severity: Severity::Heavy,
            mood: Mood::Irritable,
            note: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["severity"], "heavy");
        assert_eq!(json["mood"], "irritable");
        assert!(json.get("note").is_none());
    }
}
