use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("profile {0} not found")]
    ProfileNotFound(Uuid),

    #[error("cycle {0} not found")]
    CycleNotFound(Uuid),

    #[error("profile name must not be empty")]
    InvalidName,

    #[error("end date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("{0} is too close to the end of the calendar")]
    DateOutOfRange(NaiveDate),

    #[error("end date {end} is before the symptom logged on {last}")]
    SymptomsAfterEnd { end: NaiveDate, last: NaiveDate },

    #[error("a period is already logged on {0}")]
    AlreadyOnPeriod(NaiveDate),

    #[error("{date} is outside the cycle {start}..={end}")]
    SymptomOutsideCycle {
        date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("stored value {0:?} is not recognised")]
    CorruptRecord(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ProfileNotFound(_) | AppError::CycleNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidName
            | AppError::InvalidRange { .. }
            | AppError::DateOutOfRange(_)
            | AppError::SymptomsAfterEnd { .. }
            | AppError::AlreadyOnPeriod(_)
            | AppError::SymptomOutsideCycle { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::CorruptRecord(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!("❌ DB error: {}", self);
            "DB error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_unprocessable() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let err = AppError::InvalidRange { start: d, end: d.pred_opt().unwrap() };
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(AppError::InvalidName.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn database_errors_hide_detail() {
        let response = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            AppError::ProfileNotFound(Uuid::nil()).status(),
            StatusCode::NOT_FOUND
        );
    }
}
