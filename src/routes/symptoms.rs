use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Cycle, SymptomEntry};
use crate::tracker::Tracker;

pub fn routes(tracker: Tracker) -> Router {
    Router::new()
        .route("/cycles/:cycle_id/symptoms", post(log_symptom)) // create or replace that day
        .with_state(tracker)
}

async fn log_symptom(
    State(tracker): State<Tracker>,
    Path(cycle_id): Path<Uuid>,
    Json(entry): Json<SymptomEntry>,
) -> Result<Json<Cycle>, AppError> {
    Ok(Json(tracker.log_symptom(cycle_id, entry).await?))
}
