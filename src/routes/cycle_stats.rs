use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::engine;
use crate::error::AppError;
use crate::models::{CyclePrediction, CycleStatsSummary, CycleStatus};
use crate::tracker::Tracker;

#[derive(Deserialize)]
pub struct StatusQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct PredictionQuery {
    pub today: Option<NaiveDate>,
}

pub fn routes(tracker: Tracker) -> Router {
    Router::new()
        .route("/profiles/:profile_id/status", get(get_status))
        .route("/profiles/:profile_id/prediction", get(get_prediction))
        .route("/profiles/:profile_id/stats", get(get_cycle_stats))
        .with_state(tracker)
}

async fn get_status(
    State(tracker): State<Tracker>,
    Path(profile_id): Path<Uuid>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<CycleStatus>, AppError> {
    let reference = query.date.unwrap_or_else(engine::today);
    Ok(Json(tracker.status(profile_id, reference).await?))
}

async fn get_prediction(
    State(tracker): State<Tracker>,
    Path(profile_id): Path<Uuid>,
    Query(query): Query<PredictionQuery>,
) -> Result<Json<CyclePrediction>, AppError> {
    let today = query.today.unwrap_or_else(engine::today);
    Ok(Json(tracker.prediction(profile_id, today).await?))
}

async fn get_cycle_stats(
    State(tracker): State<Tracker>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<CycleStatsSummary>, AppError> {
    Ok(Json(tracker.stats(profile_id).await?))
}
