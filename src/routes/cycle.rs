use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::engine;
use crate::error::AppError;
use crate::models::Cycle;
use crate::tracker::Tracker;

#[derive(Deserialize)]
pub struct NewCycle {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Body for start/end period. The body itself is optional; an absent date means today.
#[derive(Deserialize)]
pub struct PeriodDate {
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

pub fn routes(tracker: Tracker) -> Router {
    Router::new()
        .route("/profiles/:profile_id/cycles", get(list_cycles).post(log_cycle))
        .route("/profiles/:profile_id/cycles/start", post(start_period))
        .route("/cycles/:cycle_id/end", put(end_period))
        .with_state(tracker)
}

async fn list_cycles(
    State(tracker): State<Tracker>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<Vec<Cycle>>, AppError> {
    Ok(Json(tracker.cycles(profile_id).await?))
}

async fn log_cycle(
    State(tracker): State<Tracker>,
    Path(profile_id): Path<Uuid>,
    Json(body): Json<NewCycle>,
) -> Result<(StatusCode, Json<Cycle>), AppError> {
    let cycle = tracker
        .log_cycle(profile_id, body.start_date, body.end_date)
        .await?;
    Ok((StatusCode::CREATED, Json(cycle)))
}

async fn start_period(
    State(tracker): State<Tracker>,
    Path(profile_id): Path<Uuid>,
    body: Option<Json<PeriodDate>>,
) -> Result<(StatusCode, Json<Cycle>), AppError> {
    let date = requested_date(body);
    let cycle = tracker.start_period(profile_id, date).await?;
    Ok((StatusCode::CREATED, Json(cycle)))
}

async fn end_period(
    State(tracker): State<Tracker>,
    Path(cycle_id): Path<Uuid>,
    body: Option<Json<PeriodDate>>,
) -> Result<Json<Cycle>, AppError> {
    let date = requested_date(body);
    Ok(Json(tracker.end_period(cycle_id, date).await?))
}

fn requested_date(body: Option<Json<PeriodDate>>) -> NaiveDate {
    body.and_then(|Json(b)| b.date).unwrap_or_else(engine::today)
}
