use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Profile;
use crate::tracker::Tracker;

#[derive(Deserialize)]
pub struct NewProfile {
    pub name: String,
}

pub fn routes(tracker: Tracker) -> Router {
    Router::new()
        .route("/profiles", get(list_profiles).post(create_profile))
        .route("/profiles/:profile_id", get(get_profile).delete(delete_profile))
        .with_state(tracker)
}

async fn create_profile(
    State(tracker): State<Tracker>,
    Json(body): Json<NewProfile>,
) -> Result<(StatusCode, Json<Profile>), AppError> {
    let profile = tracker.create_profile(&body.name).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn list_profiles(State(tracker): State<Tracker>) -> Result<Json<Vec<Profile>>, AppError> {
    Ok(Json(tracker.list_profiles().await?))
}

async fn get_profile(
    State(tracker): State<Tracker>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(tracker.get_profile(profile_id).await?))
}

async fn delete_profile(
    State(tracker): State<Tracker>,
    Path(profile_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    tracker.delete_profile(profile_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
