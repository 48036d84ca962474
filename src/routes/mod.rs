use axum::{routing::get, Router};

use crate::tracker::Tracker;

pub mod cycle;
pub mod cycle_stats;
pub mod profiles;
pub mod symptoms;

/// Full HTTP surface, one router per concern merged together.
pub fn app(tracker: Tracker) -> Router {
    Router::new()
        .merge(profiles::routes(tracker.clone()))
        .merge(cycle::routes(tracker.clone()))
        .merge(symptoms::routes(tracker.clone()))
        .merge(cycle_stats::routes(tracker))
        .route("/health", get(|| async { "✅ Backend up" }))
}
