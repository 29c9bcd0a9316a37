use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::queries::categories::{seed_if_empty, DEV_DEFAULTS},
    server::app::AppState,
};

#[derive(Serialize)]
struct SeedOutcome {
    ok: bool,
    message: &'static str,
}

// development only, never double-seeds
async fn seed_categories(State(pool): State<SqlitePool>) -> (StatusCode, Json<SeedOutcome>) {
    let (status, ok, message) = match seed_if_empty(&pool, &DEV_DEFAULTS).await {
        Ok(0) => (StatusCode::OK, true, "Categories already exist."),
        Ok(count) => {
            tracing::info!(count, "Seeded dev categories");
            (StatusCode::OK, true, "Seeded default categories.")
        }
        Err(e) => {
            tracing::error!(error = %e, "Dev seed failed");
            (StatusCode::INTERNAL_SERVER_ERROR, false, "Seed failed.")
        }
    };
    (status, Json(SeedOutcome { ok, message }))
}

pub fn dev_router(state: AppState) -> Router {
    Router::new()
        .route("/dev/seed-categories", post(seed_categories))
        .with_state(state)
}
