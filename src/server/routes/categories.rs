use axum::{extract::State, routing::get, Json, Router};
use sqlx::SqlitePool;

use crate::{
    db::{queries::categories::get_all_categories, Category},
    server::app::AppState,
};

use super::ApiResponse;

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<Vec<Category>>> {
    Ok(Json(get_all_categories(&pool).await?))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .with_state(state)
}
