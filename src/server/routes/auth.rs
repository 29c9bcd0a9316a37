use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    auth::{password, TokenIssuer},
    db::queries::users,
    server::{app::AppState, error::AppError, extract::AppJson},
    telemetry::{LOGINS_CNTR, REGISTRATIONS_CNTR},
};

use super::ApiResponse;

#[derive(Deserialize)]
struct Credentials {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

impl Credentials {
    fn into_parts(self) -> Option<(String, String)> {
        match (self.username, self.password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some((username, password))
            }
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct Registered {
    message: &'static str,
}

#[derive(Serialize)]
struct Session {
    token: String,
    username: String,
}

fn username_taken() -> AppError {
    AppError::Conflict("username already exists".to_owned())
}

async fn register(
    State(pool): State<SqlitePool>,
    AppJson(credentials): AppJson<Credentials>,
) -> ApiResponse<Json<Registered>> {
    let (username, password) = credentials
        .into_parts()
        .ok_or_else(|| AppError::Validation("username and password required".to_owned()))?;

    if users::get_user_by_username(&pool, &username).await?.is_some() {
        return Err(username_taken());
    }
    let password_hash =
        tokio::task::spawn_blocking(move || password::hash_password(&password)).await??;

    // a concurrent registration can still win the race between the check and the insert
    match users::create_user(&pool, &username, &password_hash).await {
        Ok(_) => {}
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => return Err(username_taken()),
        Err(e) => return Err(e.into()),
    }

    REGISTRATIONS_CNTR.inc();
    tracing::info!(%username, "Registered user");
    Ok(Json(Registered {
        message: "registered",
    }))
}

async fn login(
    State(pool): State<SqlitePool>,
    State(tokens): State<TokenIssuer>,
    AppJson(credentials): AppJson<Credentials>,
) -> ApiResponse<Json<Session>> {
    let rejected = || {
        LOGINS_CNTR.with_label_values(&["rejected"]).inc();
        AppError::InvalidCredentials
    };

    let (username, password) = credentials.into_parts().ok_or_else(rejected)?;
    let user = users::get_user_by_username(&pool, &username)
        .await?
        .ok_or_else(rejected)?;

    let password_hash = user.password_hash;
    let matches =
        tokio::task::spawn_blocking(move || password::verify_password(&password, &password_hash))
            .await??;
    if !matches {
        return Err(rejected());
    }

    let token = tokens.issue(&user.username)?;
    LOGINS_CNTR.with_label_values(&["ok"]).inc();
    tracing::info!(username = %user.username, "User logged in");
    Ok(Json(Session {
        token,
        username: user.username,
    }))
}

pub fn auth_router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(state)
}
