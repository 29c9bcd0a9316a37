use std::path::PathBuf;

use anyhow::Context;
use askama::Template;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::{extract::FromRef, middleware, response::Html, routing::get, Json, Router};
use prometheus::{Encoder, TextEncoder};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::TokenIssuer;
use crate::settings::Settings;

use super::error::AppError;
use super::guard::require_auth;
use super::routes::{auth_router, category_router, dev_router, questions_router, ApiResponse};

#[derive(FromRef, Clone)]
pub struct AppState {
    pool: SqlitePool,
    tokens: TokenIssuer,
}

impl AppState {
    pub fn new(pool: SqlitePool, tokens: TokenIssuer) -> Self {
        Self { pool, tokens }
    }
}

/// Full HTTP surface. `/api/dev/*` is only mounted when `dev_routes` is set.
pub fn build_router(state: AppState, static_dir: PathBuf, dev_routes: bool) -> Router {
    let protected = Router::new()
        .merge(category_router(state.clone()))
        .merge(questions_router(state.clone()))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let mut api = Router::new()
        .route("/health", get(health))
        .merge(auth_router(state.clone()))
        .merge(protected);
    if dev_routes {
        api = api.merge(dev_router(state));
    }

    Router::new()
        .route("/", get(index))
        .route("/metrics", get(metrics))
        .nest("/api", api)
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(|| async {
            tracing::info!("Fallback");
            AppError::NotFound("not found".to_owned())
        })
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(settings: &Settings, pool: SqlitePool) -> anyhow::Result<()> {
    let tokens = TokenIssuer::new(settings.jwt_secret.expose_secret().as_bytes());
    let state = AppState::new(pool.clone(), tokens);
    let app = build_router(state, settings.static_dir.clone(), settings.dev_routes);

    let addr = settings.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    tracing::info!("Serving on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Closing store connections");
    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

async fn index() -> ApiResponse<Html<String>> {
    let tmpl = IndexPage { title: "Q&A Forum" };
    tmpl.render()
        .map(Html)
        .map_err(|e| AppError::Internal(e.to_string()))
}

#[derive(Template)]
#[template(path = "index.html", escape = "none")]
struct IndexPage<'a> {
    title: &'a str,
}

async fn metrics() -> ApiResponse<Response> {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    encoder
        .encode(&metrics, &mut buf)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, encoder.format_type().to_owned())],
        buf,
    )
        .into_response())
}
