use axum::extract::{FromRequest, FromRequestParts};

use super::error::AppError;

/// `Json` whose rejection is an [`AppError`], so malformed bodies still answer with a JSON
/// `message`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Query` counterpart of [`AppJson`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
