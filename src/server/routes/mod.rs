mod auth;
mod categories;
mod dev;
mod questions;

pub use auth::auth_router;
pub use categories::category_router;
pub use dev::dev_router;
pub use questions::questions_router;

use super::error::AppError;

pub type ApiResponse<T> = Result<T, AppError>;
