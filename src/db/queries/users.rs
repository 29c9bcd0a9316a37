use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

pub async fn get_user_by_username(pool: &SqlitePool, username: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash FROM users WHERE users.username = ?1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Fails with a unique violation when `username` is taken.
pub async fn create_user(pool: &SqlitePool, username: &str, password_hash: &str) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO users (username, password_hash) VALUES (?1, ?2)
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn count_users(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM users
        "#,
    )
    .fetch_one(pool)
    .await
}
