use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

/// Seeded when the server starts against an empty catalog.
pub const STARTUP_DEFAULTS: [&str; 4] = ["JavaScript", "Node.js", "Databases", "Pets"];

/// Seeded by the development-only HTTP endpoint.
pub const DEV_DEFAULTS: [&str; 4] = ["General", "Help", "Announcements", "Off Topic"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, name
FROM categories
ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Inserts `names` only if the catalog is empty and returns how many rows were written.
///
/// The emptiness check and the insert are one statement, so concurrent seeders cannot
/// both succeed.
pub async fn seed_if_empty(pool: &SqlitePool, names: &[&str]) -> sqlx::Result<u64> {
    if names.is_empty() {
        return Ok(0);
    }
    let mut query = QueryBuilder::<Sqlite>::new("INSERT INTO categories (name) SELECT column1 FROM (");
    query.push_values(names, |mut row, name| {
        row.push_bind(*name);
    });
    query.push(") WHERE NOT EXISTS (SELECT 1 FROM categories)");

    let result = query.build().execute(pool).await?;
    Ok(result.rows_affected())
}
