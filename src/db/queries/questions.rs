use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, SqlitePool};

/// Stored inside its question's `answers` array, never on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub category_id: i64,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// In append order.
    #[sqlx(json)]
    pub answers: Vec<Answer>,
}

pub async fn create_question(
    pool: &SqlitePool,
    category_id: i64,
    author: &str,
    text: &str,
) -> sqlx::Result<Question> {
    sqlx::query_as::<_, Question>(
        r#"
INSERT INTO questions (category_id, author, text, created_at, answers)
VALUES (?1, ?2, ?3, ?4, '[]')
RETURNING id, category_id, author, text, created_at, answers
        "#,
    )
    .bind(category_id)
    .bind(author)
    .bind(text)
    .bind(Utc::now())
    .fetch_all(pool)
    .await?
    .into_iter()
    .next()
    .ok_or(sqlx::Error::RowNotFound)
}

/// Newest first. `None` lists every category.
pub async fn get_questions(
    pool: &SqlitePool,
    category_id: Option<i64>,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, category_id, author, text, created_at, answers
FROM questions
WHERE ?1 IS NULL OR questions.category_id = ?1
ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(category_id)
    .fetch_all(pool)
    .await
}

/// Appends `answer` and returns the updated question, `None` if it does not exist.
///
/// The append happens inside a single UPDATE, so concurrent appends to the same question
/// never overwrite each other. RETURNING rows are drained with `fetch_all` so the statement
/// completes, and commits, before the connection goes back to the pool.
pub async fn append_answer(
    pool: &SqlitePool,
    question_id: i64,
    answer: &Answer,
) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
UPDATE questions
SET answers = json_insert(answers, '$[#]', json(?1))
WHERE questions.id = ?2
RETURNING id, category_id, author, text, created_at, answers
        "#,
    )
    .bind(Json(answer))
    .bind(question_id)
    .fetch_all(pool)
    .await
    .map(|rows| rows.into_iter().next())
}
