use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    auth::Identity,
    db::{queries::questions, Answer, Question},
    server::{
        app::AppState,
        deserializers::deserialize_optional_id,
        error::AppError,
        extract::{AppJson, AppQuery},
    },
    telemetry::{ANSWERS_CNTR, QUESTIONS_CNTR},
};

use super::ApiResponse;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionsQuery {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    category_id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewQuestion {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    category_id: Option<i64>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewAnswer {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    question_id: Option<i64>,
    #[serde(default)]
    text: Option<String>,
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}

async fn get_questions(
    State(pool): State<SqlitePool>,
    AppQuery(QuestionsQuery { category_id }): AppQuery<QuestionsQuery>,
) -> ApiResponse<Json<Vec<Question>>> {
    Ok(Json(questions::get_questions(&pool, category_id).await?))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    Extension(identity): Extension<Identity>,
    AppJson(new_question): AppJson<NewQuestion>,
) -> ApiResponse<Json<Question>> {
    let (Some(category_id), Some(text)) = (new_question.category_id, non_empty(new_question.text))
    else {
        return Err(AppError::Validation(
            "categoryId and text required".to_owned(),
        ));
    };

    let question =
        questions::create_question(&pool, category_id, &identity.username, &text).await?;
    QUESTIONS_CNTR.inc();
    tracing::info!(question_id = question.id, category_id, author = %identity.username, "Question posted");
    Ok(Json(question))
}

async fn create_answer(
    State(pool): State<SqlitePool>,
    Extension(identity): Extension<Identity>,
    AppJson(new_answer): AppJson<NewAnswer>,
) -> ApiResponse<Json<Question>> {
    let (Some(question_id), Some(text)) = (new_answer.question_id, non_empty(new_answer.text))
    else {
        return Err(AppError::Validation(
            "questionId and text required".to_owned(),
        ));
    };

    let answer = Answer {
        author: identity.username,
        text,
        created_at: Utc::now(),
    };
    let question = questions::append_answer(&pool, question_id, &answer)
        .await?
        .ok_or_else(|| AppError::NotFound("question not found".to_owned()))?;
    ANSWERS_CNTR.inc();
    tracing::info!(question_id, author = %answer.author, "Answer posted");
    Ok(Json(question))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions).post(create_question))
        .route("/answers", post(create_answer))
        .with_state(state)
}
