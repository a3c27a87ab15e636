use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_category_map, questions},
        NewQuestion, Question,
    },
    server::{
        app::AppState,
        deserializers::deserialize_lenient_page,
        error::ApiError,
        extractors::{IdPath, JsonBody},
        pagination::Page,
    },
    telemetry::QUESTIONS_CHANGED,
};

use super::{Ack, ApiResponse, QuestionList};

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_lenient_page")]
    page: Option<u32>,
}

#[derive(Deserialize)]
struct CreateQuestion {
    question: String,
    answer: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    category: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    difficulty: i64,
}

impl CreateQuestion {
    fn validate(&self) -> Result<(), ApiError> {
        if self.question.trim().is_empty() {
            return Err(ApiError::Unprocessable("question text is blank".to_owned()));
        }
        if self.answer.trim().is_empty() {
            return Err(ApiError::Unprocessable("answer text is blank".to_owned()));
        }
        if self.difficulty < 1 {
            return Err(ApiError::Unprocessable(format!(
                "difficulty must be positive, got {}",
                self.difficulty
            )));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest {
    search_term: String,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
    current_category: Option<i64>,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<QuestionsPage> {
    let all = questions::get_all_questions(&pool).await?;
    let page = Page::from(query.page);
    Ok(Json(QuestionsPage {
        success: true,
        questions: page.slice(&all).to_vec(),
        total_questions: all.len(),
        categories: get_category_map(&pool).await?,
        current_category: None,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    JsonBody(body): JsonBody<CreateQuestion>,
) -> ApiResponse<Ack> {
    body.validate()?;
    let id = questions::create_question(
        &pool,
        NewQuestion {
            question: &body.question,
            answer: &body.answer,
            category: body.category,
            difficulty: body.difficulty,
        },
    )
    .await?;
    QUESTIONS_CHANGED.with_label_values(&["created"]).inc();
    tracing::info!("Created question {id}");
    Ok(Json(Ack::new(id)))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    IdPath(id): IdPath<i64>,
) -> ApiResponse<Ack> {
    // clients treat delete as idempotent, so a missing row is still acknowledged
    if questions::delete_question(&pool, id).await? {
        QUESTIONS_CHANGED.with_label_values(&["deleted"]).inc();
        tracing::info!("Deleted question {id}");
    } else {
        QUESTIONS_CHANGED.with_label_values(&["deleted_missing"]).inc();
        tracing::warn!("Delete requested for missing question {id}");
    }
    Ok(Json(Ack::new(id)))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    JsonBody(body): JsonBody<SearchRequest>,
) -> ApiResponse<QuestionList> {
    let found = questions::search_questions(&pool, &body.search_term).await?;
    tracing::debug!("Search {:?} matched {}", body.search_term, found.len());
    Ok(Json(found.into()))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
