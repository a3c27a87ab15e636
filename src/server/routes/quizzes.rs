use std::collections::HashSet;

use axum::{extract::State, routing::post, Json, Router};
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    server::{app::AppState, error::ApiError, extractors::JsonBody},
    telemetry::QUIZ_ROUNDS,
};

use super::ApiResponse;

/// Category id the quiz client sends for "All".
const ALL_CATEGORIES: i64 = 0;

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default)]
    previous_questions: Vec<i64>,
    quiz_category: QuizCategory,
}

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

/// `{"question": {...}}` while questions remain, `{}` once the quiz is complete.
#[derive(Serialize, Debug, PartialEq)]
struct QuizResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<Question>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuizScope {
    All,
    Category(i64),
}

impl From<i64> for QuizScope {
    fn from(id: i64) -> Self {
        match id {
            ALL_CATEGORIES => QuizScope::All,
            id => QuizScope::Category(id),
        }
    }
}

async fn candidates(pool: &SqlitePool, scope: QuizScope) -> sqlx::Result<Vec<Question>> {
    match scope {
        QuizScope::All => questions::get_all_questions(pool).await,
        QuizScope::Category(id) => questions::get_questions_for_category(pool, id).await,
    }
}

/// Uniformly random question whose id is not in `seen`.
fn pick_unseen(candidates: Vec<Question>, seen: &HashSet<i64>) -> Option<Question> {
    candidates
        .into_iter()
        .filter(|q| !seen.contains(&q.id))
        .choose(&mut rand::thread_rng())
}

async fn next_question(pool: &SqlitePool, request: QuizRequest) -> Result<QuizResponse, ApiError> {
    let scope = QuizScope::from(request.quiz_category.id);
    let candidates = candidates(pool, scope)
        .await
        .map_err(|e| ApiError::Unprocessable(format!("cannot load quiz questions: {e}")))?;
    if candidates.is_empty() {
        return Err(ApiError::Unprocessable(format!(
            "no questions for {scope:?}"
        )));
    }
    let seen: HashSet<i64> = request.previous_questions.into_iter().collect();
    Ok(QuizResponse {
        question: pick_unseen(candidates, &seen),
    })
}

// every failure in this flow, body problems included, is reported as 422
async fn play_quiz(
    State(pool): State<SqlitePool>,
    body: Result<JsonBody<QuizRequest>, ApiError>,
) -> ApiResponse<QuizResponse> {
    let result = match body {
        Ok(JsonBody(request)) => next_question(&pool, request).await,
        Err(e) => Err(ApiError::Unprocessable(e.to_string())),
    };
    let outcome = match &result {
        Ok(QuizResponse { question: Some(_) }) => "question",
        Ok(QuizResponse { question: None }) => "complete",
        Err(_) => "rejected",
    };
    QUIZ_ROUNDS.with_label_values(&[outcome]).inc();
    Ok(Json(result?))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64) -> Question {
        Question {
            id,
            question: format!("Question {id}"),
            answer: format!("Answer {id}"),
            category: 1,
            difficulty: 1,
        }
    }

    #[test]
    fn zero_means_all_categories() {
        assert_eq!(QuizScope::from(0), QuizScope::All);
        assert_eq!(QuizScope::from(4), QuizScope::Category(4));
    }

    #[test]
    fn never_picks_a_seen_question() {
        let seen: HashSet<i64> = [1, 2, 4].into_iter().collect();
        for _ in 0..50 {
            let picked = pick_unseen((1..=5).map(question).collect(), &seen).unwrap();
            assert!(picked.id == 3 || picked.id == 5);
        }
    }

    #[test]
    fn exhausted_candidates_give_nothing() {
        let seen: HashSet<i64> = [1, 2].into_iter().collect();
        assert_eq!(pick_unseen(vec![question(1), question(2)], &seen), None);
    }

    #[test]
    fn complete_quiz_serializes_as_empty_object() {
        let json = serde_json::to_value(QuizResponse { question: None }).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
