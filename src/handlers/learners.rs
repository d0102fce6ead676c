use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::curriculum::{lesson_progress, LessonProgress};
use crate::db::ProgressStore;
use crate::domain::{AttemptOutcome, Learner};
use crate::state::AppState;

use super::ApiError;

#[derive(Deserialize)]
pub struct CreateLearner {
  pub id: String,
}

pub async fn create_learner(
  State(state): State<AppState>,
  Json(body): Json<CreateLearner>,
) -> Result<impl IntoResponse, ApiError> {
  let id = body.id.trim();
  if id.is_empty() {
    return Err(ApiError::BadRequest("Learner id must not be empty".to_string()));
  }
  let learner = state.scheduler.create_learner(id).await?;
  Ok((StatusCode::CREATED, Json(learner)))
}

#[derive(Serialize)]
pub struct LearnerOverview {
  #[serde(flatten)]
  pub learner: Learner,
  pub lesson: LessonProgress,
}

pub async fn get_learner(
  State(state): State<AppState>,
  Path(id): Path<String>,
) -> Result<Json<LearnerOverview>, ApiError> {
  let learner = state.scheduler.get_learner(&id).await?;
  let progress = state
    .scheduler
    .store()
    .get_all_cards_for_learner(&id)
    .await
    .map_err(|e| ApiError::Scheduler(e.into()))?;
  let lesson = lesson_progress(state.catalog(), learner.current_lesson, &progress);
  Ok(Json(LearnerOverview { learner, lesson }))
}

#[derive(Deserialize)]
pub struct NextCardQuery {
  pub exclude: Option<String>,
}

pub async fn next_card(
  State(state): State<AppState>,
  Path(id): Path<String>,
  Query(query): Query<NextCardQuery>,
) -> Result<impl IntoResponse, ApiError> {
  let card = state.scheduler.next_card(&id, query.exclude.as_deref()).await?;
  Ok(Json(json!({ "card": card })))
}

pub async fn queue(
  State(state): State<AppState>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
  let queue = state.scheduler.card_queue(&id).await?;
  Ok(Json(queue))
}

#[derive(Deserialize)]
pub struct CompletionForm {
  pub word: String,
  pub success: bool,
  #[serde(default = "default_attempts")]
  pub attempts: u32,
  pub match_score: f64,
  #[serde(default)]
  pub needed_help: bool,
}

fn default_attempts() -> u32 {
  1
}

pub async fn record_completion(
  State(state): State<AppState>,
  Path(id): Path<String>,
  Json(form): Json<CompletionForm>,
) -> Result<impl IntoResponse, ApiError> {
  if !(0.0..=1.0).contains(&form.match_score) {
    return Err(ApiError::BadRequest(format!(
      "match_score must be between 0 and 1, got {}",
      form.match_score
    )));
  }
  let outcome = AttemptOutcome {
    success: form.success,
    attempts: form.attempts,
    match_score: form.match_score,
    needed_help: form.needed_help,
  };
  let progress = state
    .scheduler
    .record_card_completion(&id, &form.word, outcome)
    .await?;
  Ok(Json(progress))
}
