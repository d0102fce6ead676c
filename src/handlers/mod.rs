//! JSON endpoints over the scheduler.

pub mod curriculum;
pub mod learners;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::{get, post},
  Json, Router,
};
use serde_json::json;

use crate::error::SchedulerError;
use crate::state::AppState;

pub use curriculum::segment;
pub use learners::{create_learner, get_learner, next_card, queue, record_completion};

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/learners", post(create_learner))
    .route("/learners/{id}", get(get_learner))
    .route("/learners/{id}/next-card", get(next_card))
    .route("/learners/{id}/queue", get(queue))
    .route("/learners/{id}/completions", post(record_completion))
    .route("/curriculum/segment/{word}", get(segment))
    .with_state(state)
}

/// Handler error with its HTTP mapping
#[derive(Debug)]
pub enum ApiError {
  Scheduler(SchedulerError),
  BadRequest(String),
}

impl From<SchedulerError> for ApiError {
  fn from(e: SchedulerError) -> Self {
    Self::Scheduler(e)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
      Self::Scheduler(e) => {
        let status = match &e {
          SchedulerError::LearnerNotFound(_) | SchedulerError::CardNotFound(_) => StatusCode::NOT_FOUND,
          SchedulerError::LearnerExists(_) => StatusCode::CONFLICT,
          SchedulerError::Store(_) => {
            tracing::error!("Storage failure: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
          }
        };
        (status, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
