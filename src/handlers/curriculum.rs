use axum::{
  extract::{Path, State},
  Json,
};
use serde::Serialize;

use crate::curriculum::normalize_text;
use crate::domain::Card;
use crate::state::AppState;

use super::ApiError;

#[derive(Serialize)]
pub struct Segmentation {
  pub word: String,
  pub phonemes: Vec<String>,
  /// Catalog card with this exact text, if any
  pub card: Option<Card>,
}

pub async fn segment(
  State(state): State<AppState>,
  Path(word): Path<String>,
) -> Result<Json<Segmentation>, ApiError> {
  let catalog = state.catalog();
  let phonemes = catalog
    .segment(&word)
    .map_err(|e| ApiError::BadRequest(format!("Cannot segment {:?}: {}", word, e)))?;
  let card = catalog.card_by_text(&word).cloned();

  Ok(Json(Segmentation {
    word: normalize_text(&word),
    phonemes,
    card,
  }))
}
