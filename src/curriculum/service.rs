//! Curriculum service backed by the catalog and a progress store.

use async_trait::async_trait;
use std::sync::Arc;

use crate::db::{CurriculumService, ProgressStore};
use crate::domain::PhonemeEntry;
use crate::error::StoreResult;
use crate::srs::Clock;

use super::catalog::Catalog;

pub struct CatalogCurriculum {
  catalog: Arc<Catalog>,
  store: Arc<dyn ProgressStore>,
  clock: Arc<dyn Clock>,
}

impl CatalogCurriculum {
  pub fn new(catalog: Arc<Catalog>, store: Arc<dyn ProgressStore>, clock: Arc<dyn Clock>) -> Self {
    Self { catalog, store, clock }
  }
}

#[async_trait]
impl CurriculumService for CatalogCurriculum {
  async fn get_unintroduced_phonemes_for_lesson(
    &self,
    learner_id: &str,
    lesson: u8,
  ) -> StoreResult<Vec<PhonemeEntry>> {
    let introduced = self.store.get_introduced_phonemes(learner_id).await?;
    // Phoneme table is sorted by lesson, so this keeps introduction order
    Ok(
      self
        .catalog
        .phonemes_up_to_lesson(lesson)
        .into_iter()
        .filter(|p| !introduced.contains(&p.symbol))
        .cloned()
        .collect(),
    )
  }

  async fn mark_phoneme_as_introduced(&self, learner_id: &str, symbol: &str) -> StoreResult<()> {
    tracing::debug!("Introducing phoneme {:?} to {}", symbol, learner_id);
    self
      .store
      .add_introduced_phoneme(learner_id, symbol, self.clock.now())
      .await
  }
}
