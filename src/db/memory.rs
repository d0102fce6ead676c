//! In-memory progress store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

use crate::domain::{CardProgress, Learner};
use crate::error::{StoreError, StoreResult};

use super::{sort_due, ProgressStore};

#[derive(Debug, Default)]
struct MemoryState {
  learners: HashMap<String, Learner>,
  /// learner id -> word -> progress
  progress: HashMap<String, HashMap<String, CardProgress>>,
  introduced: HashMap<String, BTreeSet<String>>,
}

#[derive(Debug, Default)]
pub struct InMemoryProgressStore {
  state: Mutex<MemoryState>,
}

impl InMemoryProgressStore {
  pub fn new() -> Self {
    Self::default()
  }

  fn state(&self) -> StoreResult<MutexGuard<'_, MemoryState>> {
    self.state.lock().map_err(|_| StoreError::LockPoisoned)
  }

  fn collect<F>(&self, learner_id: &str, keep: F) -> StoreResult<Vec<CardProgress>>
  where
    F: Fn(&CardProgress) -> bool,
  {
    let state = self.state()?;
    let mut cards: Vec<CardProgress> = state
      .progress
      .get(learner_id)
      .map(|cards| cards.values().filter(|p| keep(p)).cloned().collect())
      .unwrap_or_default();
    cards.sort_by(|a, b| a.word.cmp(&b.word));
    Ok(cards)
  }
}

#[async_trait]
impl ProgressStore for InMemoryProgressStore {
  async fn get_learner(&self, learner_id: &str) -> StoreResult<Option<Learner>> {
    Ok(self.state()?.learners.get(learner_id).cloned())
  }

  async fn save_learner(&self, learner: &Learner) -> StoreResult<()> {
    self.state()?.learners.insert(learner.id.clone(), learner.clone());
    Ok(())
  }

  async fn get_due_review_cards(&self, learner_id: &str, now: DateTime<Utc>) -> StoreResult<Vec<CardProgress>> {
    let mut due = self.collect(learner_id, |p| p.is_due(now))?;
    sort_due(&mut due);
    Ok(due)
  }

  async fn get_learning_cards(&self, learner_id: &str) -> StoreResult<Vec<CardProgress>> {
    self.collect(learner_id, CardProgress::is_learning)
  }

  async fn get_all_cards_for_learner(&self, learner_id: &str) -> StoreResult<Vec<CardProgress>> {
    self.collect(learner_id, |_| true)
  }

  async fn get_card_progress(&self, learner_id: &str, word: &str) -> StoreResult<Option<CardProgress>> {
    Ok(
      self
        .state()?
        .progress
        .get(learner_id)
        .and_then(|cards| cards.get(word))
        .cloned(),
    )
  }

  async fn create_or_update_card_progress(&self, progress: &CardProgress) -> StoreResult<()> {
    self
      .state()?
      .progress
      .entry(progress.learner_id.clone())
      .or_default()
      .insert(progress.word.clone(), progress.clone());
    Ok(())
  }

  async fn get_introduced_phonemes(&self, learner_id: &str) -> StoreResult<BTreeSet<String>> {
    Ok(self.state()?.introduced.get(learner_id).cloned().unwrap_or_default())
  }

  async fn add_introduced_phoneme(
    &self,
    learner_id: &str,
    symbol: &str,
    _introduced_at: DateTime<Utc>,
  ) -> StoreResult<()> {
    self
      .state()?
      .introduced
      .entry(learner_id.to_string())
      .or_default()
      .insert(symbol.to_string());
    Ok(())
  }

  async fn increment_cards_since_last_seen(&self, learner_id: &str, exclude_word: &str) -> StoreResult<()> {
    let mut state = self.state()?;
    if let Some(cards) = state.progress.get_mut(learner_id) {
      for progress in cards.values_mut() {
        if progress.is_learning() && progress.word != exclude_word {
          progress.cards_since_last_seen += 1;
        }
      }
    }
    Ok(())
  }

  async fn reset_cards_since_last_seen(
    &self,
    learner_id: &str,
    word: &str,
    seen_at: DateTime<Utc>,
  ) -> StoreResult<()> {
    let mut state = self.state()?;
    if let Some(progress) = state.progress.get_mut(learner_id).and_then(|cards| cards.get_mut(word)) {
      progress.cards_since_last_seen = 0;
      progress.last_seen_at = Some(seen_at);
    }
    Ok(())
  }
}
