//! Progress storage.
//!
//! The scheduler only talks to the [`ProgressStore`] and [`CurriculumService`]
//! traits. Two stores ship with the crate: [`InMemoryProgressStore`] for tests
//! and embedding, and [`SqliteProgressStore`] for the server.

pub mod memory;
pub mod schema;
pub mod sqlite;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{cmp_overdue, CardProgress, Learner, PhonemeEntry, Priority};
use crate::error::{StoreError, StoreResult};

pub use memory::InMemoryProgressStore;
pub use schema::run_migrations;
pub use sqlite::SqliteProgressStore;

pub type DbPool = Arc<Mutex<Connection>>;

/// Persistence for learners and their per-card scheduling state.
#[async_trait]
pub trait ProgressStore: Send + Sync {
  async fn get_learner(&self, learner_id: &str) -> StoreResult<Option<Learner>>;

  /// Insert or replace a learner
  async fn save_learner(&self, learner: &Learner) -> StoreResult<()>;

  /// Graduated cards with `next_review_at <= now`, most overdue first
  async fn get_due_review_cards(&self, learner_id: &str, now: DateTime<Utc>) -> StoreResult<Vec<CardProgress>>;

  async fn get_due_review_cards_by_priority(
    &self,
    learner_id: &str,
    priority: Priority,
    now: DateTime<Utc>,
  ) -> StoreResult<Vec<CardProgress>> {
    let due = self.get_due_review_cards(learner_id, now).await?;
    Ok(due.into_iter().filter(|p| p.priority() == priority).collect())
  }

  /// Cards still in the learning phase (step < 3)
  async fn get_learning_cards(&self, learner_id: &str) -> StoreResult<Vec<CardProgress>>;

  async fn get_all_cards_for_learner(&self, learner_id: &str) -> StoreResult<Vec<CardProgress>>;

  async fn get_card_progress(&self, learner_id: &str, word: &str) -> StoreResult<Option<CardProgress>>;

  async fn create_or_update_card_progress(&self, progress: &CardProgress) -> StoreResult<()>;

  async fn get_introduced_phonemes(&self, learner_id: &str) -> StoreResult<BTreeSet<String>>;

  /// Idempotent
  async fn add_introduced_phoneme(
    &self,
    learner_id: &str,
    symbol: &str,
    introduced_at: DateTime<Utc>,
  ) -> StoreResult<()>;

  /// Bump the intervening-card counter of every learning card except `exclude_word`
  async fn increment_cards_since_last_seen(&self, learner_id: &str, exclude_word: &str) -> StoreResult<()>;

  /// Zero the counter of `word` and stamp when it was shown
  async fn reset_cards_since_last_seen(
    &self,
    learner_id: &str,
    word: &str,
    seen_at: DateTime<Utc>,
  ) -> StoreResult<()>;
}

/// Which phonemes a learner still has to meet.
#[async_trait]
pub trait CurriculumService: Send + Sync {
  /// Phonemes taught up to `lesson` that the learner has not been introduced
  /// to, earliest lesson first
  async fn get_unintroduced_phonemes_for_lesson(
    &self,
    learner_id: &str,
    lesson: u8,
  ) -> StoreResult<Vec<PhonemeEntry>>;

  async fn mark_phoneme_as_introduced(&self, learner_id: &str, symbol: &str) -> StoreResult<()>;
}

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
  /// Log the error at warn level and return None
  fn log_warn(self, context: &str) -> Option<T>;
}

impl<T, E: std::fmt::Display> LogOnError<T> for Result<T, E> {
  fn log_warn(self, context: &str) -> Option<T> {
    match self {
      Ok(v) => Some(v),
      Err(e) => {
        tracing::warn!("{}: {}", context, e);
        None
      }
    }
  }
}

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> StoreResult<MutexGuard<'_, Connection>> {
  pool.lock().map_err(|_: PoisonError<_>| {
    tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
    StoreError::LockPoisoned
  })
}

/// Shared ordering for due-review listings
pub(crate) fn sort_due(cards: &mut [CardProgress]) {
  cards.sort_by(cmp_overdue);
}
