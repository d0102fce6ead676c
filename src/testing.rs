//! Test utilities for scheduler setup.
//!
//! Builds a scheduler over the built-in curriculum, an in-memory store and a
//! fixed clock, with an optional store wrapper that fails chosen operations.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::config::SchedulerConfig;
use crate::curriculum::{builtin_catalog, Catalog};
use crate::db::{InMemoryProgressStore, ProgressStore};
use crate::domain::{CardProgress, Learner};
use crate::error::{StoreError, StoreResult};
use crate::srs::{FixedClock, Scheduler};

pub const LEARNER: &str = "kid";

/// Scheduler plus handles on its collaborators.
pub struct TestEnv {
  pub scheduler: Arc<Scheduler>,
  pub store: Arc<dyn ProgressStore>,
  pub clock: Arc<FixedClock>,
}

impl TestEnv {
  /// Default configuration with a lesson-1 learner named [`LEARNER`]
  pub async fn new() -> Self {
    Self::build(builtin_catalog().unwrap(), SchedulerConfig::default(), &[]).await
  }

  pub async fn with_config(config: SchedulerConfig) -> Self {
    Self::build(builtin_catalog().unwrap(), config, &[]).await
  }

  pub async fn with_catalog(catalog: Catalog, config: SchedulerConfig) -> Self {
    Self::build(catalog, config, &[]).await
  }

  /// Store operations named in `failing` return a storage error
  pub async fn failing(failing: &[&str]) -> Self {
    Self::build(builtin_catalog().unwrap(), SchedulerConfig::default(), failing).await
  }

  async fn build(catalog: Catalog, config: SchedulerConfig, failing: &[&str]) -> Self {
    let clock = Arc::new(FixedClock::new(start_time()));
    let inner = Arc::new(InMemoryProgressStore::new());

    let mut learner = Learner::new(LEARNER);
    learner.created_at = start_time();
    inner.save_learner(&learner).await.unwrap();

    let store: Arc<dyn ProgressStore> = if failing.is_empty() {
      inner
    } else {
      Arc::new(FailingStore::new(inner, failing))
    };

    let scheduler = Arc::new(Scheduler::with_catalog_curriculum(
      Arc::new(catalog),
      Arc::clone(&store),
      clock.clone(),
      config,
    ));

    Self {
      scheduler,
      store,
      clock,
    }
  }

  pub fn now(&self) -> DateTime<Utc> {
    use crate::srs::Clock;
    self.clock.now()
  }

  pub async fn introduce(&self, symbols: &[&str]) {
    for symbol in symbols {
      self.store.add_introduced_phoneme(LEARNER, symbol, self.now()).await.unwrap();
    }
  }

  pub async fn put(&self, progress: CardProgress) {
    self.store.create_or_update_card_progress(&progress).await.unwrap();
  }

  pub async fn progress(&self, word: &str) -> Option<CardProgress> {
    self.store.get_card_progress(LEARNER, word).await.unwrap()
  }

  pub async fn learner(&self) -> Learner {
    self.store.get_learner(LEARNER).await.unwrap().unwrap()
  }
}

fn start_time() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap()
}

/// Delegating store whose named operations always fail.
pub struct FailingStore {
  inner: Arc<InMemoryProgressStore>,
  failing: HashSet<String>,
}

impl FailingStore {
  pub fn new(inner: Arc<InMemoryProgressStore>, failing: &[&str]) -> Self {
    Self {
      inner,
      failing: failing.iter().map(|s| s.to_string()).collect(),
    }
  }

  fn check(&self, op: &str) -> StoreResult<()> {
    if self.failing.contains(op) {
      Err(StoreError::Corrupt(format!("injected failure in {}", op)))
    } else {
      Ok(())
    }
  }
}

#[async_trait]
impl ProgressStore for FailingStore {
  async fn get_learner(&self, learner_id: &str) -> StoreResult<Option<Learner>> {
    self.check("get_learner")?;
    self.inner.get_learner(learner_id).await
  }

  async fn save_learner(&self, learner: &Learner) -> StoreResult<()> {
    self.check("save_learner")?;
    self.inner.save_learner(learner).await
  }

  async fn get_due_review_cards(&self, learner_id: &str, now: DateTime<Utc>) -> StoreResult<Vec<CardProgress>> {
    self.check("get_due_review_cards")?;
    self.inner.get_due_review_cards(learner_id, now).await
  }

  async fn get_learning_cards(&self, learner_id: &str) -> StoreResult<Vec<CardProgress>> {
    self.check("get_learning_cards")?;
    self.inner.get_learning_cards(learner_id).await
  }

  async fn get_all_cards_for_learner(&self, learner_id: &str) -> StoreResult<Vec<CardProgress>> {
    self.check("get_all_cards_for_learner")?;
    self.inner.get_all_cards_for_learner(learner_id).await
  }

  async fn get_card_progress(&self, learner_id: &str, word: &str) -> StoreResult<Option<CardProgress>> {
    self.check("get_card_progress")?;
    self.inner.get_card_progress(learner_id, word).await
  }

  async fn create_or_update_card_progress(&self, progress: &CardProgress) -> StoreResult<()> {
    self.check("create_or_update_card_progress")?;
    self.inner.create_or_update_card_progress(progress).await
  }

  async fn get_introduced_phonemes(&self, learner_id: &str) -> StoreResult<BTreeSet<String>> {
    self.check("get_introduced_phonemes")?;
    self.inner.get_introduced_phonemes(learner_id).await
  }

  async fn add_introduced_phoneme(
    &self,
    learner_id: &str,
    symbol: &str,
    introduced_at: DateTime<Utc>,
  ) -> StoreResult<()> {
    self.check("add_introduced_phoneme")?;
    self.inner.add_introduced_phoneme(learner_id, symbol, introduced_at).await
  }

  async fn increment_cards_since_last_seen(&self, learner_id: &str, exclude_word: &str) -> StoreResult<()> {
    self.check("increment_cards_since_last_seen")?;
    self.inner.increment_cards_since_last_seen(learner_id, exclude_word).await
  }

  async fn reset_cards_since_last_seen(
    &self,
    learner_id: &str,
    word: &str,
    seen_at: DateTime<Utc>,
  ) -> StoreResult<()> {
    self.check("reset_cards_since_last_seen")?;
    self.inner.reset_cards_since_last_seen(learner_id, word, seen_at).await
  }
}
