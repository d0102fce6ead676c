//! Priority-ladder card selection.
//!
//! Each call walks a fixed ladder and returns the first card any level yields:
//! 1. High-priority due reviews
//! 2. New phoneme introductions (capped per session)
//! 3. Learning cards that have had enough intervening cards
//! 4. Medium-priority due reviews
//! 5. Unlocked words and sentences the learner has never seen
//! 6. Low-priority due reviews
//! 7. Any due review
//! 8. Practice: the weakest card the learner has seen
//!
//! Every level skips the card matching the caller's exclusion, so the same
//! card is never handed out twice in a row. A storage failure inside a level
//! is logged and the level is treated as empty.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use crate::config::SchedulerConfig;
use crate::curriculum::{normalize_text, unlocked_cards, Catalog, CatalogCurriculum};
use crate::db::{CurriculumService, LogOnError, ProgressStore};
use crate::domain::{Card, CardProgress, Learner, Priority};
use crate::error::SchedulerError;
use crate::session::{SessionContext, SessionRegistry};

use super::clock::Clock;
use super::learning::is_ready;

/// Scheduling engine: card selection, queue building and completion recording
pub struct Scheduler {
  pub(crate) catalog: Arc<Catalog>,
  pub(crate) store: Arc<dyn ProgressStore>,
  pub(crate) curriculum: Arc<dyn CurriculumService>,
  pub(crate) clock: Arc<dyn Clock>,
  pub(crate) config: SchedulerConfig,
  pub(crate) sessions: SessionRegistry,
}

impl Scheduler {
  pub fn new(
    catalog: Arc<Catalog>,
    store: Arc<dyn ProgressStore>,
    curriculum: Arc<dyn CurriculumService>,
    clock: Arc<dyn Clock>,
    config: SchedulerConfig,
  ) -> Self {
    Self {
      catalog,
      store,
      curriculum,
      clock,
      config,
      sessions: SessionRegistry::new(),
    }
  }

  /// Scheduler whose curriculum service reads phonemes from the catalog itself
  pub fn with_catalog_curriculum(
    catalog: Arc<Catalog>,
    store: Arc<dyn ProgressStore>,
    clock: Arc<dyn Clock>,
    config: SchedulerConfig,
  ) -> Self {
    let curriculum = Arc::new(CatalogCurriculum::new(
      Arc::clone(&catalog),
      Arc::clone(&store),
      Arc::clone(&clock),
    ));
    Self::new(catalog, store, curriculum, clock, config)
  }

  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  pub fn config(&self) -> &SchedulerConfig {
    &self.config
  }

  pub fn store(&self) -> &dyn ProgressStore {
    self.store.as_ref()
  }

  pub async fn create_learner(&self, learner_id: &str) -> Result<Learner, SchedulerError> {
    if self.store.get_learner(learner_id).await?.is_some() {
      return Err(SchedulerError::LearnerExists(learner_id.to_string()));
    }
    let mut learner = Learner::new(learner_id);
    learner.created_at = self.clock.now();
    self.store.save_learner(&learner).await?;
    tracing::info!("Created learner {}", learner_id);
    Ok(learner)
  }

  pub async fn get_learner(&self, learner_id: &str) -> Result<Learner, SchedulerError> {
    self
      .store
      .get_learner(learner_id)
      .await?
      .ok_or_else(|| SchedulerError::LearnerNotFound(learner_id.to_string()))
  }

  /// Pick the next card for a learner, never returning `exclude_word`.
  ///
  /// `Ok(None)` means there is nothing left to show.
  pub async fn next_card(
    &self,
    learner_id: &str,
    exclude_word: Option<&str>,
  ) -> Result<Option<Card>, SchedulerError> {
    let session = self.sessions.get(learner_id, self.clock.now());
    let mut ctx = session.lock().await;
    self.select_next(&mut ctx, learner_id, exclude_word).await
  }

  /// Ladder walk; the caller holds the learner's session lock.
  pub(crate) async fn select_next(
    &self,
    ctx: &mut SessionContext,
    learner_id: &str,
    exclude_word: Option<&str>,
  ) -> Result<Option<Card>, SchedulerError> {
    let learner = self.get_learner(learner_id).await?;
    let now = self.clock.now();
    let exclude = exclude_word.map(normalize_text).filter(|w| !w.is_empty());
    let exclude = exclude.as_deref();

    let selected = 'ladder: {
      if let Some(card) = self.due_review(learner_id, Some(Priority::High), now, exclude).await {
        break 'ladder Some((card, "high-priority review"));
      }
      if let Some(card) = self.introduce_phoneme(ctx, &learner, now, exclude).await {
        break 'ladder Some((card, "new phoneme"));
      }
      if let Some(card) = self.ready_learning_card(learner_id, exclude).await {
        break 'ladder Some((card, "learning"));
      }
      if let Some(card) = self.due_review(learner_id, Some(Priority::Medium), now, exclude).await {
        break 'ladder Some((card, "medium-priority review"));
      }
      if let Some(card) = self.unlocked_new_card(learner_id, now, exclude).await {
        break 'ladder Some((card, "new word"));
      }
      if let Some(card) = self.due_review(learner_id, Some(Priority::Low), now, exclude).await {
        break 'ladder Some((card, "low-priority review"));
      }
      if let Some(card) = self.due_review(learner_id, None, now, exclude).await {
        break 'ladder Some((card, "review"));
      }
      self.practice_card(learner_id, exclude).await.map(|card| (card, "practice"))
    };

    let Some((card, reason)) = selected else {
      tracing::debug!("No card available for {} (exclude {:?})", learner_id, exclude);
      return Ok(None);
    };

    tracing::debug!("Selected {:?} for {} ({})", card.plain_text, learner_id, reason);
    self.mark_seen(learner_id, &card.plain_text, now).await;
    Ok(Some(card))
  }

  /// Levels 1, 4, 6 (one priority bucket) and 7 (`None`, every due card)
  async fn due_review(
    &self,
    learner_id: &str,
    priority: Option<Priority>,
    now: DateTime<Utc>,
    exclude: Option<&str>,
  ) -> Option<Card> {
    let due = match priority {
      Some(priority) => self
        .store
        .get_due_review_cards_by_priority(learner_id, priority, now)
        .await
        .log_warn("Failed to load prioritized due reviews")?,
      None => self
        .store
        .get_due_review_cards(learner_id, now)
        .await
        .log_warn("Failed to load due reviews")?,
    };
    self.first_card(due.iter(), exclude)
  }

  /// Level 2
  async fn introduce_phoneme(
    &self,
    ctx: &mut SessionContext,
    learner: &Learner,
    now: DateTime<Utc>,
    exclude: Option<&str>,
  ) -> Option<Card> {
    if ctx.new_cards_introduced >= self.config.max_new_cards_per_session {
      return None;
    }

    let pending = self
      .curriculum
      .get_unintroduced_phonemes_for_lesson(&learner.id, learner.current_lesson)
      .await
      .log_warn("Failed to load unintroduced phonemes")?;
    let card = pending
      .iter()
      .filter(|entry| !is_excluded(&entry.symbol, exclude))
      .find_map(|entry| self.catalog.phoneme_card(&entry.symbol))?
      .clone();

    self.ensure_progress(&learner.id, &card.plain_text, now).await?;
    self
      .curriculum
      .mark_phoneme_as_introduced(&learner.id, &card.plain_text)
      .await
      .log_warn("Failed to mark phoneme as introduced")?;

    ctx.new_cards_introduced += 1;
    tracing::info!(
      "Introduced {:?} to {} ({} of {} this session)",
      card.plain_text,
      learner.id,
      ctx.new_cards_introduced,
      self.config.max_new_cards_per_session
    );
    Some(card)
  }

  /// Level 3
  async fn ready_learning_card(&self, learner_id: &str, exclude: Option<&str>) -> Option<Card> {
    let mut ready: Vec<CardProgress> = self
      .store
      .get_learning_cards(learner_id)
      .await
      .log_warn("Failed to load learning cards")?
      .into_iter()
      .filter(|p| is_ready(p, self.config.learning_min_spacing))
      .collect();
    ready.sort_by(cmp_learning);
    self.first_card(ready.iter(), exclude)
  }

  /// Level 5
  async fn unlocked_new_card(&self, learner_id: &str, now: DateTime<Utc>, exclude: Option<&str>) -> Option<Card> {
    let introduced = self
      .store
      .get_introduced_phonemes(learner_id)
      .await
      .log_warn("Failed to load introduced phonemes")?;
    if introduced.is_empty() {
      return None;
    }
    let seen: HashSet<String> = self
      .store
      .get_all_cards_for_learner(learner_id)
      .await
      .log_warn("Failed to load learner cards")?
      .into_iter()
      .map(|p| p.word)
      .collect();

    let mut candidates: Vec<&Card> = unlocked_cards(&self.catalog, &introduced)
      .into_iter()
      .filter(|c| !c.is_sound())
      .filter(|c| !seen.contains(&c.plain_text) && !is_excluded(&c.plain_text, exclude))
      .collect();
    // Stable: catalog order within a lesson
    candidates.sort_by_key(|c| c.lesson);

    let card = (*candidates.first()?).clone();
    self.ensure_progress(learner_id, &card.plain_text, now).await?;
    Some(card)
  }

  /// Level 8
  async fn practice_card(&self, learner_id: &str, exclude: Option<&str>) -> Option<Card> {
    let mut all = self
      .store
      .get_all_cards_for_learner(learner_id)
      .await
      .log_warn("Failed to load practice cards")?;
    all.sort_by(cmp_practice);
    self.first_card(all.iter(), exclude)
  }

  /// First progress record that maps to a catalog card and is not excluded
  fn first_card<'a>(&self, progress: impl Iterator<Item = &'a CardProgress>, exclude: Option<&str>) -> Option<Card> {
    progress
      .filter(|p| !is_excluded(&p.word, exclude))
      .find_map(|p| {
        let card = self.catalog.card_by_text(&p.word);
        if card.is_none() {
          tracing::debug!("Skipping progress for {:?}: not in catalog", p.word);
        }
        card
      })
      .cloned()
  }

  /// Create a step-0 progress record unless one exists. `None` on storage failure.
  async fn ensure_progress(&self, learner_id: &str, word: &str, now: DateTime<Utc>) -> Option<()> {
    let existing = self
      .store
      .get_card_progress(learner_id, word)
      .await
      .log_warn("Failed to load card progress")?;
    if existing.is_none() {
      self
        .store
        .create_or_update_card_progress(&CardProgress::new(learner_id, word, now))
        .await
        .log_warn("Failed to create card progress")?;
    }
    Some(())
  }

  /// Spacing bookkeeping after a card is handed out
  async fn mark_seen(&self, learner_id: &str, word: &str, now: DateTime<Utc>) {
    self
      .store
      .increment_cards_since_last_seen(learner_id, word)
      .await
      .log_warn("Failed to advance learning counters");
    self
      .store
      .reset_cards_since_last_seen(learner_id, word, now)
      .await
      .log_warn("Failed to reset learning counter");
  }
}

fn is_excluded(word: &str, exclude: Option<&str>) -> bool {
  exclude == Some(word)
}

/// Most intervening cards first, then longest unseen, then word.
pub fn cmp_learning(a: &CardProgress, b: &CardProgress) -> Ordering {
  b.cards_since_last_seen
    .cmp(&a.cards_since_last_seen)
    .then_with(|| a.last_seen_at.cmp(&b.last_seen_at))
    .then_with(|| a.word.cmp(&b.word))
}

/// Fewest successes first, then longest unseen (never seen first), then word.
pub fn cmp_practice(a: &CardProgress, b: &CardProgress) -> Ordering {
  a.successes
    .cmp(&b.successes)
    .then_with(|| a.last_seen_at.cmp(&b.last_seen_at))
    .then_with(|| a.word.cmp(&b.word))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{PhonemeEntry, GRADUATED_STEP};
  use crate::testing::TestEnv;
  use chrono::Duration;

  fn due(env: &TestEnv, word: &str, quality: u8, interval: i64, overdue_days: i64) -> CardProgress {
    let mut p = CardProgress::new("kid", word, env.now() - Duration::days(overdue_days));
    p.learning_step = GRADUATED_STEP;
    p.last_quality = Some(quality);
    p.interval_days = interval;
    p
  }

  fn learning(env: &TestEnv, word: &str, step: u8, since: u32) -> CardProgress {
    let mut p = CardProgress::new("kid", word, env.now());
    p.learning_step = step;
    p.cards_since_last_seen = since;
    p
  }

  async fn next(env: &TestEnv, exclude: Option<&str>) -> Option<String> {
    env
      .scheduler
      .next_card("kid", exclude)
      .await
      .unwrap()
      .map(|c| c.plain_text)
  }

  #[tokio::test]
  async fn test_unknown_learner_is_not_found() {
    let env = TestEnv::new().await;
    let err = env.scheduler.next_card("ghost", None).await.unwrap_err();
    assert!(matches!(err, SchedulerError::LearnerNotFound(_)));
  }

  #[tokio::test]
  async fn test_new_learner_gets_first_phoneme() {
    let env = TestEnv::new().await;
    let card = env.scheduler.next_card("kid", None).await.unwrap().unwrap();

    assert_eq!(card.plain_text, "m");
    assert!(card.is_sound());
    assert!(env.store.get_introduced_phonemes("kid").await.unwrap().contains("m"));
    let progress = env.progress("m").await.unwrap();
    assert_eq!(progress.learning_step, 0);
    assert_eq!(progress.last_seen_at, Some(env.now()));
  }

  #[tokio::test]
  async fn test_high_priority_review_beats_introduction() {
    let env = TestEnv::new().await;
    env.introduce(&["m", "a"]).await;
    env.put(due(&env, "am", 3, 1, 1)).await;

    assert_eq!(next(&env, None).await.as_deref(), Some("am"));
  }

  #[tokio::test]
  async fn test_high_priority_orders_most_overdue_then_weakest() {
    let env = TestEnv::with_config(SchedulerConfig {
      max_new_cards_per_session: 0,
      ..SchedulerConfig::default()
    })
    .await;
    env.introduce(&["m", "s", "a", "t"]).await;

    let mut strong = due(&env, "at", 3, 1, 2);
    strong.ease_factor = 2.8;
    let mut weak = due(&env, "sat", 3, 1, 2);
    weak.ease_factor = 1.5;
    env.put(strong).await;
    env.put(weak).await;
    env.put(due(&env, "mat", 3, 1, 5)).await;

    assert_eq!(next(&env, None).await.as_deref(), Some("mat"));
    assert_eq!(next(&env, Some("mat")).await.as_deref(), Some("sat"));
    assert_eq!(next(&env, Some("sat")).await.as_deref(), Some("mat"));
  }

  #[tokio::test]
  async fn test_learning_spacing_gates_selection() {
    let env = TestEnv::with_config(SchedulerConfig {
      max_new_cards_per_session: 0,
      ..SchedulerConfig::default()
    })
    .await;
    env.introduce(&["m", "s"]).await;
    env.put(learning(&env, "m", 0, 1)).await;
    env.put(learning(&env, "s", 0, 2)).await;

    // m has only one intervening card, s has two
    assert_eq!(next(&env, None).await.as_deref(), Some("s"));

    env.put(learning(&env, "m", 0, 2)).await;
    env.put(learning(&env, "s", 0, 0)).await;
    assert_eq!(next(&env, None).await.as_deref(), Some("m"));
  }

  #[tokio::test]
  async fn test_step_two_ready_without_spacing() {
    let env = TestEnv::with_config(SchedulerConfig {
      max_new_cards_per_session: 0,
      ..SchedulerConfig::default()
    })
    .await;
    env.introduce(&["m", "s"]).await;
    env.put(learning(&env, "m", 0, 0)).await;
    env.put(learning(&env, "s", 2, 0)).await;

    assert_eq!(next(&env, Some("m")).await.as_deref(), Some("s"));
  }

  #[tokio::test]
  async fn test_selection_updates_spacing_counters() {
    let env = TestEnv::with_config(SchedulerConfig {
      max_new_cards_per_session: 0,
      ..SchedulerConfig::default()
    })
    .await;
    env.introduce(&["m", "s"]).await;
    env.put(learning(&env, "m", 1, 3)).await;
    env.put(learning(&env, "s", 1, 0)).await;

    assert_eq!(next(&env, None).await.as_deref(), Some("m"));
    assert_eq!(env.progress("m").await.unwrap().cards_since_last_seen, 0);
    assert_eq!(env.progress("s").await.unwrap().cards_since_last_seen, 1);
  }

  #[tokio::test]
  async fn test_learning_before_medium_review() {
    let env = TestEnv::with_config(SchedulerConfig {
      max_new_cards_per_session: 0,
      ..SchedulerConfig::default()
    })
    .await;
    env.introduce(&["m", "s", "a", "t"]).await;
    env.put(due(&env, "sat", 2, 1, 1)).await;
    env.put(learning(&env, "m", 0, 4)).await;

    assert_eq!(next(&env, None).await.as_deref(), Some("m"));
    assert_eq!(next(&env, Some("m")).await.as_deref(), Some("sat"));
  }

  #[tokio::test]
  async fn test_hint_makes_review_medium_priority() {
    let env = TestEnv::with_config(SchedulerConfig {
      max_new_cards_per_session: 0,
      ..SchedulerConfig::default()
    })
    .await;
    env.introduce(&["m", "s", "a", "t"]).await;
    let mut hinted = due(&env, "mat", 5, 1, 1);
    hinted.hint_used = true;
    env.put(hinted).await;
    // Unseen lesson-1 words sit below medium reviews
    assert_eq!(next(&env, None).await.as_deref(), Some("mat"));
  }

  #[tokio::test]
  async fn test_unlocked_words_follow_introduced_phonemes() {
    let env = TestEnv::with_config(SchedulerConfig {
      max_new_cards_per_session: 0,
      ..SchedulerConfig::default()
    })
    .await;
    env.introduce(&["m", "s", "a"]).await;

    // "am" is the first lesson-1 word whose phonemes are all introduced
    assert_eq!(next(&env, None).await.as_deref(), Some("am"));
    assert_eq!(env.progress("am").await.unwrap().learning_step, 0);

    // "at" needs t, so "sam" comes next
    assert_eq!(next(&env, Some("am")).await.as_deref(), Some("sam"));
  }

  #[tokio::test]
  async fn test_new_words_before_low_priority_reviews() {
    let env = TestEnv::with_config(SchedulerConfig {
      max_new_cards_per_session: 0,
      ..SchedulerConfig::default()
    })
    .await;
    env.introduce(&["m", "s", "a", "t"]).await;
    for word in ["am", "at", "mat", "sam"] {
      env.put(due(&env, word, 5, 10, 0)).await;
    }

    assert_eq!(next(&env, None).await.as_deref(), Some("sat"));
    assert_eq!(next(&env, Some("sat")).await.as_deref(), Some("sam sat"));
    // Only mastered reviews remain; equal due time and ease fall back to word order
    assert_eq!(next(&env, Some("sam sat")).await.as_deref(), Some("am"));
  }

  #[tokio::test]
  async fn test_low_priority_reviews_by_overdue() {
    let env = TestEnv::with_config(SchedulerConfig {
      max_new_cards_per_session: 0,
      ..SchedulerConfig::default()
    })
    .await;
    env.introduce(&["m", "a"]).await;
    env.put(due(&env, "am", 5, 10, 1)).await;
    env.put(due(&env, "m", 4, 5, 3)).await;
    env.put(due(&env, "a", 4, 5, 2)).await;

    assert_eq!(next(&env, None).await.as_deref(), Some("m"));
    assert_eq!(next(&env, Some("m")).await.as_deref(), Some("a"));
  }

  #[tokio::test]
  async fn test_practice_fallback_prefers_struggling_cards() {
    let env = TestEnv::with_config(SchedulerConfig {
      max_new_cards_per_session: 0,
      ..SchedulerConfig::default()
    })
    .await;
    env.introduce(&["m", "s"]).await;

    let mut strong = learning(&env, "m", 1, 0);
    strong.successes = 4;
    strong.last_seen_at = Some(env.now() - Duration::days(3));
    let mut weak = learning(&env, "s", 1, 0);
    weak.successes = 1;
    weak.last_seen_at = Some(env.now());
    env.put(strong).await;
    env.put(weak).await;

    assert_eq!(next(&env, None).await.as_deref(), Some("s"));
    assert_eq!(next(&env, Some("s")).await.as_deref(), Some("m"));
  }

  #[tokio::test]
  async fn test_practice_tie_break_prefers_long_unseen() {
    let env = TestEnv::with_config(SchedulerConfig {
      max_new_cards_per_session: 0,
      ..SchedulerConfig::default()
    })
    .await;
    env.introduce(&["m", "s"]).await;

    let mut recent = learning(&env, "m", 1, 0);
    recent.last_seen_at = Some(env.now() - Duration::hours(1));
    let mut older = learning(&env, "s", 1, 0);
    older.last_seen_at = Some(env.now() - Duration::days(2));
    env.put(recent).await;
    env.put(older).await;

    assert_eq!(next(&env, None).await.as_deref(), Some("s"));
  }

  #[tokio::test]
  async fn test_exhaustion_when_only_candidate_is_excluded() {
    let env = TestEnv::with_config(SchedulerConfig {
      max_new_cards_per_session: 0,
      ..SchedulerConfig::default()
    })
    .await;
    env.introduce(&["m"]).await;
    env.put(due(&env, "m", 3, 1, 1)).await;

    assert_eq!(next(&env, Some("m")).await, None);
    assert_eq!(next(&env, Some(" M ")).await, None);
    assert_eq!(next(&env, None).await.as_deref(), Some("m"));
  }

  #[tokio::test]
  async fn test_mixed_case_exclusion_matches_word_card() {
    let phonemes = vec![PhonemeEntry::new("a", 1), PhonemeEntry::new("m", 1)];
    let am = Card::word("am", vec!["a".into(), "m".into()], 1);
    let cards = vec![Card::sound("a", 1), Card::sound("m", 1), am];
    let catalog = Catalog::new(phonemes, cards).unwrap();
    let env = TestEnv::with_catalog(
      catalog,
      SchedulerConfig {
        max_new_cards_per_session: 0,
        ..SchedulerConfig::default()
      },
    )
    .await;
    env.introduce(&["a", "m"]).await;

    assert_eq!(next(&env, None).await.as_deref(), Some("am"));
    assert_eq!(next(&env, Some("Am")).await, None);
  }

  #[tokio::test]
  async fn test_empty_exclusion_is_ignored() {
    let env = TestEnv::new().await;
    assert_eq!(next(&env, Some("")).await.as_deref(), Some("m"));
  }

  #[tokio::test]
  async fn test_excluded_phoneme_falls_through() {
    let env = TestEnv::with_config(SchedulerConfig {
      max_new_cards_per_session: 5,
      ..SchedulerConfig::default()
    })
    .await;
    // Only m is pending for a lesson-1 learner who already met s, a, t
    env.introduce(&["s", "a", "t"]).await;

    let card = next(&env, Some("m")).await.unwrap();
    assert_ne!(card, "m");
    assert!(!env.store.get_introduced_phonemes("kid").await.unwrap().contains("m"));
  }

  #[tokio::test]
  async fn test_session_cap_limits_introductions() {
    let env = TestEnv::new().await;
    let mut last: Option<String> = None;
    for _ in 0..6 {
      last = next(&env, last.as_deref()).await;
    }
    assert_eq!(env.store.get_introduced_phonemes("kid").await.unwrap().len(), 2);
  }

  #[tokio::test]
  async fn test_non_repeat_over_many_calls() {
    let env = TestEnv::new().await;
    let mut last: Option<String> = None;
    for _ in 0..40 {
      let card = next(&env, last.as_deref()).await;
      if let (Some(prev), Some(card)) = (&last, &card) {
        assert_ne!(prev, card);
      }
      last = card;
      env.clock.advance(Duration::minutes(1));
    }
  }

  #[tokio::test]
  async fn test_storage_failure_degrades_level() {
    let env = TestEnv::failing(&["get_due_review_cards", "get_learning_cards"]).await;
    // Review and learning levels fail; introduction still works
    assert_eq!(next(&env, None).await.as_deref(), Some("m"));
  }

  #[tokio::test]
  async fn test_learner_load_failure_propagates() {
    let env = TestEnv::failing(&["get_learner"]).await;
    let err = env.scheduler.next_card("kid", None).await.unwrap_err();
    assert!(matches!(err, SchedulerError::Store(_)));
  }

  #[tokio::test]
  async fn test_bookkeeping_failure_still_returns_card() {
    let env = TestEnv::failing(&["increment_cards_since_last_seen", "reset_cards_since_last_seen"]).await;
    assert_eq!(next(&env, None).await.as_deref(), Some("m"));
  }

  #[test]
  fn test_cmp_learning_order() {
    let now = Utc::now();
    let mut a = CardProgress::new("kid", "a", now);
    a.cards_since_last_seen = 2;
    a.last_seen_at = Some(now);
    let mut b = CardProgress::new("kid", "b", now);
    b.cards_since_last_seen = 4;
    let mut c = CardProgress::new("kid", "c", now);
    c.cards_since_last_seen = 2;
    c.last_seen_at = Some(now - Duration::hours(1));

    let mut cards = vec![a, b, c];
    cards.sort_by(cmp_learning);
    let order: Vec<_> = cards.iter().map(|p| p.word.as_str()).collect();
    assert_eq!(order, vec!["b", "c", "a"]);
  }

  #[test]
  fn test_cmp_practice_order() {
    let now = Utc::now();
    let mut seen = CardProgress::new("kid", "a", now);
    seen.last_seen_at = Some(now);
    let never = CardProgress::new("kid", "b", now);
    let mut strong = CardProgress::new("kid", "c", now);
    strong.successes = 3;

    let mut cards = vec![strong, seen, never];
    cards.sort_by(cmp_practice);
    let order: Vec<_> = cards.iter().map(|p| p.word.as_str()).collect();
    assert_eq!(order, vec!["b", "a", "c"]);
  }
}
