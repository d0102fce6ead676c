//! Recording the outcome of an attempt.

use crate::curriculum::next_lesson;
use crate::domain::{AttemptOutcome, CardProgress};
use crate::error::SchedulerError;

use super::card_selector::Scheduler;
use super::learning::{apply_learning_outcome, apply_review_outcome};
use super::quality::map_pronunciation_to_quality;

impl Scheduler {
  /// Apply an attempt to the learner's progress on `word`.
  ///
  /// Storage errors propagate so a completed attempt is never silently lost.
  pub async fn record_card_completion(
    &self,
    learner_id: &str,
    word: &str,
    outcome: AttemptOutcome,
  ) -> Result<CardProgress, SchedulerError> {
    let now = self.clock.now();
    let session = self.sessions.get(learner_id, now);
    let _ctx = session.lock().await;

    let mut learner = self.get_learner(learner_id).await?;
    let card = self
      .catalog
      .card_by_text(word)
      .ok_or_else(|| SchedulerError::CardNotFound(word.to_string()))?;

    let mut quality = map_pronunciation_to_quality(outcome.match_score, outcome.attempts, outcome.needed_help);
    if !outcome.success {
      // A failed attempt never lengthens an interval
      quality = quality.min(2);
    }

    let mut progress = self
      .store
      .get_card_progress(learner_id, &card.plain_text)
      .await?
      .unwrap_or_else(|| CardProgress::new(learner_id, &card.plain_text, now));

    progress.attempts += 1;
    if outcome.success {
      progress.successes += 1;
    }
    progress.hint_used = outcome.needed_help;
    progress.last_quality = Some(quality);
    progress.last_seen_at = Some(now);

    if progress.is_learning() {
      if apply_learning_outcome(&mut progress, outcome.success, quality, now) {
        tracing::info!(
          "{} graduated {:?} (next review in {} days)",
          learner_id,
          card.plain_text,
          progress.interval_days
        );
      }
    } else {
      apply_review_outcome(&mut progress, quality, now);
    }

    self.store.create_or_update_card_progress(&progress).await?;
    tracing::debug!(
      "Recorded {:?} for {}: quality {}, step {}, interval {}d",
      card.plain_text,
      learner_id,
      quality,
      progress.learning_step,
      progress.interval_days
    );

    learner.total_cards_completed += 1;
    let all = self.store.get_all_cards_for_learner(learner_id).await?;
    if let Some(lesson) = next_lesson(&self.catalog, &learner, &all, self.config.lesson_mastery_threshold) {
      tracing::info!("{} advanced from lesson {} to {}", learner_id, learner.current_lesson, lesson);
      learner.current_lesson = lesson;
    }
    self.store.save_learner(&learner).await?;

    Ok(progress)
  }
}
