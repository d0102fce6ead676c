//! Learning phase for cards that have not yet graduated to SM-2.
//!
//! A card climbs steps 0 → 1 → 2 on successful attempts and graduates at
//! step 3, where SM-2 takes over. Steps 0 and 1 are only re-shown once enough
//! other cards have been seen in between.

use chrono::{DateTime, Utc};

use crate::domain::{CardProgress, GRADUATED_STEP};

use super::sm2::calculate_sm2_at;

/// Whether a learning card has had enough intervening cards to be shown again.
pub fn is_ready(progress: &CardProgress, min_spacing: u32) -> bool {
  match progress.learning_step {
    0 | 1 => progress.cards_since_last_seen >= min_spacing,
    2 => true,
    _ => false,
  }
}

/// Apply one attempt to a card still in the learning phase.
///
/// Returns true when this attempt graduated the card.
pub fn apply_learning_outcome(
  progress: &mut CardProgress,
  success: bool,
  quality: u8,
  now: DateTime<Utc>,
) -> bool {
  if !success {
    progress.next_review_at = now;
    return false;
  }

  progress.learning_step = (progress.learning_step + 1).min(GRADUATED_STEP);
  if progress.learning_step < GRADUATED_STEP {
    progress.next_review_at = now;
    return false;
  }

  // Graduation hands the card to SM-2 from a fresh repetition count
  let result = calculate_sm2_at(quality, progress.ease_factor, 0, 0, now);
  progress.ease_factor = result.ease_factor;
  progress.interval_days = result.interval_days;
  progress.repetitions = result.repetitions;
  progress.next_review_at = result.next_review;
  true
}

/// Apply one attempt to a graduated card.
pub fn apply_review_outcome(progress: &mut CardProgress, quality: u8, now: DateTime<Utc>) {
  let result = calculate_sm2_at(
    quality,
    progress.ease_factor,
    progress.interval_days,
    progress.repetitions,
    now,
  );
  progress.ease_factor = result.ease_factor;
  progress.interval_days = result.interval_days;
  progress.repetitions = result.repetitions;
  progress.next_review_at = result.next_review;
}
