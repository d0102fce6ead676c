use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Learning step at which a card leaves the learning phase for SM-2.
pub const GRADUATED_STEP: u8 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Learner {
  pub id: String,
  pub current_lesson: u8,
  pub total_cards_completed: u32,
  pub created_at: DateTime<Utc>,
}

impl Learner {
  pub fn new(id: &str) -> Self {
    Self {
      id: id.to_string(),
      current_lesson: 1,
      total_cards_completed: 0,
      created_at: Utc::now(),
    }
  }
}

/// Display priority of a due review, derived from the last attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
  High,
  Medium,
  Low,
}

impl Priority {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::High => "high",
      Self::Medium => "medium",
      Self::Low => "low",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "high" => Some(Self::High),
      "medium" => Some(Self::Medium),
      "low" => Some(Self::Low),
      _ => None,
    }
  }
}

/// Scheduling state for one learner x card pair. Created on first exposure,
/// never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardProgress {
  pub learner_id: String,
  /// Plain text of the card
  pub word: String,

  // SM-2 fields
  pub ease_factor: f64,
  pub interval_days: i64,
  pub repetitions: i64,
  pub next_review_at: DateTime<Utc>,

  // 0-2 = learning, 3 = graduated to SM-2
  pub learning_step: u8,
  pub cards_since_last_seen: u32,

  // Stats
  pub attempts: u32,
  pub successes: u32,
  pub last_seen_at: Option<DateTime<Utc>>,
  pub hint_used: bool,
  pub last_quality: Option<u8>,
}

impl CardProgress {
  pub fn new(learner_id: &str, word: &str, now: DateTime<Utc>) -> Self {
    Self {
      learner_id: learner_id.to_string(),
      word: word.to_string(),
      ease_factor: DEFAULT_EASE_FACTOR,
      interval_days: 0,
      repetitions: 0,
      next_review_at: now,
      learning_step: 0,
      cards_since_last_seen: 0,
      attempts: 0,
      successes: 0,
      last_seen_at: None,
      hint_used: false,
      last_quality: None,
    }
  }

  pub fn is_graduated(&self) -> bool {
    self.learning_step >= GRADUATED_STEP
  }

  pub fn is_learning(&self) -> bool {
    !self.is_graduated()
  }

  /// Graduated and scheduled at or before `now`.
  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    self.is_graduated() && self.next_review_at <= now
  }

  pub fn priority(&self) -> Priority {
    match self.last_quality {
      Some(quality) => crate::srs::calculate_card_priority(self.hint_used, quality, self.interval_days),
      None => Priority::High,
    }
  }
}

/// Most overdue first, then weaker (lower ease) cards, then by word.
pub fn cmp_overdue(a: &CardProgress, b: &CardProgress) -> Ordering {
  a.next_review_at
    .cmp(&b.next_review_at)
    .then_with(|| a.ease_factor.total_cmp(&b.ease_factor))
    .then_with(|| a.word.cmp(&b.word))
}

/// What the UI reports after the learner attempts a card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttemptOutcome {
  pub success: bool,
  pub attempts: u32,
  pub match_score: f64,
  pub needed_help: bool,
}
