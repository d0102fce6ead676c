//! Lesson progression: a learner moves on once most of the current lesson has
//! graduated out of the learning phase.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{CardProgress, Learner};

use super::catalog::Catalog;

/// Progress summary for one lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonProgress {
  pub lesson: u8,
  pub total: usize,
  pub new_cards: usize,
  pub learning: usize,
  pub graduated: usize,
}

impl LessonProgress {
  pub fn percentage(&self) -> usize {
    if self.total > 0 {
      (self.graduated * 100) / self.total
    } else {
      0
    }
  }
}

pub fn lesson_progress(catalog: &Catalog, lesson: u8, progress: &[CardProgress]) -> LessonProgress {
  let by_word: HashMap<&str, &CardProgress> = progress.iter().map(|p| (p.word.as_str(), p)).collect();
  let mut summary = LessonProgress {
    lesson,
    total: 0,
    new_cards: 0,
    learning: 0,
    graduated: 0,
  };

  for card in catalog.cards_in_lesson(lesson) {
    summary.total += 1;
    match by_word.get(card.plain_text.as_str()) {
      None => summary.new_cards += 1,
      Some(p) if p.is_graduated() => summary.graduated += 1,
      Some(_) => summary.learning += 1,
    }
  }
  summary
}

/// The lesson the learner should move to, if the current one has reached
/// `threshold` percent graduated and a later lesson exists.
///
/// Lessons without cards are skipped, and a learner parked on one moves on
/// straight away.
pub fn next_lesson(
  catalog: &Catalog,
  learner: &Learner,
  progress: &[CardProgress],
  threshold: u8,
) -> Option<u8> {
  let current = learner.current_lesson;
  let following = catalog
    .cards()
    .iter()
    .map(|c| c.lesson)
    .filter(|&lesson| lesson > current)
    .min()?;

  let summary = lesson_progress(catalog, current, progress);
  if summary.total == 0 || summary.percentage() >= threshold as usize {
    Some(following)
  } else {
    None
  }
}
