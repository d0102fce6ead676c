//! Session queue: a batch of cards for one sitting.

use serde::Serialize;

use crate::domain::Card;
use crate::error::SchedulerError;

use super::card_selector::Scheduler;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardQueue {
  pub cards: Vec<Card>,
  /// The batch filled up, so more cards are likely available
  pub has_more: bool,
  /// Learner's current lesson
  pub current_level: u8,
}

impl Scheduler {
  /// Build a queue of up to `cards_per_session` cards.
  ///
  /// Starts a new sitting, so the new-phoneme allowance is reset. Each pick
  /// excludes the previous card, and the build stops at the first empty pick.
  pub async fn card_queue(&self, learner_id: &str) -> Result<CardQueue, SchedulerError> {
    let now = self.clock.now();
    let session = self.sessions.get(learner_id, now);
    let mut ctx = session.lock().await;

    let learner = self.get_learner(learner_id).await?;
    ctx.restart();

    let limit = self.config.cards_per_session;
    let mut cards: Vec<Card> = Vec::with_capacity(limit);
    while cards.len() < limit {
      let exclude = cards.last().map(|c| c.plain_text.clone());
      match self.select_next(&mut ctx, learner_id, exclude.as_deref()).await? {
        Some(card) => cards.push(card),
        None => break,
      }
    }

    tracing::debug!(
      "Built queue of {} cards for {} ({} new phonemes)",
      cards.len(),
      learner_id,
      ctx.new_cards_introduced
    );

    Ok(CardQueue {
      has_more: cards.len() == limit,
      current_level: learner.current_lesson,
      cards,
    })
  }
}
