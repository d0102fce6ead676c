//! Immutable curriculum catalog.
//!
//! Built once at startup; every invariant is checked in [`Catalog::new`] so
//! selection code can rely on them without re-validating.

use std::collections::{HashMap, HashSet};

use crate::config;
use crate::domain::{Card, CardKind, PhonemeEntry};
use crate::error::{CatalogError, SegmentError};

use super::segment::{normalize_text, segment_word};

pub const MIN_LESSON: u8 = 1;
pub const MAX_LESSON: u8 = 100;

#[derive(Debug, Clone)]
pub struct Catalog {
  phonemes: Vec<PhonemeEntry>,
  cards: Vec<Card>,
  by_id: HashMap<String, usize>,
  by_text: HashMap<String, usize>,
}

impl Catalog {
  pub fn new(phonemes: Vec<PhonemeEntry>, cards: Vec<Card>) -> Result<Self, CatalogError> {
    validate_phoneme_table(&phonemes)?;

    let symbols: HashSet<&str> = phonemes.iter().map(|p| p.symbol.as_str()).collect();
    let mut by_id = HashMap::with_capacity(cards.len());
    let mut by_text = HashMap::with_capacity(cards.len());

    for (idx, card) in cards.iter().enumerate() {
      if !(MIN_LESSON..=MAX_LESSON).contains(&card.lesson) {
        return Err(CatalogError::LessonOutOfRange {
          card: card.id.clone(),
          lesson: card.lesson,
        });
      }
      if card.plain_text != normalize_text(&card.plain_text) {
        return Err(CatalogError::UnnormalizedText {
          card: card.id.clone(),
          text: card.plain_text.clone(),
        });
      }
      if by_id.insert(card.id.clone(), idx).is_some() {
        return Err(CatalogError::DuplicateId(card.id.clone()));
      }
      if by_text.insert(card.plain_text.clone(), idx).is_some() {
        return Err(CatalogError::DuplicateText(card.plain_text.clone()));
      }
      if card.phonemes.is_empty() {
        return Err(CatalogError::EmptyPhonemes(card.id.clone()));
      }
      if let Some(unknown) = card.phonemes.iter().find(|p| !symbols.contains(p.as_str())) {
        return Err(CatalogError::UnknownPhoneme {
          card: card.id.clone(),
          phoneme: unknown.clone(),
        });
      }

      match card.kind {
        CardKind::Phoneme | CardKind::Digraph => {
          if card.phonemes.len() != 1 || card.phonemes[0] != card.plain_text {
            return Err(CatalogError::SoundMismatch(card.id.clone()));
          }
        }
        CardKind::Word => {}
        CardKind::Sentence => {
          if card.words.is_empty() {
            return Err(CatalogError::EmptySentence(card.id.clone()));
          }
        }
      }
    }

    // Sentence words must resolve to word cards
    for card in cards.iter().filter(|c| c.kind == CardKind::Sentence) {
      for word in &card.words {
        let resolves = by_text
          .get(word)
          .map(|&idx| cards[idx].kind == CardKind::Word)
          .unwrap_or(false);
        if !resolves {
          return Err(CatalogError::UnknownWord {
            sentence: card.id.clone(),
            word: word.clone(),
          });
        }
      }
    }

    for entry in &phonemes {
      let has_card = by_text
        .get(&entry.symbol)
        .map(|&idx| cards[idx].is_sound())
        .unwrap_or(false);
      if !has_card {
        return Err(CatalogError::MissingSoundCard(entry.symbol.clone()));
      }
    }

    let catalog = Self {
      phonemes,
      cards,
      by_id,
      by_text,
    };
    catalog.warn_low_prerequisite_coverage();
    Ok(catalog)
  }

  pub fn phonemes(&self) -> &[PhonemeEntry] {
    &self.phonemes
  }

  pub fn cards(&self) -> &[Card] {
    &self.cards
  }

  pub fn len(&self) -> usize {
    self.cards.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cards.is_empty()
  }

  pub fn card_by_id(&self, id: &str) -> Option<&Card> {
    self.by_id.get(id).map(|&idx| &self.cards[idx])
  }

  /// Lookup by plain text; input is normalized first.
  pub fn card_by_text(&self, text: &str) -> Option<&Card> {
    self
      .by_text
      .get(text)
      .or_else(|| self.by_text.get(&normalize_text(text)))
      .map(|&idx| &self.cards[idx])
  }

  pub fn cards_in_lesson(&self, lesson: u8) -> Vec<&Card> {
    self.cards.iter().filter(|c| c.lesson == lesson).collect()
  }

  /// Phoneme table entries taught up to and including `lesson`, in
  /// introduction order.
  pub fn phonemes_up_to_lesson(&self, lesson: u8) -> Vec<&PhonemeEntry> {
    self.phonemes.iter().filter(|p| p.lesson <= lesson).collect()
  }

  pub fn phoneme_lesson(&self, symbol: &str) -> Option<u8> {
    self.phonemes.iter().find(|p| p.symbol == symbol).map(|p| p.lesson)
  }

  /// The phoneme or digraph card that introduces `symbol`.
  pub fn phoneme_card(&self, symbol: &str) -> Option<&Card> {
    self.card_by_text(symbol).filter(|c| c.is_sound())
  }

  pub fn max_lesson(&self) -> u8 {
    self.cards.iter().map(|c| c.lesson).max().unwrap_or(MIN_LESSON)
  }

  pub fn segment(&self, word: &str) -> Result<Vec<String>, SegmentError> {
    let symbols: Vec<&str> = self.phonemes.iter().map(|p| p.symbol.as_str()).collect();
    segment_word(word, &symbols)
  }

  /// Share of a card's phonemes already taught by the card's own lesson.
  /// Authoring aid only; unlocking always requires every phoneme.
  pub fn prerequisite_coverage(&self, card: &Card) -> f64 {
    if card.phonemes.is_empty() {
      return 0.0;
    }
    let taught = card
      .phonemes
      .iter()
      .filter(|p| self.phoneme_lesson(p).is_some_and(|lesson| lesson <= card.lesson))
      .count();
    taught as f64 / card.phonemes.len() as f64
  }

  fn warn_low_prerequisite_coverage(&self) {
    for card in self.cards.iter().filter(|c| !c.is_sound()) {
      let coverage = self.prerequisite_coverage(card);
      if coverage < config::AUTHORING_PREREQUISITE_SHARE {
        tracing::warn!(
          "Card {} (lesson {}) has only {:.0}% of its phonemes taught by its lesson",
          card.id,
          card.lesson,
          coverage * 100.0
        );
      }
    }
  }
}

fn validate_phoneme_table(phonemes: &[PhonemeEntry]) -> Result<(), CatalogError> {
  let mut seen = HashSet::with_capacity(phonemes.len());
  let mut last_lesson = MIN_LESSON;

  for entry in phonemes {
    if !(MIN_LESSON..=MAX_LESSON).contains(&entry.lesson) {
      return Err(CatalogError::LessonOutOfRange {
        card: entry.symbol.clone(),
        lesson: entry.lesson,
      });
    }
    if entry.lesson < last_lesson {
      return Err(CatalogError::UnsortedPhonemes(entry.symbol.clone()));
    }
    if !seen.insert(entry.symbol.as_str()) {
      return Err(CatalogError::DuplicatePhoneme(entry.symbol.clone()));
    }
    last_lesson = entry.lesson;
  }
  Ok(())
}
