//! Error taxonomy for the scheduler.
//!
//! - [`CatalogError`]: curriculum data that breaks an invariant. Fatal at load time.
//! - [`StoreError`]: the progress store could not complete a request.
//! - [`SchedulerError`]: what callers of the public operations see.
//!
//! Running out of cards is not an error; selection returns `Ok(None)`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("Card {0} has no phonemes")]
  EmptyPhonemes(String),
  #[error("Card {card} references unknown phoneme {phoneme:?}")]
  UnknownPhoneme { card: String, phoneme: String },
  #[error("Sound card {0} must have exactly one phoneme equal to its text")]
  SoundMismatch(String),
  #[error("Duplicate card id {0}")]
  DuplicateId(String),
  #[error("Card {card} text {text:?} is not normalized")]
  UnnormalizedText { card: String, text: String },
  #[error("Duplicate card text {0:?}")]
  DuplicateText(String),
  #[error("Card {card} has lesson {lesson}, expected 1..=100")]
  LessonOutOfRange { card: String, lesson: u8 },
  #[error("Sentence {0} has no words")]
  EmptySentence(String),
  #[error("Sentence {sentence} references unknown word {word:?}")]
  UnknownWord { sentence: String, word: String },
  #[error("Phoneme table is not sorted by lesson at {0:?}")]
  UnsortedPhonemes(String),
  #[error("Duplicate phoneme {0:?}")]
  DuplicatePhoneme(String),
  #[error("Phoneme {0:?} has no sound card")]
  MissingSoundCard(String),
  #[error("Could not segment {word:?}: {source}")]
  Segment {
    word: String,
    #[source]
    source: SegmentError,
  },
  #[error("IO error reading {0}: {1}")]
  Io(String, String),
  #[error("Parse error in curriculum: {0}")]
  Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
  #[error("no phoneme matches {0:?}")]
  UnknownGrapheme(String),
  #[error("nothing to segment")]
  Empty,
}

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Database(#[from] rusqlite::Error),
  #[error("Database unavailable")]
  LockPoisoned,
  #[error("Corrupt record: {0}")]
  Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum SchedulerError {
  #[error("Learner not found: {0}")]
  LearnerNotFound(String),
  #[error("Card not found: {0}")]
  CardNotFound(String),
  #[error("Learner already exists: {0}")]
  LearnerExists(String),
  #[error(transparent)]
  Store(#[from] StoreError),
}

impl SchedulerError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::LearnerNotFound(_) | Self::CardNotFound(_))
  }
}
