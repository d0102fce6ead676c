//! Curriculum loading from JSON files.
//!
//! A curriculum file holds the phoneme table and the card list:
//!
//! ```json
//! {
//!   "phonemes": [{ "symbol": "m", "lesson": 1 }],
//!   "cards": [{ "id": "word-am", "kind": "word", "text": "am", "lesson": 1 }]
//! }
//! ```
//!
//! Word phonemes may be omitted, in which case they are derived by
//! segmenting the text against the phoneme table.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::domain::{Card, CardKind, PhonemeEntry};
use crate::error::CatalogError;

use super::catalog::Catalog;
use super::segment::{normalize_text, segment_word};

/// Card definition as authored in a curriculum file.
#[derive(Debug, Clone, Deserialize)]
pub struct CardDefinition {
  pub id: String,
  pub kind: CardKind,
  pub text: String,
  #[serde(default)]
  pub display_text: Option<String>,
  #[serde(default)]
  pub phonemes: Option<Vec<String>>,
  pub lesson: u8,
  #[serde(default)]
  pub asset_refs: Vec<String>,
  #[serde(default)]
  pub words: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CurriculumData {
  pub phonemes: Vec<PhonemeEntry>,
  pub cards: Vec<CardDefinition>,
}

impl CardDefinition {
  fn into_card(self, symbols: &[&str]) -> Result<Card, CatalogError> {
    let plain_text = normalize_text(&self.text);
    let phonemes = match self.phonemes {
      Some(phonemes) => phonemes,
      None => match self.kind {
        CardKind::Phoneme | CardKind::Digraph => vec![plain_text.clone()],
        CardKind::Word | CardKind::Sentence => {
          segment_word(&plain_text, symbols).map_err(|source| CatalogError::Segment {
            word: plain_text.clone(),
            source,
          })?
        }
      },
    };

    Ok(Card {
      id: self.id,
      kind: self.kind,
      display_text: self.display_text.unwrap_or_else(|| self.text.clone()),
      plain_text,
      phonemes,
      lesson: self.lesson,
      asset_refs: self.asset_refs,
      words: self.words.iter().map(|w| normalize_text(w)).collect(),
    })
  }
}

impl Catalog {
  pub fn from_json(content: &str) -> Result<Self, CatalogError> {
    let data: CurriculumData = serde_json::from_str(content)?;
    let symbols: Vec<&str> = data.phonemes.iter().map(|p| p.symbol.as_str()).collect();
    let cards = data
      .cards
      .into_iter()
      .map(|def| def.into_card(&symbols))
      .collect::<Result<Vec<_>, _>>()?;
    Catalog::new(data.phonemes, cards)
  }
}

/// Load and validate a curriculum file.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
  let content = fs::read_to_string(path)
    .map_err(|e| CatalogError::Io(path.display().to_string(), e.to_string()))?;
  let catalog = Catalog::from_json(&content)?;
  tracing::debug!("Loaded {} cards from {}", catalog.len(), path.display());
  Ok(catalog)
}
