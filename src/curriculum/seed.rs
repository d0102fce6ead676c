//! Built-in starter curriculum used when no curriculum file is configured.

use crate::domain::{Card, PhonemeEntry};
use crate::error::CatalogError;

use super::catalog::Catalog;
use super::segment::segment_word;

/// Canonical introduction order.
const PHONEMES: [(&str, u8); 20] = [
  // Lesson 1
  ("m", 1),
  ("s", 1),
  ("a", 1),
  ("t", 1),
  // Lesson 2
  ("p", 2),
  ("i", 2),
  ("n", 2),
  // Lesson 3
  ("d", 3),
  ("o", 3),
  ("g", 3),
  // Lesson 4
  ("h", 4),
  ("e", 4),
  ("l", 4),
  // Lesson 5
  ("sh", 5),
  ("ch", 5),
  ("c", 5),
  ("k", 5),
  // Lesson 6
  ("th", 6),
  ("ee", 6),
  ("ck", 6),
];

const WORDS: [(&str, u8); 58] = [
  // Lesson 1
  ("am", 1),
  ("at", 1),
  ("sat", 1),
  ("mat", 1),
  ("sam", 1),
  // Lesson 2
  ("map", 2),
  ("tap", 2),
  ("pat", 2),
  ("sit", 2),
  ("pit", 2),
  ("tin", 2),
  ("pin", 2),
  ("nap", 2),
  ("man", 2),
  ("pan", 2),
  ("in", 2),
  ("is", 2),
  ("it", 2),
  // Lesson 3
  ("dog", 3),
  ("dot", 3),
  ("got", 3),
  ("nod", 3),
  ("pot", 3),
  ("top", 3),
  ("mop", 3),
  ("dig", 3),
  ("pig", 3),
  ("dad", 3),
  ("on", 3),
  // Lesson 4
  ("hen", 4),
  ("pet", 4),
  ("leg", 4),
  ("hot", 4),
  ("hat", 4),
  ("hill", 4),
  ("lid", 4),
  ("ten", 4),
  ("men", 4),
  ("had", 4),
  // Lesson 5
  ("ship", 5),
  ("shop", 5),
  ("chin", 5),
  ("chop", 5),
  ("dish", 5),
  ("chip", 5),
  ("chips", 5),
  ("cat", 5),
  ("kid", 5),
  ("can", 5),
  // Lesson 6
  ("this", 6),
  ("that", 6),
  ("them", 6),
  ("thin", 6),
  ("see", 6),
  ("seed", 6),
  ("sheep", 6),
  ("neck", 6),
  ("deck", 6),
];

const SENTENCES: [(&[&str], u8); 8] = [
  (&["sam", "sat"], 1),
  (&["pat", "sat"], 2),
  (&["it", "is", "tin"], 2),
  (&["dog", "is", "on", "pot"], 3),
  (&["ten", "men", "sat"], 4),
  (&["dad", "had", "chips"], 5),
  (&["cat", "can", "nap"], 5),
  (&["sheep", "see", "them"], 6),
];

pub fn builtin_phonemes() -> Vec<PhonemeEntry> {
  PHONEMES
    .iter()
    .map(|(symbol, lesson)| PhonemeEntry::new(symbol, *lesson))
    .collect()
}

pub fn builtin_cards() -> Result<Vec<Card>, CatalogError> {
  let symbols: Vec<&str> = PHONEMES.iter().map(|(symbol, _)| *symbol).collect();
  let mut cards = Vec::new();

  // Sound cards come first within the catalog, in introduction order
  for (symbol, lesson) in PHONEMES {
    cards.push(Card::sound(symbol, lesson));
  }

  for (text, lesson) in WORDS {
    let phonemes = segment_word(text, &symbols).map_err(|source| CatalogError::Segment {
      word: text.to_string(),
      source,
    })?;
    cards.push(Card::word(text, phonemes, lesson));
  }

  for (words, lesson) in SENTENCES {
    let refs: Vec<Card> = words
      .iter()
      .map(|w| {
        cards
          .iter()
          .find(|c| c.plain_text == *w)
          .cloned()
          .ok_or_else(|| CatalogError::UnknownWord {
            sentence: words.join(" "),
            word: w.to_string(),
          })
      })
      .collect::<Result<_, _>>()?;
    let refs: Vec<&Card> = refs.iter().collect();
    cards.push(Card::sentence(&refs, lesson));
  }

  Ok(cards)
}

pub fn builtin_catalog() -> Result<Catalog, CatalogError> {
  Catalog::new(builtin_phonemes(), builtin_cards()?)
}
