//! Card-level prerequisite rule.
//!
//! A sound card is unlocked once its own symbol has been introduced. A word or
//! sentence is unlocked only when every one of its phonemes has been
//! introduced.

use std::collections::BTreeSet;

use crate::domain::{Card, CardKind};

use super::catalog::Catalog;

pub fn is_unlocked(card: &Card, introduced: &BTreeSet<String>) -> bool {
  match card.kind {
    CardKind::Phoneme | CardKind::Digraph => introduced.contains(&card.plain_text),
    CardKind::Word | CardKind::Sentence => card.phonemes.iter().all(|p| introduced.contains(p)),
  }
}

/// Cards currently eligible to be shown, in catalog order.
pub fn unlocked_cards<'a>(catalog: &'a Catalog, introduced: &BTreeSet<String>) -> Vec<&'a Card> {
  if introduced.is_empty() {
    return Vec::new();
  }
  catalog
    .cards()
    .iter()
    .filter(|card| is_unlocked(card, introduced))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::curriculum::seed::builtin_catalog;

  fn set(symbols: &[&str]) -> BTreeSet<String> {
    symbols.iter().map(|s| s.to_string()).collect()
  }

  fn texts<'a>(cards: &[&'a Card]) -> Vec<&'a str> {
    cards.iter().map(|c| c.plain_text.as_str()).collect()
  }

  #[test]
  fn test_empty_set_unlocks_nothing() {
    let catalog = builtin_catalog().unwrap();
    assert!(unlocked_cards(&catalog, &BTreeSet::new()).is_empty());
  }

  #[test]
  fn test_word_needs_every_phoneme() {
    let catalog = builtin_catalog().unwrap();

    let unlocked = unlocked_cards(&catalog, &set(&["m", "s"]));
    let unlocked = texts(&unlocked);
    assert!(unlocked.contains(&"m"));
    assert!(unlocked.contains(&"s"));
    assert!(!unlocked.contains(&"am"));

    let unlocked = unlocked_cards(&catalog, &set(&["m", "s", "a"]));
    assert!(texts(&unlocked).contains(&"am"));
  }

  #[test]
  fn test_sound_card_needs_own_symbol_only() {
    let catalog = builtin_catalog().unwrap();
    let unlocked = unlocked_cards(&catalog, &set(&["sh"]));
    assert_eq!(texts(&unlocked), vec!["sh"]);
  }

  #[test]
  fn test_result_follows_catalog_order() {
    let catalog = builtin_catalog().unwrap();
    let introduced: BTreeSet<String> = catalog.phonemes().iter().map(|p| p.symbol.clone()).collect();
    let unlocked = unlocked_cards(&catalog, &introduced);
    let expected: Vec<&str> = catalog.cards().iter().map(|c| c.plain_text.as_str()).collect();
    assert_eq!(texts(&unlocked), expected);
  }

  #[test]
  fn test_unlock_is_monotonic() {
    let catalog = builtin_catalog().unwrap();
    let mut introduced = BTreeSet::new();
    let mut previous: Vec<String> = Vec::new();

    for entry in catalog.phonemes() {
      introduced.insert(entry.symbol.clone());
      let current: Vec<String> = unlocked_cards(&catalog, &introduced)
        .iter()
        .map(|c| c.id.clone())
        .collect();
      for id in &previous {
        assert!(current.contains(id), "{} was unlocked before adding {}", id, entry.symbol);
      }
      assert!(current.len() >= previous.len());
      previous = current;
    }
  }

  #[test]
  fn test_sentence_unlocks_with_its_words() {
    let catalog = builtin_catalog().unwrap();
    let sentence = catalog.card_by_text("pat sat").unwrap();
    assert!(!is_unlocked(sentence, &set(&["p", "a"])));
    assert!(is_unlocked(sentence, &set(&["p", "a", "t", "s"])));
  }
}
