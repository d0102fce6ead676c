//! Splits written words into the phoneme symbols of a phoneme table.
//!
//! Matching is greedy longest-first so digraphs such as `sh` win over their
//! single letters. Input is NFC-normalized and lowercased before matching;
//! whitespace, apostrophes and hyphens are skipped.

use unicode_normalization::UnicodeNormalization;

use crate::error::SegmentError;

/// Normalize user or curriculum text to the form used as a progress key.
pub fn normalize_text(text: &str) -> String {
  text.nfc().collect::<String>().trim().to_lowercase()
}

fn is_separator(c: char) -> bool {
  c.is_whitespace() || matches!(c, '\'' | '\u{2019}' | '-' | '.' | ',' | '!' | '?')
}

/// Segment `word` using `symbols` as the phoneme inventory.
pub fn segment_word<S: AsRef<str>>(word: &str, symbols: &[S]) -> Result<Vec<String>, SegmentError> {
  let normalized = normalize_text(word);
  let chars: Vec<char> = normalized.chars().collect();

  // Longest symbols first; ties keep table order
  let mut inventory: Vec<Vec<char>> = symbols
    .iter()
    .map(|s| s.as_ref().chars().collect::<Vec<_>>())
    .filter(|s| !s.is_empty())
    .collect();
  inventory.sort_by(|a, b| b.len().cmp(&a.len()));

  let mut phonemes = Vec::new();
  let mut i = 0;

  while i < chars.len() {
    if is_separator(chars[i]) {
      i += 1;
      continue;
    }

    let matched = inventory
      .iter()
      .find(|symbol| chars[i..].starts_with(symbol.as_slice()));

    match matched {
      Some(symbol) => {
        phonemes.push(symbol.iter().collect());
        i += symbol.len();
      }
      None => return Err(SegmentError::UnknownGrapheme(chars[i].to_string())),
    }
  }

  if phonemes.is_empty() {
    return Err(SegmentError::Empty);
  }

  Ok(phonemes)
}
