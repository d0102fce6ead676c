use serde::{Deserialize, Serialize};

/// What a card teaches. Phonemes and digraphs are single sounds; words and
/// sentences are built from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
  #[serde(alias = "letter")]
  Phoneme,
  Digraph,
  Word,
  Sentence,
}

impl CardKind {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "phoneme" | "letter" => Some(Self::Phoneme),
      "digraph" => Some(Self::Digraph),
      "word" => Some(Self::Word),
      "sentence" => Some(Self::Sentence),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Phoneme => "phoneme",
      Self::Digraph => "digraph",
      Self::Word => "word",
      Self::Sentence => "sentence",
    }
  }

  /// Phoneme and digraph cards introduce a sound rather than practise one.
  pub fn is_sound(&self) -> bool {
    match self {
      Self::Phoneme | Self::Digraph => true,
      Self::Word | Self::Sentence => false,
    }
  }
}

/// One entry of the phoneme table: a sound and the lesson it is first taught in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhonemeEntry {
  pub symbol: String,
  pub lesson: u8,
}

impl PhonemeEntry {
  pub fn new(symbol: &str, lesson: u8) -> Self {
    Self {
      symbol: symbol.to_string(),
      lesson,
    }
  }
}

/// Immutable catalog card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
  pub id: String,
  pub kind: CardKind,
  pub display_text: String,
  /// Lowercase text used as the progress key and for repeat exclusion
  pub plain_text: String,
  pub phonemes: Vec<String>,
  /// Lesson in which the card first becomes introducible (1..=100)
  pub lesson: u8,
  #[serde(default)]
  pub asset_refs: Vec<String>,
  /// Word references, only populated for sentences
  #[serde(default)]
  pub words: Vec<String>,
}

impl Card {
  pub fn sound(symbol: &str, lesson: u8) -> Self {
    let kind = if symbol.chars().count() > 1 {
      CardKind::Digraph
    } else {
      CardKind::Phoneme
    };
    Self {
      id: format!("{}-{}", kind.as_str(), symbol),
      kind,
      display_text: symbol.to_string(),
      plain_text: symbol.to_string(),
      phonemes: vec![symbol.to_string()],
      lesson,
      asset_refs: vec![format!("audio/sounds/{}.mp3", symbol)],
      words: Vec::new(),
    }
  }

  pub fn word(text: &str, phonemes: Vec<String>, lesson: u8) -> Self {
    Self {
      id: format!("word-{}", text),
      kind: CardKind::Word,
      display_text: text.to_string(),
      plain_text: text.to_string(),
      phonemes,
      lesson,
      asset_refs: vec![
        format!("images/words/{}.png", text),
        format!("audio/words/{}.mp3", text),
      ],
      words: Vec::new(),
    }
  }

  pub fn sentence(words: &[&Card], lesson: u8) -> Self {
    let plain_text = words
      .iter()
      .map(|w| w.plain_text.as_str())
      .collect::<Vec<_>>()
      .join(" ");
    let mut display_text = capitalize(&plain_text);
    display_text.push('.');

    Self {
      id: format!("sentence-{}", plain_text.replace(' ', "-")),
      kind: CardKind::Sentence,
      display_text,
      phonemes: words.iter().flat_map(|w| w.phonemes.iter().cloned()).collect(),
      lesson,
      asset_refs: vec![format!("audio/sentences/{}.mp3", plain_text.replace(' ', "_"))],
      words: words.iter().map(|w| w.plain_text.clone()).collect(),
      plain_text,
    }
  }

  pub fn is_sound(&self) -> bool {
    self.kind.is_sound()
  }
}

fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}
