//! Mapping attempt outcomes to SM-2 quality and deriving review priority.

use crate::domain::Priority;

/// Map a pronunciation match score (0.0-1.0) to an SM-2 quality (0-5).
///
/// - needed help → 1
/// - 3+ attempts and still under 0.7 → 0
/// - ≥ 0.9: 5 on the first try, otherwise 4
/// - ≥ 0.7: 4 on the second try, otherwise 3
/// - anything else → 2
pub fn map_pronunciation_to_quality(match_score: f64, attempts: u32, needed_help: bool) -> u8 {
  if needed_help {
    return 1;
  }
  if attempts >= 3 && match_score < 0.7 {
    return 0;
  }
  if match_score >= 0.9 {
    return if attempts == 1 { 5 } else { 4 };
  }
  if match_score >= 0.7 {
    return if attempts == 2 { 4 } else { 3 };
  }
  2
}

pub fn calculate_card_priority(hint_used: bool, quality: u8, interval_days: i64) -> Priority {
  if hint_used || quality <= 2 {
    Priority::Medium
  } else if quality >= 4 && interval_days >= 3 {
    Priority::Low
  } else {
    Priority::High
  }
}
