use chrono::{DateTime, Duration, Utc};

pub const MIN_EASE_FACTOR: f64 = 1.3;

#[derive(Debug, Clone, PartialEq)]
pub struct Sm2Result {
  pub ease_factor: f64,
  pub interval_days: i64,
  pub repetitions: i64,
  pub next_review: DateTime<Utc>,
}

/// SM-2 step scheduled from the current wall-clock time.
pub fn calculate_sm2(
  quality: u8,
  current_ease_factor: f64,
  current_interval: i64,
  current_repetitions: i64,
) -> Sm2Result {
  calculate_sm2_at(
    quality,
    current_ease_factor,
    current_interval,
    current_repetitions,
    Utc::now(),
  )
}

pub fn calculate_sm2_at(
  quality: u8,
  current_ease_factor: f64,
  current_interval: i64,
  current_repetitions: i64,
  now: DateTime<Utc>,
) -> Sm2Result {
  let quality = quality.min(5);

  let (ease_factor, interval_days, repetitions) = if quality < 3 {
    // Failed review: reset, ease untouched
    (current_ease_factor, 1, 0)
  } else {
    // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
    let q = quality as f64;
    let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
    let new_ease_factor = (current_ease_factor + ease_delta).max(MIN_EASE_FACTOR);

    let interval = match current_repetitions {
      0 => 1,
      1 => 3,
      _ => ((current_interval as f64) * new_ease_factor).round() as i64,
    };
    (new_ease_factor, interval, current_repetitions + 1)
  };

  Sm2Result {
    ease_factor,
    interval_days,
    repetitions,
    next_review: now + Duration::days(interval_days),
  }
}
