//! SQLite-backed progress store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::domain::{CardProgress, Learner, GRADUATED_STEP};
use crate::error::StoreResult;

use super::{run_migrations, sort_due, try_lock, DbPool, ProgressStore};

const PROGRESS_COLUMNS: &str = r#"
  learner_id, word, ease_factor, interval_days, repetitions, next_review_at, learning_step,
  cards_since_last_seen, attempts, successes, last_seen_at, hint_used, last_quality
"#;

#[derive(Clone)]
pub struct SqliteProgressStore {
  pool: DbPool,
}

impl SqliteProgressStore {
  /// Open (or create) a database file and bring its schema up to date
  pub fn open(path: &Path) -> StoreResult<Self> {
    if let Some(parent) = path.parent() {
      if let Err(e) = std::fs::create_dir_all(parent) {
        tracing::warn!("Could not create database directory {}: {}", parent.display(), e);
      }
    }

    // Create backup before migrations if database exists
    if path.exists() {
      let backup_path = path.with_extension("db.backup");
      if let Err(e) = std::fs::copy(path, &backup_path) {
        tracing::warn!("Could not create database backup: {}", e);
      }
    }

    let conn = Connection::open(path)?;
    Self::from_connection(conn)
  }

  pub fn in_memory() -> StoreResult<Self> {
    Self::from_connection(Connection::open_in_memory()?)
  }

  fn from_connection(conn: Connection) -> StoreResult<Self> {
    run_migrations(&conn)?;
    Ok(Self {
      pool: Arc::new(Mutex::new(conn)),
    })
  }

  fn query_progress(&self, sql: &str, learner_id: &str) -> StoreResult<Vec<CardProgress>> {
    let conn = try_lock(&self.pool)?;
    let mut stmt = conn.prepare(sql)?;
    let cards = stmt
      .query_map(params![learner_id], row_to_progress)?
      .collect::<Result<Vec<_>, _>>()?;
    Ok(cards)
  }
}

fn parse_timestamp(idx: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(value)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_learner(row: &Row) -> rusqlite::Result<Learner> {
  let created_at: String = row.get(3)?;
  Ok(Learner {
    id: row.get(0)?,
    current_lesson: row.get(1)?,
    total_cards_completed: row.get(2)?,
    created_at: parse_timestamp(3, &created_at)?,
  })
}

fn row_to_progress(row: &Row) -> rusqlite::Result<CardProgress> {
  let next_review_str: String = row.get(5)?;
  let last_seen_str: Option<String> = row.get(10)?;
  let hint_used: i64 = row.get(11)?;

  Ok(CardProgress {
    learner_id: row.get(0)?,
    word: row.get(1)?,
    ease_factor: row.get(2)?,
    interval_days: row.get(3)?,
    repetitions: row.get(4)?,
    next_review_at: parse_timestamp(5, &next_review_str)?,
    learning_step: row.get(6)?,
    cards_since_last_seen: row.get(7)?,
    attempts: row.get(8)?,
    successes: row.get(9)?,
    last_seen_at: last_seen_str.map(|s| parse_timestamp(10, &s)).transpose()?,
    hint_used: hint_used != 0,
    last_quality: row.get(12)?,
  })
}

#[async_trait]
impl ProgressStore for SqliteProgressStore {
  async fn get_learner(&self, learner_id: &str) -> StoreResult<Option<Learner>> {
    let conn = try_lock(&self.pool)?;
    let learner = conn
      .query_row(
        "SELECT id, current_lesson, total_cards_completed, created_at FROM learners WHERE id = ?1",
        params![learner_id],
        row_to_learner,
      )
      .optional()?;
    Ok(learner)
  }

  async fn save_learner(&self, learner: &Learner) -> StoreResult<()> {
    let conn = try_lock(&self.pool)?;
    conn.execute(
      r#"
      INSERT INTO learners (id, current_lesson, total_cards_completed, created_at)
      VALUES (?1, ?2, ?3, ?4)
      ON CONFLICT(id) DO UPDATE SET
        current_lesson = excluded.current_lesson,
        total_cards_completed = excluded.total_cards_completed
      "#,
      params![
        learner.id,
        learner.current_lesson,
        learner.total_cards_completed,
        learner.created_at.to_rfc3339(),
      ],
    )?;
    Ok(())
  }

  async fn get_due_review_cards(&self, learner_id: &str, now: DateTime<Utc>) -> StoreResult<Vec<CardProgress>> {
    // Timestamps are compared after parsing; stored offsets may differ
    let sql = format!(
      "SELECT {} FROM card_progress WHERE learner_id = ?1 AND learning_step >= {}",
      PROGRESS_COLUMNS, GRADUATED_STEP
    );
    let mut due: Vec<_> = self
      .query_progress(&sql, learner_id)?
      .into_iter()
      .filter(|p| p.is_due(now))
      .collect();
    sort_due(&mut due);
    Ok(due)
  }

  async fn get_learning_cards(&self, learner_id: &str) -> StoreResult<Vec<CardProgress>> {
    let sql = format!(
      "SELECT {} FROM card_progress WHERE learner_id = ?1 AND learning_step < {} ORDER BY word",
      PROGRESS_COLUMNS, GRADUATED_STEP
    );
    self.query_progress(&sql, learner_id)
  }

  async fn get_all_cards_for_learner(&self, learner_id: &str) -> StoreResult<Vec<CardProgress>> {
    let sql = format!(
      "SELECT {} FROM card_progress WHERE learner_id = ?1 ORDER BY word",
      PROGRESS_COLUMNS
    );
    self.query_progress(&sql, learner_id)
  }

  async fn get_card_progress(&self, learner_id: &str, word: &str) -> StoreResult<Option<CardProgress>> {
    let conn = try_lock(&self.pool)?;
    let sql = format!(
      "SELECT {} FROM card_progress WHERE learner_id = ?1 AND word = ?2",
      PROGRESS_COLUMNS
    );
    let progress = conn
      .query_row(&sql, params![learner_id, word], row_to_progress)
      .optional()?;
    Ok(progress)
  }

  async fn create_or_update_card_progress(&self, progress: &CardProgress) -> StoreResult<()> {
    let conn = try_lock(&self.pool)?;
    conn.execute(
      r#"
      INSERT OR REPLACE INTO card_progress (
        learner_id, word, ease_factor, interval_days, repetitions, next_review_at, learning_step,
        cards_since_last_seen, attempts, successes, last_seen_at, hint_used, last_quality
      )
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
      "#,
      params![
        progress.learner_id,
        progress.word,
        progress.ease_factor,
        progress.interval_days,
        progress.repetitions,
        progress.next_review_at.to_rfc3339(),
        progress.learning_step,
        progress.cards_since_last_seen,
        progress.attempts,
        progress.successes,
        progress.last_seen_at.map(|t| t.to_rfc3339()),
        progress.hint_used,
        progress.last_quality,
      ],
    )?;
    Ok(())
  }

  async fn get_introduced_phonemes(&self, learner_id: &str) -> StoreResult<BTreeSet<String>> {
    let conn = try_lock(&self.pool)?;
    let mut stmt = conn.prepare("SELECT phoneme FROM introduced_phonemes WHERE learner_id = ?1")?;
    let phonemes = stmt
      .query_map(params![learner_id], |row| row.get(0))?
      .collect::<Result<BTreeSet<String>, _>>()?;
    Ok(phonemes)
  }

  async fn add_introduced_phoneme(
    &self,
    learner_id: &str,
    symbol: &str,
    introduced_at: DateTime<Utc>,
  ) -> StoreResult<()> {
    let conn = try_lock(&self.pool)?;
    conn.execute(
      "INSERT OR IGNORE INTO introduced_phonemes (learner_id, phoneme, introduced_at) VALUES (?1, ?2, ?3)",
      params![learner_id, symbol, introduced_at.to_rfc3339()],
    )?;
    Ok(())
  }

  async fn increment_cards_since_last_seen(&self, learner_id: &str, exclude_word: &str) -> StoreResult<()> {
    let conn = try_lock(&self.pool)?;
    conn.execute(
      &format!(
        "UPDATE card_progress SET cards_since_last_seen = cards_since_last_seen + 1
         WHERE learner_id = ?1 AND word != ?2 AND learning_step < {}",
        GRADUATED_STEP
      ),
      params![learner_id, exclude_word],
    )?;
    Ok(())
  }

  async fn reset_cards_since_last_seen(
    &self,
    learner_id: &str,
    word: &str,
    seen_at: DateTime<Utc>,
  ) -> StoreResult<()> {
    let conn = try_lock(&self.pool)?;
    conn.execute(
      "UPDATE card_progress SET cards_since_last_seen = 0, last_seen_at = ?3
       WHERE learner_id = ?1 AND word = ?2",
      params![learner_id, word, seen_at.to_rfc3339()],
    )?;
    Ok(())
  }
}
