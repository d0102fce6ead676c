use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  conn.execute_batch(
    r#"
    CREATE TABLE IF NOT EXISTS learners (
      id TEXT PRIMARY KEY,
      current_lesson INTEGER NOT NULL DEFAULT 1,
      total_cards_completed INTEGER NOT NULL DEFAULT 0,
      created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS card_progress (
      learner_id TEXT NOT NULL,
      word TEXT NOT NULL,
      ease_factor REAL NOT NULL DEFAULT 2.5,
      interval_days INTEGER NOT NULL DEFAULT 0,
      repetitions INTEGER NOT NULL DEFAULT 0,
      next_review_at TEXT NOT NULL,
      learning_step INTEGER NOT NULL DEFAULT 0,
      cards_since_last_seen INTEGER NOT NULL DEFAULT 0,
      attempts INTEGER NOT NULL DEFAULT 0,
      successes INTEGER NOT NULL DEFAULT 0,
      last_seen_at TEXT,
      hint_used INTEGER NOT NULL DEFAULT 0,
      last_quality INTEGER,
      PRIMARY KEY (learner_id, word),
      FOREIGN KEY (learner_id) REFERENCES learners(id)
    );

    CREATE TABLE IF NOT EXISTS introduced_phonemes (
      learner_id TEXT NOT NULL,
      phoneme TEXT NOT NULL,
      introduced_at TEXT NOT NULL,
      PRIMARY KEY (learner_id, phoneme),
      FOREIGN KEY (learner_id) REFERENCES learners(id)
    );

    -- Indexes
    CREATE INDEX IF NOT EXISTS idx_card_progress_next_review ON card_progress(learner_id, next_review_at);
    CREATE INDEX IF NOT EXISTS idx_card_progress_step ON card_progress(learner_id, learning_step);
    "#,
  )?;

  Ok(())
}
