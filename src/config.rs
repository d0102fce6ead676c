//! Application configuration.
//!
//! Scheduling constants live here alongside the file/env configuration used
//! by the binary.

use serde::Deserialize;
use std::path::PathBuf;

// ==================== Scheduling ====================

/// Cards returned by one session queue build
pub const CARDS_PER_SESSION: usize = 10;

/// New phoneme introductions allowed per session
pub const MAX_NEW_CARDS_PER_SESSION: usize = 2;

/// Intervening cards required before a step 0/1 learning card is shown again
pub const LEARNING_MIN_SPACING: u32 = 2;

/// Percent of the current lesson that must graduate before moving on
pub const LESSON_MASTERY_THRESHOLD: u8 = 80;

/// Authoring guideline: share of a card's phonemes that should be taught by
/// the card's own lesson. Checked at load time, never used for unlocking.
pub const AUTHORING_PREREQUISITE_SHARE: f64 = 0.8;

/// Tunable scheduling knobs
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
  pub cards_per_session: usize,
  pub max_new_cards_per_session: usize,
  pub learning_min_spacing: u32,
  pub lesson_mastery_threshold: u8,
}

impl Default for SchedulerConfig {
  fn default() -> Self {
    Self {
      cards_per_session: CARDS_PER_SESSION,
      max_new_cards_per_session: MAX_NEW_CARDS_PER_SESSION,
      learning_min_spacing: LEARNING_MIN_SPACING,
      lesson_mastery_threshold: LESSON_MASTERY_THRESHOLD,
    }
  }
}

// ==================== Session Configuration ====================

/// Idle session contexts are dropped after this many hours
pub const SESSION_EXPIRY_HOURS: i64 = 1;

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Default server port
pub const SERVER_PORT: u16 = 3000;

/// Default database location
pub const DEFAULT_DB_PATH: &str = "data/progress.db";

// ==================== File / env configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
  database: Option<DatabaseSection>,
  server: Option<ServerSection>,
  curriculum: Option<CurriculumSection>,
  scheduler: Option<SchedulerConfig>,
}

#[derive(Debug, Deserialize)]
struct DatabaseSection {
  path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
  port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct CurriculumSection {
  path: Option<String>,
}

/// Resolved application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
  pub database_path: PathBuf,
  pub port: u16,
  /// None means use the built-in curriculum
  pub curriculum_path: Option<PathBuf>,
  pub scheduler: SchedulerConfig,
}

impl AppConfig {
  pub fn bind_addr(&self) -> String {
    format!("{}:{}", SERVER_ADDR, self.port)
  }
}

/// Load configuration with priority: config.toml > .env / environment > default
pub fn load_app_config() -> AppConfig {
  // Load .env file if present
  let _ = dotenvy::dotenv();

  let file = std::fs::read_to_string("config.toml")
    .ok()
    .and_then(|contents| match toml::from_str::<FileConfig>(&contents) {
      Ok(config) => Some(config),
      Err(e) => {
        tracing::warn!("Ignoring invalid config.toml: {}", e);
        None
      }
    })
    .unwrap_or_default();

  resolve(file, |key| std::env::var(key).ok())
}

fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> AppConfig {
  let database_path = file
    .database
    .and_then(|db| db.path)
    .or_else(|| env("DATABASE_PATH"))
    .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

  let port = file
    .server
    .and_then(|s| s.port)
    .or_else(|| env("PORT").and_then(|p| p.parse().ok()))
    .unwrap_or(SERVER_PORT);

  let curriculum_path = file
    .curriculum
    .and_then(|c| c.path)
    .or_else(|| env("CURRICULUM_PATH"))
    .map(PathBuf::from);

  let scheduler = file.scheduler.unwrap_or_default();

  tracing::info!("Using database at {}", database_path);
  AppConfig {
    database_path: PathBuf::from(database_path),
    port,
    curriculum_path,
    scheduler,
  }
}
