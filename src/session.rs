//! Per-learner session contexts.
//!
//! One context per learner, guarded by an async mutex so scheduling calls
//! for the same learner run one at a time. Contexts auto-expire after
//! `SESSION_EXPIRY_HOURS` of inactivity.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config;

/// State that lives for one sitting of one learner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
  /// Phoneme introductions made during this sitting
  pub new_cards_introduced: usize,
}

impl SessionContext {
  pub fn new() -> Self {
    Self::default()
  }

  /// Start a new sitting in place
  pub fn restart(&mut self) {
    self.new_cards_introduced = 0;
  }
}

pub type SharedSession = Arc<tokio::sync::Mutex<SessionContext>>;

struct SessionEntry {
  session: SharedSession,
  last_access: DateTime<Utc>,
}

#[derive(Default)]
pub struct SessionRegistry {
  sessions: Mutex<HashMap<String, SessionEntry>>,
}

impl SessionRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Get or create the session for a learner
  pub fn get(&self, learner_id: &str, now: DateTime<Utc>) -> SharedSession {
    let mut sessions = match self.sessions.lock() {
      Ok(guard) => guard,
      Err(poisoned) => {
        tracing::error!("Session registry lock poisoned, recovering");
        poisoned.into_inner()
      }
    };

    cleanup_expired(&mut sessions, now);

    let entry = sessions
      .entry(learner_id.to_string())
      .or_insert_with(|| SessionEntry {
        session: Arc::new(tokio::sync::Mutex::new(SessionContext::new())),
        last_access: now,
      });
    entry.last_access = now;
    Arc::clone(&entry.session)
  }

  pub fn len(&self) -> usize {
    self.sessions.lock().map(|s| s.len()).unwrap_or(0)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Drop idle sessions nobody currently holds
fn cleanup_expired(sessions: &mut HashMap<String, SessionEntry>, now: DateTime<Utc>) {
  let expiry = now - Duration::hours(config::SESSION_EXPIRY_HOURS);
  sessions.retain(|_, entry| entry.last_access > expiry || Arc::strong_count(&entry.session) > 1);
}
