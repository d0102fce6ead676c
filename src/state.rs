//! Application state shared by all handlers.

use std::sync::Arc;

use crate::curriculum::Catalog;
use crate::srs::Scheduler;

#[derive(Clone)]
pub struct AppState {
  pub scheduler: Arc<Scheduler>,
}

impl AppState {
  pub fn new(scheduler: Arc<Scheduler>) -> Self {
    Self { scheduler }
  }

  pub fn catalog(&self) -> &Catalog {
    self.scheduler.catalog()
  }
}
