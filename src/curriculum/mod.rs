//! Curriculum catalog and the pure queries over it.
//!
//! - **catalog**: validated, immutable card + phoneme table
//! - **segment**: phoneme segmentation of arbitrary words
//! - **unlock**: which cards a set of introduced phonemes makes eligible
//! - **progression**: when a learner moves to the next lesson
//! - **seed** / **loader**: built-in curriculum and JSON curriculum files
//! - **service**: catalog-backed [`crate::db::CurriculumService`]

pub mod catalog;
pub mod loader;
pub mod progression;
pub mod seed;
pub mod segment;
pub mod service;
pub mod unlock;

pub use catalog::{Catalog, MAX_LESSON, MIN_LESSON};
pub use loader::{load_catalog, CardDefinition};
pub use progression::{lesson_progress, next_lesson, LessonProgress};
pub use seed::builtin_catalog;
pub use segment::{normalize_text, segment_word};
pub use service::CatalogCurriculum;
pub use unlock::{is_unlocked, unlocked_cards};
