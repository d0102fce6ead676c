pub mod card_selector;
pub mod clock;
pub mod completion;
pub mod learning;
pub mod quality;
pub mod queue;
pub mod sm2;

pub use card_selector::{cmp_learning, cmp_practice, Scheduler};
pub use clock::{Clock, FixedClock, SystemClock};
pub use learning::{apply_learning_outcome, apply_review_outcome, is_ready};
pub use quality::{calculate_card_priority, map_pronunciation_to_quality};
pub use queue::CardQueue;
pub use sm2::{calculate_sm2, calculate_sm2_at, Sm2Result, MIN_EASE_FACTOR};
