pub mod card;
pub mod progress;

pub use card::{Card, CardKind, PhonemeEntry};
pub use progress::{cmp_overdue, AttemptOutcome, CardProgress, Learner, Priority, DEFAULT_EASE_FACTOR, GRADUATED_STEP};
