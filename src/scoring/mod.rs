pub mod fusion;
pub mod smoothing;
pub mod suggestion;

pub use fusion::{fuse, FusionWeights, TypingWeights};
pub use smoothing::smooth;
pub use suggestion::{select_suggestion, Suggestion};
