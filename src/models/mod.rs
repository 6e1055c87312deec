pub mod history;
pub mod signal;

pub use history::{HistoryPoint, HistorySeries, BASELINE_SCORE, HISTORY_CAPACITY};
pub use signal::{Mood, Polarity, SignalSnapshot};
