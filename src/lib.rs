//! MindSync focus engine: fuses behavioral signals (expression mood,
//! journal sentiment, typing cadence) into a bounded focus score with a
//! persisted rolling history, coaching suggestions, and ambient-audio
//! control.

pub mod ambient;
pub mod config;
pub mod engine;
pub mod models;
pub mod mood;
pub mod scoring;
pub mod sentiment;
pub mod store;
pub mod typing;
pub mod utils;

pub use ambient::{AmbientPlayer, AmbientPolicy, AudioSink};
pub use config::EngineConfig;
pub use engine::{EngineSnapshot, FocusEngine};
pub use models::{HistoryPoint, Mood, Polarity};
pub use mood::{MoodClassifier, SimulatedClassifier};
pub use scoring::Suggestion;
pub use sentiment::SentimentAnalyzer;
pub use store::SnapshotStore;
pub use typing::TypingCadence;
