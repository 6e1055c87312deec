use serde::Serialize;

use crate::models::{
    HistoryPoint, HistorySeries, Mood, Polarity, SignalSnapshot, BASELINE_SCORE,
};
use crate::scoring::{fuse, select_suggestion, smooth, FusionWeights, Suggestion};
use crate::typing::TypingCadence;

/// Everything the engine owns and mutates. Collaborator-owned signals are
/// mirrored here as their latest pushed values.
pub struct EngineState {
    pub mood: Mood,
    pub journal: String,
    pub sentiment: i32,
    pub typing: TypingCadence,
    pub instantaneous: u8,
    pub published: u8,
    pub suggestion: Suggestion,
    pub history: HistorySeries,
    pub audio_enabled: bool,
}

impl EngineState {
    pub fn new(history: HistorySeries) -> Self {
        Self {
            mood: Mood::Unknown,
            journal: String::new(),
            sentiment: 0,
            typing: TypingCadence::new(),
            instantaneous: BASELINE_SCORE,
            published: BASELINE_SCORE,
            suggestion: Suggestion::GettingStarted,
            history,
            audio_enabled: false,
        }
    }

    pub fn signals(&self) -> SignalSnapshot {
        SignalSnapshot {
            mood: self.mood,
            sentiment: self.sentiment,
            typing_wpm: self.typing.wpm(),
        }
    }

    /// One evaluation cycle over the current signal values: fuse, smooth
    /// the published score, and refresh the suggestion.
    pub fn evaluate(&mut self, weights: &FusionWeights) {
        self.instantaneous = fuse(&self.signals(), weights);
        self.published = smooth(self.published, self.instantaneous);
        self.suggestion = select_suggestion(self.sentiment, self.instantaneous);
    }

    /// Record the current instantaneous score into the rolling series.
    pub fn push_history_point(&mut self, now: chrono::DateTime<chrono::Local>) {
        self.history.push(HistoryPoint::at(now, self.instantaneous));
    }

    /// Soft restart of the visible state: sentinel series, baseline
    /// published score. Signal mirrors are left alone.
    pub fn reset_history(&mut self) {
        self.history.reset();
        self.published = BASELINE_SCORE;
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            mood: self.mood,
            sentiment: self.sentiment,
            polarity: Polarity::of(self.sentiment),
            typing_wpm: self.typing.wpm(),
            instantaneous_score: self.instantaneous,
            published_score: self.published,
            suggestion: self.suggestion,
            suggestion_text: self.suggestion.text(),
            history: self.history.to_vec(),
            audio_enabled: self.audio_enabled,
        }
    }
}

/// Serializable view handed to the UI layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    pub mood: Mood,
    pub sentiment: i32,
    pub polarity: Polarity,
    pub typing_wpm: f64,
    pub instantaneous_score: u8,
    pub published_score: u8,
    pub suggestion: Suggestion,
    pub suggestion_text: &'static str,
    pub history: Vec<HistoryPoint>,
    pub audio_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HISTORY_CAPACITY;

    fn fresh_state() -> EngineState {
        EngineState::new(HistorySeries::seeded(HISTORY_CAPACITY))
    }

    #[test]
    fn test_initial_state_is_baseline() {
        let state = fresh_state();
        assert_eq!(state.published, 60);
        assert_eq!(state.instantaneous, 60);
        assert_eq!(state.mood, Mood::Unknown);
        assert_eq!(state.suggestion, Suggestion::GettingStarted);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn test_focused_evaluation_moves_published_halfway() {
        let mut state = fresh_state();
        state.mood = Mood::Focused;
        state.evaluate(&FusionWeights::camera());
        assert_eq!(state.instantaneous, 80);
        assert_eq!(state.published, 70);
    }

    #[test]
    fn test_repeated_evaluation_converges_on_instantaneous() {
        let mut state = fresh_state();
        state.mood = Mood::Focused;
        for _ in 0..10 {
            state.evaluate(&FusionWeights::camera());
        }
        assert_eq!(state.published, 80);
    }

    #[test]
    fn test_reset_restores_sentinel_and_baseline() {
        let mut state = fresh_state();
        state.mood = Mood::Focused;
        state.evaluate(&FusionWeights::camera());
        state.push_history_point(chrono::Local::now());
        state.reset_history();

        assert_eq!(state.published, 60);
        assert_eq!(state.history.to_vec(), vec![HistoryPoint::sentinel()]);
        // Signals keep whatever the collaborators last pushed.
        assert_eq!(state.mood, Mood::Focused);
    }

    #[test]
    fn test_history_point_uses_instantaneous_score() {
        let mut state = fresh_state();
        state.mood = Mood::Focused;
        state.evaluate(&FusionWeights::camera());
        state.push_history_point(chrono::Local::now());
        // Instantaneous is 80 while published is still 70.
        assert_eq!(state.history.latest().unwrap().score, 80);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = fresh_state();
        state.sentiment = -4;
        state.evaluate(&FusionWeights::camera());
        let snapshot = state.snapshot();
        assert_eq!(snapshot.polarity, Polarity::Negative);
        assert_eq!(snapshot.suggestion, Suggestion::DeepBreak);
        assert_eq!(snapshot.published_score, state.published);
        assert_eq!(snapshot.history.len(), 1);
    }
}
