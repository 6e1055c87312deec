use crate::models::{Mood, SignalSnapshot, BASELINE_SCORE};

/// Additive per-mood deltas plus the sentiment cap, with an optional
/// typing-cadence term. Two observed tunings exist; both are plain
/// constructors so a host picks one explicitly.
#[derive(Debug, Clone)]
pub struct FusionWeights {
    pub focused: i32,
    pub happy: i32,
    pub neutral: i32,
    pub tired: i32,
    pub stressed: i32,
    pub anxious: i32,
    /// Per-point sentiment multiplier and the symmetric cap on its
    /// total contribution.
    pub sentiment_step: i32,
    pub sentiment_cap: i32,
    pub typing: Option<TypingWeights>,
}

#[derive(Debug, Clone)]
pub struct TypingWeights {
    pub fast_wpm: f64,
    pub fast_bonus: i32,
    pub active_bonus: i32,
}

impl FusionWeights {
    /// Camera-led tuning: mood and journal sentiment only.
    pub fn camera() -> Self {
        Self {
            focused: 20,
            happy: 10,
            neutral: 0,
            tired: -10,
            stressed: -20,
            anxious: -20,
            sentiment_step: 5,
            sentiment_cap: 20,
            typing: None,
        }
    }

    /// Typing-led tuning: keyboard cadence counts, and the mood bonuses
    /// run slightly hotter.
    pub fn typing_aware() -> Self {
        Self {
            focused: 25,
            happy: 15,
            neutral: 5,
            tired: -10,
            stressed: -20,
            anxious: -20,
            sentiment_step: 5,
            sentiment_cap: 20,
            typing: Some(TypingWeights {
                fast_wpm: 30.0,
                fast_bonus: 15,
                active_bonus: 5,
            }),
        }
    }

    fn mood_delta(&self, mood: Mood) -> i32 {
        match mood {
            Mood::Focused => self.focused,
            Mood::Happy => self.happy,
            Mood::Neutral => self.neutral,
            Mood::Tired => self.tired,
            Mood::Stressed => self.stressed,
            Mood::Anxious => self.anxious,
            Mood::Unknown => 0,
        }
    }

    fn sentiment_delta(&self, sentiment: i32) -> i32 {
        let raw = sentiment * self.sentiment_step;
        if sentiment > 0 {
            raw.min(self.sentiment_cap)
        } else if sentiment < 0 {
            raw.max(-self.sentiment_cap)
        } else {
            0
        }
    }

    fn typing_delta(&self, wpm: f64) -> i32 {
        match &self.typing {
            Some(t) if wpm > t.fast_wpm => t.fast_bonus,
            Some(t) if wpm > 0.0 => t.active_bonus,
            _ => 0,
        }
    }
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self::camera()
    }
}

/// Fold the current signal values into one instantaneous score. Each
/// signal contributes an independent additive term on top of the
/// baseline; the sum is clamped to [0, 100].
pub fn fuse(snapshot: &SignalSnapshot, weights: &FusionWeights) -> u8 {
    let score = i32::from(BASELINE_SCORE)
        + weights.mood_delta(snapshot.mood)
        + weights.sentiment_delta(snapshot.sentiment)
        + weights.typing_delta(snapshot.typing_wpm);
    score.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(mood: Mood, sentiment: i32, wpm: f64) -> SignalSnapshot {
        SignalSnapshot {
            mood,
            sentiment,
            typing_wpm: wpm,
        }
    }

    #[test]
    fn test_focused_neutral_sentiment() {
        let score = fuse(&snapshot(Mood::Focused, 0, 0.0), &FusionWeights::camera());
        assert_eq!(score, 80);
    }

    #[test]
    fn test_stressed_with_negative_journal_caps_sentiment() {
        // Sentiment -5 would contribute -25; the cap holds it at -20.
        let score = fuse(&snapshot(Mood::Stressed, -5, 0.0), &FusionWeights::camera());
        assert_eq!(score, 20);
    }

    #[test]
    fn test_positive_sentiment_caps_at_twenty() {
        let a = fuse(&snapshot(Mood::Unknown, 4, 0.0), &FusionWeights::camera());
        let b = fuse(&snapshot(Mood::Unknown, 40, 0.0), &FusionWeights::camera());
        assert_eq!(a, 80);
        assert_eq!(b, 80);
    }

    #[test]
    fn test_output_always_in_range() {
        let weights = FusionWeights::typing_aware();
        for sentiment in -50..=50 {
            for mood in [
                Mood::Neutral,
                Mood::Happy,
                Mood::Stressed,
                Mood::Tired,
                Mood::Anxious,
                Mood::Focused,
                Mood::Unknown,
            ] {
                for wpm in [0.0, 10.0, 45.0] {
                    let score = fuse(&snapshot(mood, sentiment, wpm), &weights);
                    assert!(score <= 100);
                }
            }
        }
    }

    #[test]
    fn test_unknown_mood_contributes_nothing() {
        let weights = FusionWeights::camera();
        assert_eq!(fuse(&snapshot(Mood::Unknown, 0, 0.0), &weights), 60);
    }

    #[test]
    fn test_typing_bonus_tiers() {
        let weights = FusionWeights::typing_aware();
        let idle = fuse(&snapshot(Mood::Unknown, 0, 0.0), &weights);
        let slow = fuse(&snapshot(Mood::Unknown, 0, 12.0), &weights);
        let fast = fuse(&snapshot(Mood::Unknown, 0, 42.0), &weights);
        assert_eq!(idle, 60);
        assert_eq!(slow, 65);
        assert_eq!(fast, 75);
    }

    #[test]
    fn test_camera_weights_ignore_typing() {
        let weights = FusionWeights::camera();
        assert_eq!(
            fuse(&snapshot(Mood::Neutral, 0, 80.0), &weights),
            fuse(&snapshot(Mood::Neutral, 0, 0.0), &weights),
        );
    }

    #[test]
    fn test_signals_are_independent_terms() {
        let weights = FusionWeights::camera();
        let mood_only = i32::from(fuse(&snapshot(Mood::Happy, 0, 0.0), &weights)) - 60;
        let sentiment_only = i32::from(fuse(&snapshot(Mood::Unknown, 2, 0.0), &weights)) - 60;
        let both = i32::from(fuse(&snapshot(Mood::Happy, 2, 0.0), &weights)) - 60;
        assert_eq!(both, mood_only + sentiment_only);
    }
}
