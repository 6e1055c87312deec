use serde::{Deserialize, Serialize};

/// Fixed catalog of coaching prompts shown next to the score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Suggestion {
    GettingStarted,
    DeepBreak,
    EaseUp,
    HighEnergy,
    FlowState,
    SteadyProgress,
}

impl Suggestion {
    pub fn text(&self) -> &'static str {
        match self {
            Suggestion::GettingStarted => "Let's get to work!",
            Suggestion::DeepBreak => "You seem stressed. Take a real break.",
            Suggestion::EaseUp => "Rough patch in the journal. Slow down for a minute.",
            Suggestion::HighEnergy => "Incredible energy! Keep going!",
            Suggestion::FlowState => "Flow state detected.",
            Suggestion::SteadyProgress => "Steady progress. Stay hydrated.",
        }
    }
}

/// Pick a prompt from the current signal readings. This is an ordered
/// decision list: several rules can hold at once, and the first match
/// wins, so strong journal negativity outranks a high score.
pub fn select_suggestion(sentiment: i32, instantaneous: u8) -> Suggestion {
    if sentiment < -2 {
        Suggestion::DeepBreak
    } else if sentiment < 0 {
        Suggestion::EaseUp
    } else if sentiment > 3 {
        Suggestion::HighEnergy
    } else if instantaneous > 80 {
        Suggestion::FlowState
    } else {
        Suggestion::SteadyProgress
    }
}
