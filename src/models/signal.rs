use serde::{Deserialize, Serialize};

/// Mood label resolved by the expression classifier. The engine only ever
/// sees the winning label, never raw class probabilities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Mood {
    Neutral,
    Happy,
    Stressed,
    Tired,
    Anxious,
    Focused,
    Unknown,
}

impl Default for Mood {
    fn default() -> Self {
        Mood::Unknown
    }
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Neutral => "Neutral",
            Mood::Happy => "Happy",
            Mood::Stressed => "Stressed",
            Mood::Tired => "Tired",
            Mood::Anxious => "Anxious",
            Mood::Focused => "Focused",
            Mood::Unknown => "Unknown",
        }
    }

    /// Map a raw facial-expression class name onto a mood label.
    /// Unrecognized expressions read as Neutral rather than Unknown, since
    /// the classifier did produce a face.
    pub fn from_expression(expression: &str) -> Mood {
        match expression {
            "neutral" => Mood::Neutral,
            "happy" => Mood::Happy,
            "sad" | "angry" => Mood::Stressed,
            "fearful" => Mood::Anxious,
            "disgusted" => Mood::Tired,
            "surprised" => Mood::Focused,
            _ => Mood::Neutral,
        }
    }
}

/// Coarse polarity of a journal sentiment score, for display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    pub fn of(sentiment: i32) -> Polarity {
        if sentiment > 0 {
            Polarity::Positive
        } else if sentiment < 0 {
            Polarity::Negative
        } else {
            Polarity::Neutral
        }
    }
}

/// The latest value of every input signal, as seen at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalSnapshot {
    pub mood: Mood,
    pub sentiment: i32,
    pub typing_wpm: f64,
}

impl SignalSnapshot {
    pub fn empty() -> Self {
        Self {
            mood: Mood::Unknown,
            sentiment: 0,
            typing_wpm: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_mapping() {
        assert_eq!(Mood::from_expression("neutral"), Mood::Neutral);
        assert_eq!(Mood::from_expression("happy"), Mood::Happy);
        assert_eq!(Mood::from_expression("sad"), Mood::Stressed);
        assert_eq!(Mood::from_expression("angry"), Mood::Stressed);
        assert_eq!(Mood::from_expression("fearful"), Mood::Anxious);
        assert_eq!(Mood::from_expression("disgusted"), Mood::Tired);
        assert_eq!(Mood::from_expression("surprised"), Mood::Focused);
    }

    #[test]
    fn test_unrecognized_expression_is_neutral() {
        assert_eq!(Mood::from_expression("contempt"), Mood::Neutral);
        assert_eq!(Mood::from_expression(""), Mood::Neutral);
    }

    #[test]
    fn test_polarity_of_score() {
        assert_eq!(Polarity::of(3), Polarity::Positive);
        assert_eq!(Polarity::of(-1), Polarity::Negative);
        assert_eq!(Polarity::of(0), Polarity::Neutral);
    }
}
