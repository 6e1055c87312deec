use std::collections::HashMap;

/// AFINN-style word valences, -5..=5. Subset covering the vocabulary a
/// short mood journal actually uses.
const LEXICON: &[(&str, i32)] = &[
    ("abandoned", -2),
    ("amazing", 4),
    ("angry", -3),
    ("annoyed", -2),
    ("anxious", -2),
    ("awesome", 4),
    ("awful", -3),
    ("bad", -3),
    ("best", 3),
    ("blocked", -1),
    ("bored", -2),
    ("brilliant", 4),
    ("broken", -1),
    ("calm", 2),
    ("confident", 2),
    ("confused", -2),
    ("depressed", -2),
    ("distracted", -2),
    ("dread", -2),
    ("eager", 2),
    ("energized", 2),
    ("excellent", 3),
    ("excited", 3),
    ("exhausted", -2),
    ("fail", -2),
    ("failed", -2),
    ("fantastic", 4),
    ("fine", 2),
    ("focused", 2),
    ("frustrated", -2),
    ("glad", 3),
    ("good", 3),
    ("great", 3),
    ("happy", 3),
    ("hate", -3),
    ("hopeful", 2),
    ("hopeless", -2),
    ("inspired", 2),
    ("love", 3),
    ("lucky", 3),
    ("miserable", -3),
    ("motivated", 2),
    ("nervous", -2),
    ("nice", 3),
    ("overwhelmed", -2),
    ("panic", -3),
    ("perfect", 3),
    ("productive", 2),
    ("proud", 2),
    ("ready", 1),
    ("relaxed", 2),
    ("sad", -2),
    ("scared", -2),
    ("sick", -2),
    ("slow", -2),
    ("stressed", -2),
    ("strong", 2),
    ("struggling", -2),
    ("stuck", -2),
    ("terrible", -3),
    ("tired", -2),
    ("upset", -2),
    ("useless", -2),
    ("win", 4),
    ("wonderful", 4),
    ("worried", -3),
    ("worst", -3),
    ("wrong", -2),
];

/// Signed-valence journal scorer: sums per-token valences over the text.
/// Scores are unbounded in principle but stay small for journal-sized
/// entries.
pub struct SentimentAnalyzer {
    lexicon: HashMap<&'static str, i32>,
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().copied().collect(),
        }
    }

    pub fn analyze(&self, text: &str) -> i32 {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .map(|token| {
                let token = token.to_lowercase();
                self.lexicon.get(token.as_str()).copied().unwrap_or(0)
            })
            .sum()
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
