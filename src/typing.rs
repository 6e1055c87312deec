use std::time::Instant;

const CHARS_PER_WORD: f64 = 5.0;
const MIN_GAP_MS: f64 = 1.0;

/// Words-per-minute estimate driven by keystroke timing. Each keystroke
/// blends the newest inter-keystroke gap into a running average with
/// factor 0.5, so the estimate effectively tracks the last two gaps.
///
/// The estimate only moves on keystrokes; there is no background decay
/// while the keyboard is idle.
#[derive(Debug)]
pub struct TypingCadence {
    last_keystroke: Option<Instant>,
    smoothed_gap_ms: Option<f64>,
}

impl TypingCadence {
    pub fn new() -> Self {
        Self {
            last_keystroke: None,
            smoothed_gap_ms: None,
        }
    }

    /// Record a keystroke happening now and return the updated estimate.
    pub fn record_keystroke(&mut self) -> f64 {
        let now = Instant::now();
        if let Some(last) = self.last_keystroke.replace(now) {
            let gap_ms = now.duration_since(last).as_secs_f64() * 1000.0;
            self.observe_gap(gap_ms);
        }
        self.wpm()
    }

    fn observe_gap(&mut self, gap_ms: f64) {
        let gap_ms = gap_ms.max(MIN_GAP_MS);
        self.smoothed_gap_ms = Some(match self.smoothed_gap_ms {
            Some(prev) => (prev + gap_ms) / 2.0,
            None => gap_ms,
        });
    }

    /// Current estimate. 0 until two keystrokes have been seen.
    pub fn wpm(&self) -> f64 {
        match self.smoothed_gap_ms {
            Some(gap_ms) => 60_000.0 / (gap_ms * CHARS_PER_WORD),
            None => 0.0,
        }
    }
}

impl Default for TypingCadence {
    fn default() -> Self {
        Self::new()
    }
}
