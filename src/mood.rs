use anyhow::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::Mood;

/// Capability interface for mood backends. The engine polls `classify`
/// on its own cadence and never issues overlapping calls; a backend only
/// has to produce the latest label.
#[async_trait]
pub trait MoodClassifier: Send {
    async fn classify(&mut self) -> Result<Mood>;
}

/// Camera-free stand-in used when no expression model is available. The
/// label mostly holds steady and occasionally drifts to a neighboring
/// state, which is enough to exercise the whole pipeline.
pub struct SimulatedClassifier {
    current: Mood,
    rng: StdRng,
}

const DRIFT_CHANCE: f64 = 0.3;

const SIMULATED_MOODS: &[Mood] = &[
    Mood::Neutral,
    Mood::Happy,
    Mood::Stressed,
    Mood::Tired,
    Mood::Anxious,
    Mood::Focused,
];

impl SimulatedClassifier {
    pub fn new() -> Self {
        Self {
            current: Mood::Neutral,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            current: Mood::Neutral,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SimulatedClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MoodClassifier for SimulatedClassifier {
    async fn classify(&mut self) -> Result<Mood> {
        if self.rng.gen_bool(DRIFT_CHANCE) {
            self.current = SIMULATED_MOODS[self.rng.gen_range(0..SIMULATED_MOODS.len())];
        }
        Ok(self.current)
    }
}
