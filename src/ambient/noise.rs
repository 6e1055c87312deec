use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rodio::Source;
use std::time::Duration;

/// Endless ambient noise bed: white noise through a one-pole low-pass.
pub struct AmbientNoise {
    sample_rate: u32,
    filtered: f32,
    rng: StdRng,
}

const CUTOFF_ALPHA: f32 = 0.06;
const AMPLITUDE: f32 = 0.4;

impl AmbientNoise {
    pub fn new() -> Self {
        Self {
            sample_rate: 44100,
            filtered: 0.0,
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for AmbientNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for AmbientNoise {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let white: f32 = self.rng.gen_range(-1.0..1.0);
        self.filtered += CUTOFF_ALPHA * (white - self.filtered);
        Some(self.filtered * AMPLITUDE)
    }
}

impl Source for AmbientNoise {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_stay_bounded() {
        let mut noise = AmbientNoise::new();
        for _ in 0..10_000 {
            let sample = noise.next().unwrap();
            assert!(sample.abs() <= 1.0);
        }
    }

    #[test]
    fn test_source_is_endless_mono() {
        let noise = AmbientNoise::new();
        assert_eq!(noise.channels(), 1);
        assert_eq!(noise.total_duration(), None);
        assert_eq!(noise.current_frame_len(), None);
    }
}
