use std::collections::VecDeque;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Score every series starts from, and the value the published score
/// returns to on reset.
pub const BASELINE_SCORE: u8 = 60;

/// Maximum number of points the rolling series retains.
pub const HISTORY_CAPACITY: usize = 20;

const SENTINEL_LABEL: &str = "Start";

/// One charted sample: a display label and the instantaneous score that
/// was current when the sample was taken.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryPoint {
    pub time: String,
    pub score: u8,
}

impl HistoryPoint {
    /// The seed point used whenever no prior history exists.
    pub fn sentinel() -> Self {
        Self {
            time: SENTINEL_LABEL.to_string(),
            score: BASELINE_SCORE,
        }
    }

    /// A sample stamped with a wall-clock `HH:MM` label. Labels are for
    /// display only; across restarts they may repeat or run out of order.
    pub fn at(now: DateTime<Local>, score: u8) -> Self {
        Self {
            time: now.format("%H:%M").to_string(),
            score,
        }
    }
}

/// Rolling, capacity-bounded series of score samples, oldest first.
/// Holds between 1 and `capacity` points at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySeries {
    points: VecDeque<HistoryPoint>,
    capacity: usize,
}

impl HistorySeries {
    /// A fresh series containing only the sentinel point.
    pub fn seeded(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut points = VecDeque::with_capacity(capacity);
        points.push_back(HistoryPoint::sentinel());
        Self { points, capacity }
    }

    /// Rebuild a series from persisted points. An empty list falls back to
    /// the sentinel; an over-long list keeps the newest `capacity` points.
    pub fn from_points(points: Vec<HistoryPoint>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        if points.is_empty() {
            return Self::seeded(capacity);
        }
        let mut points: VecDeque<HistoryPoint> = points.into();
        while points.len() > capacity {
            points.pop_front();
        }
        Self { points, capacity }
    }

    pub fn push(&mut self, point: HistoryPoint) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Drop everything and reseed with the sentinel point.
    pub fn reset(&mut self) {
        self.points.clear();
        self.points.push_back(HistoryPoint::sentinel());
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&HistoryPoint> {
        self.points.back()
    }

    pub fn to_vec(&self) -> Vec<HistoryPoint> {
        self.points.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(label: &str, score: u8) -> HistoryPoint {
        HistoryPoint {
            time: label.to_string(),
            score,
        }
    }

    #[test]
    fn test_seeded_series_holds_sentinel() {
        let series = HistorySeries::seeded(HISTORY_CAPACITY);
        assert_eq!(series.len(), 1);
        assert_eq!(series.latest(), Some(&HistoryPoint::sentinel()));
    }

    #[test]
    fn test_push_evicts_oldest_beyond_capacity() {
        let mut series = HistorySeries::seeded(HISTORY_CAPACITY);
        for i in 0..25u8 {
            series.push(point(&format!("t{i}"), i));
        }
        assert_eq!(series.len(), HISTORY_CAPACITY);
        let points = series.to_vec();
        // 26 pushes total (sentinel + 25); the sentinel and the first five
        // samples are gone, arrival order is preserved.
        assert_eq!(points[0], point("t5", 5));
        assert_eq!(points[19], point("t24", 24));
    }

    #[test]
    fn test_reset_reseeds_single_sentinel() {
        let mut series = HistorySeries::seeded(HISTORY_CAPACITY);
        for i in 0..7u8 {
            series.push(point("x", i));
        }
        series.reset();
        assert_eq!(series.len(), 1);
        assert_eq!(series.to_vec(), vec![HistoryPoint::sentinel()]);
    }

    #[test]
    fn test_from_points_trims_from_front() {
        let raw: Vec<HistoryPoint> = (0..30u8).map(|i| point(&format!("t{i}"), i)).collect();
        let series = HistorySeries::from_points(raw, HISTORY_CAPACITY);
        assert_eq!(series.len(), HISTORY_CAPACITY);
        assert_eq!(series.to_vec()[0], point("t10", 10));
    }

    #[test]
    fn test_from_points_empty_falls_back_to_sentinel() {
        let series = HistorySeries::from_points(Vec::new(), HISTORY_CAPACITY);
        assert_eq!(series.to_vec(), vec![HistoryPoint::sentinel()]);
    }

    #[test]
    fn test_time_label_format() {
        let now = chrono::Local::now();
        let p = HistoryPoint::at(now, 72);
        assert_eq!(p.score, 72);
        assert_eq!(p.time.len(), 5);
        assert!(p.time.contains(':'));
    }
}
