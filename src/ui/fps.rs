//! Sliding-window frame-rate instrumentation.

use std::collections::VecDeque;

/// FIFO bound on the sample window.
const WINDOW_LEN: usize = 100;

/// Rolling window of instantaneous frame rates. The window only grows to
/// [`WINDOW_LEN`] samples and is never explicitly cleared; state lives until
/// process restart.
pub struct FpsCounter {
    samples: VecDeque<f64>,
    last_timestamp: Option<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(WINDOW_LEN + 1),
            last_timestamp: None,
        }
    }

    /// Record a frame at `now` (milliseconds). The first call only seeds the
    /// reference timestamp. A zero-length interval would produce an infinite
    /// rate; such samples are skipped so they cannot poison the window.
    pub fn record(&mut self, now: f64) {
        let Some(last) = self.last_timestamp.replace(now) else {
            return;
        };
        let rate = 1000.0 / (now - last);
        if !rate.is_finite() {
            return;
        }
        self.samples.push_back(rate);
        if self.samples.len() > WINDOW_LEN {
            self.samples.pop_front();
        }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// One pass over the window. `None` until the first interval completes.
    pub fn summary(&self) -> Option<FpsSummary> {
        let latest = *self.samples.back()?;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &sample in &self.samples {
            sum += sample;
            min = min.min(sample);
            max = max.max(sample);
        }
        Some(FpsSummary {
            latest,
            mean: sum / self.samples.len() as f64,
            min,
            max,
        })
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FpsSummary {
    pub latest: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl FpsSummary {
    /// Multi-line readout for the FPS text element, rounded for display.
    pub fn render(&self) -> String {
        format!(
            "Frames per Second:\n         latest = {}\navg of last 100 = {}\nmin of last 100 = {}\nmax of last 100 = {}",
            self.latest.round(),
            self.mean.round(),
            self.min.round(),
            self.max.round(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_is_none_until_first_interval() {
        let mut fps = FpsCounter::new();
        assert!(fps.summary().is_none());
        fps.record(0.0);
        assert!(fps.summary().is_none());
        fps.record(16.0);
        assert!(fps.summary().is_some());
    }

    #[test]
    fn window_is_bounded_at_one_hundred() {
        let mut fps = FpsCounter::new();
        for i in 0..=150 {
            fps.record(f64::from(i) * 10.0);
        }
        assert_eq!(fps.sample_count(), WINDOW_LEN);
    }

    #[test]
    fn eviction_keeps_the_most_recent_samples() {
        let mut fps = FpsCounter::new();
        let mut now = 0.0;
        fps.record(now);
        // intervals grow from 1ms to 150ms, so rates strictly fall
        for interval in 1..=150 {
            now += f64::from(interval);
            fps.record(now);
        }
        let summary = fps.summary().unwrap();
        assert_eq!(fps.sample_count(), WINDOW_LEN);
        assert_eq!(summary.latest, 1000.0 / 150.0);
        assert_eq!(summary.min, 1000.0 / 150.0);
        // the fastest surviving sample is the 51st interval
        assert_eq!(summary.max, 1000.0 / 51.0);
    }

    #[test]
    fn constant_interval_collapses_the_summary() {
        let mut fps = FpsCounter::new();
        for i in 0..=30 {
            fps.record(f64::from(i) * 20.0);
        }
        let summary = fps.summary().unwrap();
        assert_eq!(summary.latest, 50.0);
        assert_eq!(summary.mean, 50.0);
        assert_eq!(summary.min, 50.0);
        assert_eq!(summary.max, 50.0);
    }

    #[test]
    fn zero_length_interval_is_skipped() {
        let mut fps = FpsCounter::new();
        fps.record(5.0);
        fps.record(5.0);
        fps.record(25.0);
        let summary = fps.summary().unwrap();
        assert_eq!(fps.sample_count(), 1);
        assert_eq!(summary.latest, 50.0);
        assert!(summary.mean.is_finite());
        assert!(summary.max.is_finite());
    }

    #[test]
    fn readout_rounds_to_whole_numbers() {
        let text = FpsSummary {
            latest: 59.7,
            mean: 60.2,
            min: 30.4,
            max: 75.5,
        }
        .render();
        assert!(text.starts_with("Frames per Second:"));
        assert!(text.contains("latest = 60"));
        assert!(text.contains("avg of last 100 = 60"));
        assert!(text.contains("min of last 100 = 30"));
        assert!(text.contains("max of last 100 = 76"));
    }
}
