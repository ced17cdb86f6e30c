//! Elevation profile accumulation.
//!
//! Each track segment is one independent series. Climb and descent are
//! summed over a centered moving average so that interpolation noise in the
//! samples does not inflate the totals; min/max use the raw samples.

/// Half width of the smoothing window (window = 2 * half + 1 = 5 samples).
pub const SMOOTHING_HALF_WINDOW: usize = 2;

/// Totals over every accepted series of a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationSummary {
    pub min_m: f64,
    pub max_m: f64,
    pub climb_m: f64,
    pub descent_m: f64,
}

/// Running accumulator fed one series per track segment.
#[derive(Debug, Clone, Default)]
pub struct ElevationProfile {
    summary: Option<ElevationSummary>,
}

impl ElevationProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one series of raw elevation samples.
    ///
    /// Series shorter than two samples, or made only of zeros (tracks
    /// clamped to the ground), carry no profile and are ignored.
    pub fn add_series(&mut self, samples: &[f64]) {
        if samples.len() < 2 || samples.iter().all(|&e| e == 0.0) {
            log::debug!("skipping elevation series of {} samples", samples.len());
            return;
        }

        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let smoothed = smooth(samples, SMOOTHING_HALF_WINDOW);
        let (climb, descent) = smoothed
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold((0.0, 0.0), |(up, down), diff| {
                if diff > 0.0 {
                    (up + diff, down)
                } else {
                    (up, down - diff)
                }
            });

        let summary = self.summary.get_or_insert(ElevationSummary {
            min_m: min,
            max_m: max,
            climb_m: 0.0,
            descent_m: 0.0,
        });
        summary.min_m = summary.min_m.min(min);
        summary.max_m = summary.max_m.max(max);
        summary.climb_m += climb;
        summary.descent_m += descent;
    }

    /// `None` when no series carried elevation data.
    pub fn finish(self) -> Option<ElevationSummary> {
        self.summary
    }
}

/// Centered moving average; windows near the ends shrink to what is available.
pub fn smooth(samples: &[f64], half: usize) -> Vec<f64> {
    let len = samples.len();
    (0..len)
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half).min(len - 1);
            let window = &samples[start..=end];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect()
}
