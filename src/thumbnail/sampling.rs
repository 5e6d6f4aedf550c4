//! Evenly spaced sample points along an asset.

use crate::core::progress::Progress;
use crate::core::time::{Time, ZERO};

/// Number of thumbnails in the strip
pub const DEFAULT_THUMBNAIL_COUNT: usize = 10;

/// One point to sample: slot `index` shows the frame at `at`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub index: usize,
    pub progress: Progress,
    pub at: Time,
}

/// Progress of sample `index` out of `count`: `index / count`
pub fn sample_progress(index: usize, count: usize) -> Progress {
    if count == 0 {
        return Progress::START;
    }
    Progress::new(index as f64 / count as f64)
}

/// `t_i = i · duration / count` for `i` in `0..count`; every value lies in
/// `[0, duration)` for a positive duration.
pub fn sample_times(duration: Time, count: usize) -> Vec<Time> {
    samples(duration, count).into_iter().map(|s| s.at).collect()
}

pub fn samples(duration: Time, count: usize) -> Vec<Sample> {
    let duration = duration.max(ZERO);
    (0..count)
        .map(|index| Sample {
            index,
            progress: sample_progress(index, count),
            // Integer math so 100s / 10 lands exactly on whole seconds
            at: (duration as i128 * index as i128 / count as i128) as Time,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time;

    #[test]
    fn test_hundred_seconds_in_ten() {
        let expected: Vec<Time> = (0..10).map(|i| time::from_seconds(i as f64 * 10.0)).collect();
        assert_eq!(sample_times(time::from_seconds(100.0), 10), expected);
    }

    #[test]
    fn test_samples_stay_before_end() {
        for &seconds in &[0.001, 0.5, 3.3, 59.94, 7201.7] {
            let duration = time::from_seconds(seconds);
            let times = sample_times(duration, DEFAULT_THUMBNAIL_COUNT);
            assert_eq!(times.len(), DEFAULT_THUMBNAIL_COUNT);
            assert!(times.iter().all(|&t| t >= 0 && t < duration), "{seconds}: {times:?}");
            assert!(times.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_progress_fractions() {
        let samples = samples(time::from_seconds(20.0), 4);
        let progress: Vec<f64> = samples.iter().map(|s| s.progress.value()).collect();
        assert_eq!(progress, vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(samples[3].index, 3);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(sample_times(time::from_seconds(10.0), 0).is_empty());
        assert_eq!(sample_times(0, 3), vec![0, 0, 0]);
        assert_eq!(sample_times(-5, 2), vec![0, 0]);
    }
}
