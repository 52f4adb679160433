//! Commit-count thresholds for the five heatmap shades.

/// Ascending thresholds `[0, l1, l2, l3, max]`. A count of 0 is level 0;
/// otherwise the level is the first threshold the count does not exceed,
/// with anything above `l3` drawn at full intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadeLevels([u32; 5]);

impl Default for ShadeLevels {
    fn default() -> Self {
        Self([0, 1, 2, 3, 4])
    }
}

impl ShadeLevels {
    /// Derives thresholds from the non-zero `counts` at the given
    /// percentiles, after dropping outliers above `Q3 + 1.5 * IQR`.
    pub fn from_counts<I>(counts: I, percentiles: &[usize; 4]) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let mut active: Vec<u32> = counts.into_iter().filter(|&c| c > 0).collect();
        if active.is_empty() {
            return Self::default();
        }
        active.sort_unstable();

        let q1 = active[active.len() / 4] as f64;
        let q3 = active[3 * active.len() / 4] as f64;
        let outlier_threshold = (q3 + 1.5 * (q3 - q1)).round() as u32;
        active.retain(|&c| c <= outlier_threshold);

        let Some(&max) = active.last() else {
            return Self::default();
        };

        let mut ranges = vec![0u32];
        for &p in &percentiles[1..] {
            let index = (p * active.len() / 100).min(active.len() - 1);
            let value = active[index];
            if ranges.last().is_some_and(|&last| value > last) {
                ranges.push(value);
            }
        }
        if ranges.last().is_some_and(|&last| max > last) {
            ranges.push(max);
        }
        while ranges.len() < 5 {
            let last = ranges.last().copied().unwrap_or(0);
            ranges.push(if last < max { last + 1 } else { last });
        }

        let mut levels = [0u32; 5];
        levels.copy_from_slice(&ranges[..5]);
        Self(levels)
    }

    pub fn thresholds(&self) -> [u32; 5] {
        self.0
    }

    /// Shade index in `0..=4` for a day's commit count.
    pub fn level(&self, count: u32) -> usize {
        match count {
            0 => 0,
            c if c <= self.0[1] => 1,
            c if c <= self.0[2] => 2,
            c if c <= self.0[3] => 3,
            _ => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_PERCENTILES: [usize; 4] = [0, 30, 60, 90];

    #[test]
    fn no_activity_uses_defaults() {
        let levels = ShadeLevels::from_counts([0, 0, 0], &DEFAULT_PERCENTILES);
        assert_eq!(levels, ShadeLevels::default());
        assert_eq!(levels.level(0), 0);
        assert_eq!(levels.level(1), 1);
        assert_eq!(levels.level(9), 4);
    }

    #[test]
    fn thresholds_follow_percentiles() {
        let counts = 1..=10;
        let levels = ShadeLevels::from_counts(counts, &DEFAULT_PERCENTILES);
        assert_eq!(levels.thresholds(), [0, 4, 7, 10, 10]);
        assert_eq!(levels.level(3), 1);
        assert_eq!(levels.level(4), 1);
        assert_eq!(levels.level(5), 2);
        assert_eq!(levels.level(8), 3);
        assert_eq!(levels.level(10), 3);
    }

    #[test]
    fn outliers_do_not_stretch_the_scale() {
        let mut counts = vec![1, 1, 2, 2, 2, 3, 3, 3];
        counts.push(500);
        let levels = ShadeLevels::from_counts(counts, &DEFAULT_PERCENTILES);
        assert!(levels.thresholds()[4] <= 4, "{:?}", levels.thresholds());
        assert_eq!(levels.level(500), 4);
    }

    #[test]
    fn uniform_activity_pads_to_five() {
        let levels = ShadeLevels::from_counts([2, 2, 2, 0], &DEFAULT_PERCENTILES);
        let t = levels.thresholds();
        assert_eq!(t[0], 0);
        assert!(t.windows(2).all(|w| w[0] <= w[1]), "{t:?}");
        assert_eq!(levels.level(2), 1);
    }
}
