//! Threshold constants for isoline extraction.

/// Returns `count` levels evenly splitting `[0, 1]`: `i / (count + 1)` for
/// `i` in `1..=count`.
#[must_use]
pub fn evenly_spaced_levels(count: u32) -> Vec<f32> {
    (1..=count).map(|i| level(i, count)).collect()
}

/// The `i`-th of `count` evenly spaced levels.
#[inline]
#[allow(clippy::cast_precision_loss)]
fn level(i: u32, count: u32) -> f32 {
    i as f32 / (count as f32 + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_levels() {
        assert!(evenly_spaced_levels(0).is_empty());
    }

    #[test]
    fn test_denominator_does_not_overflow() {
        let first = level(1, u32::MAX);
        assert!(first > 0.0 && first < 1e-9);
        assert!(level(u32::MAX, u32::MAX) <= 1.0);
    }

    #[test]
    fn test_single_level_is_half() {
        assert_eq!(evenly_spaced_levels(1), vec![0.5]);
    }

    #[test]
    fn test_levels_spacing() {
        let levels = evenly_spaced_levels(3);
        assert_eq!(levels, vec![0.25, 0.5, 0.75]);

        let levels = evenly_spaced_levels(10);
        assert_eq!(levels.len(), 10);
        assert!(levels.windows(2).all(|w| w[0] < w[1]));
        assert!(levels.iter().all(|&c| c > 0.0 && c < 1.0));
    }
}
