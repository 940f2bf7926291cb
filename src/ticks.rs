// Axis tick helper shared by both figure renderers.

/// Evenly spaced ticks covering the data range, snapped outward to `step`.
///
/// Lower bound is floor(min/step)*step, upper bound is ceil(max/step)*step,
/// inclusive at both ends. A constant input (lower == upper) still yields one
/// tick; an empty input or non-positive step yields nothing.
pub fn compute_ticks(values: &[f64], step: f64) -> Vec<f64> {
    if values.is_empty() || step <= 0.0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let lower = (min / step).floor() * step;
    let upper = (max / step).ceil() * step;

    // Count increments instead of accumulating, so float drift cannot skip
    // the final tick.
    let count = ((upper - lower) / step).round() as i64;
    (0..=count).map(|i| lower + i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_floored_min_to_ceiled_max() {
        let ticks = compute_ticks(&[0.7, 2.3, 1.1], 0.5);

        assert_eq!(ticks.first().copied(), Some(0.5));
        assert_eq!(ticks.last().copied(), Some(2.5));
    }

    #[test]
    fn test_constant_spacing_and_monotonic() {
        let ticks = compute_ticks(&[-1.2, 3.4], 0.5);

        for window in ticks.windows(2) {
            assert!(window[1] > window[0]);
            assert!((window[1] - window[0] - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_singleton_input_still_produces_a_tick() {
        let ticks = compute_ticks(&[2.0], 0.5);
        assert_eq!(ticks, vec![2.0]);
    }

    #[test]
    fn test_constant_input_off_grid() {
        // lower != upper once snapped: floor(0.3)=0.0, ceil(0.3)=0.5
        let ticks = compute_ticks(&[0.3, 0.3], 0.5);
        assert_eq!(ticks, vec![0.0, 0.5]);
    }

    #[test]
    fn test_negative_range() {
        let ticks = compute_ticks(&[-1.699, -0.2], 0.5);

        assert_eq!(ticks.first().copied(), Some(-2.0));
        assert_eq!(ticks.last().copied(), Some(0.0));
        assert_eq!(ticks.len(), 5);
    }

    #[test]
    fn test_empty_input() {
        assert!(compute_ticks(&[], 0.5).is_empty());
    }
}
