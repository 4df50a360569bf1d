mod angles;
pub mod points;

pub use angles::{AngleDir, AngleUnit, ANGLE_TOL};

/// Generate the values `start, start + step, start + 2 * step, ...` up to but not including
/// `stop`, in the manner of numpy's `arange`. The number of values is `ceil((stop - start) /
/// step)`, and each value is computed from its index rather than by accumulation, so long sweeps
/// do not drift.
///
/// A zero step or an empty interval produces no values.
///
/// # Arguments
///
/// * `start`: the first value, inclusive
/// * `stop`: the upper limit, exclusive
/// * `step`: the spacing between values, may be negative to count down
///
/// returns: Vec<f64, Global>
///
/// # Examples
///
/// ```
/// use flatsense::common::arange;
/// let values = arange(-1.0, 1.0, 0.5);
/// assert_eq!(values, vec![-1.0, -0.5, 0.0, 0.5]);
/// ```
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step == 0.0 || !step.is_finite() {
        return Vec::new();
    }

    let span = (stop - start) / step;
    if !(span > 0.0) {
        return Vec::new();
    }

    let count = span.ceil() as usize;
    (0..count).map(|i| start + i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(-90.0, 90.0, 1.0, 180)]
    #[test_case(-45.0, 45.0, 5.0, 18)]
    #[test_case(0.0, 10.0, 3.0, 4)]
    #[test_case(0.0, -1.0, -0.25, 4)]
    #[test_case(10.0, 0.0, 1.0, 0)]
    #[test_case(0.0, 0.0, 1.0, 0)]
    #[test_case(0.0, 1.0, 0.0, 0)]
    fn test_arange_count(start: f64, stop: f64, step: f64, count: usize) {
        assert_eq!(arange(start, stop, step).len(), count);
    }

    #[test]
    fn test_arange_excludes_stop() {
        let values = arange(-90.0, 90.0, 1.0);
        assert_eq!(values[0], -90.0);
        assert_eq!(values[values.len() - 1], 89.0);
    }
}
