//! This file provides some numeric helpers
//! shared by the step rules and the metric aggregator.


/// Returns the upper median `sorted[n / 2]` of the given values.
/// Returns `None` if `values` is empty.
/// Note that the median of an even-length slice is **not** averaged.
#[inline(always)]
pub fn upper_median<T: AsRef<[f64]>>(values: T) -> Option<f64> {
    let values = values.as_ref();
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(sorted[sorted.len() / 2])
}


/// Clips `value` into `[lower, upper]`.
#[inline(always)]
pub fn clip(value: f64, lower: f64, upper: f64) -> f64 {
    value.max(lower).min(upper)
}


/// The logistic sigmoid `1 / (1 + exp(-z))`.
#[inline(always)]
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}


/// Returns the pair `(min, max)` of the given values.
/// Returns `None` if `values` is empty.
#[inline(always)]
pub fn min_max<I>(values: I) -> Option<(f64, f64)>
    where I: IntoIterator<Item = f64>
{
    values.into_iter()
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}


/// Maps `value` into `[0, 1)` relative to `[min, max]`.
/// `eps` keeps the denominator away from zero.
#[inline(always)]
pub fn normalize(value: f64, (min, max): (f64, f64), eps: f64) -> f64 {
    (value - min) / (max - min + eps)
}


/// Returns `numer / denom`, or `0` if `denom == 0`.
#[inline(always)]
pub fn ratio_or_zero(numer: f64, denom: f64) -> f64 {
    if denom == 0.0 { 0.0 } else { numer / denom }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_takes_the_upper_middle() {
        assert_eq!(upper_median([3.0, 1.0, 2.0, 4.0]), Some(3.0));
        assert_eq!(upper_median([5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(upper_median(Vec::<f64>::new()), None);
    }

    #[test]
    fn clip_bounds() {
        assert_eq!(clip(1.2, 0.01, 0.99), 0.99);
        assert_eq!(clip(-3.0, 0.01, 0.99), 0.01);
        assert_eq!(clip(0.5, 0.01, 0.99), 0.5);
    }

    #[test]
    fn sigmoid_is_centered() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(1e-12) > 0.5);
        assert!(sigmoid(-1e-12) < 0.5);
    }

    #[test]
    fn min_max_of_empty() {
        assert_eq!(min_max(Vec::<f64>::new()), None);
        assert_eq!(min_max([2.0, -1.0, 7.0]), Some((-1.0, 7.0)));
    }

    #[test]
    fn ratio_guards_zero() {
        assert_eq!(ratio_or_zero(0.0, 0.0), 0.0);
        assert_eq!(ratio_or_zero(1.0, 4.0), 0.25);
    }
}
