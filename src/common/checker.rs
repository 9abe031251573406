//! This file defines some functions that checks some pre-conditions
//! E.g., the range of the learning rate.


/// Check the learning rate.
/// Callers clamp user input before it reaches the step rules,
/// so a violation here is a programming error.
#[inline(always)]
pub(crate) fn check_learning_rate(eta: f64) {
    assert!(
        eta > 0.0 && eta <= 1.0,
        "learning rate must be in (0, 1]. got {eta}."
    );
}


/// Check the amplitude of the prediction jitter.
#[inline(always)]
pub(crate) fn check_jitter(amplitude: f64) {
    assert!(
        (0f64..=1f64).contains(&amplitude),
        "jitter amplitude must be in [0, 1]. got {amplitude}."
    );
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learning_rate_upper_bound_is_inclusive() {
        check_learning_rate(1.0);
        check_learning_rate(0.3);
    }

    #[test]
    #[should_panic]
    fn learning_rate_zero_is_rejected() {
        check_learning_rate(0.0);
    }

    #[test]
    #[should_panic]
    fn learning_rate_nan_is_rejected() {
        check_learning_rate(f64::NAN);
    }
}
