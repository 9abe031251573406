use boostsim::prelude::*;
use boostsim::booster::{contribution, contributions};
use boostsim::constants::*;
use rand::prelude::*;


fn sensors(seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    Scenario::SensorFailure.generate(&mut rng)
}


/// Tests for `XGBoost`.
#[cfg(test)]
pub mod xgboost_tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn score_follows_margin_sign() {
        let dataset = sensors(1);
        for eta in [0.1, 0.3, 0.5] {
            let sequence = XGBoost::init(&dataset).learning_rate(eta).run();
            assert_eq!(sequence.len(), XGB_STEPS);

            for snapshot in &sequence {
                for p in snapshot.points() {
                    if p.margin.abs() < 1e-12 {
                        continue;
                    }
                    assert_eq!(p.score > 0.5, p.margin > 0.0);
                    assert_eq!(p.predicted_label() == 1, p.margin > 0.0);
                    assert_eq!(p.residual, p.point.target - p.score);
                }
            }
        }
    }


    #[test]
    fn margin_is_the_sum_of_contributions() {
        let dataset = sensors(2);
        let eta = 0.25;
        let sequence = XGBoost::init(&dataset).learning_rate(eta).run();

        for snapshot in &sequence {
            let n_steps = snapshot.step() + 1;
            for p in snapshot.points() {
                let expected = contributions(eta, p.influence, p.point.target, n_steps)
                    .into_iter()
                    .sum::<f64>();
                assert_relative_eq!(p.margin, expected, epsilon = 1e-12);
            }
        }
    }


    #[test]
    fn contribution_closed_form() {
        // eta * 0.85^0 * 1 * (1 - e^{-0.4}) * 1 * (+1)
        let c = contribution(0.3, 1.0, 1.0, 0);
        assert_relative_eq!(c, 0.3 * (1.0 - (-0.4f64).exp()), epsilon = 1e-12);

        let c = contribution(0.3, 1.0, 0.0, 2);
        let expected = -0.3 * 0.85f64.powi(2) * (1.0 - (-1.2f64).exp()) * 3.0;
        assert_relative_eq!(c, expected, epsilon = 1e-12);
    }


    #[test]
    fn contributions_scale_with_learning_rate() {
        let low = contributions(0.1, 0.7, 1.0, XGB_STEPS);
        let high = contributions(0.4, 0.7, 1.0, XGB_STEPS);
        for (l, h) in low.iter().zip(&high) {
            assert_relative_eq!(*h, 4.0 * l, epsilon = 1e-12);
        }
    }


    #[test]
    fn influence_is_in_range() {
        let dataset = sensors(3);
        let influences = XGBoost::init(&dataset).influences();
        assert_eq!(influences.len(), dataset.len());
        for v in influences {
            assert!((-2.0..=2.0).contains(&v));
        }
    }


    #[test]
    fn single_point_has_negative_influence() {
        // min == max, so both normalized features are `0`.
        let points = vec![LabeledPoint::new(0, 5.0, 5.0, 1.0)];
        let dataset = Dataset::new(points, Schema::default());
        let sequence = XGBoost::init(&dataset).run();
        let p = sequence[0].points()[0];
        assert_relative_eq!(p.influence, -2.0);
        assert!(p.margin < 0.0);
        assert!(p.is_misclassified());
    }


    #[test]
    fn empty_dataset_yields_empty_sequence() {
        let dataset = Dataset::empty(Schema::default());
        assert!(XGBoost::init(&dataset).run().is_empty());
    }
}
