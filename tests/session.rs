use boostsim::prelude::*;
use boostsim::{ConfigError, Trace};
use rand::prelude::*;

use std::time::Duration;


fn base_predictions(session: &Session) -> Vec<f64> {
    match session.trace() {
        Trace::GradientBoost(seq) => seq[0].points()
            .iter()
            .map(|p| p.pred)
            .collect(),
        _ => panic!("not a Gradient Boosting page"),
    }
}


fn session(algorithm: Algorithm, seed: u64) -> Session {
    let mut rng = StdRng::seed_from_u64(seed);
    let dataset = algorithm.scenario().generate(&mut rng);
    Session::new(algorithm, dataset).seed(seed)
}


/// Tests for `Session`.
#[cfg(test)]
pub mod session_tests {
    use super::*;

    #[test]
    fn every_page_builds_its_sequence() {
        for algorithm in Algorithm::ALL {
            let session = session(algorithm, 1);
            assert_eq!(session.trace().len(), algorithm.max_steps());
            assert_eq!(session.metrics().len(), algorithm.max_steps());
            assert_eq!(session.playback().n_steps(), algorithm.max_steps());
            assert_eq!(session.step(), 0);
            assert_eq!(session.current_metrics().unwrap().step, 0);
        }
    }


    #[test]
    fn learning_rate_is_clamped_to_the_slider() {
        let mut gbm = session(Algorithm::GradientBoost, 2);
        assert_eq!(gbm.set_learning_rate(1.7), 0.9);
        assert_eq!(gbm.set_learning_rate(0.04), 0.1);
        assert_eq!(gbm.set_learning_rate(0.46), 0.5);
        assert_eq!(gbm.set_learning_rate(f64::NAN), 0.1);

        let mut xgb = session(Algorithm::XGBoost, 2);
        assert_eq!(xgb.set_learning_rate(0.33), 0.35);
        assert_eq!(xgb.set_learning_rate(0.9), 0.5);

        let mut ada = session(Algorithm::AdaBoost, 2);
        let before = ada.learning_rate();
        assert_eq!(ada.set_learning_rate(0.9), before);
    }


    #[test]
    fn learning_rate_change_rebuilds_the_sequence() {
        let mut xgb = session(Algorithm::XGBoost, 3);
        xgb.apply(Intent::Seek(2));
        let before = xgb.trace().clone();

        xgb.set_learning_rate(0.5);
        assert_ne!(xgb.trace(), &before);
        assert_eq!(xgb.trace().len(), before.len());
        // The step survives a rebuild of the same length.
        assert_eq!(xgb.step(), 2);
    }


    #[test]
    fn learning_rate_keeps_the_base_model() {
        let mut rng = StdRng::seed_from_u64(1);
        let dataset = Scenario::Maintenance.generate(&mut rng);
        let mut gbm = Session::new(Algorithm::GradientBoost, dataset);
        let before = base_predictions(&gbm);
        let last_before = gbm.metrics()[7];

        gbm.set_learning_rate(0.5);
        assert_eq!(base_predictions(&gbm), before);
        assert_ne!(gbm.metrics()[7], last_before);

        gbm.set_learning_rate(0.3);
        assert_eq!(base_predictions(&gbm), before);
        assert_eq!(gbm.metrics()[7], last_before);
    }


    #[test]
    fn fixed_seed_survives_a_new_dataset() {
        let mut rng = StdRng::seed_from_u64(12);
        let dataset = Scenario::Maintenance.generate(&mut rng);
        let mut gbm = Session::new(Algorithm::GradientBoost, dataset.clone())
            .seed(12);
        let before = gbm.trace().clone();

        gbm.replace_dataset(dataset);
        assert_eq!(gbm.trace(), &before);
    }


    #[test]
    fn page_interval() {
        let mut rng = StdRng::seed_from_u64(14);
        let dataset = Scenario::SensorFailure.generate(&mut rng);
        let xgb = Session::new(Algorithm::XGBoost, dataset.clone());
        assert_eq!(xgb.interval(), Duration::from_millis(2_500));

        let settings = Settings::from_json_str(r#"{ "interval_millis": 50 }"#)
            .unwrap();
        let xgb = Session::with_settings(Algorithm::XGBoost, dataset, &settings);
        assert_eq!(xgb.interval(), Duration::from_millis(400));
    }


    #[test]
    fn replacing_the_dataset_resets_the_step() {
        let mut ada = session(Algorithm::AdaBoost, 4);
        ada.apply(Intent::Seek(3));
        ada.apply(Intent::Play);

        let mut rng = StdRng::seed_from_u64(40);
        ada.replace_dataset(Scenario::Subscription.generate_n(&mut rng, 20));
        assert_eq!(ada.step(), 0);
        assert!(!ada.playback().is_playing());
        assert_eq!(ada.dataset().len(), 20);
        assert_eq!(ada.trace().len(), 5);
    }


    #[test]
    fn empty_dataset_gives_an_empty_page() {
        let mut gbm = session(Algorithm::GradientBoost, 5);
        gbm.replace_dataset(Dataset::empty(Scenario::Maintenance.schema()));

        assert!(gbm.trace().is_empty());
        assert!(gbm.metrics().is_empty());
        assert_eq!(gbm.apply(Intent::Next), 0);
        assert_eq!(gbm.apply(Intent::Play), 0);
        assert!(!gbm.playback().is_playing());

        let frame = gbm.frame();
        assert!(frame.snapshot.is_none());
        assert!(frame.metrics.is_none());
        assert!(frame.histogram.is_none());
        assert_eq!(frame.n_steps, 0);
    }


    #[test]
    fn only_gradient_boosting_has_diagnostics() {
        let gbm = session(Algorithm::GradientBoost, 6);
        assert_eq!(gbm.residual_histograms().len(), 8);
        assert_eq!(gbm.tree_contributions().len(), 8);
        let frame = gbm.frame();
        assert!(frame.histogram.is_some());
        assert!(frame.tree_contribution.is_some_and(|c| c > 0.0));

        for algorithm in [Algorithm::AdaBoost, Algorithm::XGBoost] {
            let s = session(algorithm, 6);
            assert!(s.residual_histograms().is_empty());
            assert!(s.tree_contributions().is_empty());
            assert!(s.frame().histogram.is_none());
            assert!(s.frame().tree_contribution.is_none());
        }
    }


    #[test]
    fn frame_serializes_to_json() {
        let mut gbm = session(Algorithm::GradientBoost, 7);
        gbm.apply(Intent::Next);

        let value = serde_json::to_value(gbm.frame()).unwrap();
        assert_eq!(value["algorithm"], "gradientboost");
        assert_eq!(value["step"], 1);
        assert_eq!(value["n_steps"], 8);
        assert_eq!(value["playing"], false);
        assert_eq!(value["snapshot"]["step"], 1);

        let points = value["snapshot"]["points"].as_array().unwrap();
        assert_eq!(points.len(), 50);
        for key in ["id", "x", "y", "target", "pred", "residual"] {
            assert!(points[0].get(key).is_some(), "missing `{key}`");
        }
        assert_eq!(value["metrics"]["loss"]["kind"], "residual");
        assert_eq!(value["histogram"]["bins"].as_array().unwrap().len(), 8);
    }


    #[test]
    fn trace_is_tagged_by_algorithm() {
        let ada = session(Algorithm::AdaBoost, 8);
        assert!(matches!(ada.trace(), Trace::AdaBoost(_)));

        let value = serde_json::to_value(ada.trace()).unwrap();
        assert_eq!(value["algorithm"], "adaboost");
        assert_eq!(value["snapshots"].as_array().unwrap().len(), 5);
        assert!(value["snapshots"][0]["points"][0].get("weight").is_some());
    }


    #[test]
    fn settings_seed_the_page() {
        let settings = Settings::from_json_str(
            r#"{ "gbm_learning_rate": 2.0, "auto_rotate": true, "seed": 7 }"#
        ).unwrap();

        let mut rng = StdRng::seed_from_u64(9);
        let dataset = Scenario::Maintenance.generate(&mut rng);
        let a = Session::with_settings(Algorithm::GradientBoost, dataset.clone(), &settings);
        let b = Session::with_settings(Algorithm::GradientBoost, dataset, &settings);

        assert_eq!(a.learning_rate(), 0.9);
        assert_eq!(a.trace(), b.trace());

        // `auto_rotate` loops the playback.
        let mut a = a;
        a.apply(Intent::Seek(7));
        a.apply(Intent::Play);
        assert_eq!(a.apply(Intent::Tick), 0);
        assert!(a.playback().is_playing());
    }
}


/// Tests for `Settings`, `Slider`, and `Algorithm`.
#[cfg(test)]
pub mod config_tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults() {
        let settings = Settings::from_json_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.learning_rate(Algorithm::AdaBoost), None);
        assert_eq!(settings.learning_rate(Algorithm::GradientBoost), Some(0.3));
        assert_eq!(settings.learning_rate(Algorithm::XGBoost), Some(0.3));
        assert_eq!(settings.interval(Algorithm::AdaBoost), Duration::from_millis(1_200));
        assert_eq!(settings.interval(Algorithm::XGBoost), Duration::from_millis(2_500));
        assert_eq!(settings.end_behavior(Algorithm::GradientBoost), EndBehavior::Stop);
        assert_eq!(settings.end_behavior(Algorithm::XGBoost), EndBehavior::Rewind);
        assert_eq!(settings.provider().root(), JsonDirectory::bundled().root());
    }


    #[test]
    fn interval_is_clamped() {
        let settings = Settings::from_json_str(r#"{ "interval_millis": 50 }"#).unwrap();
        assert_eq!(settings.interval(Algorithm::GradientBoost), Duration::from_millis(400));

        let settings = Settings::from_json_str(r#"{ "interval_millis": 1234 }"#).unwrap();
        assert_eq!(settings.interval(Algorithm::XGBoost), Duration::from_millis(1_200));
    }


    #[test]
    fn settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let err = Settings::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        fs::write(&path, r#"{ "xgb_learning_rate": 0.45, "data_dir": "/srv/data" }"#)
            .unwrap();
        let settings = Settings::from_json_file(&path).unwrap();
        assert_eq!(settings.learning_rate(Algorithm::XGBoost), Some(0.45));
        assert_eq!(settings.provider().root(), std::path::Path::new("/srv/data"));

        fs::write(&path, r#"{ "seed": "seven" }"#).unwrap();
        let err = Settings::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }


    #[test]
    fn slider_snaps_and_clamps() {
        let slider = Slider::new(0.1, 0.5, 0.05);
        assert_eq!(slider.clamp(0.33), 0.35);
        assert_eq!(slider.clamp(0.0), 0.1);
        assert_eq!(slider.clamp(7.0), 0.5);
        assert_eq!(slider.clamp(f64::INFINITY), 0.1);
        assert!(slider.contains(0.25));
        assert!(!slider.contains(0.55));
    }


    #[test]
    fn algorithm_keys() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.key().parse::<Algorithm>().unwrap(), algorithm);
        }
        assert!("catboost".parse::<Algorithm>().is_err());
        assert_eq!(Algorithm::GradientBoost.to_string(), "Gradient Boosting");
        assert!(Algorithm::AdaBoost.learning_rate_slider().is_none());
    }
}


/// Tests for `Logger`.
#[cfg(test)]
pub mod logger_tests {
    use super::*;
    use std::fs;

    #[test]
    fn writes_one_row_per_step() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adaboost.csv");

        let mut rng = StdRng::seed_from_u64(10);
        let dataset = Scenario::Subscription.generate(&mut rng);
        let report = Logger::new(AdaBoost::init(&dataset))
            .print_every(usize::MAX)
            .run(&path)
            .unwrap();

        assert_eq!(report.sequence.len(), 5);
        assert_eq!(report.metrics.len(), 5);
        assert_eq!(report.sequence, AdaBoost::init(&dataset).run());

        let text = fs::read_to_string(&path).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Step,Accuracy,Precision,Recall,F1,Loss,Time");
        assert!(lines[1].starts_with("0,"));
        assert!(lines[5].starts_with("4,100,"));
    }


    #[test]
    fn empty_dataset_writes_the_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xgboost.csv");

        let dataset = Dataset::empty(Schema::default());
        let report = Logger::new(XGBoost::init(&dataset))
            .print_every(usize::MAX)
            .run(&path)
            .unwrap();
        assert!(report.sequence.is_empty());

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
