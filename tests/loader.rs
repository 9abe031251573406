use boostsim::prelude::*;
use boostsim::LoadError;
use serde_json::json;

use std::fs;


fn records(value: serde_json::Value) -> Vec<Record> {
    serde_json::from_value(value).unwrap()
}


/// Tests for the dataset loading path.
#[cfg(test)]
pub mod loader_tests {
    use super::*;
    use polars::prelude::NamedFrom;

    #[test]
    fn bundled_domains_load() {
        let provider = JsonDirectory::bundled();
        for domain in Domain::ALL {
            let records = provider.load(domain.key()).unwrap();
            assert_eq!(records.len(), 40);

            let dataset = domain.dataset(&provider, LabelRule::Truthy);
            assert_eq!(dataset.len(), 40);
            assert_eq!(dataset.schema(), &domain.schema());
        }

        let banking = Domain::Banking.dataset(&provider, LabelRule::Truthy);
        let positives = banking.targets().iter().filter(|&&t| t == 1.0).count();
        assert_eq!(positives, 17);

        let automation = Domain::Automation.dataset(&provider, LabelRule::Truthy);
        let failures = automation.targets().iter().filter(|&&t| t == 1.0).count();
        assert_eq!(failures, 13);
    }


    #[test]
    fn unknown_domain_is_an_error() {
        let provider = JsonDirectory::bundled();
        let err = provider.load("retail").unwrap_err();
        assert!(matches!(err, LoadError::UnknownDomain(ref key) if key == "retail"));
        assert!("retail".parse::<Domain>().is_err());
        assert_eq!("banking".parse::<Domain>().unwrap(), Domain::Banking);
    }


    #[test]
    fn failed_load_yields_empty_records() {
        let dir = tempfile::tempdir().unwrap();
        let provider = JsonDirectory::new(dir.path());

        // Missing file.
        assert!(matches!(provider.load("banking"), Err(LoadError::Io { .. })));
        assert!(load_or_empty(&provider, "banking").is_empty());

        // Malformed JSON.
        fs::write(dir.path().join("banking.json"), "[{\"age\": ").unwrap();
        assert!(matches!(provider.load("banking"), Err(LoadError::Parse { .. })));
        assert!(load_or_empty(&provider, "banking").is_empty());

        // Valid JSON, but not an array of records.
        fs::write(dir.path().join("automation.json"), "{\"failure\": 1}").unwrap();
        assert!(matches!(provider.load("automation"), Err(LoadError::NotRecords(_))));
        fs::write(dir.path().join("automation.json"), "[1, 2, 3]").unwrap();
        assert!(matches!(provider.load("automation"), Err(LoadError::NotRecords(_))));

        let dataset = Domain::Automation.dataset(&provider, LabelRule::Truthy);
        assert!(dataset.is_empty());
    }


    #[test]
    fn closures_are_providers() {
        let provider = |key: &str| -> Result<Vec<Record>, LoadError> {
            match key {
                "banking" => Ok(records(json!([
                    {"age": 30, "balance": 100.0, "subscribed": true},
                    {"age": 60, "balance": 900.0, "subscribed": false},
                ]))),
                _ => Err(LoadError::UnknownDomain(key.to_string())),
            }
        };

        let dataset = Domain::Banking.dataset(&provider, LabelRule::Truthy);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.points()[0], LabeledPoint::new(0, 30.0, 100.0, 1.0));
        assert_eq!(dataset.points()[1], LabeledPoint::new(1, 60.0, 900.0, 0.0));

        assert!(Domain::Automation.dataset(&provider, LabelRule::Truthy).is_empty());
    }


    #[test]
    fn truthy_labels() {
        let rows = records(json!([
            {"x": 1, "y": 1, "label": true},
            {"x": 2, "y": 2, "label": false},
            {"x": 3, "y": 3, "label": 2},
            {"x": 4, "y": 4, "label": 0},
            {"x": 5, "y": 5, "label": "no"},
            {"x": 6, "y": 6, "label": ""},
            {"x": 7, "y": 7},
        ]));
        let dataset = Dataset::from_records(&rows, Schema::default(), LabelRule::Truthy);
        assert_eq!(dataset.targets(), vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
    }


    #[test]
    fn numeric_labels_above_median() {
        let rows = records(json!([
            {"x": 1, "y": 0, "label": 10},
            {"x": 2, "y": 0, "label": 40},
            {"x": 3, "y": 0, "label": 20},
            {"x": 4, "y": 0, "label": 30},
        ]));
        // Upper median of [10, 20, 30, 40] is 30.
        let dataset = Dataset::from_records(&rows, Schema::default(), LabelRule::AboveMedian);
        assert_eq!(dataset.targets(), vec![0.0, 1.0, 0.0, 0.0]);
    }


    #[test]
    fn mixed_labels_fall_back_to_truthy() {
        let rows = records(json!([
            {"x": 1, "y": 0, "label": 10},
            {"x": 2, "y": 0, "label": true},
            {"x": 3, "y": 0, "label": 0},
        ]));
        let dataset = Dataset::from_records(&rows, Schema::default(), LabelRule::AboveMedian);
        assert_eq!(dataset.targets(), vec![1.0, 1.0, 0.0]);
    }


    #[test]
    fn bad_features_become_zero() {
        let rows = records(json!([
            {"x": "12.5", "y": null, "label": 1},
            {"x": "abc", "label": 0},
        ]));
        let dataset = Dataset::from_records(&rows, Schema::default(), LabelRule::Truthy);
        assert_eq!(dataset.points()[0], LabeledPoint::new(0, 12.5, 0.0, 1.0));
        assert_eq!(dataset.points()[1], LabeledPoint::new(1, 0.0, 0.0, 0.0));
    }


    #[test]
    fn from_dataframe() {
        let df = polars::df!(
            "temperature" => &[30.0, 60.0, 75.0],
            "pressure" => &[120.0, 180.0, 220.0],
            "failure" => &[0i32, 1, 1],
        ).unwrap();
        let schema = Schema::new("temperature", "pressure", "failure");

        let dataset = Dataset::from_dataframe(&df, schema.clone(), LabelRule::Truthy)
            .unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.xs(), vec![30.0, 60.0, 75.0]);
        assert_eq!(dataset.ys(), vec![120.0, 180.0, 220.0]);
        assert_eq!(dataset.targets(), vec![0.0, 1.0, 1.0]);
        assert_eq!(dataset.schema(), &schema);

        let missing = Schema::new("temperature", "pressure", "label");
        let err = Dataset::from_dataframe(&df, missing, LabelRule::Truthy);
        assert!(matches!(err, Err(LoadError::Frame(_))));
    }


    #[test]
    fn scenarios_generate_their_size() {
        let mut rng = rand::thread_rng();
        for scenario in [Scenario::Subscription, Scenario::Maintenance, Scenario::SensorFailure] {
            let dataset = scenario.generate(&mut rng);
            assert_eq!(dataset.len(), scenario.n_sample());
            assert_eq!(dataset.schema(), &scenario.schema());
            assert!(dataset.targets().iter().all(|&t| t == 0.0 || t == 1.0));
        }
        assert_eq!(Scenario::Maintenance.generate_n(&mut rng, 7).len(), 7);
    }
}
