use algoviz::{
    Error, Point, Trace,
    input::{parse_query, parse_table},
    learning::{
        Dataset, DecisionNode, NaiveBayesConfig, Query,
        decision_tree::{self, information_gain},
        naive_bayes, regression,
    },
};
use rand::{Rng, SeedableRng, rngs::StdRng};

const TENNIS: &str = "\
Outlook,Temperature,Humidity,Wind,Play
Sunny,Hot,High,Weak,No
Sunny,Hot,High,Strong,No
Overcast,Hot,High,Weak,Yes
Rain,Mild,High,Weak,Yes
Rain,Cool,Normal,Weak,Yes
Rain,Cool,Normal,Strong,No
Overcast,Cool,Normal,Strong,Yes
Sunny,Mild,High,Weak,No
Sunny,Cool,Normal,Weak,Yes
Rain,Mild,Normal,Weak,Yes
Sunny,Mild,Normal,Strong,Yes
Overcast,Mild,High,Strong,Yes
Overcast,Hot,Normal,Weak,Yes
Rain,Mild,High,Strong,No
";

/// Rows over three categorical features whose class is a function of the
/// first two, so no two rows contradict each other.
fn consistent_dataset(rows: usize, rng: &mut StdRng) -> Dataset {
    const VALUES: [&str; 3] = ["a", "b", "c"];
    let header = ["F1", "F2", "F3", "Class"].map(String::from).to_vec();
    let records = (0..rows)
        .map(|_| {
            let values: Vec<String> = (0..3)
                .map(|_| VALUES[rng.random_range(0..VALUES.len())].to_string())
                .collect();
            let class = if values[0] == values[1] || values[0] == "c" { "Yes" } else { "No" };
            let mut record = values;
            record.push(class.to_string());
            record
        })
        .collect();
    Dataset::new(header, records).expect("generated rows share the header width")
}

#[test]
fn id3_reproduces_every_consistent_training_row() {
    let mut rng = StdRng::seed_from_u64(3);

    for case in 0..100 {
        let dataset = consistent_dataset(rng.random_range(1..25), &mut rng);
        let outcome = decision_tree::run(&dataset, None).result.unwrap();

        for row in dataset.rows() {
            let query: Query = dataset
                .features()
                .iter()
                .cloned()
                .zip(row.values.iter().cloned())
                .collect();
            let prediction = outcome.tree.predict(&query, &mut Trace::new());
            assert_eq!(
                prediction.label(),
                row.class,
                "case {case}: training row {query} misclassified"
            );
        }
    }
}

#[test]
fn information_gain_is_non_negative_and_bounded_by_entropy() {
    let mut rng = StdRng::seed_from_u64(8);

    for _ in 0..100 {
        let dataset = consistent_dataset(rng.random_range(1..30), &mut rng);
        let rows: Vec<_> = dataset.rows().iter().collect();
        let h = decision_tree::entropy(&rows);
        for feature in 0..dataset.features().len() {
            let gain = information_gain(&rows, feature);
            assert!(gain >= 0.0);
            assert!(gain <= h + 1e-12);
        }

        let yes: Vec<_> = rows.iter().copied().filter(|r| r.class == "Yes").collect();
        assert_eq!(decision_tree::entropy(&yes), 0.0, "a single class has no entropy");
    }
}

#[test]
fn tennis_tree_and_naive_bayes_agree_on_a_stormy_sunny_day() {
    let dataset = parse_table(TENNIS).unwrap();
    let query = parse_query("Outlook=Sunny\nTemperature=Cool\nHumidity=High\nWind=Strong").unwrap();

    let tree = decision_tree::run(&dataset, Some(&query)).result.unwrap();
    assert!(matches!(&tree.tree.root, DecisionNode::Split { feature, .. } if feature == "Outlook"));
    assert_eq!(tree.prediction.as_ref().map(|p| p.label()), Some("No"));

    let bayes = naive_bayes::run(&dataset, &query, &NaiveBayesConfig::default())
        .result
        .unwrap();
    assert_eq!(bayes.prediction.predicted, "No");
    let no = bayes.prediction.probability_of("No").unwrap();
    assert!((no - 0.7954).abs() < 1e-3, "P(No) = {no}");
    let total: f64 = bayes.prediction.scores.iter().map(|s| s.probability).sum();
    assert!((total - 1.0).abs() < 1e-12);
}

#[test]
fn naive_bayes_rejects_features_outside_the_training_header() {
    let dataset = parse_table(TENNIS).unwrap();
    let query = Query::new().with("Outlook", "Sunny").with("Mood", "Grumpy");
    let run = naive_bayes::run(&dataset, &query, &NaiveBayesConfig::default());
    assert!(matches!(run.result, Err(Error::UnknownFeature { feature }) if feature == "Mood"));
}

#[test]
fn regression_fits_a_noisy_line() {
    let points = [(1.0, 1.0), (2.0, 3.0), (3.0, 2.0), (4.0, 4.0)].map(Point::from);
    let outcome = regression::run(&points, Some(5.0)).result.unwrap();

    assert!((outcome.model.slope - 0.8).abs() < 1e-12);
    assert!((outcome.model.intercept - 0.5).abs() < 1e-12);
    assert!((outcome.model.r_squared - 0.64).abs() < 1e-12);
    let (x, y) = outcome.prediction.unwrap();
    assert_eq!(x, 5.0);
    assert!((y - 4.5).abs() < 1e-12);
    assert_eq!(outcome.model.equation(), "Ŷ = 0.50 + 0.80X");
}

#[test]
fn regression_needs_spread_in_x() {
    let single = [Point::new(1.0, 1.0)];
    assert!(matches!(
        regression::run(&single, None).result,
        Err(Error::InsufficientData { required: 2, got: 1 })
    ));

    let vertical = [Point::new(2.0, 1.0), Point::new(2.0, 5.0)];
    assert!(matches!(regression::run(&vertical, None).result, Err(Error::ZeroVariance)));
}
