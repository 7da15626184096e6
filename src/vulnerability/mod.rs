//! This module implements the Bayes vulnerability assessment of a dataset:
//! equivalence-class partitioning, per-class tallies of sensitive values,
//! and their aggregation into result tables.
pub mod aggregate;
pub mod finalizer;
pub mod histogram;
pub mod partition;
pub mod tally;

pub use self::finalizer::Accumulators;
pub use self::histogram::{Histogram, BINS};
pub use self::partition::{EquivalenceClass, Partitioner};
pub use self::tally::{FrequencyCount, SensitiveTally};

use log::{debug, info};

use crate::config::Config;
use crate::dataset::Dataset;
use crate::errors::Result;
use crate::results::{qid_label, Results};

/// Assesses the vulnerability of `dataset` under `config`.
///
/// The configuration is checked against the dataset before scanning, so
/// an invalid configuration never produces partial results. The dataset
/// is only read.
pub fn assess(dataset: &Dataset, config: &Config) -> Result<Results> {
    let columns = config.resolve(dataset)?;
    debug!("assessing {} rows over QID {}", dataset.len(),
           qid_label(config.quasi_identifiers()));

    let partitioner = Partitioner::new(dataset, &columns.quasi_identifiers);
    let mut tally = SensitiveTally::new(&columns.sensitive_attributes);
    let mut acc = Accumulators::new(config);

    for class in partitioner.classes() {
        for &row in class.rows() {
            tally.observe(dataset.row(row));
        }
        acc.fold_class(class.len(), &mut tally)?;
    }

    let results = aggregate::aggregate(acc, dataset, &columns)?;
    info!("assessed QID {}: {} attribute rows, {} worth rows",
          qid_label(config.quasi_identifiers()),
          results.attribute_inference().len(),
          results.information_worth().len());
    Ok(results)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;
    use crate::errors::Error;
    use float_cmp::approx_eq;
    use std::collections::BTreeMap;

    fn dataset(columns: Vec<&str>, rows: Vec<Vec<&str>>) -> Dataset {
        let rows = rows.into_iter()
                       .map(|r| r.into_iter().map(Value::from).collect())
                       .collect();
        Dataset::new(columns, rows).unwrap()
    }

    #[test]
    fn re_identification() {
        let d = Dataset::new(vec!["A"],
                             vec![1, 1, 2, 3].into_iter()
                                             .map(|x| vec![Value::Integer(x)])
                                             .collect())
                        .unwrap();
        let results = assess(&d, &Config::new(vec!["A"])).unwrap();

        assert_eq!(results.re_identification().len(), 1);
        assert!(results.attribute_inference().is_empty());
        assert!(results.information_worth().is_empty());

        let row = &results.re_identification()[0];
        assert_eq!(row.quasi_identifiers, vec!["A"]);
        assert_eq!(row.classes, 3);
        assert_eq!(row.deterministic, 0.5);
        assert_eq!(row.prior, 0.25);
        assert_eq!(row.posterior, 0.75);
        assert_eq!(row.histogram.get(50), 0.5);
        assert_eq!(row.histogram.get(100), 0.5);
    }

    #[test]
    fn single_row() {
        let d = dataset(vec!["A", "S"], vec![vec!["a", "x"]]);
        let config = Config::new(vec!["A"]).with_sensitive(vec!["S"]);
        let results = assess(&d, &config).unwrap();

        let row = &results.re_identification()[0];
        assert_eq!(row.deterministic, 0.);
        assert_eq!(row.classes, 1);
        assert_eq!(row.prior, 1.);
        assert_eq!(row.posterior, 1.);

        let att = &results.attribute_inference()[0];
        assert_eq!(att.deterministic, 0.);
        assert_eq!(att.probabilistic, 1.);
    }

    #[test]
    fn attribute_inference() {
        let d = dataset(vec!["A", "S"],
                        vec![vec!["a", "x"], vec!["a", "x"],
                             vec!["a", "y"], vec!["a", "x"]]);
        let config = Config::new(vec!["A"]).with_sensitive(vec!["S"]);
        let results = assess(&d, &config).unwrap();

        let att = &results.attribute_inference()[0];
        assert_eq!(att.sensitive, "S");
        assert_eq!(att.deterministic, 0.);
        assert_eq!(att.probabilistic, 1.);
        assert_eq!(att.prior, 0.75);
        assert_eq!(att.posterior, 0.75);
        assert_eq!(att.histogram.get(75), 1.);

        let row = &results.re_identification()[0];
        assert_eq!(row.classes, 1);
        assert_eq!(row.deterministic, 0.);
        assert_eq!(row.histogram.get(25), 1.);
    }

    #[test]
    fn deterministic_inference() {
        // Class "a" is fully determined on S, class "b" is not.
        let d = dataset(vec!["A", "S"],
                        vec![vec!["a", "x"], vec!["b", "x"], vec!["a", "x"],
                             vec!["b", "y"], vec!["c", "z"]]);
        let config = Config::new(vec!["A"]).with_sensitive(vec!["S"]);
        let results = assess(&d, &config).unwrap();

        let att = &results.attribute_inference()[0];
        // Rows 0, 2 and 4 are determined.
        assert!(approx_eq!(f64, att.deterministic, 3. / 5., epsilon = 1e-12));
        // (2 + 1 + 1) / 3
        assert!(approx_eq!(f64, att.probabilistic, 4. / 3., epsilon = 1e-12));
        assert!(approx_eq!(f64, att.posterior, 4. / 5., epsilon = 1e-12));

        let row = &results.re_identification()[0];
        assert_eq!(row.classes, 3);
        assert_eq!(row.deterministic, 1. / 5.);
    }

    #[test]
    fn fully_determined_attribute_reports_zero() {
        let d = dataset(vec!["A", "S"],
                        vec![vec!["a", "x"], vec!["a", "x"], vec!["b", "y"]]);
        let config = Config::new(vec!["A"]).with_sensitive(vec!["S"]);
        let results = assess(&d, &config).unwrap();

        assert_eq!(results.attribute_inference()[0].deterministic, 0.);
    }

    #[test]
    fn information_worth() {
        let d = dataset(vec!["A", "S", "T"],
                        vec![vec!["a", "x", "u"], vec!["a", "x", "u"],
                             vec!["a", "y", "u"], vec!["b", "y", "v"]]);
        let mut worth = BTreeMap::new();
        worth.insert("x", 2.);
        worth.insert("y", 5.);
        let config = Config::new(vec!["A"]).with_sensitive(vec!["S", "T"])
                                           .with_worth("S", worth)
                                           .unwrap();
        let results = assess(&d, &config).unwrap();

        assert_eq!(results.attribute_inference().len(), 2);
        assert_eq!(results.information_worth().len(), 1);

        let w = &results.information_worth()[0];
        assert_eq!(w.sensitive, "S");
        // Global: x -> 2/4 * 2 = 1, y -> 2/4 * 5 = 2.5.
        assert_eq!(w.prior, 2.5);
        // Class "a": max(2*2, 1*5) = 5; class "b": 5.
        assert_eq!(w.posterior, 10. / 4.);
    }

    #[test]
    fn worth_without_matching_values() {
        let d = dataset(vec!["A", "S"], vec![vec!["a", "x"], vec!["b", "y"]]);
        let mut worth = BTreeMap::new();
        worth.insert("z", 3.);
        let config = Config::new(vec!["A"]).with_sensitive(vec!["S"])
                                           .with_worth("S", worth)
                                           .unwrap();
        let results = assess(&d, &config).unwrap();

        let w = &results.information_worth()[0];
        assert_eq!(w.prior, 0.);
        assert_eq!(w.posterior, 0.);
    }

    #[test]
    fn histograms_are_distributions() {
        let d = dataset(vec!["A", "B", "S"],
                        vec![vec!["1", "p", "x"], vec!["1", "p", "y"],
                             vec!["1", "q", "x"], vec!["2", "p", "x"],
                             vec!["2", "p", "x"], vec!["2", "p", "z"],
                             vec!["3", "q", "y"]]);
        let config = Config::new(vec!["A", "B"]).with_sensitive(vec!["S"]);
        let results = assess(&d, &config).unwrap();

        let re_id = &results.re_identification()[0].histogram;
        assert!(approx_eq!(f64, re_id.total(), 1., epsilon = 1e-9));
        let att = &results.attribute_inference()[0].histogram;
        assert!(approx_eq!(f64, att.total(), 1., epsilon = 1e-9));
    }

    #[test]
    fn idempotent() {
        let d = dataset(vec!["A", "S"],
                        vec![vec!["b", "x"], vec!["a", "y"], vec!["b", "x"]]);
        let before = d.clone();
        let config = Config::new(vec!["A"]).with_sensitive(vec!["S"]);

        let first = assess(&d, &config).unwrap();
        let second = assess(&d, &config).unwrap();
        assert_eq!(first, second);
        assert_eq!(d, before);
    }

    #[test]
    fn invalid_configuration() {
        let d = dataset(vec!["A"], vec![vec!["a"]]);

        let err = assess(&d, &Config::new(vec!["B"])).unwrap_err();
        assert!(err.is_configuration());

        let err = assess(&d, &Config::new(Vec::<&str>::new())).unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)));
    }

    #[test]
    fn sensitive_attribute_without_values() {
        let d = Dataset::new(vec!["A", "S"],
                             vec![vec![Value::from("a"), Value::Missing]])
                        .unwrap();
        let config = Config::new(vec!["A"]).with_sensitive(vec!["S"]);

        assert!(assess(&d, &config).unwrap_err().is_configuration());
    }
}
