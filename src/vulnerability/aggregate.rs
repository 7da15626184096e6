//! Normalization of the running totals into result tables.
use log::warn;
use ordered_float::OrderedFloat;

use crate::config::Columns;
use crate::dataset::Dataset;
use crate::errors::{Error, Result};
use crate::results::{AttributeInference, InformationWorth, ReIdentification, Results};
use crate::vulnerability::finalizer::Accumulators;

/// Turns the totals of a completed scan of `dataset` into result rows.
pub fn aggregate(acc: Accumulators, dataset: &Dataset, columns: &Columns) -> Result<Results> {
    let n = dataset.len();
    let size = n as f64;
    let quasi_identifiers = acc.quasi_identifiers.to_vec();
    let mut results = Results::new();

    // NOTE: a single-row dataset yields 1/1 - 1 = 0 here. This is kept
    // as is, even though it is not a meaningful probability.
    let mut deterministic = acc.deterministic as f64 / size;
    if n == 1 {
        warn!("single-row dataset: dCR is degenerate");
        deterministic -= 1.;
    }

    let mut re_id = acc.re_id;
    re_id.normalize(n);

    results.push_re_identification(ReIdentification {
        quasi_identifiers: quasi_identifiers.clone(),
        deterministic,
        classes: acc.classes,
        prior: 1. / size,
        posterior: acc.classes as f64 / size,
        histogram: re_id,
    });

    for (attr, &column) in acc.attributes.into_iter().zip(&columns.sensitive_attributes) {
        // Same correction as for dCR: a fully determined attribute
        // reports 0.
        let mut deterministic = attr.deterministic as f64 / size;
        if attr.deterministic == n {
            deterministic -= 1.;
        }

        let counts = dataset.value_counts(column);
        let most_probable_count = counts.values().copied().max().ok_or_else(|| {
            Error::Configuration(format!("{} has no observed values", attr.name))
        })? as f64;
        let probabilistic = attr.probabilistic as f64 / most_probable_count;

        let mut histogram = attr.histogram;
        histogram.normalize(n);

        results.push_attribute_inference(AttributeInference {
            quasi_identifiers: quasi_identifiers.clone(),
            sensitive: attr.name.to_owned(),
            deterministic,
            probabilistic,
            prior: most_probable_count / size,
            posterior: (probabilistic * most_probable_count) / size,
            histogram,
        });

        if let Some(worth) = attr.worth {
            let prior = counts.iter()
                              .filter_map(|(value, &c)| {
                                  worth.worth.get(value).map(|w| OrderedFloat((c as f64 / size) * w))
                              })
                              .max()
                              .map_or(0., OrderedFloat::into_inner);

            results.push_information_worth(InformationWorth {
                quasi_identifiers: quasi_identifiers.clone(),
                sensitive: attr.name.to_owned(),
                prior,
                posterior: worth.posterior / size,
            });
        }
    }

    Ok(results)
}
