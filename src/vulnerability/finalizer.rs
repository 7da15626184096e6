//! Folding of completed equivalence classes into running totals.
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

use crate::config::Config;
use crate::errors::{Error, Result};
use crate::vulnerability::histogram::Histogram;
use crate::vulnerability::tally::{FrequencyCount, SensitiveTally};

/// Running worth of one sensitive attribute.
#[derive(Debug, Clone)]
pub struct WorthAccumulator<'c> {
    pub(crate) worth: &'c BTreeMap<String, f64>,
    /// Sum over classes of the largest `count * worth` product.
    pub(crate) posterior: f64,
}

impl<'c> WorthAccumulator<'c> {
    fn observe(&mut self, count: &FrequencyCount) {
        let best = count.iter()
                        .filter_map(|(value, c)| {
                            self.worth.get(value).map(|w| OrderedFloat(c as f64 * w))
                        })
                        .max();
        if let Some(best) = best {
            self.posterior += best.into_inner();
        }
    }
}

/// Running totals of one sensitive attribute.
#[derive(Debug, Clone)]
pub struct AttributeAccumulator<'c> {
    pub(crate) name: &'c str,
    /// Rows whose class is fully determined on this attribute.
    pub(crate) deterministic: usize,
    /// Sum over classes of the most frequent count.
    pub(crate) probabilistic: usize,
    pub(crate) histogram: Histogram,
    pub(crate) worth: Option<WorthAccumulator<'c>>,
}

/// Running totals of one assessment.
///
/// Owned by a single scan; every completed class is folded in exactly
/// once with `fold_class()`.
#[derive(Debug, Clone)]
pub struct Accumulators<'c> {
    pub(crate) quasi_identifiers: &'c [String],
    /// Number of classes seen (one guess per class).
    pub(crate) classes: usize,
    /// Number of classes with a single row.
    pub(crate) deterministic: usize,
    pub(crate) re_id: Histogram,
    pub(crate) attributes: Vec<AttributeAccumulator<'c>>,
}

impl<'c> Accumulators<'c> {
    pub fn new(config: &'c Config) -> Accumulators<'c> {
        let attributes = config.sensitive_attributes()
                               .iter()
                               .map(|name| AttributeAccumulator {
                                   name: name.as_str(),
                                   deterministic: 0,
                                   probabilistic: 0,
                                   histogram: Histogram::new(),
                                   worth: config.worth(name)
                                                .map(|worth| WorthAccumulator {
                                                    worth,
                                                    posterior: 0.,
                                                }),
                               })
                               .collect();

        Accumulators {
            quasi_identifiers: config.quasi_identifiers(),
            classes: 0,
            deterministic: 0,
            re_id: Histogram::new(),
            attributes,
        }
    }

    /// Folds a completed class of `size` rows, whose sensitive values were
    /// fed to `tally`, and clears the tally for the next class.
    pub fn fold_class(&mut self, size: usize, tally: &mut SensitiveTally) -> Result<()> {
        self.classes += 1;
        let mut singled_out = false;

        let class_size = if tally.is_empty() {
            if size == 1 {
                singled_out = true;
            }
            size
        } else {
            let class_size = tally.counts()[0].total();
            if class_size != size {
                return Err(self.inconsistent(class_size, size, None));
            }

            for (acc, count) in self.attributes.iter_mut().zip(tally.counts()) {
                if count.total() != class_size {
                    return Err(Error::Consistency(format!(
                        "class_size (={}) and counts (={}) differ; QID: {:?}, sensitive attribute: {}",
                        class_size, count.total(), self.quasi_identifiers, acc.name
                    )));
                }

                let max_count = count.max_count();
                acc.histogram.add(max_count, class_size, class_size);
                acc.probabilistic += max_count;

                if count.distinct() == 1 {
                    acc.deterministic += max_count;
                    if max_count == 1 {
                        singled_out = true;
                    }
                }

                if let Some(worth) = acc.worth.as_mut() {
                    worth.observe(count);
                }
            }
            class_size
        };

        self.re_id.add(1, class_size, class_size);

        if singled_out {
            if class_size != 1 {
                return Err(self.inconsistent(class_size, 1, Some("singled out")));
            }
            self.deterministic += 1;
        }

        tally.clear();
        Ok(())
    }

    fn inconsistent(&self, class_size: usize, expected: usize, what: Option<&str>) -> Error {
        Error::Consistency(format!(
            "class_size (={}) does not match {} (={}); QID: {:?}",
            class_size,
            what.unwrap_or("rows"),
            expected,
            self.quasi_identifiers
        ))
    }
}
