//! Batch assessment routines.
//!
//! Several candidate sets of quasi-identifiers are usually evaluated over
//! the same dataset. Each assessment only reads the dataset, so they run
//! in parallel; their rows are appended in the order the configurations
//! were given.
use log::info;
use rayon::prelude::*;

use crate::config::Config;
use crate::dataset::Dataset;
use crate::errors::Result;
use crate::results::Results;
use crate::vulnerability::assess;

/// Assesses `dataset` once per configuration.
///
/// Stops at the first error; no partial tables are returned.
pub fn assess_all(dataset: &Dataset, configs: &[Config]) -> Result<Results> {
    info!("assessing {} configurations over {} rows", configs.len(), dataset.len());

    let partial = configs.par_iter()
                         .map(|config| assess(dataset, config))
                         .collect::<Result<Vec<_>>>()?;

    let mut results = Results::new();
    for r in partial {
        results.append(r);
    }
    Ok(results)
}
