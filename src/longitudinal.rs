//! Longitudinal assessment: several time-sliced datasets are linked on a
//! per-record identifier into one composite dataset, which is then
//! assessed like any other.
//!
//! The first dataset is the focal one. Every later dataset is left-joined
//! onto it, so each focal record is kept even when it has no match. The
//! quasi-identifier columns of the two sides are merged into a single
//! composite column `left#right`; missing values on either side appear as
//! the text `nan` inside the composite value.
use log::debug;
use std::collections::HashMap;

use crate::config::{Config, WorthAssignment};
use crate::dataset::{Dataset, Value};
use crate::errors::{Error, Result};
use crate::results::Results;
use crate::vulnerability::assess;

/// Quasi-identifiers of a longitudinal assessment.
#[derive(Debug, Clone, PartialEq)]
pub enum QuasiIdentifiers {
    /// The same column names in every dataset.
    Shared(Vec<String>),
    /// One list per dataset; lists have equal lengths, and the i-th names
    /// of all lists refer to the same attribute.
    PerDataset(Vec<Vec<String>>),
}

impl QuasiIdentifiers {
    /// Quasi-identifiers of dataset `i`.
    fn of(&self, i: usize) -> &[String] {
        match self {
            QuasiIdentifiers::Shared(q) => q.as_slice(),
            QuasiIdentifiers::PerDataset(qs) => qs[i].as_slice(),
        }
    }

    fn check(&self, datasets: &[Dataset]) -> Result<()> {
        if let QuasiIdentifiers::PerDataset(qs) = self {
            if qs.len() != datasets.len() {
                return Err(Error::Configuration(format!(
                    "{} lists of quasi-identifiers given for {} datasets",
                    qs.len(),
                    datasets.len()
                )));
            }
            if qs.iter().any(|q| q.len() != qs[0].len()) {
                return Err(Error::Configuration(
                    "lists of quasi-identifiers must have the same length".into(),
                ));
            }
        }
        if self.of(0).is_empty() {
            return Err(Error::EmptyInput(
                "one or more quasi-identifiers must be assigned".into(),
            ));
        }
        for (i, dataset) in datasets.iter().enumerate() {
            for q in self.of(i) {
                if !dataset.has_column(q) {
                    return Err(Error::unknown_attribute(q, &format!("dataset {}", i)));
                }
            }
        }
        Ok(())
    }
}

/// A composite dataset, with its quasi-identifiers named as in the focal
/// dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Linked {
    pub dataset: Dataset,
    pub quasi_identifiers: Vec<String>,
}

/// Links `datasets` on their `identifiers` columns.
pub fn link(datasets: &[Dataset], identifiers: &[String],
            quasi_identifiers: &QuasiIdentifiers) -> Result<Linked> {
    check_inputs(datasets, identifiers)?;
    quasi_identifiers.check(datasets)?;

    let focal_qids = quasi_identifiers.of(0);
    let mut joined = datasets[0].clone();
    for (i, dataset) in datasets.iter().enumerate().skip(1) {
        joined = left_join(&joined, &identifiers[0], focal_qids,
                           dataset, &identifiers[i], quasi_identifiers.of(i), i)?;
        debug!("linked dataset {}: {} composite rows", i, joined.len());
    }

    Ok(Linked {
        dataset: joined,
        quasi_identifiers: focal_qids.to_vec(),
    })
}

fn check_inputs(datasets: &[Dataset], identifiers: &[String]) -> Result<()> {
    if datasets.is_empty() {
        return Err(Error::EmptyInput("no datasets to link".into()));
    }
    if datasets.len() != identifiers.len() {
        return Err(Error::Configuration(format!(
            "{} identifiers given for {} datasets",
            identifiers.len(),
            datasets.len()
        )));
    }
    for (i, (dataset, id)) in datasets.iter().zip(identifiers).enumerate() {
        if dataset.is_empty() {
            return Err(Error::EmptyInput(format!("dataset {} is empty", i)));
        }
        if id.is_empty() {
            return Err(Error::Configuration(format!("empty identifier for dataset {}", i)));
        }
        if !dataset.has_column(id) {
            return Err(Error::unknown_attribute(id, &format!("dataset {}", i)));
        }
    }
    Ok(())
}

/// Left outer join of `right` onto `left`.
///
/// The right identifier and quasi-identifiers take the left names; each
/// pair of quasi-identifier columns becomes one composite column, kept in
/// the left position. Remaining right columns are appended, suffixed with
/// `_<index>` when their name is already taken.
fn left_join(left: &Dataset, left_id: &str, left_qids: &[String],
             right: &Dataset, right_id: &str, right_qids: &[String],
             index: usize) -> Result<Dataset> {
    let lid = left.column_index(left_id)?;
    let rid = right.column_index(right_id)?;
    let pairs = left_qids.iter()
                         .zip(right_qids)
                         .map(|(l, r)| Ok((left.column_index(l)?, right.column_index(r)?)))
                         .collect::<Result<Vec<_>>>()?;

    let carried: Vec<usize> = (0..right.columns().len())
        .filter(|&c| c != rid && pairs.iter().all(|&(_, r)| r != c))
        .collect();

    let mut columns = left.columns().to_vec();
    for &c in &carried {
        let name = &right.columns()[c];
        if columns.contains(name) {
            columns.push(format!("{}_{}", name, index));
        } else {
            columns.push(name.clone());
        }
    }

    // Right rows per identifier value, in their original order.
    let mut matches: HashMap<&Value, Vec<usize>> = HashMap::new();
    for (r, row) in right.rows().iter().enumerate() {
        matches.entry(&row[rid]).or_insert_with(Vec::new).push(r);
    }

    let unmatched = vec![Value::Missing; right.columns().len()];
    let mut rows = Vec::with_capacity(left.len());
    for lrow in left.rows() {
        let rrows: Vec<&[Value]> = match matches.get(&lrow[lid]) {
            Some(rs) => rs.iter().map(|&r| right.row(r)).collect(),
            None => vec![&unmatched[..]],
        };

        for rrow in rrows {
            let mut row = lrow.clone();
            for &(l, r) in &pairs {
                row[l] = Value::Text(format!("{}#{}", lrow[l], rrow[r]));
            }
            row.extend(carried.iter().map(|&c| rrow[c].clone()));
            rows.push(row);
        }
    }

    Dataset::new(columns, rows)
}

/// Longitudinal assessment over a list of datasets, the first one being
/// the focal dataset.
#[derive(Debug, Clone)]
pub struct Longitudinal {
    datasets: Vec<Dataset>,
    identifiers: Vec<String>,
}

impl Longitudinal {
    /// `identifiers[i]` is the record-linkage column of `datasets[i]`.
    pub fn new<S: Into<String>>(datasets: Vec<Dataset>, identifiers: Vec<S>)
            -> Result<Longitudinal> {
        let identifiers: Vec<String> = identifiers.into_iter().map(Into::into).collect();
        check_inputs(&datasets, &identifiers)?;
        Ok(Longitudinal { datasets, identifiers })
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Links the datasets and assesses the composite one.
    ///
    /// Sensitive attributes, and their worth assignment, refer to columns
    /// of the focal dataset.
    pub fn assess(&self, quasi_identifiers: &QuasiIdentifiers,
                  sensitive_attributes: Option<Vec<String>>,
                  worth_assignment: Option<WorthAssignment>)
            -> Result<Results> {
        if let Some(sensitive) = &sensitive_attributes {
            for s in sensitive {
                if !self.datasets[0].has_column(s) {
                    return Err(Error::unknown_attribute(s, "the focal dataset"));
                }
            }
        }

        let linked = link(&self.datasets, &self.identifiers, quasi_identifiers)?;

        let mut config = Config::new(linked.quasi_identifiers);
        if let Some(sensitive) = sensitive_attributes {
            config = config.with_sensitive(sensitive);
        }
        for (attribute, worth) in worth_assignment.unwrap_or_default() {
            config = config.with_worth(&attribute, worth)?;
        }

        assess(&linked.dataset, &config)
    }
}
