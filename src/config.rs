//! Assessment configuration: which attributes are quasi-identifiers,
//! which are sensitive, and how much each sensitive value is worth.
use std::collections::BTreeMap;

use crate::dataset::Dataset;
use crate::errors::{Error, Result};

/// Maps a sensitive attribute to the worth of each of its values
/// (keyed by the value's string form).
pub type WorthAssignment = BTreeMap<String, BTreeMap<String, f64>>;

/// Configuration of a single assessment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    quasi_identifiers: Vec<String>,
    sensitive_attributes: Option<Vec<String>>,
    worth_assignment: Option<WorthAssignment>,
}

/// Column positions of a configuration within a given dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Columns {
    pub quasi_identifiers: Vec<usize>,
    pub sensitive_attributes: Vec<usize>,
}

impl Config {
    pub fn new<S: Into<String>>(quasi_identifiers: Vec<S>) -> Config {
        Config {
            quasi_identifiers: quasi_identifiers.into_iter().map(Into::into).collect(),
            sensitive_attributes: None,
            worth_assignment: None,
        }
    }

    pub fn with_sensitive<S: Into<String>>(mut self, sensitive_attributes: Vec<S>) -> Config {
        self.sensitive_attributes =
            Some(sensitive_attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Assigns a worth to values of one sensitive attribute.
    ///
    /// Must be called once per attribute, after the sensitive attributes
    /// have been declared. Worths must be finite and non-negative.
    pub fn with_worth<S: Into<String>>(mut self, attribute: &str,
                                       worth: BTreeMap<S, f64>) -> Result<Config> {
        let sensitive = self.sensitive_attributes.as_ref().ok_or_else(|| {
            Error::Configuration("the sensitive attributes have not been defined yet".into())
        })?;
        if !sensitive.iter().any(|s| s == attribute) {
            return Err(Error::Configuration(format!(
                "{} is not a defined sensitive attribute",
                attribute
            )));
        }

        let mut values = BTreeMap::new();
        for (value, w) in worth {
            let value = value.into();
            if !w.is_finite() || w < 0. {
                return Err(Error::NegativeWorth {
                    attribute: attribute.to_owned(),
                    value,
                    worth: w,
                });
            }
            values.insert(value, w);
        }

        self.worth_assignment
            .get_or_insert_with(BTreeMap::new)
            .insert(attribute.to_owned(), values);
        Ok(self)
    }

    pub fn quasi_identifiers(&self) -> &[String] {
        &self.quasi_identifiers
    }

    /// Sensitive attributes, or an empty slice if none were declared.
    pub fn sensitive_attributes(&self) -> &[String] {
        self.sensitive_attributes.as_deref().unwrap_or(&[])
    }

    pub fn worth_assignment(&self) -> Option<&WorthAssignment> {
        self.worth_assignment.as_ref()
    }

    /// Worth of the values of `attribute`, if it was assigned any.
    pub fn worth(&self, attribute: &str) -> Option<&BTreeMap<String, f64>> {
        self.worth_assignment.as_ref().and_then(|w| w.get(attribute))
    }

    /// Checks this configuration against a dataset, returning the positions
    /// of the configured columns.
    pub fn resolve(&self, dataset: &Dataset) -> Result<Columns> {
        if self.quasi_identifiers.is_empty() {
            return Err(Error::EmptyInput(
                "one or more quasi-identifiers must be assigned".into(),
            ));
        }
        if dataset.is_empty() {
            return Err(Error::EmptyInput("the dataset cannot be empty".into()));
        }

        let quasi_identifiers = self.quasi_identifiers
            .iter()
            .map(|q| dataset.column_index(q))
            .collect::<Result<Vec<_>>>()?;
        let sensitive_attributes = self.sensitive_attributes()
            .iter()
            .map(|s| dataset.column_index(s))
            .collect::<Result<Vec<_>>>()?;

        Ok(Columns { quasi_identifiers, sensitive_attributes })
    }
}
