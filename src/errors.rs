//! Errors raised while configuring or running an assessment.
use thiserror::Error;

/// Errors of the assessment library.
///
/// Configuration problems are always detected before a dataset is scanned,
/// so no partial result table is ever produced alongside them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{attribute} is not an attribute of {dataset}")]
    UnknownAttribute { attribute: String, dataset: String },

    #[error("worth assignment cannot be negative ({attribute}: {value} -> {worth})")]
    NegativeWorth {
        attribute: String,
        value: String,
        worth: f64,
    },

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("consistency error: {0}")]
    Consistency(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true for every error caused by an invalid configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Configuration(_) | Error::UnknownAttribute { .. } | Error::NegativeWorth { .. }
        )
    }

    pub(crate) fn unknown_attribute(attribute: &str, dataset: &str) -> Error {
        Error::UnknownAttribute {
            attribute: attribute.to_owned(),
            dataset: dataset.to_owned(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
