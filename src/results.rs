//! Result tables of an assessment.
//!
//! Three append-only tables: re-identification (one row per assessed
//! set of quasi-identifiers), attribute inference (one row per sensitive
//! attribute) and information worth (one row per sensitive attribute with
//! a worth assignment).
use itertools::Itertools;
use serde::{Serialize, Serializer};
use std::io;

use crate::errors::Result;
use crate::vulnerability::Histogram;

/// Row of the re-identification table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReIdentification {
    #[serde(rename = "QID", serialize_with = "serialize_qids")]
    pub quasi_identifiers: Vec<String>,
    /// Fraction of rows an adversary re-identifies with certainty.
    #[serde(rename = "dCR")]
    pub deterministic: f64,
    /// Number of equivalence classes.
    #[serde(rename = "pCR")]
    pub classes: usize,
    #[serde(rename = "Prior")]
    pub prior: f64,
    #[serde(rename = "Posterior")]
    pub posterior: f64,
    #[serde(rename = "Histogram")]
    pub histogram: Histogram,
}

/// Row of the attribute-inference table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeInference {
    #[serde(rename = "QID", serialize_with = "serialize_qids")]
    pub quasi_identifiers: Vec<String>,
    #[serde(rename = "Sensitive")]
    pub sensitive: String,
    #[serde(rename = "dCA")]
    pub deterministic: f64,
    /// Posterior over prior vulnerability (multiplicative leakage).
    #[serde(rename = "pCA")]
    pub probabilistic: f64,
    #[serde(rename = "Prior")]
    pub prior: f64,
    #[serde(rename = "Posterior")]
    pub posterior: f64,
    #[serde(rename = "Histogram")]
    pub histogram: Histogram,
}

/// Row of the information-worth table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InformationWorth {
    #[serde(rename = "QID", serialize_with = "serialize_qids")]
    pub quasi_identifiers: Vec<String>,
    #[serde(rename = "Sensitive")]
    pub sensitive: String,
    #[serde(rename = "Prior Worth")]
    pub prior: f64,
    #[serde(rename = "Posterior Worth")]
    pub posterior: f64,
}

/// Renders a list of quasi-identifiers as `['a', 'b']`.
pub fn qid_label(quasi_identifiers: &[String]) -> String {
    format!("[{}]", quasi_identifiers.iter().map(|q| format!("'{}'", q)).join(", "))
}

fn serialize_qids<S: Serializer>(quasi_identifiers: &[String], serializer: S)
        -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&qid_label(quasi_identifiers))
}

/// The three result tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Results {
    re_identification: Vec<ReIdentification>,
    attribute_inference: Vec<AttributeInference>,
    information_worth: Vec<InformationWorth>,
}

impl Results {
    pub fn new() -> Results {
        Results::default()
    }

    pub fn re_identification(&self) -> &[ReIdentification] {
        &self.re_identification
    }

    pub fn attribute_inference(&self) -> &[AttributeInference] {
        &self.attribute_inference
    }

    pub fn information_worth(&self) -> &[InformationWorth] {
        &self.information_worth
    }

    pub(crate) fn push_re_identification(&mut self, row: ReIdentification) {
        self.re_identification.push(row);
    }

    pub(crate) fn push_attribute_inference(&mut self, row: AttributeInference) {
        self.attribute_inference.push(row);
    }

    pub(crate) fn push_information_worth(&mut self, row: InformationWorth) {
        self.information_worth.push(row);
    }

    /// Appends all the rows of `other` after the current ones.
    pub fn append(&mut self, other: Results) {
        self.re_identification.extend(other.re_identification);
        self.attribute_inference.extend(other.attribute_inference);
        self.information_worth.extend(other.information_worth);
    }

    pub fn write_re_identification_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        write_table(&self.re_identification, writer)
    }

    pub fn write_attribute_inference_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        write_table(&self.attribute_inference, writer)
    }

    pub fn write_information_worth_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        write_table(&self.information_worth, writer)
    }
}

fn write_table<T: Serialize, W: io::Write>(rows: &[T], writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn worth_row(sensitive: &str) -> InformationWorth {
        InformationWorth {
            quasi_identifiers: vec!["age".into(), "zip".into()],
            sensitive: sensitive.into(),
            prior: 0.5,
            posterior: 1.25,
        }
    }

    #[test]
    fn label() {
        assert_eq!(qid_label(&["a".to_owned(), "b".to_owned()]), "['a', 'b']");
        assert_eq!(qid_label(&[]), "[]");
    }

    #[test]
    fn append_keeps_order() {
        let mut a = Results::new();
        a.push_information_worth(worth_row("s"));
        let mut b = Results::new();
        b.push_information_worth(worth_row("t"));

        a.append(b);
        let names = a.information_worth().iter().map(|r| r.sensitive.as_str())
                                         .collect::<Vec<_>>();
        assert_eq!(names, vec!["s", "t"]);
    }

    #[test]
    fn csv_output() {
        let mut results = Results::new();
        results.push_information_worth(worth_row("s"));

        let mut out = Vec::new();
        results.write_information_worth_csv(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(out, "QID,Sensitive,Prior Worth,Posterior Worth\n\
                         \"['age', 'zip']\",s,0.5,1.25\n");
    }

    #[test]
    fn histogram_cell() {
        let mut results = Results::new();
        results.push_re_identification(ReIdentification {
            quasi_identifiers: vec!["a".into()],
            deterministic: 0.,
            classes: 1,
            prior: 1.,
            posterior: 1.,
            histogram: Histogram::new(),
        });

        let mut out = Vec::new();
        results.write_re_identification_csv(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("QID,dCR,pCR,Prior,Posterior,Histogram\n"));
        assert!(out.contains("\"{'0': 0.0,"));
    }
}
