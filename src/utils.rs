//! Utility routines for loading inputs from files and the command line.
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;

use bvm::{Dataset, Error, Result, WorthAssignment};

/// One line of a worth file.
#[derive(Debug, Deserialize)]
struct WorthEntry {
    attribute: String,
    value: String,
    worth: f64,
}

/// Loads a headered CSV dataset.
pub fn load_dataset(fname: &str) -> Result<Dataset> {
    let file = File::open(fname)?;
    Dataset::from_csv(file)
}

/// Loads a worth assignment.
///
/// The file format should be, for each row:
///     attribute, value, worth
/// with a header line.
pub fn load_worth(fname: &str) -> Result<WorthAssignment> {
    let mut reader = ReaderBuilder::new()
                                   .has_headers(true)
                                   .trim(Trim::All)
                                   .from_path(fname)?;

    let mut worth = WorthAssignment::new();
    for result in reader.deserialize() {
        let entry: WorthEntry = result?;
        worth.entry(entry.attribute)
             .or_insert_with(BTreeMap::new)
             .insert(entry.value, entry.worth);
    }
    Ok(worth)
}

/// Parses a list of names specified as comma-separated values.
pub fn parse_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Parses per-dataset lists of names: lists are separated by ';' and
/// names within a list by ','.
pub fn parse_lists(arg: &str) -> Result<Vec<Vec<String>>> {
    let lists: Vec<Vec<String>> = arg.split(';').map(parse_list).collect();
    if lists.iter().any(Vec::is_empty) {
        return Err(Error::Configuration(format!("empty list in '{}'", arg)));
    }
    Ok(lists)
}
