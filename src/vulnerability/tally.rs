//! Per-class frequency tables of sensitive values.
use std::collections::HashMap;

use crate::dataset::Value;

/// Represents the frequencies of the values of one sensitive attribute
/// within the open equivalence class.
///
/// Values are keyed by their string form, and the most frequent count is
/// kept up to date as values are observed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrequencyCount {
    counts: HashMap<String, usize>,
    total: usize,
    max_count: usize,
}

impl FrequencyCount {
    pub fn new() -> FrequencyCount {
        FrequencyCount::default()
    }

    /// Increases the count of an observed value.
    pub fn add_example(&mut self, value: &Value) {
        let count = self.counts.entry(value.to_string()).or_insert(0);
        *count += 1;
        if *count > self.max_count {
            self.max_count = *count;
        }
        self.total += 1;
    }

    /// Count of the most frequent value.
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Number of distinct values observed.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(v, &c)| (v.as_str(), c))
    }

    pub fn clear(&mut self) {
        self.counts.clear();
        self.total = 0;
        self.max_count = 0;
    }
}

/// Frequency tables for every configured sensitive attribute.
#[derive(Debug, Clone)]
pub struct SensitiveTally {
    columns: Vec<usize>,
    counts: Vec<FrequencyCount>,
}

impl SensitiveTally {
    /// `columns` are the positions of the sensitive attributes, in the
    /// order they were configured.
    pub fn new(columns: &[usize]) -> SensitiveTally {
        SensitiveTally {
            columns: columns.to_vec(),
            counts: vec![FrequencyCount::new(); columns.len()],
        }
    }

    /// Feeds one row of the open class. Does nothing if no sensitive
    /// attribute is configured.
    pub fn observe(&mut self, row: &[Value]) {
        for (&c, count) in self.columns.iter().zip(self.counts.iter_mut()) {
            count.add_example(&row[c]);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Frequency tables in configuration order.
    pub fn counts(&self) -> &[FrequencyCount] {
        &self.counts
    }

    pub fn clear(&mut self) {
        self.counts.iter_mut().for_each(FrequencyCount::clear);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_count() {
        let mut count = FrequencyCount::new();
        for v in &["x", "y", "x", "x"] {
            count.add_example(&Value::from(*v));
        }

        assert_eq!(count.max_count(), 3);
        assert_eq!(count.distinct(), 2);
        assert_eq!(count.total(), 4);

        count.clear();
        assert_eq!(count, FrequencyCount::new());
    }

    #[test]
    fn keyed_by_string_form() {
        let mut count = FrequencyCount::new();
        count.add_example(&Value::Integer(1));
        count.add_example(&Value::from("1"));
        count.add_example(&Value::Missing);

        assert_eq!(count.distinct(), 2);
        assert_eq!(count.max_count(), 2);
        let mut values = count.iter().collect::<Vec<_>>();
        values.sort();
        assert_eq!(values, vec![("1", 2), ("nan", 1)]);
    }

    #[test]
    fn tally_per_attribute() {
        let mut tally = SensitiveTally::new(&[2, 0]);
        tally.observe(&[Value::from("a"), Value::Integer(0), Value::from("x")]);
        tally.observe(&[Value::from("b"), Value::Integer(0), Value::from("x")]);

        assert_eq!(tally.counts()[0].max_count(), 2);
        assert_eq!(tally.counts()[1].distinct(), 2);

        tally.clear();
        assert!(tally.counts().iter().all(|c| c.total() == 0));

        let mut none = SensitiveTally::new(&[]);
        none.observe(&[Value::Integer(1)]);
        assert!(none.is_empty());
    }
}
