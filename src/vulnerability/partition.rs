//! Equivalence-class partitioning.
//!
//! The dataset is viewed in a stable order sorted by quasi-identifiers,
//! and scanned forward: a class ends right before the first row whose
//! quasi-identifier tuple differs from the open class's.
use crate::dataset::{Dataset, Value};

/// A maximal run of rows sharing the same quasi-identifier tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct EquivalenceClass<'a> {
    key: Vec<&'a Value>,
    rows: &'a [usize],
}

impl<'a> EquivalenceClass<'a> {
    /// The quasi-identifier tuple shared by the class.
    pub fn key(&self) -> &[&'a Value] {
        &self.key
    }

    /// Indices (into the dataset) of the class's rows, in sorted order.
    pub fn rows(&self) -> &'a [usize] {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Sorted view of a dataset over its quasi-identifiers.
pub struct Partitioner<'a> {
    dataset: &'a Dataset,
    quasi_identifiers: Vec<usize>,
    order: Vec<usize>,
}

impl<'a> Partitioner<'a> {
    pub fn new(dataset: &'a Dataset, quasi_identifiers: &[usize]) -> Partitioner<'a> {
        Partitioner {
            dataset,
            quasi_identifiers: quasi_identifiers.to_vec(),
            order: dataset.stable_order(quasi_identifiers),
        }
    }

    /// Row indices in sorted order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn classes(&self) -> Classes<'_, 'a> {
        Classes { partitioner: self, next: 0 }
    }

    fn key(&self, row: usize) -> Vec<&'a Value> {
        let values = self.dataset.row(row);
        self.quasi_identifiers.iter().map(|&c| &values[c]).collect()
    }
}

/// Forward scan over the equivalence classes of a `Partitioner`.
pub struct Classes<'p, 'a> {
    partitioner: &'p Partitioner<'a>,
    next: usize,
}

impl<'p, 'a> Iterator for Classes<'p, 'a> {
    type Item = EquivalenceClass<'p>;

    fn next(&mut self) -> Option<Self::Item> {
        let order = &self.partitioner.order;
        let start = self.next;
        if start >= order.len() {
            return None;
        }

        let key = self.partitioner.key(order[start]);
        let mut end = start + 1;
        while end < order.len() && self.partitioner.key(order[end]) == key {
            end += 1;
        }
        self.next = end;

        Some(EquivalenceClass { key, rows: &order[start..end] })
    }
}
