//! Percentile histograms of adversary success.
use ndarray::prelude::*;
use serde::{Serialize, Serializer};
use std::fmt;

/// Number of percentile buckets (0% to 100%).
pub const BINS: usize = 101;

/// Row-weighted distribution of success chances.
///
/// Bucket `b` accumulates the number of rows for which the adversary
/// succeeds with probability (about) `b`%. After `normalize()` the buckets
/// sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    bins: Array1<f64>,
}

impl Default for Histogram {
    fn default() -> Self {
        Histogram::new()
    }
}

impl Histogram {
    pub fn new() -> Histogram {
        Histogram { bins: Array1::zeros(BINS) }
    }

    /// Adds `weight` rows to the bucket of probability `count / size`.
    pub fn add(&mut self, count: usize, size: usize, weight: usize) {
        let b = percentile_bin(count, size);
        self.bins[b] += weight as f64;
    }

    /// Divides every bucket by the dataset size.
    pub fn normalize(&mut self, dataset_size: usize) {
        let n = dataset_size as f64;
        self.bins.mapv_inplace(|x| x / n);
    }

    pub fn get(&self, bin: usize) -> f64 {
        self.bins[bin]
    }

    pub fn bins(&self) -> ArrayView1<f64> {
        self.bins.view()
    }

    pub fn total(&self) -> f64 {
        self.bins.sum()
    }
}

/// Bucket of `100 * count / size`, rounding halves to even.
fn percentile_bin(count: usize, size: usize) -> usize {
    let x = (100 * count) as f64 / size as f64;
    let floor = x.floor();
    let b = match x - floor {
        d if d > 0.5 => floor + 1.,
        d if d < 0.5 => floor,
        _ if floor % 2. == 0. => floor,
        _ => floor + 1.,
    };
    b as usize
}

/// Renders as `{'0': p0, '1': p1, ..., '100': p100}`.
impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (b, x) in self.bins.iter().enumerate() {
            if b > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}': {:?}", b, x)?;
        }
        write!(f, "}}")
    }
}

impl Serialize for Histogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_halves_to_even() {
        assert_eq!(percentile_bin(1, 1), 100);
        assert_eq!(percentile_bin(1, 3), 33);
        assert_eq!(percentile_bin(2, 3), 67);
        // 12.5 and 2.5.
        assert_eq!(percentile_bin(1, 8), 12);
        assert_eq!(percentile_bin(1, 40), 2);
        // 37.5
        assert_eq!(percentile_bin(3, 8), 38);
        assert_eq!(percentile_bin(1, 1000), 0);
    }

    #[test]
    fn normalized_histogram_sums_to_one() {
        let mut h = Histogram::new();
        h.add(1, 2, 2);
        h.add(1, 1, 1);
        h.add(1, 1, 1);
        h.normalize(4);

        assert_eq!(h.get(50), 0.5);
        assert_eq!(h.get(100), 0.5);
        assert_eq!(h.total(), 1.);
    }

    #[test]
    fn renders_as_mapping() {
        let mut h = Histogram::new();
        h.add(1, 1, 1);
        let s = h.to_string();

        assert!(s.starts_with("{'0': 0.0, '1': 0.0"));
        assert!(s.ends_with("'100': 1.0}"));
    }
}
