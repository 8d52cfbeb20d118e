use std::collections::BTreeMap;

/// Sparse bag-of-words frequency vector over a shared vocabulary.
///
/// Entries are sorted by dimension so two vectors can be merged in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct WordVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
    norm: f64,
}

impl WordVector {
    pub fn from_counts(dimension: usize, counts: &BTreeMap<usize, usize>) -> Self {
        let entries: Vec<(usize, f64)> = counts
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(&dim, &count)| {
                debug_assert!(dim < dimension, "dimension {dim} outside vocabulary of {dimension}");
                (dim, count as f64)
            })
            .collect();
        let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();

        Self {
            dimension,
            entries,
            norm,
        }
    }

    /// Size of the vocabulary the vector lives in.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// L2 norm
    pub fn norm(&self) -> f64 {
        self.norm
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, dim: usize) -> f64 {
        self.entries
            .binary_search_by_key(&dim, |(d, _)| *d)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn dot(&self, other: &WordVector) -> f64 {
        debug_assert_eq!(self.dimension, other.dimension);
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (da, va) = self.entries[i];
            let (db, vb) = other.entries[j];
            match da.cmp(&db) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += va * vb;
                    i += 1;
                    j += 1;
                }
            }
        }
        dot
    }
}
