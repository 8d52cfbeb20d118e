use crate::corpus::WordVector;
use crate::selection::pool::CandidatePool;

/// `dot(a, b) / (|a| * |b|)`, or `None` when either vector is zero.
pub fn cosine_similarity(a: &WordVector, b: &WordVector) -> Option<f64> {
    if a.norm() == 0.0 || b.norm() == 0.0 {
        return None;
    }
    Some(a.dot(b) / (a.norm() * b.norm()))
}

/// `1 - cosine_similarity`, in `[0, 1]`.
///
/// A zero vector shares nothing with anything, so it is maximally dissimilar.
pub fn cosine_dissimilarity(a: &WordVector, b: &WordVector) -> f64 {
    match cosine_similarity(a, b) {
        None => 1.0,
        Some(similarity) => (1.0 - similarity).clamp(0.0, 1.0),
    }
}

/// Symmetric pairwise dissimilarities of one candidate pool.
/// Computed once per word, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DissimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DissimilarityMatrix {
    pub fn build(vectors: &[&WordVector]) -> Self {
        let size = vectors.len();
        let mut values = vec![0.0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let d = cosine_dissimilarity(vectors[i], vectors[j]);
                values[i * size + j] = d;
                values[j * size + i] = d;
            }
        }
        Self { size, values }
    }

    pub fn for_pool(pool: &CandidatePool<'_>) -> Self {
        let vectors: Vec<&WordVector> = (0..pool.len()).map(|i| pool.vector(i)).collect();
        Self::build(&vectors)
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    /// Sum over all unordered pairs of `members`.
    pub fn total(&self, members: &[usize]) -> f64 {
        let mut total = 0.0;
        for (a, &i) in members.iter().enumerate() {
            for &j in &members[a + 1..] {
                total += self.get(i, j);
            }
        }
        total
    }

    /// Sum of `member`'s dissimilarity to every other entry of `members`.
    pub fn contribution(&self, member: usize, members: &[usize]) -> f64 {
        members
            .iter()
            .filter(|&&other| other != member)
            .map(|&other| self.get(member, other))
            .sum()
    }
}
