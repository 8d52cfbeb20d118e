/// Lazy lexicographic sequence of the `k`-element subsets of `0..n`.
///
/// `Combinations::new(4, 2)` yields `[0,1] [0,2] [0,3] [1,2] [1,3] [2,3]`.
/// The order is fixed, so "first best wins" is a deterministic tie-break.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }

        let k = self.indices.len();
        // rightmost slot that can still move right
        let mut slot = k;
        loop {
            if slot == 0 {
                self.done = true;
                return None;
            }
            slot -= 1;
            if self.indices[slot] < self.n - k + slot {
                break;
            }
        }

        self.indices[slot] += 1;
        for next in slot + 1..k {
            self.indices[next] = self.indices[next - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

/// `C(n, k)`, saturating at `u64::MAX`.
pub fn combination_count(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut count: u128 = 1;
    for i in 0..k {
        count = count * (n - i) as u128 / (i + 1) as u128;
        if count > u64::MAX as u128 {
            return u64::MAX;
        }
    }
    count as u64
}
