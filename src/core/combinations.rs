//! k-subset enumeration in lexicographic index order.

/// Smallest group the generator produces, and the smallest input set worth combining.
pub const MIN_GROUP_SIZE: usize = 2;

const PREALLOCATE_LIMIT: u64 = 1 << 16;

/// Lazy iterator over the strictly increasing `k`-index tuples of `0..n`, in
/// lexicographic order. Cloning it (or building a new one) restarts the walk.
#[derive(Debug, Clone)]
pub struct IndexCombinations {
    n: usize,
    indices: Vec<usize>,
    exhausted: bool,
}

impl IndexCombinations {
    /// `k == 0` and `k > n` yield no tuples.
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            exhausted: k == 0 || k > n,
        }
    }

    pub fn group_size(&self) -> usize {
        self.indices.len()
    }

    // Rightmost index still below its ceiling `n - k + i` grows by one and
    // every index to its right restarts right after it.
    fn advance(&mut self) {
        let k = self.indices.len();
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) else {
            self.exhausted = true;
            return;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
    }
}

impl Iterator for IndexCombinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let current = self.indices.clone();
        self.advance();
        Some(current)
    }
}

/// Index tuples for every group size from 2 to `max_size`, grouped by size.
#[derive(Debug, Clone)]
pub struct GroupedCombinations {
    n: usize,
    last_size: usize,
    current: IndexCombinations,
}

impl Iterator for GroupedCombinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(tuple) = self.current.next() {
                return Some(tuple);
            }
            let next_size = self.current.group_size() + 1;
            if next_size > self.last_size {
                return None;
            }
            self.current = IndexCombinations::new(self.n, next_size);
        }
    }
}

/// Group sizes above `n` have no tuples, so the walk stops at `min(max_size, n)`.
pub fn combination_indices(n: usize, max_size: usize) -> GroupedCombinations {
    let last_size = max_size.min(n);
    let current = if last_size < MIN_GROUP_SIZE {
        IndexCombinations::new(0, 1)
    } else {
        IndexCombinations::new(n, MIN_GROUP_SIZE)
    };
    GroupedCombinations {
        n,
        last_size,
        current,
    }
}

/// Applies `transform` to every combination of 2..=`max_size` values, in
/// generation order, and collects the results.
pub fn generate<T, U, F>(values: &[T], max_size: usize, mut transform: F) -> Vec<U>
where
    F: FnMut(&[&T]) -> U,
{
    let expected = combination_count(values.len(), max_size).min(PREALLOCATE_LIMIT);
    let mut output = Vec::with_capacity(expected as usize);
    let mut group: Vec<&T> = Vec::with_capacity(max_size.min(values.len()));

    for tuple in combination_indices(values.len(), max_size) {
        group.clear();
        group.extend(tuple.iter().map(|&i| &values[i]));
        output.push(transform(&group));
    }

    output
}

/// C(n, k), saturating at `u64::MAX`.
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k) as u128;
    let n = n as u128;
    let mut result: u128 = 1;
    for i in 0..k {
        // exact at every step: result * (n - i) is divisible by (i + 1)
        result = result * (n - i) / (i + 1);
        if result > u64::MAX as u128 {
            return u64::MAX;
        }
    }
    result as u64
}

/// `(k, C(n, k))` for every group size the generator visits.
pub fn group_size_breakdown(n: usize, max_size: usize) -> Vec<(usize, u64)> {
    (MIN_GROUP_SIZE..=max_size.min(n))
        .map(|k| (k, binomial(n, k)))
        .collect()
}

/// Total number of combinations `generate` produces, saturating.
pub fn combination_count(n: usize, max_size: usize) -> u64 {
    group_size_breakdown(n, max_size)
        .into_iter()
        .fold(0u64, |total, (_, count)| total.saturating_add(count))
}
