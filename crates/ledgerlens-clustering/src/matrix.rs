//! Condensed (upper-triangle) pairwise distance matrix.

use rayon::prelude::*;

use crate::algorithms::distance::DistanceFn;

/// Pairwise distances among `n` observations, stored row-major over the
/// upper triangle: `(0,1), (0,2), …, (0,n-1), (1,2), …`.
#[derive(Debug, Clone, PartialEq)]
pub struct CondensedDistanceMatrix {
    observations: usize,
    values: Vec<f64>,
}

impl CondensedDistanceMatrix {
    /// Evaluate `distance` over every unordered pair of `strings`.
    pub fn compute(strings: &[String], distance: DistanceFn) -> Self {
        let n = strings.len();
        let values: Vec<f64> = (0..n)
            .into_par_iter()
            .flat_map_iter(|i| {
                let a = strings[i].as_str();
                strings[i + 1..].iter().map(move |b| distance(a, b))
            })
            .collect();
        Self {
            observations: n,
            values,
        }
    }

    /// Wrap precomputed condensed values. Returns `None` if the length is not
    /// `n·(n−1)/2` for some `n`.
    pub fn from_condensed(values: Vec<f64>) -> Option<Self> {
        let len = values.len();
        // Smallest n with n(n-1)/2 >= len.
        let mut n = 1usize;
        while n * (n - 1) / 2 < len {
            n += 1;
        }
        (n * (n - 1) / 2 == len).then_some(Self {
            observations: n,
            values,
        })
    }

    pub fn observations(&self) -> usize {
        self.observations
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Distance between observations `i` and `j` (`0.0` on the diagonal).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 0.0;
        }
        self.values[condensed_index(self.observations, i.min(j), i.max(j))]
    }
}

/// Position of pair `(i, j)` with `i < j` in a condensed matrix of `n` observations.
#[inline]
pub(crate) fn condensed_index(n: usize, i: usize, j: usize) -> usize {
    debug_assert!(i < j && j < n);
    n * i - i * (i + 1) / 2 + (j - i - 1)
}
