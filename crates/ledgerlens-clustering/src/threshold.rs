//! Bisection over merge distances for the cut height whose cluster count is
//! closest to a target.
//!
//! The cluster count is a step function of the threshold, so the target may
//! be unreachable; the best threshold seen is returned either way.

use ledgerlens_core::constants::THRESHOLD_SEARCH_ITERATIONS;
use serde::Serialize;

use crate::cut::cluster_count_at;
use crate::linkage::LinkageMatrix;

/// Result of a threshold search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdSearchOutcome {
    pub threshold: f64,
    /// Cluster count produced by `threshold`.
    pub cluster_count: usize,
    pub target: usize,
    /// Bisection steps actually taken.
    pub iterations: usize,
}

impl ThresholdSearchOutcome {
    /// Whether the returned threshold reproduces the target exactly.
    pub fn is_exact(&self) -> bool {
        self.cluster_count == self.target
    }
}

/// Bounded bisection over `[min merge distance, max merge distance]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdSearch {
    max_iterations: usize,
}

impl Default for ThresholdSearch {
    fn default() -> Self {
        Self::new(THRESHOLD_SEARCH_ITERATIONS)
    }
}

impl ThresholdSearch {
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Search `linkage` for the threshold closest to `target` clusters.
    ///
    /// A candidate replaces the best one only when strictly closer to the
    /// target, so among equally close thresholds the first one tried wins.
    pub fn search(&self, linkage: &LinkageMatrix, target: usize) -> ThresholdSearchOutcome {
        let Some((min, max)) = linkage.distance_range() else {
            return ThresholdSearchOutcome {
                threshold: 0.0,
                cluster_count: linkage.observations(),
                target,
                iterations: 0,
            };
        };

        let (mut left, mut right) = (min, max);
        let mut best: Option<(f64, usize)> = None;
        let mut iterations = 0;

        while left < right && iterations < self.max_iterations {
            let mid = (left + right) / 2.0;
            let count = cluster_count_at(linkage, mid);

            let improved = match best {
                None => true,
                Some((_, best_count)) => count.abs_diff(target) < best_count.abs_diff(target),
            };
            if improved {
                best = Some((mid, count));
            }

            if count > target {
                left = mid;
            } else {
                right = mid;
            }
            iterations += 1;
        }

        let (threshold, cluster_count) = best.unwrap_or_else(|| {
            let mid = (left + right) / 2.0;
            (mid, cluster_count_at(linkage, mid))
        });

        ThresholdSearchOutcome {
            threshold,
            cluster_count,
            target,
            iterations,
        }
    }
}
