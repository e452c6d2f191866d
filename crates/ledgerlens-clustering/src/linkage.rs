//! Agglomerative linkage over a condensed distance matrix.
//!
//! Clusters are merged greedily by smallest inter-cluster distance, with the
//! merged cluster's distances derived by the Lance-Williams update of the
//! chosen method. The resulting merge rows follow the usual dendrogram
//! encoding: observations are ids `0..n`, the cluster formed by row `r` is
//! id `n + r`, and rows are ordered by non-decreasing merge distance.

use ledgerlens_core::models::LinkageMethod;
use serde::Serialize;

use crate::matrix::{condensed_index, CondensedDistanceMatrix};

/// One merge event of the dendrogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Merge {
    /// Smaller of the two child ids.
    pub left: usize,
    /// Larger of the two child ids.
    pub right: usize,
    pub distance: f64,
    /// Number of observations under the new cluster.
    pub size: usize,
}

/// Hierarchical merge tree over `observations` leaves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkageMatrix {
    observations: usize,
    merges: Vec<Merge>,
    /// Largest merge distance in each row's subtree (the row's own distance
    /// unless an inversion sits below it).
    #[serde(skip)]
    subtree_max: Vec<f64>,
}

impl LinkageMatrix {
    /// Build from merge rows already in dendrogram encoding.
    pub fn from_merges(observations: usize, merges: Vec<Merge>) -> Self {
        let mut subtree_max: Vec<f64> = Vec::with_capacity(merges.len());
        for merge in &merges {
            let child_max = |id: usize| {
                if id < observations {
                    f64::NEG_INFINITY
                } else {
                    subtree_max[id - observations]
                }
            };
            let max = merge
                .distance
                .max(child_max(merge.left))
                .max(child_max(merge.right));
            subtree_max.push(max);
        }
        Self {
            observations,
            merges,
            subtree_max,
        }
    }

    pub fn observations(&self) -> usize {
        self.observations
    }

    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    pub fn is_empty(&self) -> bool {
        self.merges.is_empty()
    }

    pub(crate) fn subtree_max(&self) -> &[f64] {
        &self.subtree_max
    }

    /// `(min, max)` merge distance, or `None` for a single observation.
    pub fn distance_range(&self) -> Option<(f64, f64)> {
        let mut distances = self.merges.iter().map(|m| m.distance);
        let first = distances.next()?;
        Some(distances.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }
}

/// Distance from the union of clusters `x` and `y` to cluster `i`.
fn updated_distance(
    method: LinkageMethod,
    d_xi: f64,
    d_yi: f64,
    d_xy: f64,
    size_x: usize,
    size_y: usize,
    size_i: usize,
) -> f64 {
    let (nx, ny, ni) = (size_x as f64, size_y as f64, size_i as f64);
    match method {
        LinkageMethod::Single => d_xi.min(d_yi),
        LinkageMethod::Complete => d_xi.max(d_yi),
        LinkageMethod::Average => (nx * d_xi + ny * d_yi) / (nx + ny),
        LinkageMethod::Weighted => 0.5 * (d_xi + d_yi),
        LinkageMethod::Centroid => {
            let radicand =
                (nx * d_xi * d_xi + ny * d_yi * d_yi - nx * ny * d_xy * d_xy / (nx + ny)) / (nx + ny);
            radicand.max(0.0).sqrt()
        }
        LinkageMethod::Median => {
            let radicand = 0.5 * (d_xi * d_xi + d_yi * d_yi) - 0.25 * d_xy * d_xy;
            radicand.max(0.0).sqrt()
        }
        LinkageMethod::Ward => {
            let t = 1.0 / (nx + ny + ni);
            let radicand = (ni + nx) * t * d_xi * d_xi + (ni + ny) * t * d_yi * d_yi
                - ni * t * d_xy * d_xy;
            radicand.max(0.0).sqrt()
        }
    }
}

/// Nearest active neighbour of slot `i`, lowest index on ties.
fn nearest_neighbour(i: usize, n: usize, dist: &[f64], active: &[bool]) -> (usize, f64) {
    let mut best = (usize::MAX, f64::INFINITY);
    for k in (0..n).filter(|&k| k != i && active[k]) {
        let d = dist[condensed_index(n, i.min(k), i.max(k))];
        if d < best.1 || best.0 == usize::MAX {
            best = (k, d);
        }
    }
    best
}

/// Whether a later merge can sit below an earlier one.
fn can_invert(method: LinkageMethod) -> bool {
    matches!(method, LinkageMethod::Centroid | LinkageMethod::Median)
}

/// Build the linkage tree of `matrix` under `method`.
///
/// Slot `k` of the working matrix always holds the cluster containing
/// observation `k`. Rows are recorded in merge order with real cluster ids;
/// for methods that cannot invert they are then stably sorted by distance
/// and renumbered.
pub fn build_linkage(matrix: &CondensedDistanceMatrix, method: LinkageMethod) -> LinkageMatrix {
    let n = matrix.observations();
    if n < 2 {
        return LinkageMatrix::from_merges(n, Vec::new());
    }

    let mut dist = matrix.values().to_vec();
    let mut size = vec![1usize; n];
    let mut active = vec![true; n];
    let mut cluster_id: Vec<usize> = (0..n).collect();
    let mut nearest: Vec<(usize, f64)> = (0..n)
        .map(|i| nearest_neighbour(i, n, &dist, &active))
        .collect();
    let mut rows: Vec<Merge> = Vec::with_capacity(n - 1);

    for step in 0..n - 1 {
        let mut a = usize::MAX;
        for i in (0..n).filter(|&i| active[i]) {
            if a == usize::MAX || nearest[i].1 < nearest[a].1 {
                a = i;
            }
        }
        let (b, d_ab) = nearest[a];
        // `x` is absorbed into slot `y`.
        let (x, y) = (a.min(b), a.max(b));

        for k in (0..n).filter(|&k| active[k] && k != x && k != y) {
            let xk = condensed_index(n, x.min(k), x.max(k));
            let yk = condensed_index(n, y.min(k), y.max(k));
            dist[yk] = updated_distance(method, dist[xk], dist[yk], d_ab, size[x], size[y], size[k]);
        }
        let (ix, iy) = (cluster_id[x], cluster_id[y]);
        rows.push(Merge {
            left: ix.min(iy),
            right: ix.max(iy),
            distance: d_ab,
            size: size[x] + size[y],
        });
        size[y] += size[x];
        active[x] = false;
        cluster_id[y] = n + step;

        nearest[y] = nearest_neighbour(y, n, &dist, &active);
        for k in (0..n).filter(|&k| active[k] && k != y) {
            let (nk, nd) = nearest[k];
            if nk == x || nk == y {
                nearest[k] = nearest_neighbour(k, n, &dist, &active);
            } else {
                let dy = dist[condensed_index(n, k.min(y), k.max(y))];
                if dy < nd || (dy == nd && y < nk) {
                    nearest[k] = (y, dy);
                }
            }
        }
    }

    if can_invert(method) {
        return LinkageMatrix::from_merges(n, rows);
    }
    LinkageMatrix::from_merges(n, sort_rows(n, rows))
}

/// Stable-sort merge-order rows by distance and renumber the cluster ids
/// they refer to.
///
/// The sort key is the running maximum over a row's subtree, so a parent
/// never lands ahead of its children even under rounding noise.
fn sort_rows(n: usize, rows: Vec<Merge>) -> Vec<Merge> {
    let mut key: Vec<f64> = Vec::with_capacity(rows.len());
    for merge in &rows {
        let child = |id: usize| if id < n { f64::NEG_INFINITY } else { key[id - n] };
        let k = merge.distance.max(child(merge.left)).max(child(merge.right));
        key.push(k);
    }

    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&p, &q| key[p].total_cmp(&key[q]));

    let mut renumbered: Vec<usize> = (0..n + rows.len()).collect();
    for (position, &row) in order.iter().enumerate() {
        renumbered[n + row] = n + position;
    }

    order
        .into_iter()
        .map(|row| {
            let merge = rows[row];
            let (l, r) = (renumbered[merge.left], renumbered[merge.right]);
            Merge {
                left: l.min(r),
                right: l.max(r),
                ..merge
            }
        })
        .collect()
}

pub(crate) fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(values: Vec<f64>) -> CondensedDistanceMatrix {
        CondensedDistanceMatrix::from_condensed(values).unwrap()
    }

    /// Points on a line at 0, 1, 5, 6.
    fn line() -> CondensedDistanceMatrix {
        //        (0,1) (0,2) (0,3) (1,2) (1,3) (2,3)
        matrix(vec![1.0, 5.0, 6.0, 4.0, 5.0, 1.0])
    }

    #[test]
    fn single_linkage_on_a_line() {
        let z = build_linkage(&line(), LinkageMethod::Single);
        assert_eq!(z.merges().len(), 3);
        assert_eq!(z.merges()[0], Merge { left: 0, right: 1, distance: 1.0, size: 2 });
        assert_eq!(z.merges()[1], Merge { left: 2, right: 3, distance: 1.0, size: 2 });
        assert_eq!(z.merges()[2], Merge { left: 4, right: 5, distance: 4.0, size: 4 });
    }

    #[test]
    fn complete_and_average_top_merge() {
        let complete = build_linkage(&line(), LinkageMethod::Complete);
        assert_eq!(complete.merges()[2].distance, 6.0);

        let average = build_linkage(&line(), LinkageMethod::Average);
        // mean of 5, 6, 4, 5
        assert_eq!(average.merges()[2].distance, 5.0);
    }

    #[test]
    fn ward_on_a_line_matches_closed_form() {
        let z = build_linkage(&line(), LinkageMethod::Ward);
        // Ward distance between {0,1} and {5,6}: sqrt(2·|Δcentroid|²·(2·2)/(2+2)) = sqrt(2)·5
        let expected = (2.0f64).sqrt() * 5.0;
        assert!((z.merges()[2].distance - expected).abs() < 1e-9);
    }

    #[test]
    fn rows_are_sorted_and_sizes_accumulate() {
        for method in LinkageMethod::ALL.into_iter().filter(|&m| !can_invert(m)) {
            let z = build_linkage(&line(), method);
            assert!(z.merges().windows(2).all(|w| w[0].distance <= w[1].distance), "{method}");
            assert_eq!(z.merges().last().unwrap().size, 4, "{method}");
        }
    }

    #[test]
    fn centroid_inversion_keeps_merge_order() {
        // (0,1) at 2.0 first; the merged centroid then sits closer to 2.
        let z = build_linkage(&matrix(vec![2.0, 2.1, 2.1]), LinkageMethod::Centroid);
        assert_eq!(z.merges()[0], Merge { left: 0, right: 1, distance: 2.0, size: 2 });
        let top = z.merges()[1];
        assert_eq!((top.left, top.right, top.size), (2, 3, 3));
        assert!((top.distance - 3.41f64.sqrt()).abs() < 1e-12);
        assert_eq!(z.subtree_max(), &[2.0, 2.0]);
    }

    #[test]
    fn median_inversion_keeps_merge_order() {
        let z = build_linkage(&matrix(vec![2.0, 2.1, 2.1]), LinkageMethod::Median);
        assert_eq!((z.merges()[0].left, z.merges()[0].right), (0, 1));
        assert_eq!((z.merges()[1].left, z.merges()[1].right), (2, 3));
        assert!(z.merges()[1].distance < z.merges()[0].distance);
    }

    #[test]
    fn single_observation_has_no_merges() {
        let z = build_linkage(&matrix(vec![]), LinkageMethod::Average);
        assert!(z.is_empty());
        assert_eq!(z.distance_range(), None);
    }

    #[test]
    fn distance_range_spans_merges() {
        let z = build_linkage(&line(), LinkageMethod::Complete);
        assert_eq!(z.distance_range(), Some((1.0, 6.0)));
    }
}
