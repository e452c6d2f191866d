//! Flat cut of a linkage tree by distance.
//!
//! A cluster node is collapsed when every merge in its subtree happened at
//! or below the threshold; each maximal collapsed subtree becomes one flat
//! cluster and every remaining leaf is a singleton.

use crate::linkage::{find, LinkageMatrix};

/// Number of flat clusters produced by cutting at `threshold`.
pub fn cluster_count_at(linkage: &LinkageMatrix, threshold: f64) -> usize {
    let collapsed = linkage
        .subtree_max()
        .iter()
        .filter(|&&max| max <= threshold)
        .count();
    linkage.observations() - collapsed
}

/// Flat cluster id per observation, 1-based, numbered in order of first
/// appearance.
pub fn assign_clusters(linkage: &LinkageMatrix, threshold: f64) -> Vec<u32> {
    let n = linkage.observations();
    let merges = linkage.merges();

    // Representative leaf of every node id.
    let mut representative: Vec<usize> = (0..n).collect();
    representative.extend(merges.iter().map(|m| m.left));
    for row in 0..merges.len() {
        representative[n + row] = representative[merges[row].left];
    }

    let mut parent: Vec<usize> = (0..n).collect();
    for (merge, &max) in merges.iter().zip(linkage.subtree_max()) {
        if max <= threshold {
            let a = find(&mut parent, representative[merge.left]);
            let b = find(&mut parent, representative[merge.right]);
            if a != b {
                parent[a] = b;
            }
        }
    }

    let mut ids = vec![0u32; n];
    let mut next_id = 0u32;
    let mut id_of_root = vec![0u32; n];
    for (leaf, id) in ids.iter_mut().enumerate() {
        let root = find(&mut parent, leaf);
        if id_of_root[root] == 0 {
            next_id += 1;
            id_of_root[root] = next_id;
        }
        *id = id_of_root[root];
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linkage::build_linkage;
    use crate::matrix::CondensedDistanceMatrix;
    use ledgerlens_core::models::LinkageMethod;

    fn line_linkage(method: LinkageMethod) -> LinkageMatrix {
        let m = CondensedDistanceMatrix::from_condensed(vec![1.0, 5.0, 6.0, 4.0, 5.0, 1.0]).unwrap();
        build_linkage(&m, method)
    }

    #[test]
    fn counts_follow_threshold() {
        let z = line_linkage(LinkageMethod::Single);
        assert_eq!(cluster_count_at(&z, 0.5), 4);
        assert_eq!(cluster_count_at(&z, 1.0), 2);
        assert_eq!(cluster_count_at(&z, 3.9), 2);
        assert_eq!(cluster_count_at(&z, 4.0), 1);
    }

    #[test]
    fn assignment_groups_neighbours() {
        let z = line_linkage(LinkageMethod::Single);
        assert_eq!(assign_clusters(&z, 1.0), vec![1, 1, 2, 2]);
        assert_eq!(assign_clusters(&z, 0.0), vec![1, 2, 3, 4]);
        assert_eq!(assign_clusters(&z, 10.0), vec![1, 1, 1, 1]);
    }

    #[test]
    fn count_matches_distinct_ids() {
        let z = line_linkage(LinkageMethod::Average);
        for t in [0.0, 0.99, 1.0, 2.5, 5.0, 7.0] {
            let mut ids = assign_clusters(&z, t);
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), cluster_count_at(&z, t), "threshold {t}");
        }
    }

    #[test]
    fn centroid_inversion_cuts_by_subtree_height() {
        let m = CondensedDistanceMatrix::from_condensed(vec![2.0, 2.1, 2.1]).unwrap();
        let z = build_linkage(&m, LinkageMethod::Centroid);
        assert_eq!(assign_clusters(&z, 1.9), vec![1, 2, 3]);
        assert_eq!(cluster_count_at(&z, 1.9), 3);
        assert_eq!(assign_clusters(&z, 2.0), vec![1, 1, 1]);
        assert_eq!(cluster_count_at(&z, 2.0), 1);
    }

    #[test]
    fn single_observation_is_one_cluster() {
        let m = CondensedDistanceMatrix::from_condensed(vec![]).unwrap();
        let z = build_linkage(&m, LinkageMethod::Ward);
        assert_eq!(cluster_count_at(&z, 0.0), 1);
        assert_eq!(assign_clusters(&z, 0.0), vec![1]);
    }
}
