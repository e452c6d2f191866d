//! One clusterer per distance metric over the unique description set.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use ledgerlens_core::errors::{ClusteringError, FrequencyError, LedgerlensResult};
use ledgerlens_core::models::{ClusteringParams, DistanceMetric, LinkageMethod};
use ledgerlens_core::traits::{IClusterAssignments, IStringPreprocessor};
use rayon::prelude::*;

use crate::clusterer::{ClusteringView, HierarchicalStringClusterer};

/// Explicit registry of clusterers keyed by distance metric, owned by the
/// dataset session.
///
/// Descriptions are deduplicated here, in first-occurrence order, before any
/// clusterer sees them. Reads go through a [`ClusteringView`] so a request
/// for a different linkage method never mutates shared state; an in-place
/// linkage change holds the write lock across the change and the read.
pub struct ClustererRegistry {
    descriptions: Vec<String>,
    clusterers: HashMap<DistanceMetric, RwLock<HierarchicalStringClusterer>>,
}

impl ClustererRegistry {
    /// Build one clusterer per metric in parallel, each targeting one cluster.
    pub fn build<I>(
        descriptions: I,
        metrics: &[DistanceMetric],
        linkage_method: LinkageMethod,
        preprocessor: Arc<dyn IStringPreprocessor>,
    ) -> Result<Self, ClusteringError>
    where
        I: IntoIterator<Item = String>,
    {
        let descriptions = dedupe(descriptions);

        let built: Vec<(DistanceMetric, HierarchicalStringClusterer)> = unique_metrics(metrics)
            .into_par_iter()
            .map(|metric| {
                let span = ledgerlens_observability::clustering_span!(metric, linkage_method);
                let _guard = span.enter();
                HierarchicalStringClusterer::new(
                    descriptions.clone(),
                    1,
                    metric,
                    linkage_method,
                    Arc::clone(&preprocessor),
                )
                .map(|clusterer| (metric, clusterer))
            })
            .collect::<Result<_, _>>()?;

        let clusterers = built
            .into_iter()
            .map(|(metric, clusterer)| (metric, RwLock::new(clusterer)))
            .collect();

        Ok(Self {
            descriptions,
            clusterers,
        })
    }

    /// The unique descriptions, in first-occurrence order.
    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    /// Registered metrics in declaration order.
    pub fn metrics(&self) -> Vec<DistanceMetric> {
        DistanceMetric::ALL
            .iter()
            .copied()
            .filter(|m| self.clusterers.contains_key(m))
            .collect()
    }

    pub fn contains(&self, metric: DistanceMetric) -> bool {
        self.clusterers.contains_key(&metric)
    }

    /// Current linkage method of the metric's clusterer.
    pub fn linkage_method(&self, metric: DistanceMetric) -> Result<LinkageMethod, ClusteringError> {
        Ok(self.read(metric)?.linkage_method())
    }

    /// Cluster id per unique description, for `k` clusters under `linkage_method`.
    pub fn cluster_ids(
        &self,
        metric: DistanceMetric,
        linkage_method: LinkageMethod,
        k: usize,
    ) -> Result<Vec<u32>, ClusteringError> {
        self.view(metric, linkage_method)?.cluster_ids(k)
    }

    /// Snapshot of the metric's clusterer under `linkage_method`.
    pub fn view(
        &self,
        metric: DistanceMetric,
        linkage_method: LinkageMethod,
    ) -> Result<ClusteringView, ClusteringError> {
        Ok(self.read(metric)?.view(linkage_method))
    }

    /// Switch the stored clusterer to `linkage_method` in place.
    pub fn set_linkage_method(
        &self,
        metric: DistanceMetric,
        linkage_method: LinkageMethod,
    ) -> Result<(), ClusteringError> {
        self.write(metric)?.set_linkage_method(linkage_method);
        Ok(())
    }

    /// Switch linkage method and read the cluster ids as one atomic unit.
    pub fn set_and_cluster(
        &self,
        metric: DistanceMetric,
        linkage_method: LinkageMethod,
        k: usize,
    ) -> Result<Vec<u32>, ClusteringError> {
        let mut clusterer = self.write(metric)?;
        clusterer.set_linkage_method(linkage_method);
        clusterer.cluster_ids(k)
    }

    /// Run `f` against the metric's clusterer under a read lock.
    pub fn with_clusterer<R>(
        &self,
        metric: DistanceMetric,
        f: impl FnOnce(&HierarchicalStringClusterer) -> R,
    ) -> Result<R, ClusteringError> {
        let guard = self.read(metric)?;
        Ok(f(&*guard))
    }

    /// Description → cluster id under `params`.
    pub fn assignments(&self, params: &ClusteringParams) -> Result<HashMap<String, u32>, ClusteringError> {
        let ids = self.cluster_ids(
            params.distance_measure,
            params.linkage_method,
            params.number_of_cluster,
        )?;
        if ids.len() != self.descriptions.len() {
            return Err(ClusteringError::LengthMismatch {
                strings: self.descriptions.len(),
                ids: ids.len(),
            });
        }
        Ok(self.descriptions.iter().cloned().zip(ids).collect())
    }

    fn lock(
        &self,
        metric: DistanceMetric,
    ) -> Result<&RwLock<HierarchicalStringClusterer>, ClusteringError> {
        self.clusterers
            .get(&metric)
            .ok_or_else(|| ClusteringError::MetricNotRegistered {
                metric: metric.to_string(),
            })
    }

    fn read(
        &self,
        metric: DistanceMetric,
    ) -> Result<RwLockReadGuard<'_, HierarchicalStringClusterer>, ClusteringError> {
        Ok(self.lock(metric)?.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn write(
        &self,
        metric: DistanceMetric,
    ) -> Result<RwLockWriteGuard<'_, HierarchicalStringClusterer>, ClusteringError> {
        Ok(self.lock(metric)?.write().unwrap_or_else(PoisonError::into_inner))
    }
}

impl IClusterAssignments for ClustererRegistry {
    fn cluster_assignments(&self, params: &ClusteringParams) -> LedgerlensResult<HashMap<String, u32>> {
        if params.number_of_cluster == 0 {
            return Err(FrequencyError::ZeroClusterCount.into());
        }
        Ok(self.assignments(params)?)
    }
}

impl std::fmt::Debug for ClustererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClustererRegistry")
            .field("descriptions", &self.descriptions.len())
            .field("metrics", &self.metrics())
            .finish()
    }
}

fn dedupe<I: IntoIterator<Item = String>>(items: I) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

fn unique_metrics(metrics: &[DistanceMetric]) -> Vec<DistanceMetric> {
    let mut seen = HashSet::new();
    metrics.iter().copied().filter(|m| seen.insert(*m)).collect()
}
