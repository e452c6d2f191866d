//! Hierarchical string clusterer: owns the strings, the preprocessor, the
//! metric and the linkage method, and keeps the derived artifacts in sync.
//!
//! Dependency chain: data list / preprocessor → preprocessed strings →
//! distance matrix → linkage matrix. Every setter validates first, then
//! recomputes only what depends on the changed input.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use ledgerlens_core::constants::PREPROCESSOR_PROBE;
use ledgerlens_core::errors::ClusteringError;
use ledgerlens_core::models::{DistanceMetric, LinkageMethod};
use ledgerlens_core::traits::IStringPreprocessor;
use ledgerlens_observability::events;
use serde::Serialize;

use crate::algorithms::distance::distance_function;
use crate::cut::assign_clusters;
use crate::linkage::{build_linkage, LinkageMatrix};
use crate::matrix::CondensedDistanceMatrix;
use crate::threshold::ThresholdSearch;

/// Serializable summary of a clusterer's configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInfo {
    pub data_list: Vec<String>,
    pub string_preprocessor: String,
    pub distance_metric: DistanceMetric,
    pub linkage_method: LinkageMethod,
    pub target_number_of_cluster: usize,
}

/// Clusters a list of strings by agglomerative linkage over a string metric.
///
/// The strings are expected to be unique; the valid cluster-count range is
/// `1..=` the number of unique *preprocessed* strings.
pub struct HierarchicalStringClusterer {
    data_list: Vec<String>,
    preprocessor: Arc<dyn IStringPreprocessor>,
    distance_metric: DistanceMetric,
    linkage_method: LinkageMethod,
    target_number_of_cluster: usize,
    preprocessed: Vec<String>,
    unique_preprocessed: usize,
    distance_matrix: Arc<CondensedDistanceMatrix>,
    linkage_matrix: Arc<LinkageMatrix>,
    search: ThresholdSearch,
}

impl HierarchicalStringClusterer {
    /// Validate the arguments and build every derived artifact.
    pub fn new(
        data_list: Vec<String>,
        target_number_of_cluster: usize,
        distance_metric: DistanceMetric,
        linkage_method: LinkageMethod,
        preprocessor: Arc<dyn IStringPreprocessor>,
    ) -> Result<Self, ClusteringError> {
        validate_data_list(&data_list)?;
        validate_preprocessor(preprocessor.as_ref())?;
        let preprocessed = preprocess_all(&data_list, preprocessor.as_ref());
        let unique_preprocessed = count_unique(&preprocessed);
        validate_cluster_count(target_number_of_cluster, unique_preprocessed)?;

        let distance_matrix = Arc::new(CondensedDistanceMatrix::compute(
            &preprocessed,
            distance_function(distance_metric),
        ));
        let linkage_matrix = Arc::new(build_linkage(&distance_matrix, linkage_method));

        events::clusterer_built(
            distance_metric.as_str(),
            linkage_method.as_str(),
            data_list.len(),
            unique_preprocessed,
        );

        Ok(Self {
            data_list,
            preprocessor,
            distance_metric,
            linkage_method,
            target_number_of_cluster,
            preprocessed,
            unique_preprocessed,
            distance_matrix,
            linkage_matrix,
            search: ThresholdSearch::default(),
        })
    }

    /// Like [`new`](Self::new), taking wire identifiers. Identifiers are
    /// checked before any distance is computed.
    pub fn from_identifiers(
        data_list: Vec<String>,
        target_number_of_cluster: usize,
        distance_metric: &str,
        linkage_method: &str,
        preprocessor: Arc<dyn IStringPreprocessor>,
    ) -> Result<Self, ClusteringError> {
        let distance_metric: DistanceMetric = distance_metric.parse()?;
        let linkage_method: LinkageMethod = linkage_method.parse()?;
        Self::new(
            data_list,
            target_number_of_cluster,
            distance_metric,
            linkage_method,
            preprocessor,
        )
    }

    // --- setters ---

    /// Replace the strings; recomputes preprocessed strings, distances and linkage.
    pub fn set_data_list(&mut self, data_list: Vec<String>) -> Result<(), ClusteringError> {
        validate_data_list(&data_list)?;
        let preprocessed = preprocess_all(&data_list, self.preprocessor.as_ref());
        let unique = count_unique(&preprocessed);
        validate_cluster_count(self.target_number_of_cluster, unique)?;

        self.data_list = data_list;
        self.install_preprocessed(preprocessed, unique);
        Ok(())
    }

    /// Replace the preprocessor; recomputes preprocessed strings, distances and linkage.
    pub fn set_string_preprocessor(
        &mut self,
        preprocessor: Arc<dyn IStringPreprocessor>,
    ) -> Result<(), ClusteringError> {
        validate_preprocessor(preprocessor.as_ref())?;
        let preprocessed = preprocess_all(&self.data_list, preprocessor.as_ref());
        let unique = count_unique(&preprocessed);
        validate_cluster_count(self.target_number_of_cluster, unique)?;

        self.preprocessor = preprocessor;
        self.install_preprocessed(preprocessed, unique);
        Ok(())
    }

    /// Switch metric; recomputes distances and linkage.
    pub fn set_distance_metric(&mut self, distance_metric: DistanceMetric) {
        if distance_metric == self.distance_metric {
            return;
        }
        self.distance_metric = distance_metric;
        self.rebuild_distance_matrix();
    }

    /// Switch linkage method; recomputes the linkage tree only.
    pub fn set_linkage_method(&mut self, linkage_method: LinkageMethod) {
        if linkage_method == self.linkage_method {
            return;
        }
        events::linkage_rebuilt(
            self.distance_metric.as_str(),
            self.linkage_method.as_str(),
            linkage_method.as_str(),
        );
        self.linkage_method = linkage_method;
        self.linkage_matrix = Arc::new(build_linkage(&self.distance_matrix, linkage_method));
    }

    /// Switch linkage method by wire identifier.
    pub fn set_linkage_method_by_name(&mut self, linkage_method: &str) -> Result<(), ClusteringError> {
        self.set_linkage_method(linkage_method.parse()?);
        Ok(())
    }

    pub fn set_target_number_of_cluster(&mut self, target: usize) -> Result<(), ClusteringError> {
        validate_cluster_count(target, self.unique_preprocessed)?;
        self.target_number_of_cluster = target;
        Ok(())
    }

    fn install_preprocessed(&mut self, preprocessed: Vec<String>, unique: usize) {
        self.preprocessed = preprocessed;
        self.unique_preprocessed = unique;
        self.rebuild_distance_matrix();
    }

    fn rebuild_distance_matrix(&mut self) {
        self.distance_matrix = Arc::new(CondensedDistanceMatrix::compute(
            &self.preprocessed,
            distance_function(self.distance_metric),
        ));
        self.linkage_matrix = Arc::new(build_linkage(&self.distance_matrix, self.linkage_method));
    }

    // --- getters ---

    pub fn data_list(&self) -> &[String] {
        &self.data_list
    }

    pub fn preprocessed_strings(&self) -> &[String] {
        &self.preprocessed
    }

    pub fn distance_matrix(&self) -> &Arc<CondensedDistanceMatrix> {
        &self.distance_matrix
    }

    pub fn linkage_matrix(&self) -> &Arc<LinkageMatrix> {
        &self.linkage_matrix
    }

    pub fn distance_metric(&self) -> DistanceMetric {
        self.distance_metric
    }

    pub fn linkage_method(&self) -> LinkageMethod {
        self.linkage_method
    }

    pub fn target_number_of_cluster(&self) -> usize {
        self.target_number_of_cluster
    }

    /// Number of unique preprocessed strings, the upper bound for cluster counts.
    pub fn unique_preprocessed(&self) -> usize {
        self.unique_preprocessed
    }

    pub fn cluster_info(&self) -> ClusterInfo {
        ClusterInfo {
            data_list: self.data_list.clone(),
            string_preprocessor: self.preprocessor.describe().to_string(),
            distance_metric: self.distance_metric,
            linkage_method: self.linkage_method,
            target_number_of_cluster: self.target_number_of_cluster,
        }
    }

    // --- clustering ---

    /// Cluster id per string in [`data_list`](Self::data_list) order, cut to
    /// the count closest to `target`.
    pub fn cluster_ids(&self, target: usize) -> Result<Vec<u32>, ClusteringError> {
        self.current_view().cluster_ids(target)
    }

    /// Cluster ids for the stored target count.
    pub fn target_cluster_ids(&self) -> Result<Vec<u32>, ClusteringError> {
        self.cluster_ids(self.target_number_of_cluster)
    }

    /// Read-only view over the current linkage tree.
    pub fn current_view(&self) -> ClusteringView {
        ClusteringView {
            distance_metric: self.distance_metric,
            linkage_method: self.linkage_method,
            observations: self.data_list.len(),
            unique_preprocessed: self.unique_preprocessed,
            distance_matrix: Arc::clone(&self.distance_matrix),
            linkage_matrix: Arc::clone(&self.linkage_matrix),
            search: self.search,
        }
    }

    /// View under `linkage_method` that shares this clusterer's distance
    /// matrix. The clusterer itself is left untouched.
    pub fn view(&self, linkage_method: LinkageMethod) -> ClusteringView {
        if linkage_method == self.linkage_method {
            return self.current_view();
        }
        ClusteringView {
            linkage_method,
            linkage_matrix: Arc::new(build_linkage(&self.distance_matrix, linkage_method)),
            ..self.current_view()
        }
    }
}

impl fmt::Debug for HierarchicalStringClusterer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HierarchicalStringClusterer")
            .field("strings", &self.data_list.len())
            .field("preprocessor", &self.preprocessor.describe())
            .field("distance_metric", &self.distance_metric)
            .field("linkage_method", &self.linkage_method)
            .field("target_number_of_cluster", &self.target_number_of_cluster)
            .finish()
    }
}

/// A linkage tree paired with the distance matrix it was built from.
///
/// Cheap to clone; used to serve a request for a linkage method other than
/// the clusterer's current one without mutating shared state.
#[derive(Debug, Clone)]
pub struct ClusteringView {
    distance_metric: DistanceMetric,
    linkage_method: LinkageMethod,
    observations: usize,
    unique_preprocessed: usize,
    distance_matrix: Arc<CondensedDistanceMatrix>,
    linkage_matrix: Arc<LinkageMatrix>,
    search: ThresholdSearch,
}

impl ClusteringView {
    pub fn distance_metric(&self) -> DistanceMetric {
        self.distance_metric
    }

    pub fn linkage_method(&self) -> LinkageMethod {
        self.linkage_method
    }

    pub fn distance_matrix(&self) -> &Arc<CondensedDistanceMatrix> {
        &self.distance_matrix
    }

    pub fn linkage_matrix(&self) -> &Arc<LinkageMatrix> {
        &self.linkage_matrix
    }

    /// Cluster id per observation for the cut closest to `target` clusters.
    pub fn cluster_ids(&self, target: usize) -> Result<Vec<u32>, ClusteringError> {
        validate_cluster_count(target, self.unique_preprocessed)?;

        let outcome = self.search.search(&self.linkage_matrix, target);
        if !outcome.is_exact() {
            events::threshold_search_degraded(
                self.distance_metric.as_str(),
                self.linkage_method.as_str(),
                target,
                outcome.cluster_count,
                outcome.threshold,
            );
        }

        let ids = assign_clusters(&self.linkage_matrix, outcome.threshold);
        if ids.len() != self.observations {
            return Err(ClusteringError::LengthMismatch {
                strings: self.observations,
                ids: ids.len(),
            });
        }
        Ok(ids)
    }
}

fn validate_data_list(data_list: &[String]) -> Result<(), ClusteringError> {
    if data_list.is_empty() {
        return Err(ClusteringError::EmptyDataList);
    }
    Ok(())
}

/// Probe the preprocessor: it must give the same answer twice.
fn validate_preprocessor(preprocessor: &dyn IStringPreprocessor) -> Result<(), ClusteringError> {
    let first = preprocessor.preprocess(PREPROCESSOR_PROBE);
    let second = preprocessor.preprocess(PREPROCESSOR_PROBE);
    if first != second {
        return Err(ClusteringError::PreprocessorContract {
            reason: format!(
                "not deterministic: {PREPROCESSOR_PROBE:?} produced {first:?} then {second:?}"
            ),
        });
    }
    Ok(())
}

fn validate_cluster_count(target: usize, unique: usize) -> Result<(), ClusteringError> {
    if (1..=unique).contains(&target) {
        Ok(())
    } else {
        Err(ClusteringError::ClusterCountOutOfRange {
            requested: target,
            unique,
        })
    }
}

fn preprocess_all(data_list: &[String], preprocessor: &dyn IStringPreprocessor) -> Vec<String> {
    data_list.iter().map(|s| preprocessor.preprocess(s)).collect()
}

fn count_unique(strings: &[String]) -> usize {
    strings.iter().collect::<HashSet<_>>().len()
}
