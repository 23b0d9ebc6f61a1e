//! # DBSCAN cluster engine
//!
//! Density-Based Spatial Clustering of Applications with Noise over 2-D
//! points, using the seed-queue expansion variant.
//!
//! ## Semantics
//! - Neighbourhood: every *other* point at Euclidean distance `<= eps`
//! - Core point: decided by [`CoreRule`](crate::params::CoreRule), exclude-self by default
//! - A point first marked noise becomes a border point when a later cluster
//!   expansion reaches it; a clustered point never changes cluster
//!
//! The engine holds no state between runs. Every neighbour query is a full
//! scan, so a run costs O(n²) distance evaluations.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{DbscanError, Result};
use crate::params::DbscanParams;
use crate::types::{Label, Point, PointRole};
use crate::validation::{validate_params, validate_points};

/// Outcome of one clustering run, aligned with the input order
///
/// Deserializing checks the same invariants as [`Clustering::check`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawClustering")]
pub struct Clustering {
    /// Label per input point
    pub labels: Vec<Label>,
    /// Density role per input point
    pub roles: Vec<PointRole>,
    /// Number of other points within eps, per input point
    pub neighbor_counts: Vec<usize>,
    /// Number of clusters found (ids are `0..n_clusters`)
    pub n_clusters: usize,
    /// Parameters the run used
    pub params: DbscanParams,
}

#[derive(Deserialize)]
struct RawClustering {
    labels: Vec<Label>,
    roles: Vec<PointRole>,
    neighbor_counts: Vec<usize>,
    n_clusters: usize,
    params: DbscanParams,
}

impl TryFrom<RawClustering> for Clustering {
    type Error = DbscanError;

    fn try_from(raw: RawClustering) -> Result<Self> {
        let clustering = Clustering {
            labels: raw.labels,
            roles: raw.roles,
            neighbor_counts: raw.neighbor_counts,
            n_clusters: raw.n_clusters,
            params: raw.params,
        };
        clustering.check()?;
        Ok(clustering)
    }
}

impl Clustering {
    /// Check that the per-point vectors line up, every cluster id is below
    /// `n_clusters`, and noise labels and noise roles coincide.
    ///
    /// # Errors
    ///
    /// Returns `DbscanError::InvalidClustering` naming the first violation.
    pub fn check(&self) -> Result<()> {
        let n = self.labels.len();
        if self.roles.len() != n || self.neighbor_counts.len() != n {
            return Err(DbscanError::InvalidClustering(format!(
                "{} labels, {} roles and {} neighbour counts",
                n,
                self.roles.len(),
                self.neighbor_counts.len()
            )));
        }

        for (i, (label, role)) in self.labels.iter().zip(&self.roles).enumerate() {
            if let Label::Cluster(id) = label {
                if *id >= self.n_clusters {
                    return Err(DbscanError::InvalidClustering(format!(
                        "point {} has cluster {} but only {} clusters exist",
                        i, id, self.n_clusters
                    )));
                }
            }
            if label.is_noise() != (*role == PointRole::Noise) {
                return Err(DbscanError::InvalidClustering(format!(
                    "point {} is labelled {} with role {}",
                    i, label, role
                )));
            }
        }
        Ok(())
    }

    fn empty(params: DbscanParams) -> Self {
        Self {
            labels: vec![],
            roles: vec![],
            neighbor_counts: vec![],
            n_clusters: 0,
            params,
        }
    }

    /// Number of points in the run
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Indices of the members of cluster `cluster_id`, in input order
    pub fn cluster_members(&self, cluster_id: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, label)| label.cluster_id() == Some(cluster_id))
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of noise points, in input order
    pub fn noise_indices(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, label)| label.is_noise())
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of core points, in input order
    pub fn core_indices(&self) -> Vec<usize> {
        self.roles
            .iter()
            .enumerate()
            .filter(|(_, role)| **role == PointRole::Core)
            .map(|(i, _)| i)
            .collect()
    }

    /// Size of each cluster, indexed by cluster id
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.n_clusters];
        for id in self.labels.iter().filter_map(Label::cluster_id) {
            if let Some(size) = sizes.get_mut(id) {
                *size += 1;
            }
        }
        sizes
    }

    /// Number of noise points
    pub fn noise_count(&self) -> usize {
        self.labels.iter().filter(|label| label.is_noise()).count()
    }
}

/// DBSCAN clustering engine
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterEngine {
    params: DbscanParams,
}

impl ClusterEngine {
    /// Create an engine for the given parameters
    pub fn new(params: DbscanParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DbscanParams {
        &self.params
    }

    /// Cluster `points`.
    ///
    /// # Errors
    ///
    /// Fails before doing any work if the parameters are out of range, a
    /// point has a non-finite coordinate, or two points share an id.
    pub fn run(&self, points: &[Point]) -> Result<Clustering> {
        validate_params(&self.params)?;
        validate_points(points)?;
        Ok(self.run_validated(points))
    }

    /// Cluster points that have already been validated.
    pub(crate) fn run_validated(&self, points: &[Point]) -> Clustering {
        let n = points.len();
        if n == 0 {
            return Clustering::empty(self.params);
        }

        debug!(
            points = n,
            eps = self.params.eps,
            min_pts = self.params.min_pts,
            core_rule = %self.params.core_rule,
            "Running DBSCAN"
        );

        // None = unvisited
        let mut labels: Vec<Option<Label>> = vec![None; n];
        let mut neighbor_counts = vec![0usize; n];
        // Cluster id each point was last pushed onto the seed stack for
        let mut queued: Vec<Option<usize>> = vec![None; n];
        let mut cluster_id = 0usize;

        for i in 0..n {
            if labels[i].is_some() {
                continue; // Already processed
            }

            let neighbors = region_query(points, i, self.params.eps);
            neighbor_counts[i] = neighbors.len();

            if !self.params.is_core(neighbors.len()) {
                labels[i] = Some(Label::Noise); // Provisional, may become border
                continue;
            }

            trace!(cluster = cluster_id, seed = %points[i].id, "Opening cluster");
            self.expand_cluster(
                i,
                neighbors,
                cluster_id,
                points,
                &mut labels,
                &mut neighbor_counts,
                &mut queued,
            );
            cluster_id += 1;
        }

        let labels: Vec<Label> = labels
            .into_iter()
            .map(|label| label.unwrap_or(Label::Noise))
            .collect();

        let roles = labels
            .iter()
            .zip(&neighbor_counts)
            .map(|(label, &count)| match label {
                Label::Noise => PointRole::Noise,
                Label::Cluster(_) if self.params.is_core(count) => PointRole::Core,
                Label::Cluster(_) => PointRole::Border,
            })
            .collect();

        let clustering = Clustering {
            labels,
            roles,
            neighbor_counts,
            n_clusters: cluster_id,
            params: self.params,
        };

        debug!(
            clusters = clustering.n_clusters,
            noise = clustering.noise_count(),
            "DBSCAN finished"
        );

        clustering
    }

    #[allow(clippy::too_many_arguments)]
    fn expand_cluster(
        &self,
        point_idx: usize,
        neighbors: Vec<usize>,
        cluster_id: usize,
        points: &[Point],
        labels: &mut [Option<Label>],
        neighbor_counts: &mut [usize],
        queued: &mut [Option<usize>],
    ) {
        labels[point_idx] = Some(Label::Cluster(cluster_id));
        queued[point_idx] = Some(cluster_id);

        let mut seed_set = Vec::with_capacity(neighbors.len());
        push_seeds(&mut seed_set, neighbors, cluster_id, queued);

        while let Some(q_idx) = seed_set.pop() {
            match labels[q_idx] {
                Some(Label::Noise) => {
                    labels[q_idx] = Some(Label::Cluster(cluster_id)); // Noise to border
                    continue;
                }
                Some(Label::Cluster(_)) => continue,
                None => {}
            }

            labels[q_idx] = Some(Label::Cluster(cluster_id));

            let q_neighbors = region_query(points, q_idx, self.params.eps);
            neighbor_counts[q_idx] = q_neighbors.len();
            if self.params.is_core(q_neighbors.len()) {
                push_seeds(&mut seed_set, q_neighbors, cluster_id, queued);
            }
        }
    }
}

fn push_seeds(
    seed_set: &mut Vec<usize>,
    candidates: Vec<usize>,
    cluster_id: usize,
    queued: &mut [Option<usize>],
) {
    for idx in candidates {
        if queued[idx] != Some(cluster_id) {
            queued[idx] = Some(cluster_id);
            seed_set.push(idx);
        }
    }
}

/// Indices of all points other than `points[index]` within `eps` of it.
///
/// This is exactly the neighbour relation the engine uses, exposed so that
/// callers can highlight a point's neighbourhood.
///
/// # Panics
///
/// Panics if `index` is out of bounds.
pub fn region_query(points: &[Point], index: usize, eps: f64) -> Vec<usize> {
    let point = &points[index];
    points
        .iter()
        .enumerate()
        .filter(|(j, other)| *j != index && point.distance(other) <= eps)
        .map(|(j, _)| j)
        .collect()
}

/// Cluster `points` with the canonical exclude-self rule and return only
/// the labels, aligned with the input.
///
/// # Errors
///
/// See [`ClusterEngine::run`].
pub fn cluster(points: &[Point], eps: f64, min_pts: usize) -> Result<Vec<Label>> {
    ClusterEngine::new(DbscanParams::new(eps, min_pts))
        .run(points)
        .map(|clustering| clustering.labels)
}
