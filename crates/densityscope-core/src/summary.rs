//! Per-cluster summaries and run statistics

use serde::{Deserialize, Serialize};

use crate::engine::Clustering;
use crate::error::{DbscanError, Result};
use crate::types::{Label, Point, PointId, PointRole};

/// Axis-aligned bounds of a cluster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    fn around(point: &Point) -> Self {
        Self {
            min_x: point.x,
            min_y: point.y,
            max_x: point.x,
            max_y: point.y,
        }
    }

    fn extend(&mut self, point: &Point) {
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// One discovered cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// Cluster ID (0-based)
    pub id: usize,
    /// Member ids in input order
    pub members: Vec<PointId>,
    /// Mean position of the members
    pub centroid: (f64, f64),
    /// Bounds of the members
    pub bounds: BoundingBox,
    /// Members that are core points
    pub core_count: usize,
    /// Members that are border points
    pub border_count: usize,
}

impl ClusterSummary {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Clusters and noise of one run, resolved to point ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringSummary {
    /// Clusters in id order
    pub clusters: Vec<ClusterSummary>,
    /// Ids of noise points in input order
    pub noise: Vec<PointId>,
    /// Total number of points in the run
    pub total_points: usize,
}

impl ClusteringSummary {
    /// Summarise a run. `points` must be the slice the run was made on.
    ///
    /// # Errors
    ///
    /// Returns `DbscanError::InvalidClustering` if `points` and `clustering`
    /// have different lengths or the clustering is internally inconsistent.
    pub fn from_run(points: &[Point], clustering: &Clustering) -> Result<Self> {
        clustering.check()?;
        if points.len() != clustering.len() {
            return Err(DbscanError::InvalidClustering(format!(
                "{} labels for {} points",
                clustering.len(),
                points.len()
            )));
        }

        let mut builders: Vec<Option<ClusterSummary>> = vec![None; clustering.n_clusters];
        let mut sums = vec![(0.0f64, 0.0f64); clustering.n_clusters];
        let mut noise = Vec::new();

        for ((point, label), role) in points.iter().zip(&clustering.labels).zip(&clustering.roles) {
            let id = match label {
                Label::Noise => {
                    noise.push(point.id.clone());
                    continue;
                }
                Label::Cluster(id) => *id,
            };

            sums[id].0 += point.x;
            sums[id].1 += point.y;

            let summary = builders[id].get_or_insert_with(|| ClusterSummary {
                id,
                members: Vec::new(),
                centroid: (0.0, 0.0),
                bounds: BoundingBox::around(point),
                core_count: 0,
                border_count: 0,
            });
            summary.members.push(point.id.clone());
            summary.bounds.extend(point);
            match role {
                PointRole::Core => summary.core_count += 1,
                PointRole::Border => summary.border_count += 1,
                PointRole::Noise => {}
            }
        }

        // Every cluster id in 0..n_clusters has at least its seed point
        let clusters = builders
            .into_iter()
            .zip(sums)
            .filter_map(|(summary, (sx, sy))| {
                summary.map(|mut s| {
                    let n = s.members.len() as f64;
                    s.centroid = (sx / n, sy / n);
                    s
                })
            })
            .collect();

        Ok(Self {
            clusters,
            noise,
            total_points: points.len(),
        })
    }

    /// Get the number of clusters found
    pub fn num_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Get clustering statistics
    pub fn statistics(&self) -> ClusteringStats {
        let cluster_sizes: Vec<usize> = self.clusters.iter().map(|c| c.size()).collect();
        let clustered_points = cluster_sizes.iter().sum::<usize>();

        ClusteringStats {
            num_clusters: self.clusters.len(),
            total_points: self.total_points,
            clustered_points,
            noise_points: self.noise.len(),
            core_points: self.clusters.iter().map(|c| c.core_count).sum(),
            border_points: self.clusters.iter().map(|c| c.border_count).sum(),
            clustering_ratio: clustered_points as f64 / self.total_points.max(1) as f64,
            avg_cluster_size: if !cluster_sizes.is_empty() {
                clustered_points as f64 / cluster_sizes.len() as f64
            } else {
                0.0
            },
            max_cluster_size: cluster_sizes.iter().copied().max().unwrap_or(0),
            min_cluster_size: cluster_sizes.iter().copied().min().unwrap_or(0),
        }
    }
}

/// Clustering statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringStats {
    pub num_clusters: usize,
    pub total_points: usize,
    pub clustered_points: usize,
    pub noise_points: usize,
    pub core_points: usize,
    pub border_points: usize,
    pub clustering_ratio: f64,
    pub avg_cluster_size: f64,
    pub max_cluster_size: usize,
    pub min_cluster_size: usize,
}

impl ClusteringStats {
    /// Statistics straight from a run, without resolving point ids
    pub fn from_clustering(clustering: &Clustering) -> Self {
        let sizes = clustering.cluster_sizes();
        let total = clustering.len();
        let clustered_points = sizes.iter().sum::<usize>();
        let count_role = |role: PointRole| clustering.roles.iter().filter(|r| **r == role).count();

        Self {
            num_clusters: clustering.n_clusters,
            total_points: total,
            clustered_points,
            noise_points: total - clustered_points,
            core_points: count_role(PointRole::Core),
            border_points: count_role(PointRole::Border),
            clustering_ratio: clustered_points as f64 / total.max(1) as f64,
            avg_cluster_size: if !sizes.is_empty() {
                clustered_points as f64 / sizes.len() as f64
            } else {
                0.0
            },
            max_cluster_size: sizes.iter().copied().max().unwrap_or(0),
            min_cluster_size: sizes.iter().copied().min().unwrap_or(0),
        }
    }
}
