//! Parameter sweeps: one independent engine run per (eps, min_pts) pair

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::ClusterEngine;
use crate::error::{DbscanError, Result};
use crate::params::{CoreRule, DbscanParams};
use crate::summary::ClusteringStats;
use crate::types::Point;
use crate::validation::{validate_params, validate_points};

/// Outcome of one grid cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepEntry {
    pub eps: f64,
    pub min_pts: usize,
    pub stats: ClusteringStats,
}

/// Run the engine over every (eps, min_pts) combination.
///
/// Entries come back eps-major in input order, regardless of how rayon
/// schedules the runs.
///
/// # Errors
///
/// Fails before any run starts if either grid axis is empty, any pair is
/// invalid, or the points are invalid.
pub fn sweep(
    points: &[Point],
    eps_values: &[f64],
    min_pts_values: &[usize],
    core_rule: CoreRule,
) -> Result<Vec<SweepEntry>> {
    if eps_values.is_empty() || min_pts_values.is_empty() {
        return Err(DbscanError::EmptySweep);
    }

    let grid: Vec<DbscanParams> = eps_values
        .iter()
        .flat_map(|&eps| {
            min_pts_values
                .iter()
                .map(move |&min_pts| DbscanParams::new(eps, min_pts).with_core_rule(core_rule))
        })
        .collect();

    for params in &grid {
        validate_params(params)?;
    }
    validate_points(points)?;

    debug!(points = points.len(), runs = grid.len(), "Starting parameter sweep");

    let entries = grid
        .par_iter()
        .map(|params| {
            let clustering = ClusterEngine::new(*params).run_validated(points);
            SweepEntry {
                eps: params.eps,
                min_pts: params.min_pts,
                stats: ClusteringStats::from_clustering(&clustering),
            }
        })
        .collect();

    Ok(entries)
}

/// Index of the entry with the highest clustered ratio; ties go to fewer
/// clusters, then to the earlier entry.
pub fn best_index_by_clustering_ratio(entries: &[SweepEntry]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, entry) in entries.iter().enumerate() {
        let replace = match best {
            None => true,
            Some(current) => {
                let current = &entries[current].stats;
                let better_ratio = entry.stats.clustering_ratio > current.clustering_ratio;
                let same_ratio = entry.stats.clustering_ratio == current.clustering_ratio;
                let fewer_clusters = entry.stats.num_clusters < current.num_clusters;
                better_ratio || (same_ratio && fewer_clusters)
            }
        };
        if replace {
            best = Some(i);
        }
    }
    best
}

/// Entry picked by [`best_index_by_clustering_ratio`]
pub fn best_by_clustering_ratio(entries: &[SweepEntry]) -> Option<&SweepEntry> {
    best_index_by_clustering_ratio(entries).map(|i| &entries[i])
}
