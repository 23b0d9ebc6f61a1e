//! densityscope-core: density-based clustering of 2-D points
//!
//! This crate provides a DBSCAN engine over labelled 2-D points together with
//! the pieces that usually surround it: parameter validation, per-cluster
//! summaries, seeded sample datasets, named preset comparisons and parallel
//! parameter sweeps.
//!
//! ```
//! use densityscope_core::{cluster, Label, Point};
//!
//! let points = vec![
//!     Point::new("a", 0.0, 0.0),
//!     Point::new("b", 1.0, 0.0),
//!     Point::new("c", 2.0, 0.0),
//! ];
//! let labels = cluster(&points, 1.5, 2).unwrap();
//! assert_eq!(labels, vec![Label::Cluster(0); 3]);
//! ```

pub mod compare;
pub mod datasets;
pub mod engine;
pub mod error;
pub mod params;
pub mod summary;
pub mod sweep;
pub mod types;
pub mod validation;

pub use compare::{compare_presets, normalize, Preset, PresetLevel, ScenarioOutcome};
pub use datasets::{sample_rng, Profession, Scene};
pub use engine::{cluster, region_query, ClusterEngine, Clustering};
pub use error::{DbscanError, Result};
pub use params::{CoreRule, DbscanParams};
pub use summary::{BoundingBox, ClusterSummary, ClusteringStats, ClusteringSummary};
pub use sweep::{best_by_clustering_ratio, best_index_by_clustering_ratio, sweep, SweepEntry};
pub use types::{Label, Point, PointId, PointRole};
