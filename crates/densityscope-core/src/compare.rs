//! # Scenario comparison
//!
//! Three named parameter presets per profession, run side by side on a
//! "realistic" profession dataset. The dataset lives in domain units
//! (square feet, days, word counts), so it is min-max normalised to the unit
//! square and each preset's eps is rescaled by a per-profession factor
//! before clustering.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::datasets::{sample_rng, Profession};
use crate::engine::ClusterEngine;
use crate::error::{DbscanError, Result};
use crate::params::DbscanParams;
use crate::summary::ClusteringStats;
use crate::types::{Point, PointId};
use crate::validation::validate_points;

/// Eps of the balanced preset; scaled eps equals the profession factor here
const REFERENCE_EPS: f64 = 7.0;

/// Points per Gaussian cluster in the realistic datasets
const CLUSTER_SIZE: usize = 18;

/// Uniform outliers per realistic dataset
const OUTLIER_COUNT: usize = 8;

/// How coarse a preset groups points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetLevel {
    Loose,
    Balanced,
    Strict,
}

impl PresetLevel {
    pub const ALL: [PresetLevel; 3] = [PresetLevel::Loose, PresetLevel::Balanced, PresetLevel::Strict];

    /// Unscaled (eps, min_pts) shared by every profession
    pub fn values(&self) -> (f64, usize) {
        match self {
            PresetLevel::Loose => (12.0, 3),
            PresetLevel::Balanced => (7.0, 4),
            PresetLevel::Strict => (4.0, 5),
        }
    }
}

impl fmt::Display for PresetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetLevel::Loose => f.write_str("loose"),
            PresetLevel::Balanced => f.write_str("balanced"),
            PresetLevel::Strict => f.write_str("strict"),
        }
    }
}

impl FromStr for PresetLevel {
    type Err = DbscanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loose" | "broad" => Ok(PresetLevel::Loose),
            "balanced" => Ok(PresetLevel::Balanced),
            "strict" | "precise" | "tight" => Ok(PresetLevel::Strict),
            other => Err(DbscanError::invalid_parameter(
                "preset",
                format!("expected loose, balanced or strict, got '{}'", other),
            )),
        }
    }
}

/// A named parameter preset as a profession sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preset {
    pub level: PresetLevel,
    pub title: &'static str,
    pub description: &'static str,
    /// Unscaled eps
    pub eps: f64,
    pub min_pts: usize,
}

impl Preset {
    /// Parameters on the unscaled eps
    pub fn params(&self) -> DbscanParams {
        DbscanParams::new(self.eps, self.min_pts)
    }
}

impl Profession {
    /// Loose, balanced and strict presets, in that order
    pub fn presets(&self) -> [Preset; 3] {
        PresetLevel::ALL.map(|level| self.preset(level))
    }

    pub fn preset(&self, level: PresetLevel) -> Preset {
        let (title, description) = match (self, level) {
            (Profession::RealEstate, PresetLevel::Loose) => {
                ("Loose Grouping", "Cast a wide net and group distant properties together")
            }
            (Profession::RealEstate, PresetLevel::Balanced) => {
                ("Balanced", "Standard approach with reasonable neighbourhoods")
            }
            (Profession::RealEstate, PresetLevel::Strict) => {
                ("Strict Grouping", "Only group very similar properties")
            }
            (Profession::Law, PresetLevel::Loose) => {
                ("Broad Categories", "Group loosely related cases together")
            }
            (Profession::Law, PresetLevel::Balanced) => ("Balanced", "Standard case categorisation"),
            (Profession::Law, PresetLevel::Strict) => {
                ("Precise Matching", "Only group highly similar cases")
            }
            (Profession::Journalism, PresetLevel::Loose) => {
                ("Broad Beats", "Group loosely related stories")
            }
            (Profession::Journalism, PresetLevel::Balanced) => {
                ("Balanced", "Standard beat organisation")
            }
            (Profession::Journalism, PresetLevel::Strict) => {
                ("Tight Topics", "Only group very similar articles")
            }
        };
        let (eps, min_pts) = level.values();

        Preset {
            level,
            title,
            description,
            eps,
            min_pts,
        }
    }

    /// Normalised eps of the balanced preset for this profession
    pub fn eps_factor(&self) -> f64 {
        match self {
            Profession::RealEstate => 0.09,
            Profession::Law => 0.11,
            Profession::Journalism => 0.08,
        }
    }

    /// Map a preset eps onto the unit square of a normalised dataset
    pub fn scaled_eps(&self, eps: f64) -> f64 {
        eps / REFERENCE_EPS * self.eps_factor()
    }

    /// Three Gaussian clusters of 18 points in domain units plus eight
    /// uniform outliers `O0`..`O7`.
    ///
    /// Cluster ids share one running counter (`P1`..`P54` for real estate,
    /// `C` for law, `A` for journalism).
    pub fn realistic_dataset<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Point> {
        // (cx, cy, sx, sy) per cluster, then the outlier box
        let (prefix, clusters, x_range, y_range) = match self {
            Profession::RealEstate => (
                "P",
                [(900.0, 45.0, 90.0, 8.0), (1600.0, 85.0, 130.0, 10.0), (2700.0, 130.0, 100.0, 10.0)],
                (500.0, 3000.0),
                (30.0, 150.0),
            ),
            Profession::Law => (
                "C",
                [(100.0, 3.0, 35.0, 0.6), (250.0, 6.0, 50.0, 0.8), (400.0, 8.5, 35.0, 0.6)],
                (30.0, 500.0),
                (1.0, 10.0),
            ),
            Profession::Journalism => (
                "A",
                [(600.0, 35.0, 100.0, 6.0), (1500.0, 55.0, 130.0, 8.0), (2500.0, 85.0, 80.0, 4.0)],
                (300.0, 3000.0),
                (20.0, 95.0),
            ),
        };

        let mut points = Vec::with_capacity(clusters.len() * CLUSTER_SIZE + OUTLIER_COUNT);
        for (cx, cy, sx, sy) in clusters {
            for _ in 0..CLUSTER_SIZE {
                let zx: f64 = StandardNormal.sample(rng);
                let zy: f64 = StandardNormal.sample(rng);
                let id = format!("{}{}", prefix, points.len() + 1);
                points.push(Point::new(id, cx + sx * zx, cy + sy * zy));
            }
        }
        for i in 0..OUTLIER_COUNT {
            let x = x_range.0 + rng.gen::<f64>() * (x_range.1 - x_range.0);
            let y = y_range.0 + rng.gen::<f64>() * (y_range.1 - y_range.0);
            points.push(Point::new(format!("O{}", i), x, y));
        }
        points
    }

    pub fn realistic_dataset_seeded(&self, seed: u64) -> Vec<Point> {
        self.realistic_dataset(&mut sample_rng(seed))
    }
}

/// Min-max normalise both axes to `[0, 1]`, keeping ids and order.
///
/// An axis with zero span maps to 0.
pub fn normalize(points: &[Point]) -> Vec<Point> {
    let bounds = points.iter().fold(None, |acc: Option<(f64, f64, f64, f64)>, p| {
        Some(match acc {
            None => (p.x, p.x, p.y, p.y),
            Some((x0, x1, y0, y1)) => (x0.min(p.x), x1.max(p.x), y0.min(p.y), y1.max(p.y)),
        })
    });
    let Some((x_min, x_max, y_min, y_max)) = bounds else {
        return Vec::new();
    };

    let scale = |v: f64, min: f64, max: f64| if max > min { (v - min) / (max - min) } else { 0.0 };
    points
        .iter()
        .map(|p| Point {
            id: p.id.clone(),
            x: scale(p.x, x_min, x_max),
            y: scale(p.y, y_min, y_max),
        })
        .collect()
}

/// Result of one preset on a normalised dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub preset: Preset,
    /// Eps actually used on the unit square
    pub scaled_eps: f64,
    pub stats: ClusteringStats,
    /// Noise point ids in input order
    pub noise: Vec<PointId>,
}

/// Run every preset of `profession` on `points` (domain units).
///
/// # Errors
///
/// Fails if the points are invalid.
pub fn compare_presets(profession: Profession, points: &[Point]) -> Result<Vec<ScenarioOutcome>> {
    // Min/max would silently skip a NaN coordinate
    validate_points(points)?;
    let normalized = normalize(points);
    debug!(%profession, points = points.len(), "Comparing presets");

    profession
        .presets()
        .into_iter()
        .map(|preset| {
            let scaled_eps = profession.scaled_eps(preset.eps);
            let params = DbscanParams::new(scaled_eps, preset.min_pts);
            let clustering = ClusterEngine::new(params).run(&normalized)?;
            let noise = clustering
                .noise_indices()
                .into_iter()
                .map(|i| normalized[i].id.clone())
                .collect();

            Ok(ScenarioOutcome {
                preset,
                scaled_eps,
                stats: ClusteringStats::from_clustering(&clustering),
                noise,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_values() {
        for profession in Profession::ALL {
            let presets = profession.presets();
            let values: Vec<(f64, usize)> = presets.iter().map(|p| (p.eps, p.min_pts)).collect();
            assert_eq!(values, vec![(12.0, 3), (7.0, 4), (4.0, 5)]);
            assert_eq!(presets[1].title, "Balanced");
        }

        assert_eq!(Profession::RealEstate.preset(PresetLevel::Strict).title, "Strict Grouping");
        assert_eq!(Profession::Law.preset(PresetLevel::Loose).title, "Broad Categories");
        assert_eq!(Profession::Journalism.preset(PresetLevel::Strict).title, "Tight Topics");
    }

    #[test]
    fn test_preset_level_parsing() {
        assert_eq!("Balanced".parse::<PresetLevel>().unwrap(), PresetLevel::Balanced);
        assert_eq!("tight".parse::<PresetLevel>().unwrap(), PresetLevel::Strict);
        assert_eq!("broad".parse::<PresetLevel>().unwrap(), PresetLevel::Loose);
        assert!(matches!(
            "medium".parse::<PresetLevel>(),
            Err(DbscanError::InvalidParameter { name: "preset", .. })
        ));
    }

    #[test]
    fn test_scaled_eps() {
        assert!((Profession::RealEstate.scaled_eps(7.0) - 0.09).abs() < 1e-12);
        assert!((Profession::Law.scaled_eps(7.0) - 0.11).abs() < 1e-12);
        assert!((Profession::Journalism.scaled_eps(14.0) - 0.16).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_maps_extremes_to_unit_square() {
        let points = vec![
            Point::new("a", 100.0, 5.0),
            Point::new("b", 300.0, 10.0),
            Point::new("c", 200.0, 7.5),
        ];
        let normalized = normalize(&points);

        assert_eq!(normalized[0], Point::new("a", 0.0, 0.0));
        assert_eq!(normalized[1], Point::new("b", 1.0, 1.0));
        assert_eq!(normalized[2], Point::new("c", 0.5, 0.5));
    }

    #[test]
    fn test_normalize_degenerate_axis_and_empty() {
        let points = vec![Point::new(0i64, 4.0, 2.0), Point::new(1i64, 8.0, 2.0)];
        let normalized = normalize(&points);
        assert_eq!(normalized[0].y, 0.0);
        assert_eq!(normalized[1].y, 0.0);
        assert_eq!(normalized[1].x, 1.0);

        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn test_realistic_dataset_layout() {
        for profession in Profession::ALL {
            let points = profession.realistic_dataset_seeded(5);
            assert_eq!(points.len(), 3 * CLUSTER_SIZE + OUTLIER_COUNT);
            assert!(validate_points(&points).is_ok());
            assert_eq!(points, profession.realistic_dataset_seeded(5));

            let outliers: Vec<String> = points[54..].iter().map(|p| p.id.to_string()).collect();
            assert_eq!(outliers[0], "O0");
            assert_eq!(outliers[7], "O7");
        }

        let points = Profession::RealEstate.realistic_dataset_seeded(5);
        assert_eq!(points[0].id.to_string(), "P1");
        assert_eq!(points[53].id.to_string(), "P54");
        assert_eq!(Profession::Law.realistic_dataset_seeded(5)[0].id.to_string(), "C1");
        assert_eq!(Profession::Journalism.realistic_dataset_seeded(5)[0].id.to_string(), "A1");
    }

    #[test]
    fn test_compare_presets_orders_by_coarseness() {
        for profession in Profession::ALL {
            let points = profession.realistic_dataset_seeded(2024);
            let outcomes = compare_presets(profession, &points).unwrap();

            assert_eq!(outcomes.len(), 3);
            assert_eq!(outcomes[0].preset.level, PresetLevel::Loose);
            assert!((outcomes[1].scaled_eps - profession.eps_factor()).abs() < 1e-12);

            // Larger eps and smaller min_pts never add noise
            assert!(outcomes[0].stats.noise_points <= outcomes[1].stats.noise_points);
            assert!(outcomes[1].stats.noise_points <= outcomes[2].stats.noise_points);
            assert!(outcomes[0].stats.num_clusters >= 1, "{} loose found nothing", profession);
            for outcome in &outcomes {
                assert_eq!(outcome.noise.len(), outcome.stats.noise_points);
            }
        }
    }

    #[test]
    fn test_compare_presets_rejects_invalid_points() {
        let points = vec![Point::new("x", f64::NAN, 0.0), Point::new("y", 1.0, 1.0)];
        assert!(matches!(
            compare_presets(Profession::Law, &points),
            Err(DbscanError::InvalidPoint { .. })
        ));
    }
}
