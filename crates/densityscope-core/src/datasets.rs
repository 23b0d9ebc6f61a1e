//! # Sample datasets
//!
//! Seeded point-cloud generators for demos, tests and benchmarks.
//!
//! ## Shapes
//! - `circle`: ring of points with ±20% radial spread
//! - `ellipse`: ring with independent x/y radii
//! - `line`: evenly spaced points with uniform jitter
//! - `crescent`: annulus with an off-centre bite taken out
//! - `blobs` / `scatter`: round clusters and uniform background noise
//!
//! Every generator draws from a caller-supplied RNG, so a fixed seed always
//! yields the same points.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::DbscanError;
use crate::params::DbscanParams;
use crate::types::Point;

/// RNG used by the sample scenes
pub type SampleRng = StdRng;

/// Create a deterministic RNG for sample generation
pub fn sample_rng(seed: u64) -> SampleRng {
    StdRng::seed_from_u64(seed)
}

fn text_id(prefix: &str, i: usize) -> String {
    format!("{}{}", prefix, i)
}

/// Points scattered around a circle of radius `r`
pub fn circle<R: Rng + ?Sized>(
    rng: &mut R,
    cx: f64,
    cy: f64,
    r: f64,
    n: usize,
    prefix: &str,
) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let a = rng.gen::<f64>() * PI * 2.0;
            let rr = r * (0.7 + rng.gen::<f64>() * 0.4);
            Point::new(text_id(prefix, i), cx + a.cos() * rr, cy + a.sin() * rr)
        })
        .collect()
}

/// Points scattered around an ellipse with radii `rx`, `ry`
pub fn ellipse<R: Rng + ?Sized>(
    rng: &mut R,
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    n: usize,
    prefix: &str,
) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let a = rng.gen::<f64>() * PI * 2.0;
            let rr = 0.8 + rng.gen::<f64>() * 0.4;
            Point::new(text_id(prefix, i), cx + a.cos() * rx * rr, cy + a.sin() * ry * rr)
        })
        .collect()
}

/// `n` evenly spaced points from `(x1, y1)` to `(x2, y2)`, each jittered by
/// up to `jitter / 2` on both axes
#[allow(clippy::too_many_arguments)]
pub fn line<R: Rng + ?Sized>(
    rng: &mut R,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    n: usize,
    jitter: f64,
    prefix: &str,
) -> Vec<Point> {
    let span = n.saturating_sub(1).max(1) as f64;
    (0..n)
        .map(|i| {
            let t = i as f64 / span;
            let jx = (rng.gen::<f64>() - 0.5) * jitter;
            let jy = (rng.gen::<f64>() - 0.5) * jitter;
            Point::new(
                text_id(prefix, i),
                x1 + (x2 - x1) * t + jx,
                y1 + (y2 - y1) * t + jy,
            )
        })
        .collect()
}

/// Up to `n` points in the annulus `r1..r2`, minus a bite of radius
/// `0.5 * r1` centred at `(cx + 0.35 * r1, cy)`.
///
/// Ids keep the index of the attempt, so gaps show which draws were dropped.
pub fn crescent<R: Rng + ?Sized>(
    rng: &mut R,
    cx: f64,
    cy: f64,
    r1: f64,
    r2: f64,
    n: usize,
    prefix: &str,
) -> Vec<Point> {
    let bite_x = cx + r1 * 0.35;
    let bite_r = r1 * 0.5;

    (0..n)
        .filter_map(|i| {
            let a = rng.gen::<f64>() * PI * 2.0;
            let rr = r1 + rng.gen::<f64>() * (r2 - r1);
            let x = cx + a.cos() * rr;
            let y = cy + a.sin() * rr;
            let outside_bite = (x - bite_x).powi(2) + (y - cy).powi(2) > bite_r.powi(2);
            outside_bite.then(|| Point::new(text_id(prefix, i), x, y))
        })
        .collect()
}

/// Round blobs of `per_cluster` points within `radius` of each centre.
///
/// Ids are integers continuing from `first_id`.
pub fn blobs<R: Rng + ?Sized>(
    rng: &mut R,
    centers: &[(f64, f64)],
    per_cluster: usize,
    radius: f64,
    first_id: usize,
) -> Vec<Point> {
    let mut points = Vec::with_capacity(centers.len() * per_cluster);
    for &(cx, cy) in centers {
        for _ in 0..per_cluster {
            let angle = rng.gen::<f64>() * PI * 2.0;
            let r = rng.gen::<f64>() * radius;
            let id = first_id + points.len();
            points.push(Point::new(id, cx + angle.cos() * r, cy + angle.sin() * r));
        }
    }
    points
}

/// `n` points uniform over `x_range` × `y_range`, integer ids from `first_id`
pub fn scatter<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    x_range: (f64, f64),
    y_range: (f64, f64),
    first_id: usize,
) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let x = x_range.0 + rng.gen::<f64>() * (x_range.1 - x_range.0);
            let y = y_range.0 + rng.gen::<f64>() * (y_range.1 - y_range.0);
            Point::new(first_id + i, x, y)
        })
        .collect()
}

/// Audience of the profession-specific sample datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profession {
    RealEstate,
    Law,
    Journalism,
}

impl Profession {
    pub const ALL: [Profession; 3] = [Profession::RealEstate, Profession::Law, Profession::Journalism];

    /// Shapes on a 0..100 canvas plus one or two named outliers
    pub fn dataset<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Point> {
        let mut points = Vec::new();
        match self {
            Profession::RealEstate => {
                points.extend(circle(rng, 24.0, 34.0, 6.0, 20, "RE-C1-"));
                points.extend(ellipse(rng, 62.0, 36.0, 10.0, 5.0, 22, "RE-E1-"));
                points.extend(crescent(rng, 46.0, 76.0, 6.0, 12.0, 18, "RE-CR-"));
                points.extend(line(rng, 72.0, 22.0, 90.0, 40.0, 14, 2.2, "RE-L1-"));
                points.push(Point::new("RE-OUT", 88.0, 12.0));
            }
            Profession::Law => {
                points.extend(circle(rng, 20.0, 24.0, 5.5, 18, "LAW-C1-"));
                points.extend(line(rng, 52.0, 18.0, 72.0, 36.0, 16, 3.0, "LAW-L1-"));
                points.extend(crescent(rng, 50.0, 72.0, 6.0, 12.0, 18, "LAW-CR-"));
                points.push(Point::new("LAW-OUT1", 92.0, 88.0));
                points.push(Point::new("LAW-OUT2", 6.0, 88.0));
            }
            Profession::Journalism => {
                points.extend(circle(rng, 25.0, 62.0, 6.0, 18, "J-C1-"));
                points.extend(ellipse(rng, 62.0, 28.0, 8.0, 4.0, 18, "J-E1-"));
                points.extend(crescent(rng, 68.0, 68.0, 6.0, 11.0, 16, "J-CR-"));
                points.push(Point::new("J-OUT", 8.0, 10.0));
            }
        }
        points
    }

    /// Starting slider values for the profession datasets
    pub fn suggested_params(&self) -> DbscanParams {
        DbscanParams::new(6.0, 4)
    }

    /// Ids of the hand-placed outliers in this profession's dataset
    pub fn outlier_ids(&self) -> &'static [&'static str] {
        match self {
            Profession::RealEstate => &["RE-OUT"],
            Profession::Law => &["LAW-OUT1", "LAW-OUT2"],
            Profession::Journalism => &["J-OUT"],
        }
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profession::RealEstate => f.write_str("real-estate"),
            Profession::Law => f.write_str("law"),
            Profession::Journalism => f.write_str("journalism"),
        }
    }
}

impl FromStr for Profession {
    type Err = DbscanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(&['_', ' '][..], "-").as_str() {
            "real-estate" | "realestate" => Ok(Profession::RealEstate),
            "law" | "legal" => Ok(Profession::Law),
            "journalism" | "news" => Ok(Profession::Journalism),
            _ => Err(DbscanError::UnknownProfession(s.to_string())),
        }
    }
}

/// Id of the hand-placed tutorial outlier at (800, 70)
pub const TUTORIAL_OUTLIER_ID: &str = "OUT-1";

/// A complete sample scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Scene {
    /// One of the profession datasets
    Profession(Profession),
    /// Four shapes (circle, ellipse, crescent, line) on a 900x440 canvas
    /// with up to six random noise points and the fixed outlier `OUT-1`
    Tutorial,
    /// Three random blobs plus ten scattered points on an 800x600 canvas
    Live,
}

impl Default for Scene {
    fn default() -> Self {
        Scene::Profession(Profession::RealEstate)
    }
}

impl Scene {
    /// Generate the scene's points
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Point> {
        match self {
            Scene::Profession(profession) => profession.dataset(rng),
            Scene::Tutorial => {
                let mut points = Vec::new();
                points.extend(circle(rng, 220.0, 160.0, 64.0, 18, "C1-"));
                points.extend(ellipse(rng, 560.0, 120.0, 100.0, 42.0, 20, "C2-"));
                points.extend(crescent(rng, 420.0, 300.0, 48.0, 84.0, 18, "C3-"));
                points.extend(line(rng, 160.0, 320.0, 320.0, 380.0, 18, 12.0, "C4-"));
                for i in 0..6 {
                    if rng.gen::<f64>() < 0.5 {
                        let x = rng.gen::<f64>() * 880.0 + 10.0;
                        let y = rng.gen::<f64>() * 420.0 + 10.0;
                        points.push(Point::new(format!("NOISE-{}", i), x, y));
                    }
                }
                points.push(Point::new(TUTORIAL_OUTLIER_ID, 800.0, 70.0));
                points
            }
            Scene::Live => {
                let centers: Vec<(f64, f64)> = (0..3)
                    .map(|_| {
                        (
                            150.0 + rng.gen::<f64>() * 500.0,
                            150.0 + rng.gen::<f64>() * 300.0,
                        )
                    })
                    .collect();
                let mut points = blobs(rng, &centers, 20, 60.0, 0);
                let first_noise = points.len();
                points.extend(scatter(rng, 10, (100.0, 700.0), (100.0, 500.0), first_noise));
                points
            }
        }
    }

    /// Generate the scene from a seed
    pub fn generate_seeded(&self, seed: u64) -> Vec<Point> {
        self.generate(&mut sample_rng(seed))
    }

    /// Starting parameters that separate the scene's shapes
    pub fn suggested_params(&self) -> DbscanParams {
        match self {
            Scene::Profession(profession) => profession.suggested_params(),
            Scene::Tutorial => DbscanParams::new(55.0, 6),
            Scene::Live => DbscanParams::new(50.0, 4),
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scene::Profession(profession) => write!(f, "{}", profession),
            Scene::Tutorial => f.write_str("tutorial"),
            Scene::Live => f.write_str("live"),
        }
    }
}

impl From<Scene> for String {
    fn from(scene: Scene) -> Self {
        scene.to_string()
    }
}

impl TryFrom<String> for Scene {
    type Error = DbscanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for Scene {
    type Err = DbscanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tutorial" => Ok(Scene::Tutorial),
            "live" => Ok(Scene::Live),
            other => other
                .parse::<Profession>()
                .map(Scene::Profession)
                .map_err(|_| DbscanError::UnknownScene(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_points;

    #[test]
    fn test_circle_radius_band() {
        let mut rng = sample_rng(7);
        let points = circle(&mut rng, 10.0, 20.0, 5.0, 50, "C-");
        assert_eq!(points.len(), 50);
        for p in &points {
            let r = (p.x - 10.0).hypot(p.y - 20.0);
            assert!(r >= 3.5 - 1e-9 && r <= 5.5 + 1e-9, "radius {} out of band", r);
        }
        assert_eq!(points[3].id.to_string(), "C-3");
    }

    #[test]
    fn test_line_endpoints_within_jitter() {
        let mut rng = sample_rng(1);
        let points = line(&mut rng, 0.0, 0.0, 10.0, 0.0, 11, 2.0, "L-");
        assert_eq!(points.len(), 11);
        for (i, p) in points.iter().enumerate() {
            assert!((p.x - i as f64).abs() <= 1.0);
            assert!(p.y.abs() <= 1.0);
        }
    }

    #[test]
    fn test_single_point_line_does_not_divide_by_zero() {
        let mut rng = sample_rng(1);
        let points = line(&mut rng, 3.0, 3.0, 9.0, 9.0, 1, 0.0, "L-");
        assert_eq!(points, vec![Point::new("L-0", 3.0, 3.0)]);
    }

    #[test]
    fn test_crescent_avoids_bite() {
        let mut rng = sample_rng(3);
        let points = crescent(&mut rng, 0.0, 0.0, 6.0, 12.0, 200, "CR-");
        assert!(points.len() <= 200);
        for p in &points {
            let r = p.x.hypot(p.y);
            assert!(r >= 6.0 - 1e-9 && r <= 12.0 + 1e-9);
            assert!((p.x - 2.1).powi(2) + p.y.powi(2) > 9.0);
        }
    }

    #[test]
    fn test_same_seed_same_points() {
        for scene in [
            Scene::Profession(Profession::Law),
            Scene::Tutorial,
            Scene::Live,
        ] {
            assert_eq!(scene.generate_seeded(42), scene.generate_seeded(42));
        }
        assert_ne!(Scene::Live.generate_seeded(1), Scene::Live.generate_seeded(2));
    }

    #[test]
    fn test_profession_datasets_are_valid_and_carry_outliers() {
        for profession in Profession::ALL {
            let points = profession.dataset(&mut sample_rng(11));
            assert!(validate_points(&points).is_ok());
            for outlier in profession.outlier_ids() {
                assert!(points.iter().any(|p| p.id.to_string() == *outlier));
            }
        }
    }

    #[test]
    fn test_live_scene_layout() {
        let points = Scene::Live.generate_seeded(5);
        assert_eq!(points.len(), 70);
        assert!(validate_points(&points).is_ok());
        assert_eq!(points[69].id, crate::types::PointId::Int(69));
    }

    #[test]
    fn test_tutorial_outlier_is_noise_with_suggested_params() {
        for seed in [1, 7, 2024] {
            let points = Scene::Tutorial.generate_seeded(seed);
            let idx = points
                .iter()
                .position(|p| p.id.to_string() == TUTORIAL_OUTLIER_ID)
                .unwrap();
            assert_eq!((points[idx].x, points[idx].y), (800.0, 70.0));

            let clustering = crate::engine::ClusterEngine::new(Scene::Tutorial.suggested_params())
                .run(&points)
                .unwrap();
            assert_eq!(clustering.labels[idx], crate::types::Label::Noise);
        }
    }

    #[test]
    fn test_scene_parsing() {
        assert_eq!("tutorial".parse::<Scene>().unwrap(), Scene::Tutorial);
        assert_eq!(
            "Real Estate".parse::<Scene>().unwrap(),
            Scene::Profession(Profession::RealEstate)
        );
        assert_eq!("law".parse::<Profession>().unwrap(), Profession::Law);
        assert!(matches!(
            "astronomy".parse::<Scene>(),
            Err(DbscanError::UnknownScene(_))
        ));
        assert_eq!(Scene::Tutorial.to_string(), "tutorial");
        assert_eq!(Scene::default().to_string(), "real-estate");
    }
}
