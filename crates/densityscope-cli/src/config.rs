//! Configuration for the densityscope CLI
//!
//! Every field is optional in the TOML file. Missing clustering parameters
//! fall back to the scene's suggested values, and command-line flags win over
//! anything read from the file.

use anyhow::{Context, Result};
use densityscope_core::{CoreRule, DbscanParams, Scene};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default seed for scene generation
pub const DEFAULT_SEED: u64 = 42;

/// Eps multipliers applied to the scene's suggested eps when no sweep grid
/// is configured
const EPS_FACTORS: [f64; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// Main CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityscopeConfig {
    /// Clustering parameters
    pub clustering: ClusteringConfig,
    /// Sample scene selection
    pub dataset: DatasetConfig,
    /// Parameter sweep grid
    pub sweep: SweepConfig,
}

/// Clustering configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Neighbourhood radius; the scene's suggestion when unset
    pub eps: Option<f64>,
    /// Neighbour threshold; the scene's suggestion when unset
    pub min_pts: Option<usize>,
    pub core_rule: CoreRule,
}

/// Dataset configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub scene: Scene,
    pub seed: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            scene: Scene::default(),
            seed: DEFAULT_SEED,
        }
    }
}

/// Sweep configuration. Empty lists are derived from the scene's suggested
/// parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub eps_values: Vec<f64>,
    pub min_pts_values: Vec<usize>,
}

impl SweepConfig {
    /// Resolve the grid axes, filling empty ones around `suggested`
    pub fn grid(&self, suggested: &DbscanParams) -> (Vec<f64>, Vec<usize>) {
        let eps_values = if self.eps_values.is_empty() {
            EPS_FACTORS.iter().map(|f| suggested.eps * f).collect()
        } else {
            self.eps_values.clone()
        };

        let min_pts_values = if self.min_pts_values.is_empty() {
            let low = suggested.min_pts.saturating_sub(2).max(1);
            (low..=suggested.min_pts + 2).collect()
        } else {
            self.min_pts_values.clone()
        };

        (eps_values, min_pts_values)
    }
}

impl DensityscopeConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `path` when given, otherwise the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Clustering parameters for the configured scene. Not validated here;
    /// the engine rejects bad values.
    pub fn params(&self) -> DbscanParams {
        let suggested = self.dataset.scene.suggested_params();
        DbscanParams::new(
            self.clustering.eps.unwrap_or(suggested.eps),
            self.clustering.min_pts.unwrap_or(suggested.min_pts),
        )
        .with_core_rule(self.clustering.core_rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use densityscope_core::Profession;

    #[test]
    fn test_default_uses_scene_suggestions() {
        let config = DensityscopeConfig::default();
        assert_eq!(config.dataset.seed, DEFAULT_SEED);
        assert_eq!(config.params(), Scene::default().suggested_params());
    }

    #[test]
    fn test_partial_toml() {
        let config = DensityscopeConfig::from_toml_str(
            r#"
            [clustering]
            min_pts = 3
            core_rule = "include_self"

            [dataset]
            scene = "tutorial"
            "#,
        )
        .unwrap();

        assert_eq!(config.dataset.scene, Scene::Tutorial);
        assert_eq!(config.dataset.seed, DEFAULT_SEED);

        let params = config.params();
        assert_eq!(params.eps, 55.0);
        assert_eq!(params.min_pts, 3);
        assert_eq!(params.core_rule, CoreRule::IncludeSelf);
    }

    #[test]
    fn test_profession_scene_name() {
        let config = DensityscopeConfig::from_toml_str("[dataset]\nscene = \"law\"\nseed = 9\n").unwrap();
        assert_eq!(config.dataset.scene, Scene::Profession(Profession::Law));
        assert_eq!(config.dataset.seed, 9);
    }

    #[test]
    fn test_unknown_scene_is_rejected() {
        assert!(DensityscopeConfig::from_toml_str("[dataset]\nscene = \"mars\"\n").is_err());
    }

    #[test]
    fn test_sweep_grid_defaults() {
        let sweep = SweepConfig::default();
        let (eps, min_pts) = sweep.grid(&DbscanParams::new(10.0, 4));
        assert_eq!(eps, vec![5.0, 7.5, 10.0, 12.5, 15.0, 20.0]);
        assert_eq!(min_pts, vec![2, 3, 4, 5, 6]);

        let (_, min_pts) = sweep.grid(&DbscanParams::new(10.0, 1));
        assert_eq!(min_pts, vec![1, 2, 3]);

        let explicit = SweepConfig {
            eps_values: vec![1.0],
            min_pts_values: vec![7],
        };
        assert_eq!(explicit.grid(&DbscanParams::new(10.0, 4)), (vec![1.0], vec![7]));
    }
}
