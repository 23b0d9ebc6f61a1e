//! DBSCAN parameters

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DbscanError, Result};
use crate::validation::validate_params;

/// How a point's own position counts towards the MinPts threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreRule {
    /// Core iff at least `min_pts` *other* points lie within eps
    #[default]
    ExcludeSelf,
    /// Core iff the point plus its neighbours number at least `min_pts`
    IncludeSelf,
}

impl CoreRule {
    /// Whether a point with `neighbor_count` other points within eps is core
    #[inline]
    pub fn is_core(&self, neighbor_count: usize, min_pts: usize) -> bool {
        match self {
            CoreRule::ExcludeSelf => neighbor_count >= min_pts,
            CoreRule::IncludeSelf => neighbor_count + 1 >= min_pts,
        }
    }
}

impl fmt::Display for CoreRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreRule::ExcludeSelf => f.write_str("exclude_self"),
            CoreRule::IncludeSelf => f.write_str("include_self"),
        }
    }
}

impl FromStr for CoreRule {
    type Err = DbscanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "exclude_self" | "exclude" => Ok(CoreRule::ExcludeSelf),
            "include_self" | "include" => Ok(CoreRule::IncludeSelf),
            other => Err(DbscanError::invalid_parameter(
                "core_rule",
                format!("expected 'exclude_self' or 'include_self', got '{}'", other),
            )),
        }
    }
}

/// Parameters of one clustering run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DbscanParams {
    /// Neighbourhood radius (inclusive)
    pub eps: f64,
    /// Minimum neighbourhood size for a core point
    pub min_pts: usize,
    /// Whether the point itself counts towards `min_pts`
    #[serde(default)]
    pub core_rule: CoreRule,
}

impl Default for DbscanParams {
    fn default() -> Self {
        Self {
            eps: 6.0,
            min_pts: 4,
            core_rule: CoreRule::ExcludeSelf,
        }
    }
}

impl DbscanParams {
    /// Create parameters with the canonical exclude-self rule.
    ///
    /// Values are NOT checked here - use `validate()` or let the engine do it.
    pub fn new(eps: f64, min_pts: usize) -> Self {
        Self {
            eps,
            min_pts,
            core_rule: CoreRule::ExcludeSelf,
        }
    }

    /// Build parameters from plain numbers, as a slider or form supplies them.
    ///
    /// # Errors
    ///
    /// Returns `DbscanError::InvalidParameter` if `min_pts` is not a finite
    /// whole number >= 1, or if `eps` is out of its domain.
    pub fn from_raw(eps: f64, min_pts: f64) -> Result<Self> {
        if !min_pts.is_finite() || min_pts.fract() != 0.0 {
            return Err(DbscanError::invalid_parameter(
                "min_pts",
                format!("must be a whole number, got {}", min_pts),
            ));
        }
        if min_pts < 1.0 {
            return Err(DbscanError::invalid_parameter(
                "min_pts",
                format!("must be >= 1, got {}", min_pts),
            ));
        }

        let params = Self::new(eps, min_pts as usize);
        params.validate()?;
        Ok(params)
    }

    /// Set the core-point rule.
    #[must_use]
    pub fn with_core_rule(mut self, core_rule: CoreRule) -> Self {
        self.core_rule = core_rule;
        self
    }

    /// Set eps.
    #[must_use]
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Set min_pts.
    #[must_use]
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    /// Validate parameters.
    ///
    /// # Errors
    ///
    /// Returns `DbscanError::InvalidParameter` if eps is negative or not
    /// finite, or if min_pts is zero.
    pub fn validate(&self) -> Result<()> {
        validate_params(self)
    }

    /// Whether a point with `neighbor_count` other points within eps is core
    #[inline]
    pub fn is_core(&self, neighbor_count: usize) -> bool {
        self.core_rule.is_core(neighbor_count, self.min_pts)
    }
}
