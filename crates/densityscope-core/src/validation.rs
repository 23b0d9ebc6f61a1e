//! Input validation for clustering runs.
//!
//! Fails fast with descriptive errors; nothing here allocates results.

use std::collections::HashSet;

use crate::error::{DbscanError, Result};
use crate::params::DbscanParams;
use crate::types::Point;

/// Validate eps (must be finite and >= 0).
pub fn validate_eps(eps: f64) -> Result<()> {
    if eps.is_nan() || eps.is_infinite() {
        return Err(DbscanError::invalid_parameter(
            "eps",
            format!("must be a finite number, got {}", eps),
        ));
    }
    if eps < 0.0 {
        return Err(DbscanError::invalid_parameter(
            "eps",
            format!("must be >= 0, got {}", eps),
        ));
    }
    Ok(())
}

/// Validate min_pts (must be >= 1).
pub fn validate_min_pts(min_pts: usize) -> Result<()> {
    if min_pts == 0 {
        return Err(DbscanError::invalid_parameter("min_pts", "must be >= 1, got 0"));
    }
    Ok(())
}

/// Validate a full parameter set.
pub fn validate_params(params: &DbscanParams) -> Result<()> {
    validate_eps(params.eps)?;
    validate_min_pts(params.min_pts)
}

/// Validate points: finite coordinates and unique ids.
///
/// Reports the first offending point in input order.
pub fn validate_points(points: &[Point]) -> Result<()> {
    let mut seen = HashSet::with_capacity(points.len());

    for point in points {
        if !point.x.is_finite() {
            return Err(DbscanError::invalid_point(
                point.id.clone(),
                format!("x coordinate is not finite ({})", point.x),
            ));
        }
        if !point.y.is_finite() {
            return Err(DbscanError::invalid_point(
                point.id.clone(),
                format!("y coordinate is not finite ({})", point.y),
            ));
        }
        if !seen.insert(&point.id) {
            return Err(DbscanError::DuplicatePointId {
                id: point.id.clone(),
            });
        }
    }

    Ok(())
}
