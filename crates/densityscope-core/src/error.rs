//! Error types for densityscope

use thiserror::Error;

use crate::types::PointId;

/// Result type alias for clustering operations
pub type Result<T> = std::result::Result<T, DbscanError>;

/// Clustering errors
///
/// Every variant is raised before any clustering work starts, so a failed
/// call never leaves a partial result behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DbscanError {
    /// A clustering parameter is out of its domain
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A point cannot take part in distance computations
    #[error("Invalid point '{id}': {reason}")]
    InvalidPoint { id: PointId, reason: String },

    /// Two input points share the same identifier
    #[error("Duplicate point id: {id}")]
    DuplicatePointId { id: PointId },

    /// A clustering result is inconsistent, or does not belong to the
    /// points it is paired with
    #[error("Invalid clustering: {0}")]
    InvalidClustering(String),

    /// A parameter sweep was requested over an empty grid
    #[error("Parameter sweep needs at least one eps and one min_pts value")]
    EmptySweep,

    /// Profession name not recognised
    #[error("Unknown profession: {0}")]
    UnknownProfession(String),

    /// Scene name not recognised
    #[error("Unknown scene: {0}")]
    UnknownScene(String),
}

impl DbscanError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Create an invalid point error
    pub fn invalid_point(id: PointId, reason: impl Into<String>) -> Self {
        Self::InvalidPoint {
            id,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_culprit() {
        let err = DbscanError::invalid_parameter("eps", "must be >= 0, got -1");
        assert_eq!(err.to_string(), "Invalid parameter 'eps': must be >= 0, got -1");

        let err = DbscanError::invalid_point(PointId::from("RE-OUT"), "x is NaN");
        assert_eq!(err.to_string(), "Invalid point 'RE-OUT': x is NaN");

        let err = DbscanError::DuplicatePointId { id: PointId::from(7i64) };
        assert_eq!(err.to_string(), "Duplicate point id: 7");
    }
}
