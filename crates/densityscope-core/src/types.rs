//! Point, label and role types shared by the engine and its collaborators

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a point, unique within one clustering run.
///
/// Sample datasets use text ids such as `"RE-C1-3"`; uploaded or generated
/// point clouds often use plain integers. Both serialize untagged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    Int(i64),
    Text(String),
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointId::Int(id) => write!(f, "{}", id),
            PointId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for PointId {
    fn from(id: i64) -> Self {
        PointId::Int(id)
    }
}

impl From<usize> for PointId {
    fn from(id: usize) -> Self {
        PointId::Int(id as i64)
    }
}

impl From<&str> for PointId {
    fn from(id: &str) -> Self {
        PointId::Text(id.to_string())
    }
}

impl From<String> for PointId {
    fn from(id: String) -> Self {
        PointId::Text(id)
    }
}

/// A 2-D input point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Unique identifier
    pub id: PointId,
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(id: impl Into<PointId>, x: f64, y: f64) -> Self {
        Self { id: id.into(), x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Cluster assignment of one point.
///
/// Serializes as a plain integer: `-1` for noise, the cluster id otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum Label {
    /// Not density-reachable from any core point
    Noise,
    /// Member of the cluster with this id (ids start at 0)
    Cluster(usize),
}

impl Label {
    /// Sentinel used for noise in integer form
    pub const NOISE_SENTINEL: i64 = -1;

    /// Integer form of the label (`-1` for noise)
    pub fn as_i64(&self) -> i64 {
        match self {
            Label::Noise => Self::NOISE_SENTINEL,
            Label::Cluster(id) => *id as i64,
        }
    }

    /// Cluster id, if any
    pub fn cluster_id(&self) -> Option<usize> {
        match self {
            Label::Noise => None,
            Label::Cluster(id) => Some(*id),
        }
    }

    pub fn is_noise(&self) -> bool {
        matches!(self, Label::Noise)
    }
}

impl From<Label> for i64 {
    fn from(label: Label) -> Self {
        label.as_i64()
    }
}

impl TryFrom<i64> for Label {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            Label::NOISE_SENTINEL => Ok(Label::Noise),
            v if v >= 0 => Ok(Label::Cluster(v as usize)),
            v => Err(format!("label must be -1 (noise) or a cluster id >= 0, got {}", v)),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Noise => f.write_str("noise"),
            Label::Cluster(id) => write!(f, "cluster {}", id),
        }
    }
}

/// Density role of a point after a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointRole {
    /// Has at least MinPts neighbours within eps
    Core,
    /// Within eps of a core point but not core itself
    Border,
    /// Neither core nor border
    Noise,
}

impl fmt::Display for PointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointRole::Core => f.write_str("core"),
            PointRole::Border => f.write_str("border"),
            PointRole::Noise => f.write_str("noise"),
        }
    }
}
